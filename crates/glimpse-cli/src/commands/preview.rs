use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use glimpse_core::geometry::{displacement_map, Projection};
use glimpse_core::io::image_io::save_image;
use glimpse_core::io::ser::SerReader;
use glimpse_core::remap::warp_frame;

#[derive(Clone, ValueEnum)]
pub enum ProjectionArg {
    Gnomonic,
    Stereographic,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Pan angle in degrees
    #[arg(long, default_value = "0.0")]
    pub pan: f64,

    /// Tilt angle in degrees
    #[arg(long, default_value = "0.0")]
    pub tilt: f64,

    /// Source frame index to reproject
    #[arg(long, default_value = "0")]
    pub frame: usize,

    /// Output frame width in pixels
    #[arg(long, default_value = "512")]
    pub width: usize,

    /// Output frame height in pixels
    #[arg(long, default_value = "512")]
    pub height: usize,

    /// Projection model
    #[arg(long, value_enum, default_value = "stereographic")]
    pub projection: ProjectionArg,

    /// Output image path (PNG or TIFF)
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    let frame = reader.read_frame(args.frame)?;

    let projection = match args.projection {
        ProjectionArg::Gnomonic => Projection::Gnomonic,
        ProjectionArg::Stereographic => Projection::Stereographic,
    };

    let map = displacement_map(
        projection,
        args.tilt,
        args.pan,
        (args.height, args.width),
        (frame.height(), frame.width()),
    );
    let warped = warp_frame(&frame, &map);
    save_image(&warped, &args.output)?;

    println!(
        "Frame {} at pan {}°, tilt {}° saved to {}",
        args.frame,
        args.pan,
        args.tilt,
        args.output.display()
    );

    Ok(())
}
