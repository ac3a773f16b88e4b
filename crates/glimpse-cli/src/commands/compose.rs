use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use glimpse_core::asset::VideoAsset;
use glimpse_core::compose::compose_views;
use glimpse_core::config::DirectorConfig;
use glimpse_core::split::split_video;

#[derive(Args)]
pub struct ComposeArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Tilt index into the configured angle grid
    #[arg(long)]
    pub tilt_index: usize,

    /// Pan index into the configured angle grid
    #[arg(long)]
    pub pan_index: usize,

    /// Segment length in seconds
    #[arg(long, default_value = "5.0")]
    pub length: f64,

    /// Frame rate, when the source has no timestamp trailer
    #[arg(long)]
    pub fps: Option<f64>,
}

pub fn run(args: &ComposeArgs) -> Result<()> {
    let asset = VideoAsset::from_ser(&args.file, args.fps)?;
    let config = DirectorConfig {
        split_length_secs: args.length,
        ..Default::default()
    };

    if args.tilt_index >= config.grid.phi_count() {
        bail!(
            "tilt index {} out of range (grid has {} tilt angles)",
            args.tilt_index,
            config.grid.phi_count()
        );
    }
    if args.pan_index >= config.grid.lambda_count() {
        bail!(
            "pan index {} out of range (grid has {} pan angles)",
            args.pan_index,
            config.grid.lambda_count()
        );
    }

    let workdir = asset.ensure_workdir()?;
    let segments = split_video(&asset, &config, &workdir)?;
    let views = compose_views(
        &asset,
        &segments,
        args.tilt_index,
        args.pan_index,
        &config,
        &workdir,
    )?;

    println!(
        "{} view(s) at tilt {}°, pan {}°:",
        views.len(),
        config.grid.phi(args.tilt_index),
        config.grid.lambda(args.pan_index)
    );
    for view in &views {
        println!("  {}", view.path.display());
    }

    Ok(())
}
