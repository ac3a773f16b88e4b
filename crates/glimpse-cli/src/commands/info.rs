use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glimpse_core::io::ser::SerReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    let header = &reader.header;

    println!("File:        {}", args.file.display());
    println!("Frames:      {}", reader.frame_count());
    println!("Dimensions:  {}x{}", header.width, header.height);
    println!("Bit depth:   {}", header.pixel_depth);
    println!("Color mode:  {:?}", header.color_mode());

    match reader.derived_fps() {
        Some(fps) => println!("Frame rate:  {:.2} fps (from timestamps)", fps),
        None => println!("Frame rate:  unknown (no timestamp trailer)"),
    }

    if !header.observer.is_empty() {
        println!("Observer:    {}", header.observer);
    }
    if !header.instrument.is_empty() {
        println!("Instrument:  {}", header.instrument);
    }

    let frame_bytes = header.frame_byte_size();
    let total_mb = (frame_bytes * reader.frame_count()) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}
