use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glimpse_core::asset::VideoAsset;
use glimpse_core::config::DirectorConfig;
use glimpse_core::split::split_video;

#[derive(Args)]
pub struct SplitArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Segment length in seconds
    #[arg(long, default_value = "5.0")]
    pub length: f64,

    /// Frame rate, when the source has no timestamp trailer
    #[arg(long)]
    pub fps: Option<f64>,
}

pub fn run(args: &SplitArgs) -> Result<()> {
    let asset = VideoAsset::from_ser(&args.file, args.fps)?;
    let config = DirectorConfig {
        split_length_secs: args.length,
        ..Default::default()
    };

    let workdir = asset.ensure_workdir()?;
    let segments = split_video(&asset, &config, &workdir)?;

    println!("{} segment(s) written to {}", segments.len(), workdir.display());
    println!("{:>5}  {:>8}  Path", "Index", "Frames");
    for segment in &segments {
        println!(
            "{:>5}  {:>8}  {}",
            segment.index,
            segment.frame_count,
            segment.path.display()
        );
    }

    Ok(())
}
