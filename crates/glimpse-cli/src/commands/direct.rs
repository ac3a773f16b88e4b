use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use glimpse_core::asset::VideoAsset;
use glimpse_core::config::DirectorConfig;
use glimpse_core::pipeline::{run_director_reported, DirectorStage, ProgressReporter};
use glimpse_core::score::LaplacianScorer;

use crate::summary::{print_direct_summary, print_path_summary};

#[derive(Args)]
pub struct DirectArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Director config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Segment length in seconds
    #[arg(long, default_value = "5.0")]
    pub length: f64,

    /// Weight of the angular smoothness penalty
    #[arg(long, default_value = "0.01")]
    pub smoothness: f64,

    /// Glimpse frame width in pixels
    #[arg(long, default_value = "512")]
    pub width: usize,

    /// Glimpse frame height in pixels
    #[arg(long, default_value = "512")]
    pub height: usize,

    /// Frame rate, when the source has no timestamp trailer
    #[arg(long)]
    pub fps: Option<f64>,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: DirectorStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        self.pb.set_length(total_items.unwrap_or(1) as u64);
        self.pb.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        if let Some(len) = self.pb.length() {
            self.pb.set_position(len);
        }
    }
}

pub fn run(args: &DirectArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid director config")?
    } else {
        DirectorConfig {
            glimpse_width: args.width,
            glimpse_height: args.height,
            split_length_secs: args.length,
            smoothness_weight: args.smoothness,
            ..Default::default()
        }
    };

    let asset = VideoAsset::from_ser(&args.file, args.fps)?;
    print_direct_summary(&asset, &config);

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { pb: pb.clone() });

    let result = run_director_reported(&asset, &config, &LaplacianScorer, reporter)?;

    pb.finish_with_message("Done");
    print_path_summary(&result, &config);

    Ok(())
}
