mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glimpse", about = "Automatic virtual camera direction for 360° video")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show SER file metadata
    Info(commands::info::InfoArgs),
    /// Split a source video into fixed-length segments
    Split(commands::split::SplitArgs),
    /// Reproject all segments under one fixed direction
    Compose(commands::compose::ComposeArgs),
    /// Reproject a single frame to a PNG/TIFF still
    Preview(commands::preview::PreviewArgs),
    /// Run the full direction pipeline
    Direct(commands::direct::DirectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Split(args) => commands::split::run(args),
        Commands::Compose(args) => commands::compose::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Direct(args) => commands::direct::run(args),
    }
}
