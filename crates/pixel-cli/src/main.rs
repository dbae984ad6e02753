//! pixel - Color cube filter CLI
//!
//! Applies LUT grades to PNG images and renders filmstrip previews.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use pixel_core::ColorSpaceId;
use pixel_engine::EngineConfig;
use pixel_lut::Interpolation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod assets;
mod commands;

#[derive(Parser)]
#[command(name = "pixel")]
#[command(author, version, about = "Color cube filter CLI")]
#[command(long_about = "
Applies 3D LUT color grades to images.

LUTs are read from packed PNG images (LUT_<dim>_<Name>.png) or .cube files.

Examples:
  pixel apply photo.png -l luts/LUT_64_Warm.png -o warm.png
  pixel apply photo.png -l teal.cube --amount 0.5 -o teal.png
  pixel apply photo.png -l teal.cube -i tetrahedral -o teal.png
  pixel identity -d 33 -o LUT_33_Identity.png
  pixel filmstrip photo.png --luts luts/ -o previews/ --thumb 256
  pixel list --luts luts/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Render cache budget in megabytes (0 disables the cache)
    #[arg(long, global = true)]
    cache_mb: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a LUT to an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Write an identity packed LUT image
    Identity(IdentityArgs),

    /// Render one graded preview per available LUT
    #[command(visible_alias = "fs")]
    Filmstrip(FilmstripArgs),

    /// List available LUTs
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// LUT file (.png packed LUT or .cube)
    #[arg(short, long)]
    lut: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Cube dimension of a packed PNG LUT (default: from LUT_<dim>_ file name)
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Filter strength in [0, 1]
    #[arg(short, long, default_value = "1.0")]
    amount: f64,

    /// LUT alpha scale in [0, 1]
    #[arg(short, long, default_value = "1.0")]
    blend_alpha: f64,

    /// Working color space for untagged input: srgb, device, linear
    #[arg(long, default_value = "srgb")]
    color_space: ColorSpaceId,

    /// Cube sampling: nearest, linear, tetrahedral
    #[arg(short, long, default_value = "linear")]
    interpolation: Interpolation,
}

#[derive(Args)]
struct IdentityArgs {
    /// Cube dimension
    #[arg(short, long, default_value = "33")]
    dimension: usize,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct FilmstripArgs {
    /// Input image
    input: PathBuf,

    /// Directory of LUT assets
    #[arg(long)]
    luts: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Downscale previews so the longest edge is at most this many pixels
    #[arg(long)]
    thumb: Option<u32>,

    /// Working color space for LUT assets: srgb, device, linear
    #[arg(long, default_value = "srgb")]
    color_space: ColorSpaceId,
}

#[derive(Args)]
struct ListArgs {
    /// Directory of LUT assets
    #[arg(long)]
    luts: PathBuf,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn engine_config(cli: &Cli) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    if cli.threads > 0 {
        config = config.preheat_threads(cli.threads);
    }
    match cli.cache_mb {
        Some(0) => config.cache_enabled(false),
        Some(mb) => config.cache_budget_mb(mb),
        None => config,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = engine_config(&cli);
    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, &config, cli.verbose),
        Commands::Identity(args) => commands::identity::run(args, cli.verbose),
        Commands::Filmstrip(args) => commands::filmstrip::run(args, config, cli.verbose),
        Commands::List(args) => commands::list::run(args, cli.verbose),
    }
}
