use clap::Parser;
use std::path::PathBuf;

use sizecompare::types::OutputFormat;
use sizecompare::{IsolationStrategy, ResizeFilter};

#[derive(Parser, Debug)]
#[command(
    name = "sizecompare",
    version,
    about = "Side-by-side physical size comparison of two product photos"
)]
pub struct CliArgs {
    /// Image placed on the left
    #[arg(short, long)]
    pub left: PathBuf,

    /// Real-world height of the left product (any unit, same as --right-height)
    #[arg(long)]
    pub left_height: f64,

    /// Image placed on the right
    #[arg(short, long)]
    pub right: PathBuf,

    /// Real-world height of the right product
    #[arg(long)]
    pub right_height: f64,

    /// Output filename
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (png keeps transparency, jpeg is flattened onto --background)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::PNG)]
    pub format: OutputFormat,

    /// JSON preset with comparison parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Background deviation threshold in intensity units (0-255)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Background isolation strategy
    #[arg(long, value_enum)]
    pub isolation: Option<IsolationStrategy>,

    /// Resampling filter used when scaling to the target height
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Output pixels per unit of the given heights
    #[arg(long)]
    pub pixels_per_unit: Option<f64>,

    /// Drop transparent rows below each product before scaling
    #[arg(long, default_value_t = false)]
    pub align_opaque_bottom: bool,

    /// Process both images concurrently
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Write every intermediate stage as PNG into this directory
    #[arg(long)]
    pub debug_dir: Option<PathBuf>,

    /// Write a JSON report of the comparison to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Colour under transparent pixels for JPEG output (RRGGBB)
    #[arg(long, default_value = "ffffff")]
    pub background: String,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 95)]
    pub quality: u8,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
