//! High-level, ergonomic library API: compare files or in-memory rasters, and save
//! the result as PNG or flattened JPEG. Prefer these entrypoints over the low-level
//! processing modules when integrating SIZECOMPARE.
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::CompareParams;
use crate::core::processing::pipeline::{Comparison, Pipeline};
use crate::core::raster::Raster;
use crate::error::{Error, Result};
use crate::io::reader::load_raster;
use crate::io::writers::jpeg::write_flattened_jpeg;
use crate::io::writers::png::write_rgba_png;
use crate::io::writers::report::ComparisonReport;
use crate::types::{OutputFormat, Side};

/// How the composed image is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub format: OutputFormat,
    /// Opaque colour under transparent pixels (JPEG only)
    pub background: [u8; 3],
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::PNG,
            background: [255, 255, 255],
            quality: 95,
        }
    }
}

/// Compare two decoded rasters with `params`.
pub fn compare_rasters(
    left: &Raster,
    left_height: f64,
    right: &Raster,
    right_height: f64,
    params: &CompareParams,
) -> Result<Comparison> {
    Pipeline::new(params.clone())?.compare(left, left_height, right, right_height)
}

/// Decode both files and compare them in memory (no output written).
/// Decode failures are tagged with the side they belong to.
pub fn compare_files_to_buffer(
    left: &Path,
    left_height: f64,
    right: &Path,
    right_height: f64,
    params: &CompareParams,
) -> Result<Comparison> {
    let left_raster = load_raster(left).map_err(|e| e.on_side(Side::Left))?;
    let right_raster = load_raster(right).map_err(|e| e.on_side(Side::Right))?;
    compare_rasters(&left_raster, left_height, &right_raster, right_height, params)
}

/// Encode `comparison.image` to `output`.
pub fn save_comparison(
    comparison: &Comparison,
    output: &Path,
    options: &SaveOptions,
) -> Result<()> {
    if !(1..=100).contains(&options.quality) {
        return Err(Error::invalid_argument("quality", options.quality));
    }
    match options.format {
        OutputFormat::PNG => write_rgba_png(output, &comparison.image)?,
        OutputFormat::JPEG => write_flattened_jpeg(
            output,
            &comparison.image,
            options.background,
            options.quality,
        )?,
    }
    info!(
        "Saved {}x{} {:?} to {:?}",
        comparison.image.width(),
        comparison.image.height(),
        options.format,
        output
    );
    Ok(())
}

/// Decode, compare and save in one call; returns the report of what was done.
pub fn compare_files_to_path(
    left: &Path,
    left_height: f64,
    right: &Path,
    right_height: f64,
    output: &Path,
    params: &CompareParams,
    options: &SaveOptions,
) -> Result<ComparisonReport> {
    let comparison = compare_files_to_buffer(left, left_height, right, right_height, params)?;
    save_comparison(&comparison, output, options)?;
    Ok(ComparisonReport::new(&comparison, params, Some(output)))
}
