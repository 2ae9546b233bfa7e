use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::{debug, info};

use crate::core::raster::Raster;
use crate::error::{Error, Result};
use crate::types::ResizeFilter;

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Mitchell => FilterType::Mitchell,
            ResizeFilter::Bilinear => FilterType::Bilinear,
        }
    }
}

/// Convert a physical height into output pixels.
pub fn target_pixels(physical_height: f64, pixels_per_unit: f64) -> Result<usize> {
    if !physical_height.is_finite() || physical_height <= 0.0 {
        return Err(Error::invalid_argument("height", physical_height));
    }
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
        return Err(Error::invalid_argument("pixels_per_unit", pixels_per_unit));
    }
    let px = (physical_height * pixels_per_unit).round();
    if px < 1.0 {
        return Err(Error::invalid_argument("height", physical_height));
    }
    Ok(px as usize)
}

/// Width and height after scaling to `target_height`, aspect ratio preserved.
pub fn calculate_height_scaled_dimensions(
    original_cols: usize,
    original_rows: usize,
    target_height: usize,
) -> (usize, usize) {
    let ratio = target_height as f64 / original_rows as f64;
    let new_cols = ((original_cols as f64 * ratio).round() as usize).max(1);
    (new_cols, target_height)
}

pub fn resize_rgba_image(
    data: &[u8],
    original_cols: usize,
    original_rows: usize,
    target_cols: usize,
    target_rows: usize,
    filter: ResizeFilter,
) -> Result<Vec<u8>> {
    let resize_options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter.into()));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols as u32,
        original_rows as u32,
        data.to_vec(),
        PixelType::U8x4,
    )
    .map_err(|e| Error::Resize(e.to_string()))?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(|e| Error::Resize(e.to_string()))?;

    Ok(dst_image.into_vec())
}

/// Resample `raster` to exactly `target_height` rows.
pub fn scale_to_height(
    raster: &Raster,
    target_height: usize,
    filter: ResizeFilter,
) -> Result<Raster> {
    if raster.is_empty() {
        return Err(Error::InvalidInput {
            stage: "scale to height",
            width: raster.width(),
            height: raster.height(),
        });
    }
    if target_height == 0 {
        return Err(Error::invalid_argument("target_height", target_height));
    }

    let (cols, rows) = raster.dimensions();
    let (new_cols, new_rows) = calculate_height_scaled_dimensions(cols, rows, target_height);
    if (new_cols, new_rows) == (cols, rows) {
        debug!("Already {}x{}, skipping resize", cols, rows);
        return Ok(raster.clone());
    }

    info!(
        "Original size: {}x{}, New size: {}x{} ({})",
        cols, rows, new_cols, new_rows, filter
    );
    let resized = resize_rgba_image(raster.as_raw(), cols, rows, new_cols, new_rows, filter)?;
    Raster::from_raw(new_cols, new_rows, resized)
}
