use tracing::{debug, info};

use crate::core::processing::foreground::BoundingRegion;
use crate::core::raster::Raster;
use crate::error::{Error, Result};

/// Slice `raster` to the inclusive bounds of `region`.
pub fn crop_to_region(raster: &Raster, region: &BoundingRegion) -> Result<Raster> {
    let (width, height) = raster.dimensions();
    if raster.is_empty()
        || region.row_start > region.row_end
        || region.col_start > region.col_end
        || region.row_end >= height
        || region.col_end >= width
    {
        return Err(Error::InvalidInput {
            stage: "crop to region",
            width,
            height,
        });
    }
    if region.is_full_frame(width, height) {
        return Ok(raster.clone());
    }

    let out_w = region.width();
    let out_h = region.height();
    info!(
        "Cropping {}x{} -> {}x{} at ({}, {})",
        width, height, out_w, out_h, region.col_start, region.row_start
    );

    // Copy per row using slice copies to minimize per-pixel indexing
    let mut data = Vec::with_capacity(out_w * out_h * 4);
    for row in region.row_start..=region.row_end {
        let src = raster.row(row);
        data.extend_from_slice(&src[region.col_start * 4..(region.col_end + 1) * 4]);
    }
    Raster::from_raw(out_w, out_h, data)
}

/// Truncate immediately below the last row holding any non-zero alpha.
/// A fully transparent raster is returned unchanged.
pub fn crop_to_opaque_bottom(raster: &Raster) -> Raster {
    let Some(last) = (0..raster.height()).rev().find(|&y| raster.row_has_opaque(y)) else {
        debug!("No opaque rows, skipping bottom crop");
        return raster.clone();
    };
    if last + 1 == raster.height() {
        return raster.clone();
    }
    debug!("Bottom crop at row {} of {}", last, raster.height());
    let region = BoundingRegion {
        row_start: 0,
        row_end: last,
        col_start: 0,
        col_end: raster.width() - 1,
    };
    crop_to_region(raster, &region).unwrap_or_else(|_| raster.clone())
}

/// Bounding box of every pixel with non-zero alpha, if any.
pub fn opaque_bounds(raster: &Raster) -> Option<BoundingRegion> {
    let (width, height) = raster.dimensions();
    let mut bounds: Option<BoundingRegion> = None;
    for y in 0..height {
        for x in 0..width {
            if raster.alpha(x, y) == 0 {
                continue;
            }
            let b = bounds.get_or_insert(BoundingRegion {
                row_start: y,
                row_end: y,
                col_start: x,
                col_end: x,
            });
            b.row_end = y;
            b.col_start = b.col_start.min(x);
            b.col_end = b.col_end.max(x);
        }
    }
    bounds
}

/// Crop to the non-transparent pixels. A fully transparent raster is returned unchanged.
pub fn crop_to_opaque_bounds(raster: &Raster) -> Raster {
    match opaque_bounds(raster) {
        Some(region) => crop_to_region(raster, &region).unwrap_or_else(|_| raster.clone()),
        None => {
            debug!("No opaque pixels, skipping bounds crop");
            raster.clone()
        }
    }
}
