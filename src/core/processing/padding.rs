use tracing::debug;

use crate::core::processing::composite::paste_over;
use crate::core::raster::Raster;
use crate::error::{Error, Result};

/// Transparent canvas of `raster.width()` x `height` with `raster` flush against its bottom edge.
pub fn pad_to_height_bottom_aligned(raster: &Raster, height: usize) -> Result<Raster> {
    if height < raster.height() {
        return Err(Error::invalid_argument("pad height", height));
    }
    let pad_rows = height - raster.height();

    debug!(
        "Adding padding: cols={}, rows={}, pad_rows={}",
        raster.width(),
        raster.height(),
        pad_rows
    );
    debug!("Final dimensions: {}x{}", raster.width(), height);

    let mut padded = Raster::transparent(raster.width(), height);
    paste_over(&mut padded, raster, 0, pad_rows);
    Ok(padded)
}
