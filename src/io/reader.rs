use std::path::Path;

use tracing::info;

use crate::core::raster::Raster;
use crate::error::Result;

/// Decode any supported image file and normalize it to RGBA8.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let decoded = image::open(path)?;
    let raster = Raster::from_image(decoded.to_rgba8());
    info!(
        "Loaded {:?}: {}x{}",
        path,
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

pub fn load_raster_from_memory(bytes: &[u8]) -> Result<Raster> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(Raster::from_image(decoded.to_rgba8()))
}
