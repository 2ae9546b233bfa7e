use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::core::processing::pipeline::DebugStage;
use crate::core::raster::Raster;
use crate::error::Result;

pub fn write_rgba_png(output: &Path, raster: &Raster) -> Result<()> {
    raster.to_image()?.save_with_format(output, ImageFormat::Png)?;
    Ok(())
}

/// Write each stage as `<index>_<label>.png` under `dir`.
pub fn write_debug_stages(dir: &Path, stages: &[DebugStage]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(stages.len());
    for (i, stage) in stages.iter().enumerate() {
        let path = dir.join(format!("{:02}_{}.png", i, stage.label));
        write_rgba_png(&path, &stage.raster)?;
        written.push(path);
    }
    info!("Wrote {} debug stages to {:?}", written.len(), dir);
    Ok(written)
}
