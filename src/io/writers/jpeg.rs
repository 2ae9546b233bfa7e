use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::core::raster::Raster;
use crate::error::{Error, Result};

/// Composite RGBA over an opaque colour, returning interleaved RGB.
pub fn flatten_onto(raster: &Raster, background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(raster.width() * raster.height() * 3);
    for px in raster.as_raw().chunks_exact(4) {
        let a = u32::from(px[3]);
        for c in 0..3 {
            let v = (u32::from(px[c]) * a + u32::from(background[c]) * (255 - a) + 127) / 255;
            rgb.push(v as u8);
        }
    }
    rgb
}

pub fn write_rgb_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    rgb_data: &[u8],
    quality: u8,
) -> Result<()> {
    if cols > u16::MAX as usize || rows > u16::MAX as usize {
        return Err(Error::invalid_argument("jpeg size", format!("{cols}x{rows}")));
    }
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(rgb_data, cols as u16, rows as u16, ColorType::Rgb)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(())
}

pub fn write_flattened_jpeg(
    output: &Path,
    raster: &Raster,
    background: [u8; 3],
    quality: u8,
) -> Result<()> {
    let rgb = flatten_onto(raster, background);
    write_rgb_jpeg(output, raster.width(), raster.height(), &rgb, quality)
}
