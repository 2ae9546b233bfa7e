use image::imageops;
use tracing::debug;

use crate::core::raster::{GrayscaleField, Raster};
use crate::error::Result;

/// Sigma OpenCV derives for a 5x5 Gaussian kernel.
pub const BLUR_SIGMA: f32 = 1.1;

/// Width of one intensity bin after quantization.
const BIN_WIDTH: u16 = 51;

/// Map each channel to the upper edge of its 51-wide bin: 0 stays 0,
/// 1..=51 -> 51, 52..=102 -> 102, ... 205..=255 -> 255.
#[inline]
pub fn quantize(v: u8) -> u8 {
    ((u16::from(v) + BIN_WIDTH - 1) / BIN_WIDTH * BIN_WIDTH) as u8
}

/// Blur, then quantize RGB; alpha is copied from the source.
pub fn blur_and_quantize(raster: &Raster) -> Result<Raster> {
    let blurred = imageops::blur(&raster.to_image()?, BLUR_SIGMA);
    let mut out = Raster::from_image(blurred);
    for y in 0..out.height() {
        let src = raster.row(y);
        for (px, s) in out.row_mut(y).chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            px[0] = quantize(px[0]);
            px[1] = quantize(px[1]);
            px[2] = quantize(px[2]);
            px[3] = s[3];
        }
    }
    Ok(out)
}

/// Threshold maximizing between-class variance; classes are `<= t` and `> t`.
/// Returns `None` when the field holds a single intensity.
pub fn otsu_threshold(gray: &GrayscaleField) -> Option<u8> {
    // Build histogram.
    let mut histogram = [0u64; 256];
    for &v in gray.view().iter() {
        histogram[v as usize] += 1;
    }

    let total_pixels = (gray.rows() * gray.cols()) as u64;
    if total_pixels == 0 || histogram.iter().filter(|&&c| c > 0).count() < 2 {
        return None;
    }

    let mut sum_total: f64 = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_low: f64 = 0.0;
    let mut weight_low: u64 = 0;
    let mut max_variance: f64 = -1.0;
    let mut best_threshold: u8 = 0;

    for (t, &count) in histogram.iter().enumerate() {
        weight_low += count;
        if weight_low == 0 {
            continue;
        }
        let weight_high = total_pixels - weight_low;
        if weight_high == 0 {
            break;
        }

        sum_low += t as f64 * count as f64;
        let mean_low = sum_low / weight_low as f64;
        let mean_high = (sum_total - sum_low) / weight_high as f64;

        let between_variance =
            weight_low as f64 * weight_high as f64 * (mean_low - mean_high).powi(2);
        if between_variance > max_variance {
            max_variance = between_variance;
            best_threshold = t as u8;
        }
    }

    debug!("Otsu threshold {}", best_threshold);
    Some(best_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_matches_bin_edges() {
        assert_eq!(quantize(0), 0);
        assert_eq!(quantize(1), 51);
        assert_eq!(quantize(51), 51);
        assert_eq!(quantize(52), 102);
        assert_eq!(quantize(204), 204);
        assert_eq!(quantize(205), 255);
        assert_eq!(quantize(255), 255);
    }

    #[test]
    fn bimodal_field_splits_between_modes() {
        let mut r = Raster::filled(10, 10, [230, 230, 230, 255]);
        for y in 0..10 {
            for x in 0..4 {
                r.put_pixel(x, y, [20, 20, 20, 255]);
            }
        }
        let t = otsu_threshold(&r.grayscale()).unwrap();
        assert!((20..230).contains(&t));
    }

    #[test]
    fn flat_field_has_no_threshold() {
        let r = Raster::filled(6, 6, [99, 99, 99, 255]);
        assert_eq!(otsu_threshold(&r.grayscale()), None);
    }

    #[test]
    fn blur_and_quantize_keeps_size_and_bins() {
        let r = Raster::filled(9, 7, [100, 30, 250, 255]);
        let out = blur_and_quantize(&r).unwrap();
        assert_eq!(out.dimensions(), (9, 7));
        let [red, green, blue, a] = out.pixel(4, 3);
        assert_eq!((red, green, blue, a), (102, 51, 255, 255));
    }
}
