use tracing::info;

use crate::core::processing::padding::pad_to_height_bottom_aligned;
use crate::core::raster::{Raster, Rgba};
use crate::error::{Error, Result};

/// Straight-alpha source-over of a single pixel.
pub fn over(dst: Rgba, src: Rgba) -> Rgba {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let sa = f32::from(sa) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let mut out = [0u8; 4];
            for i in 0..3 {
                let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
                out[i] = c.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            out
        }
    }
}

/// Paste `src` with its own alpha as the mask, top-left corner at (`x`, `y`).
/// Pixels falling outside `dst` are clipped.
pub fn paste_over(dst: &mut Raster, src: &Raster, x: usize, y: usize) {
    let cols = src.width().min(dst.width().saturating_sub(x));
    let rows = src.height().min(dst.height().saturating_sub(y));
    for row in 0..rows {
        for col in 0..cols {
            let s = src.pixel(col, row);
            if s[3] == 0 {
                continue;
            }
            let d = dst.pixel(x + col, y + row);
            dst.put_pixel(x + col, y + row, over(d, s));
        }
    }
}

/// Place two canvases of equal height next to each other, `left` at x=0.
pub fn compose_padded(left: &Raster, right: &Raster) -> Result<Raster> {
    if left.height() != right.height() {
        return Err(Error::InvalidInput {
            stage: "compose padded",
            width: right.width(),
            height: right.height(),
        });
    }
    let total_width = left.width() + right.width();
    let mut canvas = Raster::transparent(total_width, left.height());
    paste_over(&mut canvas, left, 0, 0);
    paste_over(&mut canvas, right, left.width(), 0);
    Ok(canvas)
}

/// Bottom-align `left` and `right` on a shared ground line and place them side by side.
pub fn compose_side_by_side(left: &Raster, right: &Raster) -> Result<Raster> {
    for r in [left, right] {
        if r.is_empty() {
            return Err(Error::InvalidInput {
                stage: "compose side by side",
                width: r.width(),
                height: r.height(),
            });
        }
    }
    let max_height = left.height().max(right.height());
    let left_padded = pad_to_height_bottom_aligned(left, max_height)?;
    let right_padded = pad_to_height_bottom_aligned(right, max_height)?;
    let canvas = compose_padded(&left_padded, &right_padded)?;
    info!(
        "Composed {}x{} + {}x{} -> {}x{}",
        left.width(),
        left.height(),
        right.width(),
        right.height(),
        canvas.width(),
        canvas.height()
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowest_opaque_row(r: &Raster, x0: usize, x1: usize) -> Option<usize> {
        (0..r.height())
            .rev()
            .find(|&y| (x0..x1).any(|x| r.alpha(x, y) != 0))
    }

    #[test]
    fn over_respects_alpha_extremes() {
        let dst = [10, 20, 30, 255];
        assert_eq!(over(dst, [255, 255, 255, 0]), dst);
        assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
    }

    #[test]
    fn over_transparent_dst_keeps_src() {
        assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200]), [100, 110, 120, 200]);
    }

    #[test]
    fn over_half_alpha_blends_onto_opaque() {
        let out = over([0, 0, 0, 255], [200, 100, 50, 128]);
        assert_eq!(out[3], 255);
        assert!(out[0].abs_diff(100) <= 1);
        assert!(out[1].abs_diff(50) <= 1);
        assert!(out[2].abs_diff(25) <= 1);
    }

    #[test]
    fn paste_skips_transparent_and_clips() {
        let mut dst = Raster::filled(4, 4, [9, 9, 9, 255]);
        let mut src = Raster::filled(3, 3, [0, 0, 0, 0]);
        src.put_pixel(0, 0, [200, 0, 0, 255]);
        src.put_pixel(2, 2, [0, 200, 0, 255]);
        paste_over(&mut dst, &src, 2, 2);
        assert_eq!(dst.pixel(2, 2), [200, 0, 0, 255]);
        assert_eq!(dst.pixel(3, 3), [9, 9, 9, 255]);
        assert_eq!(dst.pixel(0, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn side_by_side_is_bottom_aligned() {
        let short = Raster::filled(5, 4, [255, 0, 0, 255]);
        let tall = Raster::filled(3, 9, [0, 0, 255, 255]);
        let out = compose_side_by_side(&short, &tall).unwrap();
        assert_eq!(out.dimensions(), (8, 9));
        assert_eq!(lowest_opaque_row(&out, 0, 5), Some(8));
        assert_eq!(lowest_opaque_row(&out, 5, 8), Some(8));
        // padding above the short item stays transparent
        assert_eq!(out.pixel(0, 4), [0, 0, 0, 0]);
        assert_eq!(out.pixel(0, 5), [255, 0, 0, 255]);
        assert_eq!(out.pixel(5, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn width_is_sum_and_height_is_max() {
        let a = Raster::filled(7, 2, [1, 1, 1, 255]);
        let b = Raster::filled(11, 2, [2, 2, 2, 255]);
        let out = compose_side_by_side(&a, &b).unwrap();
        assert_eq!(out.dimensions(), (18, 2));
        assert!(out.width() >= a.width() && out.width() >= b.width());
    }

    #[test]
    fn empty_input_is_rejected() {
        let a = Raster::transparent(0, 5);
        let b = Raster::filled(2, 2, [0, 0, 0, 255]);
        assert!(matches!(
            compose_side_by_side(&a, &b),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn compose_padded_requires_equal_heights() {
        let a = Raster::transparent(2, 3);
        let b = Raster::transparent(2, 4);
        assert!(compose_padded(&a, &b).is_err());
    }
}
