use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::raster::{GrayscaleField, Raster};
use crate::error::{Error, Result};

/// Inclusive row/column bounds of the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl BoundingRegion {
    /// Region covering every pixel of a `width` x `height` raster.
    /// Callers must pass non-zero extents.
    pub fn full_frame(width: usize, height: usize) -> Self {
        Self {
            row_start: 0,
            row_end: height.saturating_sub(1),
            col_start: 0,
            col_end: width.saturating_sub(1),
        }
    }

    pub fn width(&self) -> usize {
        self.col_end - self.col_start + 1
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    pub fn is_full_frame(&self, width: usize, height: usize) -> bool {
        *self == Self::full_frame(width, height)
    }
}

/// Result of a foreground search. An unbounded axis kept its full extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundRegion {
    pub region: BoundingRegion,
    pub rows_bounded: bool,
    pub cols_bounded: bool,
}

impl ForegroundRegion {
    /// Nothing on either axis cleared the threshold.
    pub fn is_degenerate(&self) -> bool {
        !self.rows_bounded && !self.cols_bounded
    }
}

pub fn locate_foreground(
    raster: &Raster,
    background: u8,
    threshold: f64,
) -> Result<ForegroundRegion> {
    if raster.is_empty() {
        return Err(Error::InvalidInput {
            stage: "locate foreground",
            width: raster.width(),
            height: raster.height(),
        });
    }
    locate_foreground_field(&raster.grayscale(), background, threshold)
}

/// Rows and columns are classified independently by how far their mean
/// intensity sits from `background`.
pub fn locate_foreground_field(
    gray: &GrayscaleField,
    background: u8,
    threshold: f64,
) -> Result<ForegroundRegion> {
    if !(0.0..=255.0).contains(&threshold) {
        return Err(Error::invalid_argument("threshold", threshold));
    }
    let rows = gray.rows();
    let cols = gray.cols();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidInput {
            stage: "locate foreground",
            width: cols,
            height: rows,
        });
    }

    let field = gray.view().mapv(f64::from);
    let row_means = field.mean_axis(Axis(1)).unwrap_or_else(|| Array1::zeros(rows));
    let col_means = field.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(cols));

    let bg = f64::from(background);
    let row_bounds = deviating_span(&row_means, bg, threshold);
    let col_bounds = deviating_span(&col_means, bg, threshold);

    let full = BoundingRegion::full_frame(cols, rows);
    let (row_start, row_end) = row_bounds.unwrap_or((full.row_start, full.row_end));
    let (col_start, col_end) = col_bounds.unwrap_or((full.col_start, full.col_end));

    let found = ForegroundRegion {
        region: BoundingRegion {
            row_start,
            row_end,
            col_start,
            col_end,
        },
        rows_bounded: row_bounds.is_some(),
        cols_bounded: col_bounds.is_some(),
    };

    if found.is_degenerate() {
        warn!(
            "No row or column deviates from background {} by more than {}; keeping full frame",
            background, threshold
        );
    } else {
        debug!(
            "Foreground rows [{}, {}], cols [{}, {}]",
            row_start, row_end, col_start, col_end
        );
    }
    Ok(found)
}

/// First and last index whose mean deviates by more than `threshold`.
fn deviating_span(
    means: &Array1<f64>,
    background: f64,
    threshold: f64,
) -> Option<(usize, usize)> {
    let mut hits = means
        .iter()
        .enumerate()
        .filter(|(_, m)| (**m - background).abs() > threshold)
        .map(|(i, _)| i);
    let first = hits.next()?;
    let last = hits.last().unwrap_or(first);
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `rect` is (x, y, width, height).
    fn gray_with_rect(w: usize, h: usize, bg: u8, rect: [usize; 4], fg: u8) -> Raster {
        let [x0, y0, rw, rh] = rect;
        let mut r = Raster::filled(w, h, [bg, bg, bg, 255]);
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                r.put_pixel(x, y, [fg, fg, fg, 255]);
            }
        }
        r
    }

    #[test]
    fn rectangle_bounds_are_exact() {
        let r = gray_with_rect(60, 50, 140, [20, 15, 20, 30], 0);
        let found = locate_foreground(&r, 140, 10.0).unwrap();
        assert_eq!(
            found.region,
            BoundingRegion {
                row_start: 15,
                row_end: 44,
                col_start: 20,
                col_end: 39,
            }
        );
        assert!(!found.is_degenerate());
    }

    #[test]
    fn interior_gap_is_kept() {
        // two bars separated by background columns
        let mut r = gray_with_rect(50, 20, 200, [5, 5, 5, 10], 0);
        for y in 5..15 {
            for x in 35..40 {
                r.put_pixel(x, y, [0, 0, 0, 255]);
            }
        }
        let found = locate_foreground(&r, 200, 5.0).unwrap();
        assert_eq!(found.region.col_start, 5);
        assert_eq!(found.region.col_end, 39);
    }

    #[test]
    fn nothing_deviates_keeps_full_frame() {
        let r = Raster::filled(17, 9, [90, 90, 90, 255]);
        let found = locate_foreground(&r, 90, 10.0).unwrap();
        assert!(found.is_degenerate());
        assert!(found.region.is_full_frame(17, 9));
    }

    #[test]
    fn axes_fall_back_independently() {
        // full-width stripe: rows deviate by 150, every column only by 25
        let r = gray_with_rect(30, 30, 100, [0, 10, 30, 5], 250);
        let found = locate_foreground(&r, 100, 30.0).unwrap();
        assert!(found.rows_bounded);
        assert!(!found.cols_bounded);
        assert_eq!((found.region.row_start, found.region.row_end), (10, 14));
        assert_eq!((found.region.col_start, found.region.col_end), (0, 29));
    }

    #[test]
    fn threshold_at_distance_is_not_foreground() {
        // one full row of 120 on 100: row mean deviates by exactly 20
        let r = gray_with_rect(10, 10, 100, [0, 4, 10, 1], 120);
        let found = locate_foreground(&r, 100, 20.0).unwrap();
        assert!(!found.rows_bounded);
        let found = locate_foreground(&r, 100, 19.5).unwrap();
        assert_eq!((found.region.row_start, found.region.row_end), (4, 4));
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let r = Raster::filled(4, 4, [0, 0, 0, 255]);
        assert!(locate_foreground(&r, 0, -1.0).is_err());
        assert!(locate_foreground(&r, 0, f64::NAN).is_err());
    }

    #[test]
    fn empty_raster_is_invalid_input() {
        let r = Raster::transparent(0, 3);
        assert!(matches!(
            locate_foreground(&r, 0, 10.0),
            Err(Error::InvalidInput { .. })
        ));
    }
}
