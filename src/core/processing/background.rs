use ndarray::s;
use tracing::{debug, warn};

use crate::core::raster::{GrayscaleField, Raster};

/// Side length of the square sampled at each corner.
pub const CORNER_BLOCK: usize = 5;

/// Estimate the uniform backdrop intensity of `raster`.
pub fn estimate_background(raster: &Raster) -> u8 {
    estimate_background_field(&raster.grayscale())
}

/// Majority vote over the corner modes. Ties go to the earliest corner in
/// top-left, top-right, bottom-left, bottom-right order.
pub fn estimate_background_field(gray: &GrayscaleField) -> u8 {
    if gray.rows() == 0 || gray.cols() == 0 {
        warn!("Empty raster, background defaults to 0");
        return 0;
    }

    let candidates = corner_candidates(gray);
    let mut best = candidates[0];
    let mut best_votes = 0;
    for &candidate in &candidates {
        let votes = candidates.iter().filter(|&&c| c == candidate).count();
        if votes > best_votes {
            best = candidate;
            best_votes = votes;
        }
    }

    debug!(
        "Corner modes {:?} -> background {} ({} votes)",
        candidates, best, best_votes
    );
    best
}

/// Mode of each corner block: top-left, top-right, bottom-left, bottom-right.
/// Blocks are clipped when the field is smaller than `CORNER_BLOCK`.
pub fn corner_candidates(gray: &GrayscaleField) -> [u8; 4] {
    let rows = gray.rows();
    let cols = gray.cols();
    let bh = CORNER_BLOCK.min(rows);
    let bw = CORNER_BLOCK.min(cols);
    if bh < CORNER_BLOCK || bw < CORNER_BLOCK {
        warn!(
            "Raster {}x{} is smaller than the corner block, sampling {}x{}",
            cols, rows, bw, bh
        );
    }

    let view = gray.view();
    let blocks = [
        view.slice(s![..bh, ..bw]),
        view.slice(s![..bh, cols - bw..]),
        view.slice(s![rows - bh.., ..bw]),
        view.slice(s![rows - bh.., cols - bw..]),
    ];

    let mut out = [0u8; 4];
    for (slot, block) in out.iter_mut().zip(blocks.iter()) {
        *slot = block_mode(block.iter().copied());
    }
    out
}

/// Most frequent value; the smallest value wins a tie.
fn block_mode(values: impl Iterator<Item = u8>) -> u8 {
    let mut counts = [0usize; 256];
    for v in values {
        counts[v as usize] += 1;
    }
    let mut mode = 0u8;
    let mut max = 0usize;
    for (value, &count) in counts.iter().enumerate() {
        if count > max {
            max = count;
            mode = value as u8;
        }
    }
    mode
}
