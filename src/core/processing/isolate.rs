//! Swappable background isolation strategies.
//!
//! Every strategy takes a decoded RGBA raster and returns the product cut out of it.
//! Scaling and compositing do not care which strategy produced their input.
use tracing::{info, warn};

use crate::core::params::CompareParams;
use crate::core::processing::background::{estimate_background, estimate_background_field};
use crate::core::processing::crop::{crop_to_opaque_bounds, crop_to_region, opaque_bounds};
use crate::core::processing::foreground::{BoundingRegion, locate_foreground};
use crate::core::processing::otsu::{blur_and_quantize, otsu_threshold};
use crate::core::raster::Raster;
use crate::error::{Error, Result};
use crate::types::IsolationStrategy;

/// Output of a background remover.
#[derive(Debug, Clone)]
pub struct Isolation {
    pub raster: Raster,
    /// Estimated backdrop intensity, when the strategy computes one
    pub background: Option<u8>,
    /// Region of the input that was kept
    pub region: Option<BoundingRegion>,
    /// No foreground was found; `raster` is the unmodified input
    pub degenerate: bool,
}

impl Isolation {
    fn unchanged(raster: &Raster, background: Option<u8>) -> Self {
        Self {
            raster: raster.clone(),
            background,
            region: Some(BoundingRegion::full_frame(raster.width(), raster.height())),
            degenerate: true,
        }
    }
}

pub trait BackgroundRemover: Send + Sync {
    fn name(&self) -> &str;

    fn remove_background(&self, raster: &Raster) -> Result<Isolation>;
}

/// Build the remover selected by `params.isolation`.
pub fn remover_for(params: &CompareParams) -> Box<dyn BackgroundRemover> {
    match params.isolation {
        IsolationStrategy::Corners => Box::new(CornerSampleRemover::new(params.bg_threshold)),
        IsolationStrategy::Otsu => Box::new(OtsuRemover),
        IsolationStrategy::Alpha => Box::new(AlphaMatteRemover),
    }
}

fn ensure_non_empty(raster: &Raster, stage: &'static str) -> Result<()> {
    if raster.is_empty() {
        return Err(Error::InvalidInput {
            stage,
            width: raster.width(),
            height: raster.height(),
        });
    }
    Ok(())
}

/// Uniform backdrop estimated from the corners, cropped to the rows and
/// columns that deviate from it.
#[derive(Debug, Clone, Copy)]
pub struct CornerSampleRemover {
    pub threshold: f64,
}

impl CornerSampleRemover {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl BackgroundRemover for CornerSampleRemover {
    fn name(&self) -> &str {
        "corners"
    }

    fn remove_background(&self, raster: &Raster) -> Result<Isolation> {
        ensure_non_empty(raster, "corner isolation")?;
        let background = estimate_background(raster);
        let found = locate_foreground(raster, background, self.threshold)?;
        if found.is_degenerate() {
            warn!("Low-confidence isolation: no foreground found, keeping full frame");
            return Ok(Isolation::unchanged(raster, Some(background)));
        }
        let cropped = crop_to_region(raster, &found.region)?;
        info!(
            "Isolated {}x{} from {}x{} (background {})",
            cropped.width(),
            cropped.height(),
            raster.width(),
            raster.height(),
            background
        );
        Ok(Isolation {
            raster: cropped,
            background: Some(background),
            region: Some(found.region),
            degenerate: false,
        })
    }
}

/// Otsu split of a blurred, quantized grayscale. The class holding the corner
/// background estimate becomes transparent, then the raster is cropped to
/// what remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtsuRemover;

impl BackgroundRemover for OtsuRemover {
    fn name(&self) -> &str {
        "otsu"
    }

    fn remove_background(&self, raster: &Raster) -> Result<Isolation> {
        ensure_non_empty(raster, "otsu isolation")?;
        let smoothed = blur_and_quantize(raster)?;
        let gray = smoothed.grayscale();
        let background = estimate_background_field(&gray);

        let Some(threshold) = otsu_threshold(&gray) else {
            warn!("Low-confidence isolation: flat image, keeping full frame");
            return Ok(Isolation::unchanged(raster, Some(background)));
        };
        let background_is_high = background > threshold;

        let mut matted = raster.clone();
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                if (gray.get(y, x) > threshold) == background_is_high {
                    let mut px = matted.pixel(x, y);
                    px[3] = 0;
                    matted.put_pixel(x, y, px);
                }
            }
        }

        let Some(region) = opaque_bounds(&matted) else {
            warn!("Low-confidence isolation: threshold removed every pixel, keeping full frame");
            return Ok(Isolation::unchanged(raster, Some(background)));
        };
        let cropped = crop_to_region(&matted, &region)?;
        info!(
            "Otsu isolated {}x{} from {}x{} (threshold {}, background {})",
            cropped.width(),
            cropped.height(),
            raster.width(),
            raster.height(),
            threshold,
            background
        );
        Ok(Isolation {
            raster: cropped,
            background: Some(background),
            region: Some(region),
            degenerate: false,
        })
    }
}

/// For inputs whose backdrop was already removed: crop to the opaque pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaMatteRemover;

impl BackgroundRemover for AlphaMatteRemover {
    fn name(&self) -> &str {
        "alpha"
    }

    fn remove_background(&self, raster: &Raster) -> Result<Isolation> {
        ensure_non_empty(raster, "alpha isolation")?;
        match opaque_bounds(raster) {
            Some(region) => Ok(Isolation {
                raster: crop_to_opaque_bounds(raster),
                background: None,
                region: Some(region),
                degenerate: false,
            }),
            None => {
                warn!("Low-confidence isolation: fully transparent input, keeping full frame");
                Ok(Isolation::unchanged(raster, None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_on(bg: [u8; 4], w: usize, h: usize, rect: (usize, usize, usize, usize)) -> Raster {
        let (x0, y0, rw, rh) = rect;
        let mut r = Raster::filled(w, h, bg);
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                r.put_pixel(x, y, [15, 15, 15, 255]);
            }
        }
        r
    }

    #[test]
    fn corner_remover_crops_to_product() {
        let r = product_on([240, 240, 240, 255], 40, 30, (10, 5, 12, 20));
        let iso = CornerSampleRemover::new(10.0).remove_background(&r).unwrap();
        assert_eq!(iso.raster.dimensions(), (12, 20));
        assert_eq!(iso.background, Some(240));
        assert!(!iso.degenerate);
    }

    #[test]
    fn corner_remover_flags_blank_input() {
        let r = Raster::filled(10, 10, [128, 128, 128, 255]);
        let iso = CornerSampleRemover::new(10.0).remove_background(&r).unwrap();
        assert!(iso.degenerate);
        assert_eq!(iso.raster, r);
    }

    #[test]
    fn otsu_remover_mattes_bright_backdrop() {
        let r = product_on([250, 250, 250, 255], 48, 40, (16, 10, 16, 24));
        let iso = OtsuRemover.remove_background(&r).unwrap();
        assert!(!iso.degenerate);
        let (w, h) = iso.raster.dimensions();
        // blur may bleed the silhouette by a pixel or two
        assert!((16..=20).contains(&w), "width {w}");
        assert!((24..=28).contains(&h), "height {h}");
        assert_eq!(iso.raster.alpha(w / 2, h / 2), 255);
    }

    #[test]
    fn otsu_remover_handles_dark_backdrop() {
        let mut r = Raster::filled(40, 40, [5, 5, 5, 255]);
        for y in 10..30 {
            for x in 12..28 {
                r.put_pixel(x, y, [220, 220, 220, 255]);
            }
        }
        let iso = OtsuRemover.remove_background(&r).unwrap();
        let (w, h) = iso.raster.dimensions();
        assert!((16..=20).contains(&w), "width {w}");
        assert!((20..=24).contains(&h), "height {h}");
    }

    #[test]
    fn alpha_remover_crops_matte() {
        let mut r = Raster::transparent(20, 20);
        for y in 3..9 {
            for x in 5..7 {
                r.put_pixel(x, y, [1, 2, 3, 255]);
            }
        }
        let iso = AlphaMatteRemover.remove_background(&r).unwrap();
        assert_eq!(iso.raster.dimensions(), (2, 6));
        assert_eq!(iso.background, None);

        let blank = AlphaMatteRemover
            .remove_background(&Raster::transparent(4, 4))
            .unwrap();
        assert!(blank.degenerate);
    }

    #[test]
    fn empty_input_is_rejected_by_every_strategy() {
        let empty = Raster::transparent(0, 0);
        let params = CompareParams::default();
        for strategy in [
            IsolationStrategy::Corners,
            IsolationStrategy::Otsu,
            IsolationStrategy::Alpha,
        ] {
            let remover = remover_for(&CompareParams {
                isolation: strategy,
                ..params.clone()
            });
            assert!(remover.remove_background(&empty).is_err());
        }
    }
}
