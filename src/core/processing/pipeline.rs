use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::params::CompareParams;
use crate::core::processing::composite::compose_padded;
use crate::core::processing::crop::crop_to_opaque_bottom;
use crate::core::processing::foreground::BoundingRegion;
use crate::core::processing::isolate::{BackgroundRemover, remover_for};
use crate::core::processing::padding::pad_to_height_bottom_aligned;
use crate::core::processing::resize::{scale_to_height, target_pixels};
use crate::core::raster::Raster;
use crate::error::Result;
use crate::types::Side;

/// What happened to one input on its way to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub side: Side,
    pub strategy: String,
    pub physical_height: f64,
    pub target_pixels: usize,
    pub background: Option<u8>,
    pub region: Option<BoundingRegion>,
    pub degenerate: bool,
    pub original_size: (usize, usize),
    pub isolated_size: (usize, usize),
    pub scaled_size: (usize, usize),
}

/// Intermediate raster kept when debug capture is on.
#[derive(Debug, Clone)]
pub struct DebugStage {
    pub label: String,
    pub raster: Raster,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub image: Raster,
    pub left: SideReport,
    pub right: SideReport,
    pub stages: Vec<DebugStage>,
}

struct Prepared {
    scaled: Raster,
    report: SideReport,
    stages: Vec<DebugStage>,
}

/// Two-image size comparison: isolate, scale to physical height, bottom-align, compose.
pub struct Pipeline {
    params: CompareParams,
    remover: Box<dyn BackgroundRemover>,
}

impl Pipeline {
    pub fn new(params: CompareParams) -> Result<Self> {
        params.validate()?;
        let remover = remover_for(&params);
        Ok(Self { params, remover })
    }

    /// Replace the isolation strategy chosen by `params.isolation`.
    pub fn with_remover(mut self, remover: Box<dyn BackgroundRemover>) -> Self {
        self.remover = remover;
        self
    }

    pub fn params(&self) -> &CompareParams {
        &self.params
    }

    /// Compare `left` and `right`, scaled to `left_height` and `right_height`
    /// physical units. Either side failing aborts the whole comparison.
    #[instrument(skip(self, left, right))]
    pub fn compare(
        &self,
        left: &Raster,
        left_height: f64,
        right: &Raster,
        right_height: f64,
    ) -> Result<Comparison> {
        let (left_result, right_result) = if self.params.parallel {
            rayon::join(
                || self.prepare(Side::Left, left, left_height),
                || self.prepare(Side::Right, right, right_height),
            )
        } else {
            (
                self.prepare(Side::Left, left, left_height),
                self.prepare(Side::Right, right, right_height),
            )
        };
        let left_prepared = left_result.map_err(|e| e.on_side(Side::Left))?;
        let right_prepared = right_result.map_err(|e| e.on_side(Side::Right))?;

        let max_height = left_prepared
            .scaled
            .height()
            .max(right_prepared.scaled.height());
        let left_padded = pad_to_height_bottom_aligned(&left_prepared.scaled, max_height)?;
        let right_padded = pad_to_height_bottom_aligned(&right_prepared.scaled, max_height)?;
        let image = compose_padded(&left_padded, &right_padded)?;

        info!(
            "Comparison canvas {}x{} (left {}x{}, right {}x{})",
            image.width(),
            image.height(),
            left_prepared.scaled.width(),
            left_prepared.scaled.height(),
            right_prepared.scaled.width(),
            right_prepared.scaled.height()
        );

        let mut stages = Vec::new();
        if self.params.debug {
            stages.extend(left_prepared.stages);
            stages.extend(right_prepared.stages);
            stages.push(stage(Side::Left, "padded", &left_padded));
            stages.push(stage(Side::Right, "padded", &right_padded));
            stages.push(DebugStage {
                label: "combined".to_string(),
                raster: image.clone(),
            });
        }

        Ok(Comparison {
            image,
            left: left_prepared.report,
            right: right_prepared.report,
            stages,
        })
    }

    /// Isolation and scaling for one input; touches nothing shared.
    fn prepare(&self, side: Side, raster: &Raster, physical_height: f64) -> Result<Prepared> {
        let target = target_pixels(physical_height, self.params.pixels_per_unit)?;
        let mut stages = Vec::new();
        if self.params.debug {
            stages.push(stage(side, "original", raster));
        }

        let isolation = self.remover.remove_background(raster)?;
        let mut isolated = isolation.raster;
        if self.params.align_opaque_bottom {
            isolated = crop_to_opaque_bottom(&isolated);
        }
        if self.params.debug {
            stages.push(stage(side, "isolated", &isolated));
        }
        debug!(
            "{} isolated to {}x{} via {}",
            side,
            isolated.width(),
            isolated.height(),
            self.remover.name()
        );

        let scaled = scale_to_height(&isolated, target, self.params.filter)?;
        if self.params.debug {
            stages.push(stage(side, "scaled", &scaled));
        }

        let report = SideReport {
            side,
            strategy: self.remover.name().to_string(),
            physical_height,
            target_pixels: target,
            background: isolation.background,
            region: isolation.region,
            degenerate: isolation.degenerate,
            original_size: raster.dimensions(),
            isolated_size: isolated.dimensions(),
            scaled_size: scaled.dimensions(),
        };
        Ok(Prepared {
            scaled,
            report,
            stages,
        })
    }
}

fn stage(side: Side, label: &str, raster: &Raster) -> DebugStage {
    DebugStage {
        label: format!("{side}_{label}"),
        raster: raster.clone(),
    }
}

/// Bottom-aligned size comparison with the default corner-sampling isolation.
pub fn compare(
    left: &Raster,
    left_height: f64,
    right: &Raster,
    right_height: f64,
    bg_threshold: f64,
) -> Result<Raster> {
    let params = CompareParams {
        bg_threshold,
        ..CompareParams::default()
    };
    let comparison = Pipeline::new(params)?.compare(left, left_height, right, right_height)?;
    Ok(comparison.image)
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("params", &self.params)
            .field("remover", &self.remover.name())
            .finish()
    }
}
