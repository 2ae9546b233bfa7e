use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{IsolationStrategy, ResizeFilter};

/// Comparison parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareParams {
    /// Row/column deviation from the background, in intensity units (0-255)
    pub bg_threshold: f64,
    pub isolation: IsolationStrategy,
    pub filter: ResizeFilter,
    /// Output pixels per physical unit of the target heights
    pub pixels_per_unit: f64,
    /// Drop fully transparent rows below the product after isolation
    pub align_opaque_bottom: bool,
    /// Run the two per-image sub-pipelines on the rayon pool
    pub parallel: bool,
    /// Keep snapshots of every intermediate raster
    pub debug: bool,
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            bg_threshold: 10.0,
            isolation: IsolationStrategy::Corners,
            filter: ResizeFilter::Lanczos3,
            pixels_per_unit: 1.0,
            align_opaque_bottom: false,
            parallel: false,
            debug: false,
        }
    }
}

impl CompareParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=255.0).contains(&self.bg_threshold) {
            return Err(Error::invalid_argument("bg_threshold", self.bg_threshold));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(Error::invalid_argument(
                "pixels_per_unit",
                self.pixels_per_unit,
            ));
        }
        Ok(())
    }

    /// Load a preset from JSON; missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: CompareParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = CompareParams::default();
        assert_eq!(p.bg_threshold, 10.0);
        assert_eq!(p.isolation, IsolationStrategy::Corners);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let p = CompareParams {
            bg_threshold: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidArgument { arg: "bg_threshold", .. })
        ));

        let p = CompareParams {
            bg_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = CompareParams {
            pixels_per_unit: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidArgument { arg: "pixels_per_unit", .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: CompareParams =
            serde_json::from_str(r#"{"isolation":"otsu","filter":"catmull-rom","debug":true}"#)
                .unwrap();
        assert_eq!(p.isolation, IsolationStrategy::Otsu);
        assert_eq!(p.filter, ResizeFilter::CatmullRom);
        assert!(p.debug);
        assert_eq!(p.bg_threshold, 10.0);
    }

    #[test]
    fn from_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, r#"{"pixels_per_unit": -2.0}"#).unwrap();
        assert!(CompareParams::from_json_file(&path).is_err());

        std::fs::write(&path, r#"{"pixels_per_unit": 2.5, "parallel": true}"#).unwrap();
        let p = CompareParams::from_json_file(&path).unwrap();
        assert_eq!(p.pixels_per_unit, 2.5);
        assert!(p.parallel);
    }
}
