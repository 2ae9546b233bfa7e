//! Shared types and enums used across SIZECOMPARE.
//! Includes `Side`, `IsolationStrategy`, `ResizeFilter` and `OutputFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Placement of an input in the composed output; follows argument order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// How the product is separated from its backdrop before scaling.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationStrategy {
    /// Corner-sampled uniform background + row/column deviation crop
    Corners,
    /// Otsu threshold on a blurred, quantized grayscale; background made transparent
    Otsu,
    /// Input already carries a matte; crop to its opaque pixels
    Alpha,
}

impl std::fmt::Display for IsolationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsolationStrategy::Corners => write!(f, "Corners"),
            IsolationStrategy::Otsu => write!(f, "Otsu"),
            IsolationStrategy::Alpha => write!(f, "Alpha"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Lanczos3,
    CatmullRom,
    Mitchell,
    Bilinear,
}

impl std::fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeFilter::Lanczos3 => write!(f, "Lanczos3"),
            ResizeFilter::CatmullRom => write!(f, "CatmullRom"),
            ResizeFilter::Mitchell => write!(f, "Mitchell"),
            ResizeFilter::Bilinear => write!(f, "Bilinear"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    PNG,
    JPEG, // Flattened onto an opaque background
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::PNG => "png",
            OutputFormat::JPEG => "jpg",
        }
    }
}
