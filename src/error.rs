//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec and JSON errors, and provides semantic variants
//! for degenerate rasters, argument validation and per-side pipeline failures.
use thiserror::Error;

use crate::types::Side;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input at {stage}: raster is {width}x{height}")]
    InvalidInput {
        stage: &'static str,
        width: usize,
        height: usize,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("{side} image failed: {source}")]
    Side {
        side: Side,
        #[source]
        source: Box<Error>,
    },

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub fn invalid_argument(arg: &'static str, value: impl ToString) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    /// Tag an error with the image it came from.
    pub fn on_side(self, side: Side) -> Self {
        Error::Side {
            side,
            source: Box::new(self),
        }
    }
}
