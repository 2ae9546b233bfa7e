use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid colour: {value}. Expected RRGGBB hex, e.g. ffffff")]
    InvalidColour { value: String },

    #[error("Invalid quality: {quality}. Must be between 1 and 100")]
    InvalidQuality { quality: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Compare(#[from] sizecompare::Error),
}
