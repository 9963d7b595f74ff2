//! # Error Types
//!
//! Errors surface only at the frame boundary (parameter validation, I/O,
//! image decoding). Per-pixel evaluation is total and never fails.

use thiserror::Error;

/// Main error type for warpfield operations
#[derive(Debug, Error)]
pub enum WarpError {
    /// Parameter block failed validation
    #[error("Invalid parameters for {effect}: {reason}")]
    InvalidParams {
        effect: &'static str,
        reason: String,
    },

    /// Render target has a zero or unusable size
    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Effect needs a source image but none was supplied
    #[error("Effect '{0}' requires a source image")]
    MissingSource(&'static str),

    /// Unknown effect name
    #[error("Unknown effect '{0}'")]
    UnknownEffect(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WarpError>;

impl WarpError {
    pub(crate) fn invalid(effect: &'static str, reason: impl Into<String>) -> Self {
        WarpError::InvalidParams {
            effect,
            reason: reason.into(),
        }
    }
}
