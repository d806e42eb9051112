//! Error types for map generation and export.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for glassmap operations.
#[derive(Error, Debug)]
pub enum GlassError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("image encode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse preset '{}': {source}", .path.display())]
    Preset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl GlassError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GlassError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type GlassResult<T> = Result<T, GlassError>;
