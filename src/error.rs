/// Error taxonomy for the captioning core
///
/// Errors are `Clone` because they travel inside application messages
/// from background tasks back to the UI thread.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptionError {
    /// Unknown caption category name (programmer/config error)
    #[error("unknown caption type: {0}")]
    InvalidCaptionType(String),

    /// Image could not be read or decoded
    #[error("could not load image {path}: {message}")]
    ImageLoad { path: PathBuf, message: String },

    /// Model or runtime failure during generation
    #[error("generation failed: {0}")]
    Generation(String),

    /// Cooperative stop before any output was produced.
    /// Distinct from an error and from an empty caption.
    #[error("generation cancelled")]
    GenerationCancelled,

    /// Sidecar or settings file read/write failure
    #[error("file error for {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl CaptionError {
    /// Wrap a std::io::Error for the given path
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        CaptionError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
