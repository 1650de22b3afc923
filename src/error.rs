//! Error types for the watermark pipeline.

use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WatermarkError>;

/// Everything that can stop a watermarking run.
#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("could not decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("could not encode '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only produced while probing font candidates; the resolver swallows it.
    #[error("font '{}' unusable: {reason}", path.display())]
    Font { path: PathBuf, reason: String },
}
