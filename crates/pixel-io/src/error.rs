//! I/O error types.

use thiserror::Error;

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing images.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying file error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The image could not be encoded.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Color type / bit depth combination is not handled.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded samples did not form a valid image.
    #[error(transparent)]
    Core(#[from] pixel_core::Error),
}
