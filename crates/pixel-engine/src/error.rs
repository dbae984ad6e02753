//! Error types for the filter engine.

use pixel_lut::LutError;
use thiserror::Error;

/// Error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// LUT construction failed (bad dimension or sample count).
    #[error("LUT error: {0}")]
    Lut(#[from] LutError),

    /// Image buffer error, including extent mismatches while compositing.
    #[error(transparent)]
    Core(#[from] pixel_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The preheat thread pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
