//! # pixel-io
//!
//! Reads and writes [`pixel_core::Image`] as PNG. Used to load packed LUT
//! assets and source photos, and to save rendered results.
//!
//! ```rust,ignore
//! use pixel_io::png;
//!
//! let image = png::read("photo.png")?;
//! png::write("copy.png", &image)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};
