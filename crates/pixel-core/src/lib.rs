//! # pixel-core
//!
//! Core types shared by the pixel-rs crates.
//!
//! - [`Image`] - Materialized straight-alpha RGBA `f32` pixels
//! - [`Extent`] - Pixel rectangle of an image
//! - [`ColorSpaceId`] - Color space tag with its transfer functions
//! - [`Error`] / [`Result`] - Error types for buffer operations
//!
//! ## Crate Structure
//!
//! ```text
//! pixel-core (this crate)
//!    ^
//!    |
//!    +-- pixel-lut (LUT tables, packed LUT images, .cube)
//!    +-- pixel-io (PNG)
//!    +-- pixel-engine (recipes, rendering, color cube filters)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod image;

pub use colorspace::ColorSpaceId;
pub use error::{Error, Result};
pub use image::{Extent, Image, CHANNELS};
