//! # pixel-lut
//!
//! Color cube (3D LUT) tables for photographic color grades.
//!
//! # Types
//!
//! - [`LutTable`] - Immutable N×N×N RGBA cube with interpolated lookup
//! - [`Interpolation`] - Nearest, trilinear or tetrahedral evaluation
//!
//! # Sources
//!
//! - [`packed`] - 2D packed LUT images (tiles of N×N pixels)
//! - [`cube`] - Adobe/Resolve `.cube` text files
//!
//! # Usage
//!
//! ```rust
//! use pixel_lut::LutTable;
//!
//! let lut = LutTable::identity(17)?;
//! let rgba = lut.sample([0.5, 0.3, 0.2]);
//! assert!((rgba[0] - 0.5).abs() < 1e-5);
//!
//! // Half-strength variant used for filter intensity
//! let faded = lut.with_alpha_scaled(0.5);
//! assert_eq!(faded.sample([0.5, 0.3, 0.2])[3], 0.5);
//! # Ok::<(), pixel_lut::LutError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod interp;
mod table;
pub mod cube;
pub mod packed;

pub use error::{LutError, LutResult};
pub use interp::Interpolation;
pub use table::LutTable;
