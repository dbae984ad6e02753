//! # pixel-engine
//!
//! Color cube filters over lazily rendered images.
//!
//! # Overview
//!
//! - [`ImageRecipe`] - Immutable description of an image (source, LUT
//!   lookup, color matrix, source-over)
//! - [`Renderer`] - Materializes recipes with parallel kernels and an LRU
//!   cache
//! - [`ColorCubeFilter`] - A 3D LUT grade with a blend amount
//! - [`PreviewColorCubeFilter`] - Source + filter + graded recipe, with
//!   background preheat
//! - [`Preheater`] - Fire-and-forget renders on a dedicated rayon pool
//! - [`Engine`] - Renderer, preheater and configuration bundled together
//!
//! # Example
//!
//! ```rust
//! use pixel_core::{ColorSpaceId, Image};
//! use pixel_engine::{ColorCubeFilter, ImageRecipe, Renderer};
//! use pixel_lut::LutTable;
//!
//! let filter = ColorCubeFilter::new(
//!     "Identity", "identity", LutTable::identity(17)?, 17, ColorSpaceId::Srgb,
//! )?
//! .with_amount(0.5)?;
//!
//! let source = ImageRecipe::from_image(Image::filled(4, 4, [0.5, 0.5, 0.5, 1.0]));
//! let graded = filter.apply(&source, &source, 1.0);
//! let pixels = Renderer::default().render(&graded)?;
//! assert_eq!(pixels.extent(), source.extent());
//! # Ok::<(), pixel_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
pub mod composite;
mod config;
mod engine;
mod error;
mod filter;
mod matrix;
mod preheat;
mod preview;
mod recipe;
mod render;
mod storage;

pub use cache::{CacheStats, RenderCache};
pub use config::{EngineConfig, DEFAULT_CACHE_BUDGET};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use filter::ColorCubeFilter;
pub use matrix::ColorMatrix;
pub use preheat::Preheater;
pub use preview::PreviewColorCubeFilter;
pub use recipe::{ImageRecipe, RecipeId};
pub use render::Renderer;
pub use storage::ColorCubeStorage;
