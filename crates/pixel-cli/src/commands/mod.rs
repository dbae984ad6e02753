//! CLI command implementations

pub mod apply;
pub mod filmstrip;
pub mod identity;
pub mod list;

use anyhow::{Context, Result};
use pixel_core::Image;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    pixel_io::png::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    pixel_io::png::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
