//! Top-level rendering context.

use std::sync::Arc;

use pixel_core::Image;
use tracing::debug;

use crate::{
    ColorCubeFilter, ColorCubeStorage, EngineConfig, EngineResult, ImageRecipe, Preheater,
    PreviewColorCubeFilter, Renderer,
};

/// Shared renderer and preheat pool.
///
/// ```rust
/// use pixel_core::{ColorSpaceId, Image};
/// use pixel_engine::{ColorCubeFilter, Engine, EngineConfig, ImageRecipe};
/// use pixel_lut::LutTable;
///
/// let engine = Engine::new(EngineConfig::default().preheat_threads(1))?;
/// let filter = ColorCubeFilter::new(
///     "Identity", "identity", LutTable::identity(2)?, 2, ColorSpaceId::Srgb,
/// )?;
/// let source = ImageRecipe::from_image(Image::new(4, 4));
///
/// let preview = engine.preview(&source, filter);
/// let pixels = engine.render(preview.rendered())?;
/// assert_eq!(pixels.width(), 4);
/// # Ok::<(), pixel_engine::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    renderer: Arc<Renderer>,
    preheater: Preheater,
}

impl Engine {
    /// Creates the renderer and preheat pool described by `config`.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let renderer = Arc::new(Renderer::new(&config));
        let preheater = Preheater::new(&config, Arc::clone(&renderer))?;
        debug!(?config, "Engine ready");
        Ok(Self {
            config,
            renderer,
            preheater,
        })
    }

    /// Renders a recipe through the shared cache.
    pub fn render(&self, recipe: &ImageRecipe) -> EngineResult<Image> {
        self.renderer.render(recipe)
    }

    /// Builds a preview and starts warming it.
    pub fn preview(&self, source: &ImageRecipe, filter: ColorCubeFilter) -> PreviewColorCubeFilter {
        let preview = PreviewColorCubeFilter::new(source, filter);
        preview.preheat(&self.preheater);
        preview
    }

    /// One preheated preview per stored filter, in storage order.
    pub fn previews(
        &self,
        source: &ImageRecipe,
        storage: &ColorCubeStorage,
    ) -> Vec<PreviewColorCubeFilter> {
        debug!(count = storage.len(), extent = %source.extent(), "Building previews");
        storage
            .iter()
            .map(|filter| self.preview(source, filter.clone()))
            .collect()
    }

    /// Queues a background render of `recipe`.
    pub fn preheat(&self, recipe: &ImageRecipe) {
        self.preheater.submit(recipe);
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared renderer.
    pub fn renderer(&self) -> &Arc<Renderer> {
        &self.renderer
    }

    /// Preheat pool.
    pub fn preheater(&self) -> &Preheater {
        &self.preheater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_core::ColorSpaceId;
    use pixel_lut::LutTable;

    #[test]
    fn test_previews_follow_storage_order() {
        let engine = Engine::new(EngineConfig::default().preheat_threads(1)).unwrap();
        let mut storage = ColorCubeStorage::new();
        for id in ["warm", "cool", "mono"] {
            storage
                .push(
                    ColorCubeFilter::new(id, id, LutTable::identity(2).unwrap(), 2, ColorSpaceId::Srgb)
                        .unwrap(),
                )
                .unwrap();
        }

        let source = ImageRecipe::from_image(Image::new(2, 2));
        let previews = engine.previews(&source, &storage);
        let ids: Vec<_> = previews.iter().map(|p| p.filter().identifier()).collect();
        assert_eq!(ids, ["warm", "cool", "mono"]);
        assert!(previews.iter().all(|p| p.source().ptr_eq(&source)));
    }
}
