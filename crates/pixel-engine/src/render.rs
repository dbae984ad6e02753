//! Recipe evaluation.
//!
//! [`Renderer`] walks a recipe bottom-up and runs each node as a
//! rayon-parallel per-pixel kernel. Finished renders are kept in a
//! [`RenderCache`] keyed by recipe identity, so rendering the same recipe
//! twice (or once on a preheat thread and once for display) computes it once.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pixel_core::{ColorSpaceId, Image};
use pixel_lut::LutTable;
use tracing::{debug, trace};

use crate::cache::{CacheStats, RenderCache};
use crate::recipe::Op;
use crate::{composite, EngineConfig, EngineResult, ImageRecipe};

/// Materializes [`ImageRecipe`]s into [`Image`]s.
///
/// `Renderer` is `Sync`; share it behind an `Arc` to render from several
/// threads.
pub struct Renderer {
    cache: Option<Mutex<RenderCache>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Renderer {
    /// Creates a renderer with the cache settings from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        let cache = config
            .cache_enabled
            .then(|| Mutex::new(RenderCache::with_budget(config.cache_budget)));
        Self { cache }
    }

    /// Renders `recipe` to pixels.
    ///
    /// # Errors
    ///
    /// [`EngineError::Core`](crate::EngineError::Core) with a dimension
    /// mismatch when a source-over node combines images of different extents.
    pub fn render(&self, recipe: &ImageRecipe) -> EngineResult<Image> {
        if let Some(cache) = &self.cache {
            if let Some(image) = lock(cache).get(recipe.id()) {
                trace!(id = %recipe.id(), "render cache hit");
                return Ok(image);
            }
        }

        debug!(
            id = %recipe.id(),
            kind = recipe.kind(),
            extent = %recipe.extent(),
            "Rendering recipe"
        );
        let image = self.evaluate(recipe)?;

        if let Some(cache) = &self.cache {
            lock(cache).insert(recipe.id(), image.clone());
        }
        Ok(image)
    }

    /// Returns `true` if `recipe` has a cached render.
    pub fn is_cached(&self, recipe: &ImageRecipe) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|cache| lock(cache).contains(recipe.id()))
    }

    /// Cache counters; all zero when caching is disabled.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map(|cache| lock(cache).stats())
            .unwrap_or_default()
    }

    /// Drops every cached render.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            lock(cache).clear();
        }
    }

    fn evaluate(&self, recipe: &ImageRecipe) -> EngineResult<Image> {
        match recipe.op() {
            Op::Source(image) => Ok(image.clone()),
            Op::ColorCube {
                input,
                table,
                working_space,
                convert,
            } => {
                let input = self.evaluate(input)?;
                Ok(color_cube(&input, table, *working_space, *convert))
            }
            Op::ColorMatrix { input, matrix } => {
                let input = self.evaluate(input)?;
                Ok(matrix.apply_image(&input))
            }
            Op::SourceOver {
                foreground,
                background,
            } => {
                let fg = self.evaluate(foreground)?;
                let bg = self.evaluate(background)?;
                composite::over(&fg, &bg)
            }
        }
    }
}

/// Cube lookup kernel. Output alpha is the cube alpha times the input alpha.
fn color_cube(input: &Image, table: &LutTable, space: ColorSpaceId, convert: bool) -> Image {
    input.map_pixels(|px| {
        let rgb = [px[0], px[1], px[2]];
        let lookup = if convert { space.encode_rgb(rgb) } else { rgb };
        let out = table.sample(lookup);
        let rgb = [out[0], out[1], out[2]];
        let rgb = if convert { space.decode_rgb(rgb) } else { rgb };
        [rgb[0], rgb[1], rgb[2], out[3] * px[3]]
    })
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("cache", &self.cache.is_some().then(|| self.cache_stats()))
            .finish()
    }
}

fn lock(cache: &Mutex<RenderCache>) -> MutexGuard<'_, RenderCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
