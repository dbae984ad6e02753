//! Background cache warming.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::{EngineConfig, EngineError, EngineResult, ImageRecipe, Renderer};

/// Fire-and-forget renderer on a dedicated thread pool.
///
/// Submitted recipes are rendered through the shared [`Renderer`] purely to
/// fill its cache. Nothing is returned and failures are only logged.
#[derive(Clone)]
pub struct Preheater {
    pool: Arc<ThreadPool>,
    renderer: Arc<Renderer>,
}

impl Preheater {
    /// Creates a pool of `config.preheat_threads` workers (0 = one per core).
    ///
    /// # Errors
    ///
    /// [`EngineError::ThreadPool`] if the pool cannot be spawned.
    pub fn new(config: &EngineConfig, renderer: Arc<Renderer>) -> EngineResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.preheat_threads)
            .thread_name(|index| format!("pixel-preheat-{index}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
        debug!(threads = pool.current_num_threads(), "Preheat pool started");

        Ok(Self {
            pool: Arc::new(pool),
            renderer,
        })
    }

    /// Queues a render of `recipe` and returns immediately.
    pub fn submit(&self, recipe: &ImageRecipe) {
        let recipe = recipe.clone();
        let renderer = Arc::clone(&self.renderer);
        trace!(id = %recipe.id(), "Queueing preheat");
        self.pool.spawn(move || {
            if let Err(e) = renderer.render(&recipe) {
                debug!(id = %recipe.id(), error = %e, "Preheat failed");
            }
        });
    }

    /// Renderer the pool warms.
    pub fn renderer(&self) -> &Arc<Renderer> {
        &self.renderer
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for Preheater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preheater")
            .field("threads", &self.threads())
            .finish_non_exhaustive()
    }
}
