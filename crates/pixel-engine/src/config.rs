//! Engine configuration.
//!
//! # Environment Variables
//!
//! Read by [`EngineConfig::from_env`]:
//!
//! - `PIXEL_PREHEAT_THREADS` - Preheat pool size (0 = one per core)
//! - `PIXEL_CACHE_MB` - Render cache budget in megabytes
//! - `PIXEL_DISABLE_CACHE` - Disable the render cache ("1" or "true")

use std::env;

/// Default render cache budget (256 MB).
pub const DEFAULT_CACHE_BUDGET: u64 = 256 * 1024 * 1024;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Threads in the preheat pool (0 = rayon default, one per core).
    pub preheat_threads: usize,
    /// Maximum bytes held by the render cache.
    pub cache_budget: u64,
    /// Whether rendered recipes are cached at all.
    pub cache_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preheat_threads: 0,
            cache_budget: DEFAULT_CACHE_BUDGET,
            cache_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `PIXEL_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(threads) = env_parse::<usize>("PIXEL_PREHEAT_THREADS") {
            config.preheat_threads = threads;
        }
        if let Some(mb) = env_parse::<u64>("PIXEL_CACHE_MB") {
            config.cache_budget = mb.saturating_mul(1024 * 1024);
        }
        if env_flag("PIXEL_DISABLE_CACHE") {
            config.cache_enabled = false;
        }
        config
    }

    /// Sets the preheat pool size.
    pub fn preheat_threads(mut self, threads: usize) -> Self {
        self.preheat_threads = threads;
        self
    }

    /// Sets the render cache budget in bytes.
    pub fn cache_budget(mut self, bytes: u64) -> Self {
        self.cache_budget = bytes;
        self
    }

    /// Sets the render cache budget in megabytes.
    pub fn cache_budget_mb(self, mb: u64) -> Self {
        self.cache_budget(mb.saturating_mul(1024 * 1024))
    }

    /// Enables or disables the render cache.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
