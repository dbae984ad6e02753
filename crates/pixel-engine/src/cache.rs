//! LRU cache of rendered recipes.
//!
//! Rendered images are keyed by [`RecipeId`] and evicted least recently
//! used first once the byte budget is exceeded.

use std::collections::{HashMap, VecDeque};

use pixel_core::Image;

use crate::RecipeId;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries currently held.
    pub len: usize,
    /// Bytes currently held.
    pub bytes: u64,
}

impl CacheStats {
    /// Hit rate in `[0, 1]`, 0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CachedImage {
    image: Image,
    size_bytes: u64,
}

/// Byte-budgeted LRU cache of rendered images.
pub struct RenderCache {
    entries: HashMap<RecipeId, CachedImage>,
    /// Front = oldest.
    access_order: VecDeque<RecipeId>,
    total_bytes: u64,
    max_bytes: u64,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    /// Creates an empty cache holding at most `max_bytes`.
    pub fn with_budget(max_bytes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            total_bytes: 0,
            max_bytes,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached image, counting a hit or a miss.
    pub fn get(&mut self, id: RecipeId) -> Option<Image> {
        match self.entries.get(&id) {
            Some(entry) => {
                let image = entry.image.clone();
                self.hits += 1;
                self.touch(id);
                Some(image)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Returns `true` if `id` is cached. Does not affect statistics or order.
    pub fn contains(&self, id: RecipeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Inserts a rendered image, evicting old entries to stay within budget.
    ///
    /// Images larger than the whole budget are not stored.
    pub fn insert(&mut self, id: RecipeId, image: Image) {
        let size_bytes = image.byte_size();
        if size_bytes > self.max_bytes {
            return;
        }

        if let Some(old) = self.entries.remove(&id) {
            self.total_bytes = self.total_bytes.saturating_sub(old.size_bytes);
            self.access_order.retain(|k| *k != id);
        }

        while self.total_bytes + size_bytes > self.max_bytes && !self.entries.is_empty() {
            self.evict_lru();
        }

        self.entries.insert(id, CachedImage { image, size_bytes });
        self.access_order.push_back(id);
        self.total_bytes += size_bytes;
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
        self.total_bytes = 0;
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.entries.len(),
            bytes: self.total_bytes,
        }
    }

    fn evict_lru(&mut self) {
        if let Some(id) = self.access_order.pop_front() {
            if let Some(entry) = self.entries.remove(&id) {
                self.total_bytes = self.total_bytes.saturating_sub(entry.size_bytes);
            }
        }
    }

    fn touch(&mut self, id: RecipeId) {
        if let Some(pos) = self.access_order.iter().position(|k| *k == id) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageRecipe;

    fn id() -> RecipeId {
        ImageRecipe::from_image(Image::new(1, 1)).id()
    }

    // 1x1 RGBA f32 = 16 bytes.
    const PIXEL: u64 = 16;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = RenderCache::with_budget(1024);
        let key = id();
        assert!(cache.get(key).is_none());
        cache.insert(key, Image::new(1, 1));
        assert!(cache.get(key).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
        assert_eq!(stats.bytes, PIXEL);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RenderCache::with_budget(2 * PIXEL);
        let (a, b, c) = (id(), id(), id());
        cache.insert(a, Image::new(1, 1));
        cache.insert(b, Image::new(1, 1));

        // Touch a so b becomes the oldest.
        assert!(cache.get(a).is_some());
        cache.insert(c, Image::new(1, 1));

        assert!(cache.contains(a));
        assert!(!cache.contains(b));
        assert!(cache.contains(c));
        assert_eq!(cache.stats().bytes, 2 * PIXEL);
    }

    #[test]
    fn test_oversized_not_stored() {
        let mut cache = RenderCache::with_budget(PIXEL);
        let key = id();
        cache.insert(key, Image::new(2, 2));
        assert!(!cache.contains(key));
        assert_eq!(cache.stats().len, 0);
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut cache = RenderCache::with_budget(1024);
        let key = id();
        cache.insert(key, Image::new(1, 1));
        cache.insert(key, Image::new(2, 1));
        let stats = cache.stats();
        assert_eq!(stats.len, 1);
        assert_eq!(stats.bytes, 2 * PIXEL);

        cache.clear();
        assert_eq!(cache.stats().len, 0);
        assert_eq!(cache.stats().bytes, 0);
    }
}
