//! Size-one memoization for squircle paths.
//!
//! Layout passes tend to rebuild identical geometry frame after frame. The
//! cache keeps the last path per slot and hands out the same [`Arc`] while the
//! key is unchanged; a different key simply misses and replaces the entry.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::path::{SquirclePath, build_inset_squircle_path};

/// Every input that affects a built path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathKey {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub corner_smoothing: f32,
    /// Inset applied via [`build_inset_squircle_path`]; the stroke width for
    /// a border-centered fill path.
    pub stroke_width: f32,
}

impl PathKey {
    pub fn build(&self) -> SquirclePath {
        build_inset_squircle_path(
            self.width,
            self.height,
            self.radius,
            self.corner_smoothing,
            self.stroke_width,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct PathCache {
    last: Option<(PathKey, Arc<SquirclePath>)>,
    stats: CacheStats,
    disabled: bool,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that never retains anything; every lookup rebuilds.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub fn get(&mut self, key: PathKey) -> Arc<SquirclePath> {
        if let Some((last_key, path)) = &self.last {
            if *last_key == key {
                self.stats.hits += 1;
                return path.clone();
            }
        }
        self.stats.misses += 1;
        let path = Arc::new(key.build());
        if !self.disabled {
            self.last = Some((key, path.clone()));
        }
        path
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// [`PathCache`] behind a lock, for callers that share one cache across threads.
#[derive(Debug, Default)]
pub struct SharedPathCache {
    inner: Mutex<PathCache>,
}

impl SharedPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: PathKey) -> Arc<SquirclePath> {
        self.inner.lock().get(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(width: f32) -> PathKey {
        PathKey {
            width,
            height: 40.0,
            radius: 10.0,
            corner_smoothing: 0.6,
            stroke_width: 0.0,
        }
    }

    #[test]
    fn hit_returns_the_same_allocation() {
        let mut cache = PathCache::new();
        let a = cache.get(key(80.0));
        let b = cache.get(key(80.0));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn changed_key_misses_and_replaces() {
        let mut cache = PathCache::new();
        let a = cache.get(key(80.0));
        let b = cache.get(key(81.0));
        assert!(!Arc::ptr_eq(&a, &b));
        let c = cache.get(key(80.0));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(*a, *c);
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn disabled_cache_always_rebuilds() {
        let mut cache = PathCache::disabled();
        let a = cache.get(key(80.0));
        let b = cache.get(key(80.0));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn shared_cache_is_usable_across_threads() {
        let cache = Arc::new(SharedPathCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get(key(64.0)))
            })
            .collect();
        let paths: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for p in &paths {
            assert_eq!(**p, *paths[0]);
        }
        assert_eq!(cache.stats().hits + cache.stats().misses, 4);
    }
}
