//! Memoizing reader over a [`Dotty`] accessor.
//!
//! The traversal engine itself never caches. `CachedDotty` sits outside it
//! and remembers read results keyed by the exact path string. Any write
//! through the cache clears every entry, because a write to one path can
//! change what any longer or shorter path resolves to.
//!
//! # Example
//!
//! ```
//! use dotquill::cache::CachedDotty;
//! use dotquill::{Dotty, Value};
//!
//! let mut cached = CachedDotty::new(Dotty::new());
//! cached.set("x.y", 1).unwrap();
//!
//! for _ in 0..10 {
//!     assert_eq!(cached.get("x.y").unwrap(), Value::from(1));
//! }
//! assert_eq!(cached.stats().hits, 9);
//! ```

use indexmap::IndexMap;
use tracing::trace;

use crate::document::Node;
use crate::dotty::Dotty;
use crate::error::Result;

/// Default number of paths kept before the oldest entry is evicted.
pub const DEFAULT_CAPACITY: usize = 256;

/// Hit and miss counters for a [`CachedDotty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Paths currently cached
    pub entries: usize,
}

/// A [`Dotty`] whose reads are memoized by path string.
#[derive(Debug)]
pub struct CachedDotty<'a, N: Node + Clone> {
    inner: Dotty<'a, N>,
    entries: IndexMap<String, N>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<'a, N: Node + Clone> CachedDotty<'a, N> {
    pub fn new(inner: Dotty<'a, N>) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` paths (at least one).
    pub fn with_capacity(inner: Dotty<'a, N>, capacity: usize) -> Self {
        Self {
            inner,
            entries: IndexMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the value at `path`, from the cache when possible.
    ///
    /// Slice segments are expanded as in [`Dotty::select`]. Failed lookups
    /// are not cached.
    pub fn get(&mut self, path: &str) -> Result<N> {
        if let Some(value) = self.entries.get(path) {
            self.hits += 1;
            return Ok(value.clone());
        }

        self.misses += 1;
        let value = self.inner.select(path)?;
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(path.to_string(), value.clone());
        Ok(value)
    }

    /// Checks `path` against the accessor directly, bypassing the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.inner.contains(path)
    }

    pub fn set<V: Into<N>>(&mut self, path: &str, value: V) -> Result<()> {
        self.invalidate();
        self.inner.set(path, value)
    }

    pub fn delete(&mut self, path: &str) -> Result<()> {
        self.invalidate();
        self.inner.delete(path)
    }

    pub fn pop(&mut self, path: &str) -> Result<N> {
        self.invalidate();
        self.inner.pop(path)
    }

    pub fn setdefault(&mut self, path: &str, default: N) -> Result<N> {
        self.invalidate();
        self.inner.setdefault(path, default).cloned()
    }

    /// Drops every cached entry.
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            trace!(
                target: "dotquill::cache",
                dropped = self.entries.len(),
                "Invalidating cache"
            );
            self.entries.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// Read-only access to the wrapped accessor.
    pub fn inner(&self) -> &Dotty<'a, N> {
        &self.inner
    }

    pub fn into_inner(self) -> Dotty<'a, N> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;
    use serde_json::json;

    fn cached() -> CachedDotty<'static, Value> {
        let root = Value::from(json!({"x": {"y": {"z": 1}}}));
        CachedDotty::new(Dotty::from_value(root).unwrap())
    }

    #[test]
    fn test_repeated_reads_hit() {
        let mut cache = cached();
        for _ in 0..10 {
            assert_eq!(cache.get("x.y.z").unwrap(), Value::from(1));
        }
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 9,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_write_to_prefix_is_not_stale() {
        let mut cache = cached();
        assert_eq!(cache.get("x.y.z").unwrap(), Value::from(1));
        cache.set("x.y", Value::from(json!({"z": 2}))).unwrap();
        assert_eq!(cache.get("x.y.z").unwrap(), Value::from(2));
    }

    #[test]
    fn test_delete_invalidates() {
        let mut cache = cached();
        assert!(cache.get("x.y.z").is_ok());
        cache.delete("x.y").unwrap();
        assert!(cache.get("x.y.z").is_err());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = cached();
        assert!(cache.get("missing").is_err());
        assert!(cache.get("missing").is_err());
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = CachedDotty::with_capacity(
            Dotty::from_value(Value::from(json!({"a": 1, "b": 2, "c": 3}))).unwrap(),
            2,
        );
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        cache.get("c").unwrap();
        assert_eq!(cache.stats().entries, 2);
        cache.get("a").unwrap();
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_pop_and_setdefault_invalidate() {
        let mut cache = cached();
        cache.get("x.y.z").unwrap();
        assert_eq!(cache.pop("x.y.z").unwrap(), Value::from(1));
        assert!(cache.get("x.y.z").is_err());
        assert_eq!(cache.setdefault("x.y.z", Value::from(5)).unwrap(), Value::from(5));
        assert_eq!(cache.get("x.y.z").unwrap(), Value::from(5));
    }
}
