//! Capacity-bounded LRU memoization of generation requests.
//!
//! Keyed by (command, model, config). Entries never expire on their own;
//! eviction is purely capacity-based. Only short commands are memoized so
//! the key cardinality stays bounded.

use std::collections::HashMap;

use crate::types::Snippet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Commands at or above this many characters bypass the cache entirely.
pub const MAX_CACHEABLE_COMMAND_CHARS: usize = 200;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Composite cache key: command text plus model and config selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub command: String,
    pub model: String,
    pub config: String,
}

impl CacheKey {
    pub fn new(command: &str, model: &str, config: &str) -> Self {
        Self {
            command: command.to_string(),
            model: model.to_string(),
            config: config.to_string(),
        }
    }

    /// Whether a command is short enough to be memoized.
    pub fn cacheable(command: &str) -> bool {
        command.chars().count() < MAX_CACHEABLE_COMMAND_CHARS
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// A fixed-capacity LRU cache of generation results.
///
/// Both hits and inserts promote the key to most-recently-used. When an
/// insert pushes the map past capacity, the least-recently-used entry is
/// evicted. Failures are never stored here; callers only insert successful
/// results.
#[derive(Debug)]
pub struct RequestCache {
    capacity: usize,
    map: HashMap<CacheKey, Snippet>,
    /// Recency order: front is least recently used, back is most recent.
    order: Vec<CacheKey>,
}

impl RequestCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Look up a key, promoting it to most-recently-used on a hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<Snippet> {
        if self.map.contains_key(key) {
            self.touch(key);
        }
        self.map.get(key).cloned()
    }

    /// Insert a result, evicting the least-recently-used entry on overflow.
    pub fn insert(&mut self, key: CacheKey, value: Snippet) {
        if self.map.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }

        self.order.push(key);
        if self.map.len() > self.capacity {
            let evicted = self.order.remove(0);
            self.map.remove(&evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Move `key` to the most-recently-used position.
    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let key = self.order.remove(pos);
            self.order.push(key);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(code: &str) -> Snippet {
        Snippet {
            code: code.to_string(),
            explanation: format!("explains {code}"),
        }
    }

    fn key(command: &str) -> CacheKey {
        CacheKey::new(command, "gemini-1.5-pro", "default")
    }

    // -- get / insert ---------------------------------------------------------

    #[test]
    fn miss_returns_none() {
        let mut cache = RequestCache::new(4);
        assert!(cache.get(&key("absent")).is_none());
    }

    #[test]
    fn hit_returns_stored_pair() {
        let mut cache = RequestCache::new(4);
        cache.insert(key("sort"), snippet("sorted(xs)"));
        assert_eq!(cache.get(&key("sort")), Some(snippet("sorted(xs)")));
    }

    #[test]
    fn reinsert_replaces_value() {
        let mut cache = RequestCache::new(4);
        cache.insert(key("sort"), snippet("v1"));
        cache.insert(key("sort"), snippet("v2"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("sort")), Some(snippet("v2")));
    }

    #[test]
    fn distinct_model_is_a_distinct_key() {
        let mut cache = RequestCache::new(4);
        cache.insert(CacheKey::new("sort", "model-a", "default"), snippet("a"));
        assert!(cache
            .get(&CacheKey::new("sort", "model-b", "default"))
            .is_none());
    }

    // -- eviction -------------------------------------------------------------

    #[test]
    fn capacity_is_never_exceeded() {
        let mut cache = RequestCache::new(2);
        cache.insert(key("a"), snippet("a"));
        cache.insert(key("b"), snippet("b"));
        cache.insert(key("c"), snippet("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn least_recently_used_is_evicted_first() {
        let mut cache = RequestCache::new(2);
        cache.insert(key("a"), snippet("a"));
        cache.insert(key("b"), snippet("b"));
        cache.insert(key("c"), snippet("c"));
        assert!(cache.get(&key("a")).is_none());
        assert!(cache.get(&key("b")).is_some());
        assert!(cache.get(&key("c")).is_some());
    }

    #[test]
    fn hit_promotes_against_eviction() {
        let mut cache = RequestCache::new(2);
        cache.insert(key("a"), snippet("a"));
        cache.insert(key("b"), snippet("b"));
        // Touch "a" so "b" becomes the LRU entry.
        assert!(cache.get(&key("a")).is_some());
        cache.insert(key("c"), snippet("c"));
        assert!(cache.get(&key("a")).is_some());
        assert!(cache.get(&key("b")).is_none());
    }

    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut cache = RequestCache::new(0);
        cache.insert(key("a"), snippet("a"));
        assert_eq!(cache.len(), 1);
    }

    // -- eligibility ----------------------------------------------------------

    #[test]
    fn short_command_is_cacheable() {
        let command = "x".repeat(MAX_CACHEABLE_COMMAND_CHARS - 1);
        assert!(CacheKey::cacheable(&command));
    }

    #[test]
    fn threshold_command_is_not_cacheable() {
        let command = "x".repeat(MAX_CACHEABLE_COMMAND_CHARS);
        assert!(!CacheKey::cacheable(&command));
    }
}
