//! Bounded memo table with oldest-first eviction.
//!
//! Used by [`crate::distance::DistanceEstimator`] to cap memory during long
//! searches. Scoped to one search run: the engine owns its estimator.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A `HashMap` capped at `capacity` entries.
///
/// When an insert would exceed the cap, the oldest inserted key is evicted
/// first. Lookups do not refresh age.
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
    evictions: u64,
}

impl<K: Eq + Hash + Clone, V> BoundedCache<K, V> {
    /// Create an empty cache. A `capacity` of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            evictions: 0,
        }
    }

    /// Look up a cached value.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert or overwrite `key`. Overwriting keeps the original age.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.evictions += 1;
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total entries evicted since creation.
    #[must_use]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
