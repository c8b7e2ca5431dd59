//! Bounded Result Cache
//!
//! Insertion-ordered map with a deterministic batch-eviction policy: no
//! entry is ever evicted individually; once an insert pushes the size past
//! capacity, exactly `capacity / 2 + 1` oldest entries are dropped in one
//! pass. Callers depend on the resulting size trajectory, so the drop count
//! must not change.

use indexmap::IndexMap;
use tracing::trace;

/// Bounded cache keyed by canonical address strings.
///
/// Insertion order is tracked only for eviction; it is not a guarantee
/// exposed to callers. The cache does no locking of its own: the owner must
/// serialize get+insert as one logical unit per key.
#[derive(Debug)]
pub struct BoundedCache<V> {
    entries: IndexMap<String, V>,
    capacity: usize,
}

impl<V> BoundedCache<V> {
    /// Create a cache that holds at most `capacity` entries between trims.
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be non-zero");
        Self {
            entries: IndexMap::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert a value, then trim if the cache overflowed.
    ///
    /// Re-inserting an existing key repositions it as the newest entry for
    /// eviction purposes.
    pub fn insert(&mut self, key: String, value: V) {
        self.entries.shift_remove(&key);
        self.entries.insert(key, value);
        self.trim_if_overflow();
    }

    fn trim_if_overflow(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }

        let drop_count = self.capacity / 2 + 1;
        self.entries.drain(..drop_count);
        trace!(
            dropped = drop_count,
            retained = self.entries.len(),
            "cache overflow, dropped oldest entries"
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
