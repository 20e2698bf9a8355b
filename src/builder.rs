//! Builder for configured map instances.
//!
//! Collects the optional pieces (size bound, eviction callback, miss policy,
//! seed entries) before constructing the map, so call sites read as one
//! declaration instead of a constructor followed by setters.
//!
//! ## Example
//!
//! ```
//! use splaycache::builder::SplayMapBuilder;
//!
//! let mut map = SplayMapBuilder::new()
//!     .max_size(1000)
//!     .entries([(1u64, "one".to_string()), (2, "two".to_string())])
//!     .build();
//! assert_eq!(map.get(&1).map(String::as_str), Some("one"));
//! ```

use crate::tree::map::{ComputeFn, EvictFn, MissingKeyPolicy, SplayMap};

/// Builder producing a configured [`SplayMap`].
///
/// Every configuration is optional and the defaults match
/// [`SplayMap::new`]: unbounded, no callback, misses stay misses.
/// `build()` cannot fail; there is no invalid combination.
pub struct SplayMapBuilder<K, V> {
    max_size: Option<usize>,
    on_evict: Option<EvictFn<K, V>>,
    missing: MissingKeyPolicy<K, V>,
    entries: Vec<(K, V)>,
}

impl<K: Ord, V> SplayMapBuilder<K, V> {
    /// Starts an empty configuration.
    pub fn new() -> Self {
        Self {
            max_size: None,
            on_evict: None,
            missing: MissingKeyPolicy::None,
            entries: Vec::new(),
        }
    }

    /// Bounds the map at `max_size` entries.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Registers a callback invoked once per evicted entry.
    pub fn on_evict(mut self, callback: impl FnMut(&K, &V) + Send + Sync + 'static) -> Self {
        self.on_evict = Some(Box::new(callback));
        self
    }

    /// Makes policy-applying reads fall back to a clone of `value` on a
    /// miss, without storing anything.
    pub fn default_value(mut self, value: V) -> Self {
        self.missing = MissingKeyPolicy::Value(value);
        self
    }

    /// Makes policy-applying reads compute, store, and return a value on a
    /// miss (read-through behavior).
    pub fn default_fn(mut self, compute: impl FnMut(&K) -> V + Send + Sync + 'static) -> Self {
        self.missing = MissingKeyPolicy::Compute(Box::new(compute) as ComputeFn<K, V>);
        self
    }

    /// Seeds the map with `entries`; later duplicates overwrite earlier
    /// ones, and the bound is enforced while seeding.
    pub fn entries(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Builds the configured map.
    pub fn build(self) -> SplayMap<K, V> {
        let mut map = SplayMap::new();
        map.max_size = self.max_size;
        map.on_evict = self.on_evict;
        map.set_missing_policy(self.missing);
        map.merge_from(self.entries);
        map
    }
}

impl<K: Ord, V> Default for SplayMapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
