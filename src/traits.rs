//! # Map Trait Hierarchy
//!
//! This module defines the trait surface for the map, separating the
//! universal dictionary operations from the ordered-introspection and
//! bounded-eviction capabilities so that generic code can ask for exactly
//! the operation set it needs.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────────────────┐
//!                    │              CoreMap<K, V>              │
//!                    │                                         │
//!                    │  insert(&mut, K, V) → Option<V>         │
//!                    │  get(&mut, &K) → Option<&V>             │
//!                    │  contains_key(&, &K) → bool             │
//!                    │  len(&) → usize                         │
//!                    │  is_empty(&) → bool                     │
//!                    │  clear(&mut)                            │
//!                    └──────────────────┬──────────────────────┘
//!                                       │
//!                                       ▼
//!                    ┌─────────────────────────────────────────┐
//!                    │            MutableMap<K, V>             │
//!                    │                                         │
//!                    │  remove(&mut, &K) → Option<V>           │
//!                    │  remove_batch(&mut, &[K])               │
//!                    └──────────────────┬──────────────────────┘
//!                                       │
//!                ┌──────────────────────┴──────────────────────┐
//!                ▼                                             ▼
//!   ┌────────────────────────────┐             ┌─────────────────────────────┐
//!   │      OrderedMap<K, V>      │             │      BoundedMap<K, V>       │
//!   │                            │             │                             │
//!   │  min_key() / max_key()     │             │  max_size() → Option<usize> │
//!   │  first() / last()          │             │  set_max_size(Option)       │
//!   │  height() / height_of(&K)  │             │  prune()                    │
//!   │                            │             │  was_pruned() → bool        │
//!   └────────────────────────────┘             └─────────────────────────────┘
//! ```
//!
//! ## Design notes
//!
//! - `get` takes `&mut self`: a self-adjusting read is a write to the
//!   structure's shape. `contains_key` is the `&self` probe that promises
//!   not to reshape anything.
//! - `OrderedMap` and `BoundedMap` both extend `MutableMap` rather than each
//!   other; a structure can be ordered without being an eviction cache.
//! - `ConcurrentMap` is a marker for wrappers that are safe to share across
//!   threads; the core map is not one.
//!
//! | Trait           | Extends      | Purpose                              |
//! |-----------------|--------------|--------------------------------------|
//! | `CoreMap`       | -            | Universal dictionary operations      |
//! | `MutableMap`    | `CoreMap`    | Arbitrary key removal                |
//! | `OrderedMap`    | `MutableMap` | Key-order introspection              |
//! | `BoundedMap`    | `MutableMap` | Size bound + eviction surface        |
//! | `ConcurrentMap` | `Send + Sync`| Marker for thread-safe wrappers      |

/// Core dictionary operations every map variant supports.
///
/// # Example
///
/// ```
/// use splaycache::traits::CoreMap;
/// use splaycache::tree::SplayMap;
///
/// fn warm<M: CoreMap<u64, String>>(map: &mut M, data: &[(u64, String)]) {
///     for (key, value) in data {
///         map.insert(*key, value.clone());
///     }
/// }
///
/// let mut map = SplayMap::new();
/// warm(&mut map, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(map.len(), 2);
/// ```
pub trait CoreMap<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Takes `&mut self` because a self-adjusting lookup reshapes the
    /// structure. Use [`contains_key`](Self::contains_key) for a probe that
    /// leaves the shape alone.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without reshaping anything.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries.
    fn clear(&mut self);
}

/// Maps that support arbitrary key-based removal.
pub trait MutableMap<K, V>: CoreMap<K, V> {
    /// Removes a key-value pair, returning the value if the key existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning the removed values in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Maps whose keys admit a total order and that expose it.
///
/// # Example
///
/// ```
/// use splaycache::traits::{CoreMap, OrderedMap};
/// use splaycache::tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// map.insert("foo", "bar");
/// map.insert("baz", "qux");
/// assert_eq!(OrderedMap::min_key(&map), Some(&"baz"));
/// assert_eq!(OrderedMap::last(&map), Some((&"foo", &"bar")));
/// ```
pub trait OrderedMap<K, V>: MutableMap<K, V> {
    /// Smallest key, if any.
    fn min_key(&self) -> Option<&K>;

    /// Largest key, if any.
    fn max_key(&self) -> Option<&K>;

    /// Entry with the smallest key, if any.
    fn first(&self) -> Option<(&K, &V)>;

    /// Entry with the largest key, if any.
    fn last(&self) -> Option<(&K, &V)>;

    /// Structure height in nodes (0 when empty).
    fn height(&self) -> usize;

    /// Depth of `key` in edges from the root, or `None` when absent.
    fn height_of(&self, key: &K) -> Option<usize>;
}

/// Maps with an optional size bound enforced by eviction.
///
/// # Example
///
/// ```
/// use splaycache::traits::{BoundedMap, CoreMap};
/// use splaycache::tree::SplayMap;
///
/// let mut map = SplayMap::with_max_size(100);
/// for key in 0..1000u32 {
///     map.insert(key, key);
/// }
/// assert!(map.len() <= 100);
/// assert!(BoundedMap::was_pruned(&map));
/// ```
pub trait BoundedMap<K, V>: MutableMap<K, V> {
    /// Returns the configured size bound, if any.
    fn max_size(&self) -> Option<usize>;

    /// Sets or clears the size bound; shrinking evicts immediately.
    fn set_max_size(&mut self, max_size: Option<usize>);

    /// Runs one eviction cycle.
    fn prune(&mut self);

    /// Reports whether eviction has happened.
    fn was_pruned(&self) -> bool;
}

/// Marker trait for maps that are safe to use concurrently.
///
/// Implementors guarantee that every operation is internally synchronized.
/// Wrap non-concurrent maps in a lock instead of implementing this.
pub trait ConcurrentMap: Send + Sync {}

mod impls {
    use super::{BoundedMap, CoreMap, MutableMap, OrderedMap};
    use crate::tree::SplayMap;

    impl<K: Ord, V> CoreMap<K, V> for SplayMap<K, V> {
        fn insert(&mut self, key: K, value: V) -> Option<V> {
            SplayMap::insert(self, key, value)
        }

        fn get(&mut self, key: &K) -> Option<&V> {
            SplayMap::get(self, key)
        }

        fn contains_key(&self, key: &K) -> bool {
            SplayMap::contains_key(self, key)
        }

        fn len(&self) -> usize {
            SplayMap::len(self)
        }

        fn clear(&mut self) {
            SplayMap::clear(self)
        }
    }

    impl<K: Ord, V> MutableMap<K, V> for SplayMap<K, V> {
        fn remove(&mut self, key: &K) -> Option<V> {
            SplayMap::remove(self, key)
        }
    }

    impl<K: Ord, V> OrderedMap<K, V> for SplayMap<K, V> {
        fn min_key(&self) -> Option<&K> {
            SplayMap::min_key(self)
        }

        fn max_key(&self) -> Option<&K> {
            SplayMap::max_key(self)
        }

        fn first(&self) -> Option<(&K, &V)> {
            SplayMap::first(self)
        }

        fn last(&self) -> Option<(&K, &V)> {
            SplayMap::last(self)
        }

        fn height(&self) -> usize {
            SplayMap::height(self)
        }

        fn height_of(&self, key: &K) -> Option<usize> {
            SplayMap::height_of(self, key)
        }
    }

    impl<K: Ord, V> BoundedMap<K, V> for SplayMap<K, V> {
        fn max_size(&self) -> Option<usize> {
            SplayMap::max_size(self)
        }

        fn set_max_size(&mut self, max_size: Option<usize>) {
            SplayMap::set_max_size(self, max_size)
        }

        fn prune(&mut self) {
            SplayMap::prune(self)
        }

        fn was_pruned(&self) -> bool {
            SplayMap::was_pruned(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SplayMap;

    fn generic_roundtrip<M: MutableMap<u32, u32>>(map: &mut M) {
        assert!(map.is_empty());
        assert_eq!(map.insert(1, 10), None);
        assert_eq!(map.insert(1, 11), Some(10));
        assert_eq!(map.get(&1), Some(&11));
        assert!(map.contains_key(&1));
        assert_eq!(map.remove(&1), Some(11));
        assert_eq!(map.remove(&1), None);
    }

    #[test]
    fn splay_map_satisfies_the_hierarchy() {
        let mut map: SplayMap<u32, u32> = SplayMap::new();
        generic_roundtrip(&mut map);
    }

    #[test]
    fn remove_batch_preserves_input_order() {
        let mut map: SplayMap<u32, &str> = SplayMap::new();
        map.insert(1, "one");
        map.insert(3, "three");
        let removed = MutableMap::remove_batch(&mut map, &[1, 2, 3]);
        assert_eq!(removed, vec![Some("one"), None, Some("three")]);
        assert!(CoreMap::is_empty(&map));
    }

    #[test]
    fn bounded_trait_enforces_through_generic_code() {
        fn fill<M: BoundedMap<u32, u32>>(map: &mut M) {
            map.set_max_size(Some(8));
            for key in 0..100 {
                map.insert(key, key);
            }
        }
        let mut map: SplayMap<u32, u32> = SplayMap::new();
        fill(&mut map);
        assert!(map.len() <= 8);
        assert!(BoundedMap::was_pruned(&map));
    }
}
