//! Thread-safe wrapper around `SplayMap`.
//!
//! The core map is a single-threaded structure: splaying reads restructure
//! the tree, so even `get` needs exclusive access. This wrapper provides the
//! mutual-exclusion boundary with one `parking_lot::RwLock` held for the
//! whole span of each operation (splay, local fixup, size update, and any
//! pruning it triggers), so concurrent callers observe a strict total order
//! of whole operations.
//!
//! Values are stored as `Arc<V>`: gets hand out a clone of the `Arc`, so a
//! caller can keep using a value even after the entry is evicted under it.
//!
//! ## Lock usage
//!
//! | Method                  | Lock  | Reason                              |
//! |-------------------------|-------|-------------------------------------|
//! | `insert` / `insert_arc` | write | mutates tree, may prune             |
//! | `get`                   | write | splaying restructures               |
//! | `obtain`                | read  | plain descent, shape untouched      |
//! | `remove` / `clear`      | write | mutates tree                        |
//! | `prune` / `set_max_size`| write | evicts                              |
//! | `contains_key` / `len`  | read  | read-only                           |
//! | `height` / `first` / …  | read  | read-only spine walks               |
//! | `entries`               | read  | snapshot via the ordered iterator   |

use std::sync::Arc;

use parking_lot::RwLock;

use crate::tree::map::SplayMap;

/// `SplayMap` behind a coarse `RwLock`, storing values as `Arc<V>`.
#[derive(Debug)]
pub struct ConcurrentSplayMap<K, V> {
    inner: RwLock<SplayMap<K, Arc<V>>>,
}

impl<K: Ord, V> ConcurrentSplayMap<K, V> {
    /// Creates an empty, unbounded concurrent map.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SplayMap::new()),
        }
    }

    /// Creates an empty concurrent map bounded at `max_size` entries.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            inner: RwLock::new(SplayMap::with_max_size(max_size)),
        }
    }

    /// Inserts a value, wrapping it in an `Arc` internally.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut map = self.inner.write();
        map.insert(key, Arc::new(value))
    }

    /// Inserts a pre-wrapped `Arc<V>`, avoiding a fresh allocation.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut map = self.inner.write();
        map.insert(key, value)
    }

    /// Splaying lookup. Takes the write lock because the access reshapes
    /// the tree.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut map = self.inner.write();
        map.get(key).cloned()
    }

    /// Non-splaying lookup under the read lock.
    pub fn obtain(&self, key: &K) -> Option<Arc<V>> {
        let map = self.inner.read();
        map.obtain(key).cloned()
    }

    /// Removes a key, returning its value if present.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut map = self.inner.write();
        map.remove(key)
    }

    /// Returns `true` if `key` is present. Does not splay.
    pub fn contains_key(&self, key: &K) -> bool {
        let map = self.inner.read();
        map.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        let map = self.inner.read();
        map.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        let map = self.inner.read();
        map.is_empty()
    }

    /// Current tree height in nodes.
    pub fn height(&self) -> usize {
        let map = self.inner.read();
        map.height()
    }

    /// Depth of `key` in edges from the root, without splaying.
    pub fn height_of(&self, key: &K) -> Option<usize> {
        let map = self.inner.read();
        map.height_of(key)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut map = self.inner.write();
        map.clear();
    }

    /// Sets or clears the size bound; shrinking evicts immediately.
    pub fn set_max_size(&self, max_size: Option<usize>) {
        let mut map = self.inner.write();
        map.set_max_size(max_size);
    }

    /// Returns the configured size bound, if any.
    pub fn max_size(&self) -> Option<usize> {
        let map = self.inner.read();
        map.max_size()
    }

    /// Runs one eviction cycle over the current tree.
    pub fn prune(&self) {
        let mut map = self.inner.write();
        map.prune();
    }

    /// Reports whether eviction has happened.
    pub fn was_pruned(&self) -> bool {
        let map = self.inner.read();
        map.was_pruned()
    }

    /// Registers a callback invoked once per evicted entry.
    pub fn set_on_evict(
        &self,
        callback: impl FnMut(&K, &Arc<V>) + Send + Sync + 'static,
    ) {
        let mut map = self.inner.write();
        map.set_on_evict(callback);
    }
}

impl<K: Ord + Clone, V> ConcurrentSplayMap<K, V> {
    /// Smallest key, if any.
    pub fn min_key(&self) -> Option<K> {
        let map = self.inner.read();
        map.min_key().cloned()
    }

    /// Largest key, if any.
    pub fn max_key(&self) -> Option<K> {
        let map = self.inner.read();
        map.max_key().cloned()
    }

    /// Smallest entry, if any.
    pub fn first(&self) -> Option<(K, Arc<V>)> {
        let map = self.inner.read();
        map.first().map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Largest entry, if any.
    pub fn last(&self) -> Option<(K, Arc<V>)> {
        let map = self.inner.read();
        map.last().map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Ascending snapshot of all entries, taken under the read lock.
    pub fn entries(&self) -> Vec<(K, Arc<V>)> {
        let map = self.inner.read();
        map.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Ord, V> Default for ConcurrentSplayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> crate::traits::ConcurrentMap for ConcurrentSplayMap<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn concurrent_basic_ops() {
        let map: ConcurrentSplayMap<u64, String> = ConcurrentSplayMap::new();
        assert!(map.insert(1, "one".to_string()).is_none());
        assert_eq!(map.get(&1).as_deref().map(String::as_str), Some("one"));
        assert_eq!(map.obtain(&1).as_deref().map(String::as_str), Some("one"));
        assert_eq!(map.len(), 1);
        assert!(map.remove(&1).is_some());
        assert!(map.is_empty());
    }

    #[test]
    fn arc_values_survive_eviction() {
        let map: ConcurrentSplayMap<u64, Vec<u8>> = ConcurrentSplayMap::with_max_size(4);
        map.insert(1, vec![1, 2, 3]);
        let held = map.get(&1).unwrap();
        for key in 2..50 {
            map.insert(key, vec![0]);
        }
        // entry 1 may be long gone; the Arc we hold is still valid
        assert_eq!(held.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn shared_across_threads() {
        let map = Arc::new(ConcurrentSplayMap::<u64, u64>::with_max_size(1024));
        let mut handles = Vec::new();
        for t in 0..4u64 {
            let map = Arc::clone(&map);
            handles.push(thread::spawn(move || {
                for i in 0..500u64 {
                    let key = t * 1000 + i;
                    map.insert(key, key);
                    map.get(&key);
                    map.obtain(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(map.len() <= 1024);
    }

    #[test]
    fn snapshot_is_ordered() {
        let map: ConcurrentSplayMap<i32, i32> = ConcurrentSplayMap::new();
        for key in [5, 1, 4, 2, 3] {
            map.insert(key, key * 10);
        }
        let keys: Vec<i32> = map.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn first_and_last_under_lock() {
        let map: ConcurrentSplayMap<&str, &str> = ConcurrentSplayMap::new();
        map.insert("foo", "bar");
        map.insert("baz", "qux");
        assert_eq!(map.min_key(), Some("baz"));
        assert_eq!(map.max_key(), Some("foo"));
        assert_eq!(map.first().map(|(k, _)| k), Some("baz"));
        assert_eq!(map.last().map(|(k, _)| k), Some("foo"));
    }
}
