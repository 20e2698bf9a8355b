//! # Self-adjusting ordered map
//!
//! `SplayMap` is a key/value container backed by a splay tree: every splaying
//! access rotates the touched key to the root, so recently and frequently
//! used keys cluster near the top while idle keys sink toward the leaves.
//! The pruner (see `tree::prune`) exploits that drift to evict cold entries
//! in bulk, which makes the map usable as a bounded cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │                         SplayMap<K, V>                          │
//!   │                                                                 │
//!   │   root ──► ┌──────┐                                             │
//!   │            │ hot  │          length:    node count              │
//!   │          ┌─┴─┐  ┌─┴─┐        max_size:  optional bound          │
//!   │          │   │  │   │        was_pruned: last-op eviction flag  │
//!   │        ┌─┴─┐ ...  ┌─┴─┐      on_evict:  per-entry callback      │
//!   │        │cold│     │cold│     missing:   miss policy             │
//!   │        └────┘     └────┘                                        │
//!   │                                                                 │
//!   │   splaying reads/writes  ──► tree::splay (restructures)         │
//!   │   obtain / introspection ──► plain descent (read-only)          │
//!   │   bound enforcement      ──► tree::prune (leaf eviction)        │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method                | Splays | Complexity      | Notes                       |
//! |-----------------------|--------|-----------------|-----------------------------|
//! | `insert(k, v)`        | yes    | amortized O(lg) | may trigger pruning         |
//! | `get(&k)`             | yes    | amortized O(lg) | self-optimizing read        |
//! | `get_mut(&k)`         | yes    | amortized O(lg) |                             |
//! | `obtain(&k)`          | no     | O(height)       | read-only descent           |
//! | `fetch(&k)`           | yes    | amortized O(lg) | `Err(KeyNotFound)` on miss  |
//! | `remove(&k)`          | yes    | amortized O(lg) | joins subtrees by splay     |
//! | `contains_key(&k)`    | no     | O(height)       |                             |
//! | `height` / `height_of`| no     | O(n) / O(height)|                             |
//! | `first` / `last`      | no     | O(height)       | spine walks                 |
//! | `iter` / `keys` / ... | no     | O(n) total      | ascending, ancestor stack   |
//!
//! Splaying is what keeps the amortized bounds: a read is a write to the
//! tree's shape. Callers that must not disturb the shape (monitoring,
//! invariant checks) use the `obtain` family instead.
//!
//! ## Bounded operation
//!
//! With `set_max_size(Some(n))` the map prunes leaves after any insert that
//! grows it past `n`, and `was_pruned()` reports whether the most recent
//! insert, prune, or bound change evicted anything. An `on_evict` callback
//! observes each evicted entry before it is detached. See `tree::prune` for
//! the eviction mechanics.
//!
//! ## Thread safety
//!
//! `SplayMap` is single-threaded; even reads take `&mut self` when they
//! splay. `ConcurrentSplayMap` (feature `concurrency`) wraps it in a
//! `parking_lot::RwLock` for shared use.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::{InvariantError, KeyNotFound, ValueNotFound};
use crate::tree::iter::{IntoIter, Iter, Keys, Values};
use crate::tree::node::{Link, Node};
use crate::tree::splay::splay;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MapMetricsReadRecorder, MapMetricsRecorder, MetricsSnapshotProvider,
};

/// Callback observing an entry as it is evicted by the pruner.
pub type EvictFn<K, V> = Box<dyn FnMut(&K, &V) + Send + Sync>;

/// Callback producing a value for a missing key (read-through policy).
pub type ComputeFn<K, V> = Box<dyn FnMut(&K) -> V + Send + Sync>;

/// What a policy-applying read does when the key is absent.
///
/// - `None`: the miss is reported as-is.
/// - `Value`: a configured fallback is cloned and returned, without storing.
/// - `Compute`: the callback's value is stored under the key and returned,
///   turning the map into a read-through cache.
pub enum MissingKeyPolicy<K, V> {
    /// Misses stay misses.
    None,
    /// Misses fall back to a clone of this value; the map is not modified.
    Value(V),
    /// Misses compute a value, insert it, and return it.
    Compute(ComputeFn<K, V>),
}

impl<K, V> Default for MissingKeyPolicy<K, V> {
    fn default() -> Self {
        MissingKeyPolicy::None
    }
}

impl<K, V: fmt::Debug> fmt::Debug for MissingKeyPolicy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingKeyPolicy::None => f.write_str("None"),
            MissingKeyPolicy::Value(v) => f.debug_tuple("Value").field(v).finish(),
            MissingKeyPolicy::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

/// Self-adjusting ordered map with optional bounded-size eviction.
pub struct SplayMap<K, V> {
    pub(crate) root: Link<K, V>,
    pub(crate) length: usize,
    pub(crate) max_size: Option<usize>,
    pub(crate) was_pruned: bool,
    pub(crate) on_evict: Option<EvictFn<K, V>>,
    pub(crate) missing: MissingKeyPolicy<K, V>,
    #[cfg(feature = "metrics")]
    pub(crate) metrics: MapMetrics,
}

impl<K, V> SplayMap<K, V> {
    /// Creates an empty, unbounded map.
    pub fn new() -> Self {
        Self {
            root: None,
            length: 0,
            max_size: None,
            was_pruned: false,
            on_evict: None,
            missing: MissingKeyPolicy::None,
            #[cfg(feature = "metrics")]
            metrics: MapMetrics::default(),
        }
    }

    /// Creates an empty map that prunes itself down to `max_size` entries.
    pub fn with_max_size(max_size: usize) -> Self {
        let mut map = Self::new();
        map.max_size = Some(max_size);
        map
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Drops every entry and resets the eviction flag.
    ///
    /// Teardown is iterative, so even a fully skewed tree cannot overflow
    /// the call stack.
    pub fn clear(&mut self) {
        self.drop_tree();
        self.length = 0;
        self.was_pruned = false;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Installs the miss policy used by [`resolve`](Self::resolve).
    pub fn set_missing_policy(&mut self, policy: MissingKeyPolicy<K, V>) {
        self.missing = policy;
    }

    /// Registers a callback invoked once per evicted entry, before the entry
    /// is detached. The callback sees the key and value by reference and
    /// must not assume anything about eviction order.
    pub fn set_on_evict(&mut self, callback: impl FnMut(&K, &V) + Send + Sync + 'static) {
        self.on_evict = Some(Box::new(callback));
    }

    /// Removes a previously registered eviction callback.
    pub fn clear_on_evict(&mut self) {
        self.on_evict = None;
    }

    /// Borrowing iterator over `(key, value)` pairs in ascending key order.
    ///
    /// Iteration never splays and never changes the tree shape; it walks an
    /// explicit ancestor stack, so deep trees are safe to traverse.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Borrowing iterator over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Borrowing iterator over values, in ascending order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Smallest key/value pair, if any. Does not splay.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut cur = self.root.as_deref()?;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        Some((&cur.key, &cur.value))
    }

    /// Largest key/value pair, if any. Does not splay.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut cur = self.root.as_deref()?;
        while let Some(right) = cur.right.as_deref() {
            cur = right;
        }
        Some((&cur.key, &cur.value))
    }

    /// Smallest key, if any. Does not splay.
    pub fn min_key(&self) -> Option<&K> {
        self.first().map(|(key, _)| key)
    }

    /// Largest key, if any. Does not splay.
    pub fn max_key(&self) -> Option<&K> {
        self.last().map(|(key, _)| key)
    }

    /// Height of the tree in nodes: 0 for an empty map, 1 for a single entry.
    ///
    /// Computed with an explicit stack in one pass. The pruner derives its
    /// depth threshold from this value.
    pub fn height(&self) -> usize {
        let mut max_depth = 0usize;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }

    /// Applies `f` to every value in place, in ascending key order.
    ///
    /// Like iteration this walks an explicit stack and leaves the tree shape
    /// untouched.
    pub fn transform_values<F: FnMut(&mut V)>(&mut self, mut f: F) {
        let mut stack: Vec<*mut Node<K, V>> = Vec::new();
        let mut cur: Option<*mut Node<K, V>> =
            self.root.as_deref_mut().map(|node| node as *mut _);
        while cur.is_some() || !stack.is_empty() {
            while let Some(ptr) = cur {
                stack.push(ptr);
                // SAFETY: `ptr` points at a live node owned by this tree. The
                // walk pushes each node once and no link is modified, so no
                // two live mutable borrows alias.
                cur = unsafe { (*ptr).left.as_deref_mut().map(|node| node as *mut _) };
            }
            let Some(ptr) = stack.pop() else { break };
            // SAFETY: as above; the borrow for `f` ends before the next pop.
            unsafe {
                f(&mut (*ptr).value);
                cur = (*ptr).right.as_deref_mut().map(|node| node as *mut _);
            }
        }
    }

    /// Iteratively releases the whole tree.
    ///
    /// Nodes are detached from their children before being dropped, so `Box`
    /// never recurses through a deep chain.
    pub(crate) fn drop_tree(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}

impl<K: Ord, V> SplayMap<K, V> {
    /// Inserts `key -> value`, returning the previous value if the key was
    /// already present.
    ///
    /// A fresh key is installed at the root by splitting the splayed tree
    /// around it. When the map is bounded, a growing insert that exceeds the
    /// bound prunes cold leaves until the bound holds again. Every insert
    /// rewrites `was_pruned()` with its own outcome: `true` when it evicted,
    /// `false` otherwise (overwrites never evict).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let steps = splay(&key, &mut self.root);
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_steps(steps);
        #[cfg(not(feature = "metrics"))]
        let _ = steps;

        match self.root.take() {
            None => {
                self.root = Some(Box::new(Node::new(key, value)));
                self.length = 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                self.was_pruned = self.enforce_bound();
                None
            }
            Some(mut top) => match key.cmp(&top.key) {
                Ordering::Equal => {
                    let previous = mem::replace(&mut top.value, value);
                    self.root = Some(top);
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_update();
                    // an overwrite touches no tree shape, so it cannot prune
                    self.was_pruned = false;
                    Some(previous)
                }
                Ordering::Less => {
                    let mut node = Box::new(Node::new(key, value));
                    node.left = top.left.take();
                    node.right = Some(top);
                    self.root = Some(node);
                    self.length += 1;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_new();
                    self.was_pruned = self.enforce_bound();
                    None
                }
                Ordering::Greater => {
                    let mut node = Box::new(Node::new(key, value));
                    node.right = top.right.take();
                    node.left = Some(top);
                    self.root = Some(node);
                    self.length += 1;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_new();
                    self.was_pruned = self.enforce_bound();
                    None
                }
            },
        }
    }

    /// Splaying lookup: the accessed key (or its in-order neighbor, on a
    /// miss) is rotated to the root, so repeated hits get cheaper.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let steps = splay(key, &mut self.root);
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_steps(steps);
        #[cfg(not(feature = "metrics"))]
        let _ = steps;

        match self.root.as_deref() {
            Some(node) if node.key == *key => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                Some(&node.value)
            }
            _ => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                None
            }
        }
    }

    /// Splaying lookup with in-place mutation access.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let steps = splay(key, &mut self.root);
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_steps(steps);
        #[cfg(not(feature = "metrics"))]
        let _ = steps;

        match self.root.as_deref_mut() {
            Some(node) if node.key == *key => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                Some(&mut node.value)
            }
            _ => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                None
            }
        }
    }

    /// Non-splaying lookup: a plain ordered descent that leaves the tree
    /// shape exactly as it found it.
    ///
    /// Cheaper for one-off probes, but forfeits the self-optimization that
    /// makes repeated hot accesses fast.
    pub fn obtain(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_obtain_hit();
                    return Some(&node.value);
                }
            }
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_obtain_miss();
        None
    }

    /// Strict splaying lookup: misses are an error carrying the key.
    pub fn fetch(&mut self, key: &K) -> Result<&V, KeyNotFound<K>>
    where
        K: Clone,
    {
        let steps = splay(key, &mut self.root);
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_steps(steps);
        #[cfg(not(feature = "metrics"))]
        let _ = steps;

        match self.root.as_deref() {
            Some(node) if node.key == *key => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                Ok(&node.value)
            }
            _ => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                Err(KeyNotFound::new(key.clone()))
            }
        }
    }

    /// Returns `true` if `key` is present. Does not splay.
    pub fn contains_key(&self, key: &K) -> bool {
        self.obtain(key).is_some()
    }

    /// Returns `true` if any entry holds `value`. Linear scan.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Smallest key mapped to `value`, if any. Linear scan.
    pub fn key_for_value(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    /// Strict reverse lookup: an unmapped value is an error carrying it.
    pub fn fetch_key_for_value(&self, value: &V) -> Result<&K, ValueNotFound<V>>
    where
        V: PartialEq + Clone,
    {
        self.key_for_value(value)
            .ok_or_else(|| ValueNotFound::new(value.clone()))
    }

    /// Reverse lookup with an inline fallback for unmapped values.
    pub fn key_for_value_or_else(&self, value: &V, default: impl FnOnce(&V) -> K) -> K
    where
        K: Clone,
        V: PartialEq,
    {
        match self.key_for_value(value) {
            Some(key) => key.clone(),
            None => default(value),
        }
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// After splaying the doomed key to the root its subtrees are joined by
    /// splaying the same key down the left subtree: every key there is
    /// smaller, so the subtree's maximum surfaces with a free right slot for
    /// the old right subtree.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let steps = splay(key, &mut self.root);
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_steps(steps);
        #[cfg(not(feature = "metrics"))]
        let _ = steps;

        let top = match self.root.take() {
            Some(top) => top,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_remove_miss();
                return None;
            }
        };
        if top.key != *key {
            self.root = Some(top);
            #[cfg(feature = "metrics")]
            self.metrics.record_remove_miss();
            return None;
        }

        let Node {
            key: removed_key,
            value,
            left,
            right,
        } = *top;
        match left {
            None => self.root = right,
            Some(left) => {
                self.root = Some(left);
                splay(&removed_key, &mut self.root);
                if let Some(joined) = self.root.as_deref_mut() {
                    joined.right = right;
                }
            }
        }
        self.length -= 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(value)
    }

    /// Removes `key`, or produces a fallback from `default` when absent.
    pub fn remove_or_else(&mut self, key: &K, default: impl FnOnce(&K) -> V) -> V {
        match self.remove(key) {
            Some(value) => value,
            None => default(key),
        }
    }

    /// Depth of `key` in edges from the root, without splaying.
    ///
    /// `Some(0)` means the key sits at the root; `None` means it is absent.
    pub fn height_of(&self, key: &K) -> Option<usize> {
        let mut depth = 0usize;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(depth),
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
            }
            depth += 1;
        }
        None
    }

    /// Splaying lookup with an inline fallback; the map is not modified on a
    /// miss.
    pub fn get_or_default(&mut self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default,
        }
    }

    /// Read-through lookup: on a miss the value is computed, stored under
    /// `key`, and returned.
    ///
    /// Returns `None` only when the map is bounded at zero entries, in which
    /// case nothing can be stored.
    pub fn get_or_insert_with(
        &mut self,
        key: K,
        make: impl FnOnce(&K) -> V,
    ) -> Option<&V> {
        if self.get(&key).is_none() {
            let value = make(&key);
            self.insert(key, value);
        }
        match self.root.as_deref() {
            Some(node) => Some(&node.value),
            None => None,
        }
    }

    /// Policy-applying read: a hit returns a clone of the stored value, and
    /// a miss follows the configured [`MissingKeyPolicy`].
    ///
    /// With a `Compute` policy the computed value is stored before being
    /// returned, so the next read of the same key is a hit.
    pub fn resolve(&mut self, key: &K) -> Option<V>
    where
        K: Clone,
        V: Clone,
    {
        if let Some(value) = self.get(key) {
            return Some(value.clone());
        }
        // Detach the policy so a Compute callback cannot observe a map that
        // is mid-mutation through it.
        let mut policy = mem::take(&mut self.missing);
        let result = match &mut policy {
            MissingKeyPolicy::None => None,
            MissingKeyPolicy::Value(fallback) => Some(fallback.clone()),
            MissingKeyPolicy::Compute(compute) => {
                let value = compute(key);
                self.insert(key.clone(), value.clone());
                Some(value)
            }
        };
        self.missing = policy;
        result
    }

    /// Inserts every entry from `entries`; later duplicates overwrite.
    pub fn merge_from(&mut self, entries: impl IntoIterator<Item = (K, V)>) {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    /// Inserts every entry from `entries`, resolving key conflicts through
    /// `resolve(key, current, incoming)`.
    pub fn merge_resolve<I, F>(&mut self, entries: I, mut resolve: F)
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&K, &V, V) -> V,
    {
        for (key, value) in entries {
            let merged = match self.get(&key) {
                Some(current) => resolve(&key, current, value),
                None => value,
            };
            self.insert(key, merged);
        }
    }

    /// Verifies the structural invariants, returning the first violation
    /// found.
    ///
    /// Checked: strictly ascending in-order key sequence (which implies the
    /// ordering invariant for every subtree), a node count that matches
    /// `len()`, and the size bound when one is configured. Used by tests and
    /// fuzz targets after every operation.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0usize;
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev_key) = prev {
                if prev_key >= key {
                    return Err(InvariantError::OrderViolation { position: count });
                }
            }
            prev = Some(key);
            count += 1;
        }
        if count != self.length {
            return Err(InvariantError::SizeMismatch {
                length: self.length,
                counted: count,
            });
        }
        if let Some(max) = self.max_size {
            if self.length > max {
                return Err(InvariantError::BoundExceeded {
                    length: self.length,
                    max_size: max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SplayMap<K, V> {
    /// Snapshot of the operation counters plus current gauges.
    pub fn metrics_snapshot(&self) -> MapMetricsSnapshot {
        let mut snapshot = self.metrics.snapshot();
        snapshot.len = self.length;
        snapshot.max_size = self.max_size;
        snapshot
    }

    /// Zeroes all operation counters.
    pub fn reset_metrics(&mut self) {
        self.metrics = MapMetrics::default();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<MapMetricsSnapshot> for SplayMap<K, V> {
    fn metrics_snapshot(&self) -> MapMetricsSnapshot {
        SplayMap::metrics_snapshot(self)
    }

    fn reset_metrics(&mut self) {
        SplayMap::reset_metrics(self)
    }
}

impl<K, V> Default for SplayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for SplayMap<K, V> {
    fn drop(&mut self) {
        self.drop_tree();
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SplayMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for SplayMap<K, V> {
    /// Entry-set equality: same keys mapped to same values. The internal
    /// shape (which depends on access history) is deliberately ignored.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for SplayMap<K, V> {}

impl<K: Clone + Ord, V: Clone> Clone for SplayMap<K, V> {
    /// Clones the entry set into a balanced tree.
    ///
    /// Shape is access history, not data, so the clone starts from the best
    /// neutral shape instead. Callbacks and the miss policy are not
    /// clonable and reset to their defaults.
    fn clone(&self) -> Self {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let length = entries.len();
        let mut iter = entries.into_iter();
        Self {
            root: build_balanced(&mut iter, length),
            length,
            max_size: self.max_size,
            was_pruned: self.was_pruned,
            on_evict: None,
            missing: MissingKeyPolicy::None,
            #[cfg(feature = "metrics")]
            metrics: MapMetrics::default(),
        }
    }
}

/// Builds a height-balanced tree from `n` entries of an ascending stream.
///
/// Consumes entries in order: the left subtree takes the first half, the
/// root the middle entry, the right subtree the rest. Recursion depth is
/// logarithmic in `n`.
fn build_balanced<K, V>(
    entries: &mut std::vec::IntoIter<(K, V)>,
    n: usize,
) -> Link<K, V> {
    if n == 0 {
        return None;
    }
    let left = build_balanced(entries, n / 2);
    let (key, value) = entries.next()?;
    let mut node = Box::new(Node::new(key, value));
    node.left = left;
    node.right = build_balanced(entries, n - n / 2 - 1);
    Some(node)
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SplayMap::new();
        map.merge_from(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for SplayMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.merge_from(iter);
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for SplayMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a SplayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for SplayMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consuming ascending iterator. The map's `Drop` sees an already-empty
    /// tree afterwards.
    fn into_iter(mut self) -> Self::IntoIter {
        let root = self.root.take();
        let length = mem::take(&mut self.length);
        IntoIter::new(root, length)
    }
}
