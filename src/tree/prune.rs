//! Leaf pruning and the bounded-size policy.
//!
//! Splaying keeps hot keys near the root, so depth is a usable coldness
//! signal: the deeper a leaf sits, the longer it has gone untouched. Pruning
//! detaches leaves below a depth threshold in one pass, which approximates
//! LRU/LFU eviction without tracking any per-entry state.
//!
//! ## Prune pass
//!
//! ```text
//!   threshold = height / 2
//!
//!          depth 0      ┌───┐                      kept (shallow)
//!                       │   │
//!          depth 1    ┌─┴─┐ └─┬───┐                kept
//!                     │   │   │   │
//!   ─ ─ ─ ─threshold─ ┴ ─ ┴ ─ ┴ ─ ┴ ─ ─ ─ ─ ─ ─ ─
//!          depth 2      ┌─┴─┐   ┌─┴─┐              leaf children of nodes
//!                       │ x │   │ x │              below the line are
//!          depth 3      └───┘ ┌─┴─┐                detached (x)
//!                             │ x │
//!                             └───┘
//! ```
//!
//! A pass walks the tree once with an explicit stack, detaching leaf
//! children of any node deeper than the threshold. The root is never
//! detached, so the hot end of the tree survives every pass.
//!
//! ## Bound enforcement
//!
//! When `max_size` is set, any insert that grows the map past the bound runs
//! prune passes until the bound holds. A pass over a very shallow tree can
//! detach nothing, so enforcement guarantees progress by lowering the
//! threshold toward zero and, as a last resort, evicting a single reachable
//! leaf directly. Shrinking the bound below the current size triggers the
//! same loop immediately.
//!
//! ## Eviction callback and `was_pruned`
//!
//! A registered `on_evict` callback observes each detached entry before it
//! is dropped, exactly once per entry. `was_pruned()` carries the outcome of
//! the most recent operation that could evict: every insert and bound change
//! rewrites it with whether that call evicted anything. `prune()` itself
//! reports `true` whenever it ran over a non-empty tree, even if the pass
//! found nothing to detach; the flag signals that an eviction cycle ran, not
//! a removal count.

#[cfg(feature = "metrics")]
use crate::metrics::traits::MapMetricsRecorder;
use crate::tree::map::SplayMap;
use crate::tree::node::Node;

impl<K: Ord, V> SplayMap<K, V> {
    /// Runs one eviction cycle: detaches every leaf deeper than half the
    /// current tree height.
    ///
    /// Sets `was_pruned` to `true` whenever the map was non-empty, whether
    /// or not any entry was actually detached.
    pub fn prune(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_prune_call();

        if self.root.is_none() {
            self.was_pruned = false;
            return;
        }
        let threshold = self.height() / 2;
        self.prune_pass(threshold);
        self.was_pruned = true;
    }

    /// Returns the configured size bound, if any.
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Sets or clears the size bound.
    ///
    /// Shrinking the bound below the current size evicts immediately;
    /// `None` disables bounded operation. `was_pruned()` reports whether
    /// this call evicted anything.
    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.max_size = max_size;
        self.was_pruned = self.enforce_bound();
    }

    /// Reports whether the last insert, prune, or bound change evicted
    /// entries.
    ///
    /// Every such operation rewrites the flag with its own outcome, so a
    /// non-evicting insert clears it again. `clear()` also resets it.
    pub fn was_pruned(&self) -> bool {
        self.was_pruned
    }

    /// Prunes until `len() <= max_size`, returning whether anything was
    /// evicted. No-op for unbounded maps.
    ///
    /// Each round starts at the half-height threshold and lowers it whenever
    /// a pass detaches nothing; at threshold zero the fallback evicts one
    /// reachable leaf directly, so every round removes at least one entry
    /// and the loop terminates.
    pub(crate) fn enforce_bound(&mut self) -> bool {
        let Some(max) = self.max_size else {
            return false;
        };
        let mut evicted = false;
        while self.length > max {
            let mut threshold = self.height() / 2;
            loop {
                if self.prune_pass(threshold) > 0 {
                    evicted = true;
                    break;
                }
                if threshold == 0 {
                    evicted |= self.evict_one_leaf();
                    break;
                }
                threshold /= 2;
            }
        }
        evicted
    }

    /// One depth-first pass detaching leaf children of nodes deeper than
    /// `threshold`. Returns the number of entries evicted.
    ///
    /// The traversal uses an explicit stack of raw node pointers because it
    /// detaches children of nodes it is standing on; only non-leaf nodes are
    /// ever pushed, and only leaves are ever detached, so no stacked pointer
    /// can dangle.
    fn prune_pass(&mut self, threshold: usize) -> usize {
        // The callback is taken out for the duration of the walk so that it
        // cannot alias the tree being edited.
        let mut on_evict = self.on_evict.take();
        let mut removed = 0usize;

        let mut stack: Vec<(*mut Node<K, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref_mut() {
            if !root.is_leaf() {
                stack.push((root as *mut _, 0));
            }
        }

        while let Some((ptr, depth)) = stack.pop() {
            // SAFETY: `ptr` was pushed while its node was a live non-leaf
            // owned by this tree, and detachment only ever removes leaves,
            // so the node is still live here. Pointers are dereferenced one
            // at a time; the tree links above this node are not touched.
            let node = unsafe { &mut *ptr };

            if depth > threshold {
                if let Some(left) = node.left.as_deref() {
                    if left.is_leaf() {
                        if let Some(callback) = on_evict.as_mut() {
                            callback(&left.key, &left.value);
                        }
                        node.left = None;
                        removed += 1;
                    }
                }
                if let Some(right) = node.right.as_deref() {
                    if right.is_leaf() {
                        if let Some(callback) = on_evict.as_mut() {
                            callback(&right.key, &right.value);
                        }
                        node.right = None;
                        removed += 1;
                    }
                }
            }

            // Push right first so the left subtree is processed first.
            if let Some(right) = node.right.as_deref_mut() {
                if !right.is_leaf() {
                    stack.push((right as *mut _, depth + 1));
                }
            }
            if let Some(left) = node.left.as_deref_mut() {
                if !left.is_leaf() {
                    stack.push((left as *mut _, depth + 1));
                }
            }
        }

        self.length -= removed;
        self.on_evict = on_evict;

        #[cfg(feature = "metrics")]
        self.metrics.record_pruned_entries(removed);

        removed
    }

    /// Fallback eviction: walks to one reachable leaf and detaches it.
    ///
    /// Used when threshold pruning cannot make progress (a tree reduced to
    /// its root, or to the root plus root-adjacent leaves). Always succeeds
    /// on a non-empty tree.
    fn evict_one_leaf(&mut self) -> bool {
        let mut on_evict = self.on_evict.take();
        let mut removed = false;

        let mut cur = &mut self.root;
        loop {
            let here_is_leaf = cur.as_deref().is_some_and(Node::is_leaf);
            if here_is_leaf {
                if let Some(leaf) = cur.take() {
                    if let Some(callback) = on_evict.as_mut() {
                        callback(&leaf.key, &leaf.value);
                    }
                    removed = true;
                }
                break;
            }
            match cur {
                None => break,
                Some(node) => {
                    cur = if node.left.is_some() {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
            }
        }

        self.on_evict = on_evict;
        if removed {
            self.length -= 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_pruned_entries(1);
        }
        removed
    }
}
