//! Top-down splay restructuring.
//!
//! The single primitive under every read and write of the tree: given a
//! target key, rotate the tree while descending so that the best match ends
//! up at the root.
//!
//! ## Algorithm
//!
//! ```text
//!   descent state (three logical trees):
//!
//!        L (proven less)        cursor t        R (proven greater)
//!     ┌────────────────┐    ┌────────────┐    ┌─────────────────┐
//!     │  keys < target │    │  subtree   │    │  keys > target  │
//!     │  grows at its  │    │  still in  │    │  grows at its   │
//!     │  right spine   │    │  play      │    │  left spine     │
//!     └────────────────┘    └────────────┘    └─────────────────┘
//!
//!   per step, compare target with t.key:
//!     EQ            → stop
//!     LT, no left   → stop (t is the in-order neighbor)
//!     LT, zig-zig   → rotate t right over its left child, then descend
//!     LT, zig-zag   → plain descent (degrades to a single step)
//!     GT            → mirror image
//!
//!   assembly: hang t's remaining children off the spines, then hang the
//!   finished L and R trees back off t. t becomes the new root.
//! ```
//!
//! The two spines are kept as stacks of detached nodes rather than a shared
//! scratch node: a node pushed on the right spine has had its left slot
//! vacated (and mirrored for the left spine), so folding the stacks back
//! together at the end re-links every slot exactly once.
//!
//! ## Guarantees
//!
//! - In-order key sequence is unchanged (rotations only).
//! - No node is added, removed, or dropped; size is untouched.
//! - If the key is present it ends at the root; otherwise the last node
//!   visited (the in-order predecessor or successor of the key) does.
//! - Empty trees are left alone.

use std::cmp::Ordering;

use crate::tree::node::{Link, Node};

/// Splays `key` to the root of the tree hanging off `root`.
///
/// Returns the number of descent steps taken, which doubles as the rotation
/// work measure for the metrics feature.
pub(crate) fn splay<K: Ord, V>(key: &K, root: &mut Link<K, V>) -> usize {
    let Some(mut t) = root.take() else {
        return 0;
    };

    let mut left_spine: Vec<Box<Node<K, V>>> = Vec::new();
    let mut right_spine: Vec<Box<Node<K, V>>> = Vec::new();
    let mut steps = 0usize;

    loop {
        match key.cmp(&t.key) {
            Ordering::Equal => break,
            Ordering::Less => {
                let Some(mut l) = t.left.take() else { break };
                steps += 1;
                if *key < l.key {
                    // zig-zig: rotate right before descending another level
                    t.left = l.right.take();
                    l.right = Some(t);
                    t = l;
                    let Some(next) = t.left.take() else { break };
                    steps += 1;
                    right_spine.push(t);
                    t = next;
                } else {
                    right_spine.push(t);
                    t = l;
                }
            }
            Ordering::Greater => {
                let Some(mut r) = t.right.take() else { break };
                steps += 1;
                if *key > r.key {
                    // zig-zig, mirrored: rotate left
                    t.right = r.left.take();
                    r.left = Some(t);
                    t = r;
                    let Some(next) = t.right.take() else { break };
                    steps += 1;
                    left_spine.push(t);
                    t = next;
                } else {
                    left_spine.push(t);
                    t = r;
                }
            }
        }
    }

    // Fold the spines back together. Spine nodes were pushed in in-order
    // position, so popping re-links each vacated slot innermost-first.
    let mut left_acc = t.left.take();
    while let Some(mut node) = left_spine.pop() {
        node.right = left_acc;
        left_acc = Some(node);
    }

    let mut right_acc = t.right.take();
    while let Some(mut node) = right_spine.pop() {
        node.left = right_acc;
        right_acc = Some(node);
    }

    t.left = left_acc;
    t.right = right_acc;
    *root = Some(t);

    steps
}
