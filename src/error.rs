//! Error types for the splaycache library.
//!
//! ## Key Components
//!
//! - [`KeyNotFound`]: Returned by strict lookups (`fetch` and friends) when
//!   the requested key is absent; carries the offending key.
//! - [`ValueNotFound`]: Returned by strict reverse lookups when no entry
//!   holds the requested value; carries the value.
//! - [`InvariantError`]: Returned when a structural invariant of the tree
//!   is violated (`check_invariants`, used by tests and fuzz targets); one
//!   variant per check: key order, size bookkeeping, size bound.
//!
//! Soft misses use `Option`: `get`, `obtain`, `remove`, and `contains_key`
//! report absence without constructing an error.
//!
//! ## Example Usage
//!
//! ```
//! use splaycache::tree::SplayMap;
//!
//! let mut map = SplayMap::new();
//! map.insert("foo", 1);
//!
//! assert_eq!(map.fetch(&"foo"), Ok(&1));
//!
//! let err = map.fetch(&"bar").unwrap_err();
//! assert_eq!(err.key(), &"bar");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// KeyNotFound
// ---------------------------------------------------------------------------

/// Error returned by strict lookups for an absent key.
///
/// Carries the key so callers can report or retry without re-deriving it.
/// Produced by [`SplayMap::fetch`](crate::tree::SplayMap::fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotFound<K> {
    key: K,
}

impl<K> KeyNotFound<K> {
    /// Creates a new `KeyNotFound` carrying the missing key.
    #[inline]
    pub fn new(key: K) -> Self {
        Self { key }
    }

    /// Returns the key that was not found.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the error, returning the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: fmt::Debug> fmt::Display for KeyNotFound<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key not found: {:?}", self.key)
    }
}

impl<K: fmt::Debug> std::error::Error for KeyNotFound<K> {}

// ---------------------------------------------------------------------------
// ValueNotFound
// ---------------------------------------------------------------------------

/// Error returned by strict reverse lookups for an unmapped value.
///
/// Carries the value that no entry holds. Produced by
/// [`SplayMap::fetch_key_for_value`](crate::tree::SplayMap::fetch_key_for_value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueNotFound<V> {
    value: V,
}

impl<V> ValueNotFound<V> {
    /// Creates a new `ValueNotFound` carrying the unmapped value.
    #[inline]
    pub fn new(value: V) -> Self {
        Self { value }
    }

    /// Returns the value that was not found.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the error, returning the value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: fmt::Debug> fmt::Display for ValueNotFound<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no key maps to value: {:?}", self.value)
    }
}

impl<V: fmt::Debug> std::error::Error for ValueNotFound<V> {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Structural invariant violated by the tree.
///
/// Produced by [`SplayMap::check_invariants`](crate::tree::SplayMap::check_invariants).
/// Each variant names the check that failed and carries the numbers needed
/// to see the violation without re-walking the tree. Acyclicity has no
/// variant: `Box` ownership makes a cycle unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// The in-order key sequence is not strictly ascending; `position` is
    /// the zero-based index of the first entry that compared less than or
    /// equal to its predecessor.
    OrderViolation { position: usize },
    /// `len()` disagrees with the number of nodes reachable from the root.
    SizeMismatch { length: usize, counted: usize },
    /// The entry count exceeds the configured size bound.
    BoundExceeded { length: usize, max_size: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InvariantError::OrderViolation { position } => {
                write!(f, "in-order keys not strictly ascending at entry {position}")
            }
            InvariantError::SizeMismatch { length, counted } => {
                write!(f, "length {length} does not match reachable node count {counted}")
            }
            InvariantError::BoundExceeded { length, max_size } => {
                write!(f, "length {length} exceeds configured bound {max_size}")
            }
        }
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
