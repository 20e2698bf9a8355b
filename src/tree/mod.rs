pub mod iter;
pub mod map;

pub(crate) mod node;
pub(crate) mod splay;

mod prune;

#[cfg(feature = "concurrency")]
pub mod concurrent;

pub use iter::{IntoIter, Iter, Keys, Values};
pub use map::{MissingKeyPolicy, SplayMap};

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentSplayMap;
