pub use crate::builder::SplayMapBuilder;
pub use crate::error::{InvariantError, KeyNotFound, ValueNotFound};
pub use crate::traits::{BoundedMap, ConcurrentMap, CoreMap, MutableMap, OrderedMap};
pub use crate::tree::{IntoIter, Iter, Keys, MissingKeyPolicy, SplayMap, Values};

#[cfg(feature = "concurrency")]
pub use crate::tree::ConcurrentSplayMap;

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::MapMetricsSnapshot;
