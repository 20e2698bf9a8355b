//! Operation counters for the map, compiled in only with the `metrics`
//! feature.
//!
//! Responsibilities are split the same way as the map traits: recorders
//! write counters from inside operations, snapshot providers read them out
//! for benches and monitoring, and neither leaks into policy logic.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::MapMetrics;
pub use snapshot::MapMetricsSnapshot;
