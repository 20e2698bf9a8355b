use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter usable from `&self` read paths.
///
/// Counters are observational and never affect correctness, so updates use
/// relaxed ordering; readers may see slightly stale totals while another
/// thread is mid-operation.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
