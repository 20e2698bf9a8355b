/// Point-in-time copy of the map's operation counters.
///
/// Counters cover the window since construction or the last reset; `len`
/// and `max_size` are gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    pub remove_calls: u64,
    pub remove_found: u64,

    pub splay_steps: u64,

    pub prune_calls: u64,
    pub pruned_entries: u64,
    pub clear_calls: u64,

    pub obtain_calls: u64,
    pub obtain_hits: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub max_size: Option<usize>,
}

impl MapMetricsSnapshot {
    /// Hit rate over splaying lookups, 0.0 when none were recorded.
    pub fn get_hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
