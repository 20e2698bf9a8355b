//! DHAT heap profiler for splaycache.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use splaycache::tree::SplayMap;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Run a hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload(map: &mut SplayMap<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            // Hot key (10% of universe, 90% of accesses)
            rng.next_u64() % hot_size
        } else {
            // Cold key
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if map.get(&key).is_none() {
            let _ = map.insert(key, key);
        }
    }
}

/// Run a scan workload: sequential access pattern.
fn scan_workload(map: &mut SplayMap<u64, u64>, operations: usize, universe: u64) {
    for i in 0..operations {
        let key = (i as u64) % universe;
        if map.get(&key).is_none() {
            let _ = map.insert(key, key);
        }
    }
}

/// Run eviction churn: insert more items than the bound allows.
fn eviction_churn(map: &mut SplayMap<u64, u64>, operations: usize) {
    for i in 0..operations {
        let _ = map.insert(i as u64, i as u64);
    }
}

fn profile_unbounded() {
    println!("=== Profiling unbounded map ===");
    let operations = 100_000;
    let universe = 16_384;

    let mut map = SplayMap::new();

    // Warm up
    for i in 0..universe {
        map.insert(i, i);
    }

    hotset_workload(&mut map, operations, universe, 42);
    scan_workload(&mut map, operations / 2, universe);

    println!("  Final size: {}, height: {}", map.len(), map.height());
}

fn profile_bounded() {
    println!("=== Profiling bounded map ===");
    let max_size = 4096;
    let operations = 100_000;
    let universe = 16_384;

    let mut map = SplayMap::with_max_size(max_size);

    for i in 0..max_size as u64 {
        map.insert(i, i);
    }

    hotset_workload(&mut map, operations, universe, 42);
    scan_workload(&mut map, operations / 2, universe);
    eviction_churn(&mut map, operations / 4);

    println!("  Final size: {}, height: {}", map.len(), map.height());
}

fn profile_obtain_only() {
    println!("=== Profiling non-splaying reads ===");
    let universe = 16_384u64;
    let mut rng = XorShift64::new(7);

    let mut map = SplayMap::new();
    for i in 0..universe {
        map.insert(i, i);
    }

    let mut hits = 0u64;
    for _ in 0..100_000 {
        if map.obtain(&(rng.next_u64() % universe)).is_some() {
            hits += 1;
        }
    }

    println!("  Hits: {hits}, height: {}", map.height());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("splaycache DHAT Heap Profiling");
    println!("==============================\n");

    profile_unbounded();
    profile_bounded();
    profile_obtain_only();

    println!("\n==============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
