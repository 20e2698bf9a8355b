//! Micro-operation benchmarks for the map.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency (nanoseconds) for the splaying and
//! non-splaying read paths, inserts, removals, and full ordered iteration.

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use splaycache::tree::SplayMap;

const SIZE: usize = 16_384;
const OPS: u64 = 100_000;

fn prefilled(n: usize) -> SplayMap<u64, u64> {
    // multiplicative shuffle keeps the build from degenerating into a spine
    (0..n as u64).map(|i| ((i * 99991 + 17) % n as u64, i)).collect()
}

// ============================================================================
// Read latency (ns/op)
// ============================================================================

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_ns");
    group.throughput(Throughput::Elements(OPS));

    // splaying read, uniform keys: every hit restructures
    group.bench_function("get_uniform", |b| {
        b.iter_custom(|iters| {
            let mut map = prefilled(SIZE);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = (i * 7919) % (SIZE as u64);
                    black_box(map.get(&key));
                }
            }
            start.elapsed()
        })
    });

    // splaying read, clustered keys: the case splaying exists for
    group.bench_function("get_hot_cluster", |b| {
        b.iter_custom(|iters| {
            let mut map = prefilled(SIZE);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % 64;
                    black_box(map.get(&key));
                }
            }
            start.elapsed()
        })
    });

    // non-splaying read: no restructuring, pays full depth every time
    group.bench_function("obtain_uniform", |b| {
        b.iter_custom(|iters| {
            let map = prefilled(SIZE);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = (i * 7919) % (SIZE as u64);
                    black_box(map.obtain(&key));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Write latency (ns/op)
// ============================================================================

fn bench_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("insert_fresh", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut map = SplayMap::new();
                for i in 0..OPS {
                    map.insert((i * 99991 + 17) % OPS, i);
                }
                black_box(&map);
            }
            start.elapsed()
        })
    });

    group.bench_function("insert_overwrite", |b| {
        b.iter_custom(|iters| {
            let mut map = prefilled(SIZE);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = (i * 7919) % (SIZE as u64);
                    black_box(map.insert(key, i));
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("insert_bounded_churn", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut map = SplayMap::with_max_size(SIZE / 4);
                for i in 0..OPS {
                    map.insert((i * 99991 + 17) % OPS, i);
                }
                black_box(map.len());
            }
            start.elapsed()
        })
    });

    group.bench_function("remove_present", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut map = prefilled(SIZE);
                let start = Instant::now();
                for key in 0..SIZE as u64 {
                    black_box(map.remove(&key));
                }
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

// ============================================================================
// Traversal
// ============================================================================

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("iter_full", |b| {
        let map = prefilled(SIZE);
        b.iter(|| {
            let mut count = 0usize;
            for entry in map.iter() {
                black_box(entry);
                count += 1;
            }
            count
        })
    });

    group.bench_function("height", |b| {
        let map = prefilled(SIZE);
        b.iter(|| black_box(map.height()))
    });

    group.finish();
}

criterion_group!(benches, bench_reads, bench_writes, bench_iteration);
criterion_main!(benches);
