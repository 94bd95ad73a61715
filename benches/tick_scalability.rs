//! Scalability benchmarks for the AOI engine.
//!
//! Tests tick throughput at various player counts for both index variants.
//!
//! Run with: cargo bench --bench tick_scalability

use aoi_engine::config::{Bounds, CrossConfig, GridConfig};
use aoi_engine::cross::CrossIndex;
use aoi_engine::grid::GridIndex;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

/// Builds a grid index with `count` players scattered across a 2000x2000
/// square, each carrying one 100-unit sensor.
fn build_grid(count: usize) -> GridIndex {
    let mut index = GridIndex::new(GridConfig::default().cell_size);
    let mut rng = rand::thread_rng();
    for nuid in 0..count as u64 {
        let x = rng.gen_range(-1000.0..1000.0);
        let z = rng.gen_range(-1000.0..1000.0);
        index.add_player(nuid, x, 0.0, z);
        index.add_sensor(nuid, 1, 100.0);
    }
    index
}

/// Builds a cross index with `count` players and a 3x3 beacon tiling.
fn build_cross(count: usize) -> CrossIndex {
    let cfg = CrossConfig {
        bounds: Bounds::new(-1000.0, 1000.0, -1000.0, 1000.0),
        beacon_x: 3,
        beacon_z: 3,
        beacon_radius: 400.0,
    };
    let mut index = CrossIndex::new(cfg);
    let mut rng = rand::thread_rng();
    for nuid in 0..count as u64 {
        let x = rng.gen_range(-1000.0..1000.0);
        let z = rng.gen_range(-1000.0..1000.0);
        index.add_player(nuid, x, 0.0, z);
        index.add_sensor(nuid, 1, 100.0);
    }
    index
}

/// Benchmark a full `tick()` at various player counts for the grid index.
fn bench_grid_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_tick");
    group.sample_size(50);

    for count in [100, 250, 500, 1000] {
        let mut index = build_grid(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("tick", count), &count, |b, _| {
            b.iter(|| black_box(index.tick()));
        });
    }
    group.finish();
}

/// Benchmark a full `tick()` at various player counts for the cross index.
fn bench_cross_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_tick");
    group.sample_size(50);

    for count in [100, 250, 500, 1000] {
        let mut index = build_cross(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("tick", count), &count, |b, _| {
            b.iter(|| black_box(index.tick()));
        });
    }
    group.finish();
}

/// Benchmark repeated small position updates, the steady-state workload
/// between ticks (resort_and_fire dominates the cross variant's cost here).
fn bench_update_pos(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_pos");
    group.sample_size(50);

    for count in [100, 500, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("grid", count), &count, |b, &count| {
            let mut index = build_grid(count);
            let mut rng = rand::thread_rng();
            b.iter(|| {
                for nuid in 0..count as u64 {
                    let x = rng.gen_range(-1000.0..1000.0);
                    let z = rng.gen_range(-1000.0..1000.0);
                    index.update_pos(nuid, x, 0.0, z);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("cross", count), &count, |b, &count| {
            let mut index = build_cross(count);
            let mut rng = rand::thread_rng();
            b.iter(|| {
                for nuid in 0..count as u64 {
                    let x = rng.gen_range(-1000.0..1000.0);
                    let z = rng.gen_range(-1000.0..1000.0);
                    index.update_pos(nuid, x, 0.0, z);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_tick, bench_cross_tick, bench_update_pos);
criterion_main!(benches);
