//! Criterion benchmarks for complete flatPERM runs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use flatperm_bench::{reference_profile, stress_profile};
use flatperm_core::ModelKind;
use flatperm_engine::run_seeded;

fn bench_reference_cactus(c: &mut Criterion) {
    let config = reference_profile(ModelKind::Cactus, 42);
    c.bench_function("reference_cactus", |b| {
        b.iter(|| {
            let report = run_seeded(&config).unwrap();
            black_box(&report);
        });
    });
}

fn bench_reference_interacting(c: &mut Criterion) {
    let config = reference_profile(ModelKind::Interacting, 42);
    c.bench_function("reference_interacting", |b| {
        b.iter(|| {
            let report = run_seeded(&config).unwrap();
            black_box(&report);
        });
    });
}

fn bench_stress_interacting(c: &mut Criterion) {
    let config = stress_profile(ModelKind::Interacting, 42);
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("interacting_64", |b| {
        b.iter(|| {
            let report = run_seeded(&config).unwrap();
            black_box(&report);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_reference_cactus,
    bench_reference_interacting,
    bench_stress_interacting
);
criterion_main!(benches);
