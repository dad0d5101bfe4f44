//! Benchmarks for the montevar-risk simulation pipeline.
//!
//! Run with: cargo bench -p montevar-risk

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;

use montevar_math::statistics::sample_covariance;
use montevar_risk::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_generator() -> ScenarioGenerator {
    ScenarioGenerator::new(1_000_000.0, 0.011, 5).unwrap()
}

fn create_scenarios(n: usize) -> ScenarioSet {
    simulate(n, &create_generator(), &mut NormalShocks::seeded(3)).unwrap()
}

fn create_returns(rows: usize, cols: usize) -> Array2<f64> {
    let mut shocks = NormalShocks::seeded(17);
    Array2::from_shape_fn((rows, cols), |_| shocks.next_shock() * 0.01)
}

// =============================================================================
// SIMULATION BENCHMARKS
// =============================================================================

fn bench_simulate_sequential(c: &mut Criterion) {
    let generator = create_generator();

    let mut group = c.benchmark_group("simulate_sequential");
    group.sample_size(30);

    for size in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| simulate(black_box(size), &generator, &mut NormalShocks::seeded(1)))
        });
    }
    group.finish();
}

fn bench_simulate_parallel(c: &mut Criterion) {
    let generator = create_generator();

    let mut group = c.benchmark_group("simulate_parallel");
    group.sample_size(30);

    for size in [1_000, 10_000, 100_000, 1_000_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| simulate_parallel(black_box(size), &generator, 1))
        });
    }
    group.finish();
}

// =============================================================================
// ESTIMATOR BENCHMARKS
// =============================================================================

fn bench_var_estimate(c: &mut Criterion) {
    let scenarios = create_scenarios(100_000);

    c.bench_function("monte_carlo_var_100k", |b| {
        b.iter(|| monte_carlo_var(black_box(&scenarios), 0.95))
    });
}

fn bench_covariance(c: &mut Criterion) {
    let returns = create_returns(3_750, 5);

    c.bench_function("sample_covariance_3750x5", |b| {
        b.iter(|| sample_covariance(black_box(&returns)))
    });
}

criterion_group!(simulation, bench_simulate_sequential, bench_simulate_parallel,);

criterion_group!(estimators, bench_var_estimate, bench_covariance,);

criterion_main!(simulation, estimators);
