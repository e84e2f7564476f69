#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for break selection and plot compilation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_gg::breaks::{search, BreakConfig};
use trueno_gg::grammar::{Aes, DataFrame, GGPlot, Geom};

fn breaks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("breaks");

    for (lo, hi) in [(0.0, 1.0), (0.55, 10.45), (-3.7, 12.2), (1000.0, 1010.0), (1e-6, 3e-6)] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("[{lo}, {hi}]")), &(lo, hi), |b, &(lo, hi)| {
            let config = BreakConfig::default();
            b.iter(|| search(black_box(lo), black_box(hi), 5, &config).expect("search should succeed"));
        });
    }

    group.finish();
}

fn loose_breaks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("breaks_loose");
    let config = BreakConfig::default().loose(true);

    for m in [3, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            b.iter(|| search(black_box(0.55), black_box(10.45), m, &config).expect("search should succeed"));
        });
    }

    group.finish();
}

fn compile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for size in [100, 10_000] {
        let x: Vec<f64> = (0..size).map(|i| i as f64 * 0.37).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin() * 100.0).collect();
        let plot = GGPlot::new(DataFrame::from_xy(&x, &y))
            .aes(Aes::new().x("x").y("y"))
            .geom(Geom::point())
            .geom(Geom::line());

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&plot).compile().expect("compile should succeed"));
        });
    }

    group.finish();
}

criterion_group!(benches, breaks_benchmark, loose_breaks_benchmark, compile_benchmark);
criterion_main!(benches);
