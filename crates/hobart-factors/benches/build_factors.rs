//! Criterion benchmarks for the factor engine.
//!
//! Synthetic panels are seeded random walks so runs are comparable.

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hobart_data::{PricePanel, PricePoint};
use hobart_factors::FactorEngine;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_walk_panel(tickers: usize, days: usize) -> PricePanel {
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();

    let mut rows = Vec::with_capacity(tickers * days);
    for t in 0..tickers {
        let ticker = format!("T{t:04}");
        let mut price = 100.0;
        for d in 0..days {
            price *= 1.0 + rng.gen_range(-0.02..0.02);
            rows.push(PricePoint {
                date: start + Days::new(d as u64),
                ticker: ticker.clone(),
                open: price,
                high: price * 1.01,
                low: price * 0.99,
                close: price,
                adj_close: price,
                volume: rng.gen_range(1e5..1e7),
            });
        }
    }
    rows.into_iter().collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for tickers in [10, 100, 500] {
        let panel = random_walk_panel(tickers, 756);

        group.bench_with_input(BenchmarkId::new("sequential", tickers), &panel, |b, panel| {
            let engine = FactorEngine::new();
            b.iter(|| black_box(engine.build(black_box(panel)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("parallel", tickers), &panel, |b, panel| {
            let engine = FactorEngine::new().with_parallelism(true);
            b.iter(|| black_box(engine.build(black_box(panel)).unwrap()));
        });
    }

    group.finish();
}

fn bench_to_dataframe(c: &mut Criterion) {
    let frame = FactorEngine::new().build(&random_walk_panel(100, 756)).unwrap();

    c.bench_function("to_dataframe_100_tickers", |b| {
        b.iter(|| black_box(frame.to_dataframe()));
    });
}

criterion_group!(benches, bench_build, bench_to_dataframe);
criterion_main!(benches);
