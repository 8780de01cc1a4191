//! Benchmarks for the temporal splitters and score tables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use temporal_split::core::OrderedSeries;
use temporal_split::datasets::{daily_series, DailySeriesConfig};
use temporal_split::evaluation::ScoreTable;
use temporal_split::models::{ForecastModel, ARIMA};
use temporal_split::split::{train_test_split, train_val_test_split};

fn generate_numeric(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 0.1 * i as f64 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 7.0).sin())
        .collect()
}

fn bench_splitters(c: &mut Criterion) {
    let mut group = c.benchmark_group("splitters");

    for size in [1_000, 10_000, 100_000].iter() {
        let numeric = OrderedSeries::from(generate_numeric(*size));
        let labeled = match daily_series(&DailySeriesConfig::new(*size)) {
            Ok(table) => OrderedSeries::from(table),
            Err(_) => continue,
        };
        let training = size * 7 / 10;
        let validation = size * 15 / 100;

        group.bench_with_input(BenchmarkId::new("two_way_numeric", size), size, |b, _| {
            b.iter(|| train_test_split(black_box(&numeric), training))
        });

        group.bench_with_input(BenchmarkId::new("two_way_labeled", size), size, |b, _| {
            b.iter(|| train_test_split(black_box(&labeled), training))
        });

        group.bench_with_input(BenchmarkId::new("three_way_labeled", size), size, |b, _| {
            b.iter(|| train_val_test_split(black_box(&labeled), training, validation))
        });
    }

    group.finish();
}

fn bench_score_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_table");
    group.sample_size(20);

    let series = OrderedSeries::from(generate_numeric(365));
    let Ok(split) = train_test_split(&series, 335) else {
        return;
    };

    let mut models = vec![ARIMA::new(1, 1, 0), ARIMA::new(0, 1, 1), ARIMA::new(1, 1, 1)];
    for model in &mut models {
        if model.fit(&split.train).is_err() {
            return;
        }
    }
    let refs: Vec<&dyn ForecastModel> = models.iter().map(|m| m as &dyn ForecastModel).collect();

    group.bench_function("three_arima_models", |b| {
        b.iter(|| ScoreTable::build_with_defaults(black_box(&refs), black_box(&split.test)))
    });

    group.finish();
}

criterion_group!(benches, bench_splitters, bench_score_table);
criterion_main!(benches);
