// ABOUTME: Criterion benchmarks for fitting the calorie forest and predicting single submissions
// ABOUTME: Measures fit time across training set sizes and per-request prediction latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the calorie estimator.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use calorie_advisor::models::{
    ActivityLevel, CalorieRecord, ExerciseRecord, Gender, TrackerMetrics, UserInput,
};
use calorie_intelligence::{CalorieEstimator, ForestConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const LEVELS: [ActivityLevel; 3] = ActivityLevel::ALL;

/// Deterministic synthetic tables
#[allow(clippy::cast_precision_loss)]
fn generate_tables(rows: usize) -> (Vec<ExerciseRecord>, Vec<CalorieRecord>) {
    (0..rows)
        .map(|i| {
            let step = i as f64;
            let duration_min = 1.0 + (step * 7.0) % 29.0;
            let heart_rate = 80.0 + (step * 13.0) % 30.0;
            let weight_kg = 50.0 + (step * 3.0) % 50.0;
            let user_id = format!("bench-{i}");
            (
                ExerciseRecord {
                    user_id: user_id.clone(),
                    gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    age: 20.0 + (step * 11.0) % 60.0,
                    height_cm: 150.0 + (step * 5.0) % 45.0,
                    weight_kg,
                    duration_min,
                    heart_rate,
                    body_temp: 37.0 + duration_min * 0.1,
                    activity_level: Some(LEVELS[i % LEVELS.len()].label().to_owned()),
                },
                CalorieRecord {
                    user_id,
                    calories: duration_min * (heart_rate - 60.0) * 0.12 + weight_kg * 0.05,
                },
            )
        })
        .unzip()
}

fn bench_config() -> ForestConfig {
    ForestConfig {
        n_estimators: 50,
        ..ForestConfig::default()
    }
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_fit");
    group.sample_size(10);

    for rows in [200, 1_000] {
        let (exercise, calories) = generate_tables(rows);
        let estimator = CalorieEstimator::new(bench_config());
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, _| {
            b.iter(|| {
                estimator
                    .fit(black_box(&exercise), black_box(&calories))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let (exercise, calories) = generate_tables(1_000);
    let model = CalorieEstimator::new(bench_config())
        .fit(&exercise, &calories)
        .unwrap();
    let input = UserInput {
        tracker: Some(TrackerMetrics::default()),
        ..UserInput::default()
    }
    .to_prediction_input();

    let mut group = c.benchmark_group("forest_predict");
    group.bench_function("single_submission", |b| {
        b.iter(|| model.predict(black_box(&input)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_fit, bench_predict);
criterion_main!(benches);
