// ABOUTME: Shared test utilities for calorie advisor integration tests
// ABOUTME: Provides quiet logging, synthetic training records, and fast forest settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `calorie_advisor`

use calorie_advisor::config::AppConfig;
use calorie_advisor::dataset::TrainingData;
use calorie_advisor::models::{CalorieRecord, ExerciseRecord, Gender};
use calorie_intelligence::ForestConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

const ACTIVITY_LEVELS: [&str; 3] = ["Light walking", "No activity", "Regular exercise"];

/// Deterministic pseudo-random value in `[0, 1)` for index `i` and stream `k`
fn unit(i: usize, k: usize) -> f64 {
    let mut x = (i as u64)
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add((k as u64).wrapping_mul(1_442_695_040_888_963_407))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

/// Synthetic exercise and calorie tables where calories grow with duration and heart rate
pub fn synthetic_tables(rows: usize) -> (Vec<ExerciseRecord>, Vec<CalorieRecord>) {
    let mut exercise = Vec::with_capacity(rows);
    let mut calories = Vec::with_capacity(rows);
    for i in 0..rows {
        let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
        let age = 20.0 + (unit(i, 1) * 60.0).floor();
        let height_cm = 150.0 + (unit(i, 2) * 45.0).floor();
        let weight_kg = 50.0 + (unit(i, 3) * 50.0).floor();
        let duration_min = 1.0 + (unit(i, 4) * 29.0).floor();
        let heart_rate = 75.0 + duration_min + (unit(i, 5) * 20.0).floor();
        let body_temp = 37.0 + duration_min * 0.1;
        let level = ACTIVITY_LEVELS[i % ACTIVITY_LEVELS.len()];

        let burned = duration_min * (heart_rate - 60.0) * 0.12 + weight_kg * 0.05;

        exercise.push(ExerciseRecord {
            user_id: format!("user-{i}"),
            gender,
            age,
            height_cm,
            weight_kg,
            duration_min,
            heart_rate,
            body_temp,
            activity_level: Some(level.to_owned()),
        });
        calories.push(CalorieRecord {
            user_id: format!("user-{i}"),
            calories: (burned * 10.0).round() / 10.0,
        });
    }
    (exercise, calories)
}

/// Joined synthetic training data
pub fn synthetic_training_data(rows: usize) -> TrainingData {
    let (exercise, calories) = synthetic_tables(rows);
    TrainingData::from_records(exercise, calories).unwrap()
}

/// Forest settings small enough for fast tests
pub fn fast_forest() -> ForestConfig {
    ForestConfig {
        n_estimators: 25,
        ..ForestConfig::default()
    }
}

/// Default configuration with the fast forest
pub fn fast_config() -> AppConfig {
    AppConfig {
        forest: fast_forest(),
        ..AppConfig::default()
    }
}

/// Write CSV text to a file inside `dir`
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
