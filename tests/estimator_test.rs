// ABOUTME: Integration tests for fitting and predicting with the calorie estimator
// ABOUTME: Covers feature alignment, reproducibility, and fit diagnostics on synthetic data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_advisor::errors::ErrorCode;
use calorie_advisor::models::{ActivityLevel, PredictionInput, TrackerMetrics, UserInput};
use calorie_intelligence::{CalorieEstimator, FittedModel, ForestConfig};

#[test]
fn test_feature_columns_follow_fixed_order() {
    common::init_test_logging();
    let (exercise, calories) = common::synthetic_tables(90);
    let model = CalorieEstimator::new(common::fast_forest())
        .fit(&exercise, &calories)
        .unwrap();

    assert_eq!(
        model.feature_columns(),
        [
            "Gender",
            "Age",
            "Height",
            "Weight",
            "Duration",
            "Heart_Rate",
            "Body_Temp",
            "BMI",
            "Activity_Level_No activity",
            "Activity_Level_Regular exercise",
        ]
    );
}

#[test]
fn test_longer_sessions_burn_more() {
    common::init_test_logging();
    let data = common::synthetic_training_data(300);
    let model = CalorieEstimator::new(common::fast_forest())
        .fit_records(data.records())
        .unwrap();

    let session = |duration_min: f64, heart_rate: f64| UserInput {
        duration_min,
        body_temp_c: 37.0 + duration_min * 0.1,
        tracker: Some(TrackerMetrics {
            heart_rate,
            ..TrackerMetrics::default()
        }),
        ..UserInput::default()
    };
    let short = session(5.0, 88.0);
    let long = session(28.0, 112.0);
    let short_kcal = model.predict(&short.to_prediction_input()).unwrap();
    let long_kcal = model.predict(&long.to_prediction_input()).unwrap();
    assert!(short_kcal >= 0.0);
    assert!(long_kcal > short_kcal, "{long_kcal} <= {short_kcal}");
}

#[test]
fn test_same_seed_same_prediction() {
    common::init_test_logging();
    let data = common::synthetic_training_data(150);
    let estimator = CalorieEstimator::new(common::fast_forest());
    let first = estimator.fit_records(data.records()).unwrap();
    let second = estimator.fit_records(data.records()).unwrap();

    let input = UserInput {
        activity_level: ActivityLevel::RegularExercise,
        ..UserInput::default()
    }
    .to_prediction_input();
    assert_eq!(
        first.predict(&input).unwrap().to_bits(),
        second.predict(&input).unwrap().to_bits()
    );
}

#[test]
fn test_unknown_and_missing_columns_are_aligned() {
    common::init_test_logging();
    let data = common::synthetic_training_data(120);
    let model = CalorieEstimator::new(common::fast_forest())
        .fit_records(data.records())
        .unwrap();

    let sparse = PredictionInput::default()
        .with("Duration", 20.0)
        .with("Not_A_Column", 1e9);
    assert!(model.predict(&sparse).unwrap().is_finite());
}

#[test]
fn test_unfitted_model_rejects_prediction() {
    let err = FittedModel::default()
        .predict(&UserInput::default().to_prediction_input())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AlignmentError);
}

#[test]
fn test_empty_join_is_data_error() {
    let (exercise, mut calories) = common::synthetic_tables(10);
    for record in &mut calories {
        record.user_id.push_str("-other");
    }
    let err = CalorieEstimator::default().fit(&exercise, &calories).unwrap_err();
    assert_eq!(err.code, ErrorCode::DataError);
}

#[test]
fn test_invalid_hyperparameters_are_config_errors() {
    let data = common::synthetic_training_data(20);
    let estimator = CalorieEstimator::new(ForestConfig {
        n_estimators: 0,
        ..ForestConfig::default()
    });
    let err = estimator.fit_records(data.records()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_report_describes_fit() {
    common::init_test_logging();
    let data = common::synthetic_training_data(200);
    let model = CalorieEstimator::new(common::fast_forest())
        .fit_records(data.records())
        .unwrap();
    let report = model.report();
    assert_eq!(report.rows, 200);
    assert_eq!(report.n_estimators, 25);
    assert!(report.r_squared > 0.5, "r2 {}", report.r_squared);

    let importances = model.feature_importances();
    let total: f64 = importances.iter().map(|(_, v)| v).sum();
    assert!((total - 1.0).abs() < 1e-6);
}
