// ABOUTME: End-to-end tests running form submissions through the advisor on the bundled sample data
// ABOUTME: Covers BMI classification, prediction, both recommendation strategies, and model reuse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_advisor::advisor::{build_recommender, CalorieAdvisor, HealthStatus};
use calorie_advisor::config::AppConfig;
use calorie_advisor::dataset::TrainingData;
use calorie_advisor::errors::ErrorCode;
use calorie_advisor::models::{ActivityLevel, BmiCategory, DietPreference, DietType, UserInput};
use calorie_intelligence::RecommendationStrategy;
use std::path::Path;

fn sample_data() -> TrainingData {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    TrainingData::load(
        &root.join("data/exercise.csv"),
        &root.join("data/calories.csv"),
    )
    .unwrap()
}

fn advisor(config: &AppConfig) -> CalorieAdvisor {
    common::init_test_logging();
    let recommender = build_recommender(config).unwrap();
    CalorieAdvisor::new(config, sample_data(), recommender).unwrap()
}

#[test]
fn test_default_form_submission() {
    let advisor = advisor(&common::fast_config());
    let input = UserInput::default();

    let assessment = advisor
        .assess(&input, Some(DietPreference::NoPreference))
        .unwrap();
    assert!((assessment.bmi - 24.22).abs() < f64::EPSILON);
    assert_eq!(assessment.bmi_category, BmiCategory::NormalWeight);
    assert_eq!(assessment.health_status, HealthStatus::Healthy);
    assert!(assessment.calories_burned.is_finite());
    assert!(assessment.calories_burned > 0.0);
    assert_eq!(assessment.duration_progress_pct, 25);
    assert_eq!(
        assessment.model_fingerprint,
        advisor.training_data().fingerprint()
    );

    let plan = assessment.recommendations.unwrap();
    assert_eq!(plan.summary.bmi_category, BmiCategory::NormalWeight);
    assert_eq!(plan.summary.diet_preference, DietPreference::NoPreference);
    assert_eq!(
        plan.guidance().unwrap().diet.advice.as_deref(),
        Some("Focus on whole, unprocessed foods appropriate for your dietary needs")
    );
}

#[test]
fn test_catalog_strategy_honors_diet() {
    let config = AppConfig {
        strategy: RecommendationStrategy::Catalog,
        ..common::fast_config()
    };
    let advisor = advisor(&config);
    assert_eq!(advisor.recommender_name(), "catalog_ranking");

    for activity_level in [ActivityLevel::LightWalking, ActivityLevel::RegularExercise] {
        let input = UserInput {
            age: 30,
            height_cm: 170.0,
            weight_kg: 70.0,
            duration_min: 30.0,
            activity_level,
            ..UserInput::default()
        };
        let assessment = advisor
            .assess(&input, Some(DietPreference::Vegetarian))
            .unwrap();
        assert_eq!(assessment.bmi_category, BmiCategory::NormalWeight);
        assert!(assessment.calories_burned.is_finite() && assessment.calories_burned > 0.0);

        let plan = assessment.recommendations.unwrap();
        let items = plan.ranked().unwrap();
        assert_eq!(items.len(), 5, "{activity_level:?}");
        assert!(items.iter().all(|f| f.diet_type == DietType::Vegetarian));
    }
}

#[test]
fn test_invalid_input_is_rejected_before_prediction() {
    let advisor = advisor(&common::fast_config());
    let input = UserInput {
        height_cm: 90.0,
        ..UserInput::default()
    };
    let err = advisor.assess(&input, None).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.violations().len(), 1);
    assert!(advisor.cache().is_empty().unwrap());
}

#[test]
fn test_model_is_fitted_once_and_reused() {
    let advisor = advisor(&common::fast_config());
    let first = advisor.assess(&UserInput::default(), None).unwrap();
    assert!(first.recommendations.is_none());

    let heavier = UserInput {
        weight_kg: 95.0,
        ..UserInput::default()
    };
    let second = advisor.assess(&heavier, None).unwrap();
    assert_eq!(second.bmi_category, BmiCategory::Obese);
    assert_eq!(second.health_status, HealthStatus::AtRisk);
    assert_eq!(advisor.cache().len().unwrap(), 1);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_prediction_is_reproducible_across_advisors() {
    let input = UserInput::default();
    let first = advisor(&common::fast_config())
        .predict_calories(&input)
        .unwrap();
    let second = advisor(&common::fast_config())
        .predict_calories(&input)
        .unwrap();
    assert!((first - second).abs() < f64::EPSILON);
}
