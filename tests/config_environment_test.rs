// ABOUTME: Unit tests for environment-driven advisor configuration
// ABOUTME: Validates defaults, overrides, seed disabling, and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use calorie_advisor::config::AppConfig;
use calorie_advisor::constants::env_config;
use calorie_advisor::errors::ErrorCode;
use calorie_intelligence::RecommendationStrategy;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ALL_VARS: [&str; 13] = [
    env_config::EXERCISE_CSV,
    env_config::CALORIES_CSV,
    env_config::FOREST_ESTIMATORS,
    env_config::FOREST_MAX_DEPTH,
    env_config::FOREST_MAX_FEATURES,
    env_config::FOREST_MIN_SAMPLES_SPLIT,
    env_config::FOREST_SEED,
    env_config::MODEL_CACHE_TTL_SECS,
    env_config::MODEL_CACHE_MAX_ENTRIES,
    env_config::RECOMMENDATION_COUNT,
    env_config::RECOMMENDATION_SEED,
    env_config::RECOMMENDATION_STRATEGY,
    env_config::GUIDANCE_TABLE_PATH,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.data.exercise_csv, PathBuf::from("data/exercise.csv"));
    assert_eq!(config.forest.n_estimators, 200);
    assert_eq!(config.forest.max_depth, 6);
    assert_eq!(config.forest.max_features, 3);
    assert_eq!(config.forest.seed, Some(42));
    assert_eq!(config.cache.ttl, Duration::from_secs(3600));
    assert_eq!(config.recommendation.default_count, 5);
    assert_eq!(config.strategy, RecommendationStrategy::Table);
    assert!(config.guidance_table_path.is_none());
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var(env_config::FOREST_ESTIMATORS, "1000");
    env::set_var(env_config::FOREST_SEED, "none");
    env::set_var(env_config::MODEL_CACHE_TTL_SECS, "120");
    env::set_var(env_config::RECOMMENDATION_STRATEGY, "catalog");
    env::set_var(env_config::RECOMMENDATION_COUNT, "8");
    env::set_var(env_config::GUIDANCE_TABLE_PATH, "tables/guidance.json");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.forest.n_estimators, 1000);
    assert_eq!(config.forest.seed, None);
    assert_eq!(config.cache.ttl, Duration::from_secs(120));
    assert_eq!(config.strategy, RecommendationStrategy::Catalog);
    assert_eq!(config.recommendation.default_count, 8);
    assert_eq!(
        config.guidance_table_path,
        Some(PathBuf::from("tables/guidance.json"))
    );
}

#[test]
#[serial]
fn test_malformed_number_is_config_error() {
    clear_env();
    env::set_var(env_config::FOREST_MAX_DEPTH, "deep");
    let err = AppConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_config::FOREST_MAX_DEPTH));
}

#[test]
#[serial]
fn test_unknown_strategy_is_config_error() {
    clear_env();
    env::set_var(env_config::RECOMMENDATION_STRATEGY, "astrology");
    let err = AppConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_out_of_range_values_fail_validation() {
    clear_env();
    env::set_var(env_config::MODEL_CACHE_MAX_ENTRIES, "0");
    let err = AppConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    env::set_var(env_config::FOREST_MIN_SAMPLES_SPLIT, "1");
    let err = AppConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_summary_reports_strategy_and_forest() {
    let summary = AppConfig::default().summary();
    assert_eq!(summary["recommendation"]["strategy"], "table");
    assert_eq!(summary["forest"]["n_estimators"], 200);
    assert_eq!(summary["cache"]["ttl_secs"], 3600);
}
