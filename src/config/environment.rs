// ABOUTME: Environment-driven configuration for datasets, forest, model cache, and recommendations
// ABOUTME: Parses every variable strictly so a malformed value fails startup instead of being ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{cache, env_config, forest, recommendation};
use calorie_core::errors::{AppError, AppResult};
use calorie_intelligence::{ForestConfig, RecommendationConfig, RecommendationStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Default location of the exercise session table
pub const DEFAULT_EXERCISE_CSV: &str = "data/exercise.csv";
/// Default location of the calorie outcome table
pub const DEFAULT_CALORIES_CSV: &str = "data/calories.csv";

/// Locations of the two training tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Exercise session CSV
    pub exercise_csv: PathBuf,
    /// Calorie outcome CSV
    pub calories_csv: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            exercise_csv: PathBuf::from(DEFAULT_EXERCISE_CSV),
            calories_csv: PathBuf::from(DEFAULT_CALORIES_CSV),
        }
    }
}

impl DatasetConfig {
    /// Load dataset paths from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            exercise_csv: PathBuf::from(env_var_or(
                env_config::EXERCISE_CSV,
                DEFAULT_EXERCISE_CSV,
            )),
            calories_csv: PathBuf::from(env_var_or(
                env_config::CALORIES_CSV,
                DEFAULT_CALORIES_CSV,
            )),
        }
    }
}

/// Fitted-model cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCacheConfig {
    /// How long a fitted model stays valid
    pub ttl: Duration,
    /// Maximum number of fitted models held at once
    pub max_entries: usize,
}

impl Default for ModelCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(cache::DEFAULT_MODEL_TTL_SECS),
            max_entries: cache::DEFAULT_MAX_MODELS,
        }
    }
}

impl ModelCacheConfig {
    /// Load cache settings from environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but not a number
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            ttl: Duration::from_secs(parse_env(
                env_config::MODEL_CACHE_TTL_SECS,
                cache::DEFAULT_MODEL_TTL_SECS,
            )?),
            max_entries: parse_env(
                env_config::MODEL_CACHE_MAX_ENTRIES,
                cache::DEFAULT_MAX_MODELS,
            )?,
        })
    }
}

/// Complete advisor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Training data locations
    pub data: DatasetConfig,
    /// Forest hyperparameters
    pub forest: ForestConfig,
    /// Model cache settings
    pub cache: ModelCacheConfig,
    /// Catalog recommendation settings
    pub recommendation: RecommendationConfig,
    /// Which recommender answers requests
    pub strategy: RecommendationStrategy,
    /// Optional JSON file replacing the built-in guidance tables
    pub guidance_table_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is malformed or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            data: DatasetConfig::from_env(),
            forest: forest_from_env()?,
            cache: ModelCacheConfig::from_env()?,
            recommendation: RecommendationConfig {
                default_count: parse_env(
                    env_config::RECOMMENDATION_COUNT,
                    recommendation::DEFAULT_COUNT,
                )?,
                seed: parse_env(env_config::RECOMMENDATION_SEED, recommendation::DEFAULT_SEED)?,
                ..RecommendationConfig::default()
            },
            strategy: parse_env(
                env_config::RECOMMENDATION_STRATEGY,
                RecommendationStrategy::default(),
            )?,
            guidance_table_path: env::var(env_config::GUIDANCE_TABLE_PATH)
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };
        config.validate()?;

        info!(
            strategy = %config.strategy,
            trees = config.forest.n_estimators,
            cache_ttl_secs = config.cache.ttl.as_secs(),
            "Loaded advisor configuration"
        );
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        self.forest.validate()?;
        self.recommendation.validate()?;
        if self.cache.max_entries == 0 {
            return Err(AppError::config("model cache must hold at least one entry"));
        }
        if self.cache.ttl.is_zero() {
            return Err(AppError::config("model cache TTL must be positive"));
        }
        Ok(())
    }

    /// Configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> Value {
        json!({
            "data": {
                "exercise_csv": self.data.exercise_csv.display().to_string(),
                "calories_csv": self.data.calories_csv.display().to_string(),
            },
            "forest": {
                "n_estimators": self.forest.n_estimators,
                "max_depth": self.forest.max_depth,
                "max_features": self.forest.max_features,
                "min_samples_split": self.forest.min_samples_split,
                "seed": self.forest.seed,
            },
            "cache": {
                "ttl_secs": self.cache.ttl.as_secs(),
                "max_entries": self.cache.max_entries,
            },
            "recommendation": {
                "strategy": self.strategy.label(),
                "default_count": self.recommendation.default_count,
                "seed": self.recommendation.seed,
                "guidance_table": self.guidance_table_path.as_ref().map(|p| p.display().to_string()),
            },
        })
    }
}

fn forest_from_env() -> AppResult<ForestConfig> {
    let seed = match env::var(env_config::FOREST_SEED) {
        Ok(value) if value.trim().eq_ignore_ascii_case("none") => None,
        Ok(value) => Some(parse_value(env_config::FOREST_SEED, &value)?),
        Err(_) => Some(forest::DEFAULT_SEED),
    };
    Ok(ForestConfig {
        n_estimators: parse_env(env_config::FOREST_ESTIMATORS, forest::DEFAULT_ESTIMATORS)?,
        max_depth: parse_env(env_config::FOREST_MAX_DEPTH, forest::DEFAULT_MAX_DEPTH)?,
        max_features: parse_env(env_config::FOREST_MAX_FEATURES, forest::DEFAULT_MAX_FEATURES)?,
        min_samples_split: parse_env(
            env_config::FOREST_MIN_SAMPLES_SPLIT,
            forest::DEFAULT_MIN_SAMPLES_SPLIT,
        )?,
        seed,
        ..ForestConfig::default()
    })
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when it is unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    env::var(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AppError::config(format!("invalid value '{value}' for {key}: {e}")))
}
