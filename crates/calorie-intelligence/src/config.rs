// ABOUTME: Tunable configuration for the regression forest and catalog recommendations
// ABOUTME: Hyperparameters are configuration rather than contract and are validated before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration
//!
//! Ensemble hyperparameters differ between deployments (tree count, seeding),
//! so they are carried as configuration with validated ranges.

use calorie_core::constants::{forest, recommendation};
use calorie_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Regression forest hyperparameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Features sampled as split candidates at each node
    pub max_features: usize,
    /// Minimum rows required to split a node
    pub min_samples_split: usize,
    /// Minimum rows in each child of a split
    pub min_samples_leaf: usize,
    /// Fit each tree on a bootstrap sample of the rows
    pub bootstrap: bool,
    /// Base seed; `None` draws a fresh seed per fit
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: forest::DEFAULT_ESTIMATORS,
            max_depth: forest::DEFAULT_MAX_DEPTH,
            max_features: forest::DEFAULT_MAX_FEATURES,
            min_samples_split: forest::DEFAULT_MIN_SAMPLES_SPLIT,
            min_samples_leaf: 1,
            bootstrap: true,
            seed: Some(forest::DEFAULT_SEED),
        }
    }
}

impl ForestConfig {
    /// Validate hyperparameter ranges
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any hyperparameter is out of range
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=5_000).contains(&self.n_estimators) {
            return Err(AppError::config(format!(
                "n_estimators must be between 1 and 5000, got {}",
                self.n_estimators
            )));
        }
        if !(1..=32).contains(&self.max_depth) {
            return Err(AppError::config(format!(
                "max_depth must be between 1 and 32, got {}",
                self.max_depth
            )));
        }
        if self.max_features == 0 {
            return Err(AppError::config("max_features must be at least 1"));
        }
        if self.min_samples_split < 2 {
            return Err(AppError::config("min_samples_split must be at least 2"));
        }
        if self.min_samples_leaf == 0 {
            return Err(AppError::config("min_samples_leaf must be at least 1"));
        }
        Ok(())
    }
}

/// Catalog recommendation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Items returned when the caller does not ask for a count
    pub default_count: usize,
    /// Seed for the reproducible catalog sample
    pub seed: u64,
    /// Items in the fallback recommendation
    pub fallback_count: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_count: recommendation::DEFAULT_COUNT,
            seed: recommendation::DEFAULT_SEED,
            fallback_count: recommendation::FALLBACK_COUNT,
        }
    }
}

impl RecommendationConfig {
    /// Validate recommendation settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the default count is zero
    pub fn validate(&self) -> AppResult<()> {
        if self.default_count == 0 {
            return Err(AppError::config("default recommendation count must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forest_config_is_valid() {
        assert!(ForestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_features() {
        let config = ForestConfig {
            max_features: 0,
            ..ForestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_recommendation_count() {
        let config = RecommendationConfig {
            default_count: 0,
            ..RecommendationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
