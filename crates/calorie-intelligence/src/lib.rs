// ABOUTME: Calorie estimation and food recommendation algorithms
// ABOUTME: Regression forest, feature engineering, TF-IDF similarity, and recommender strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Intelligence
//!
//! The algorithmic half of the calorie advisor:
//!
//! - [`estimator`]: fit a bagged regression forest on joined exercise and
//!   calorie records, then predict calories for aligned inputs.
//! - [`recommendations`]: the [`recommendations::FoodRecommender`] trait with
//!   a static guidance-table strategy and a catalog-ranking strategy.
//!
//! Nothing here performs I/O; datasets arrive as records and tables as values.

/// Forest and recommendation configuration
pub mod config;
/// Calorie estimator and fitted model
pub mod estimator;
/// Source join and feature engineering
pub mod features;
/// Regression forest
pub mod forest;
/// Food recommendation strategies
pub mod recommendations;
/// TF-IDF similarity index
pub mod similarity;

pub use config::{ForestConfig, RecommendationConfig};
pub use estimator::{CalorieEstimator, FittedModel, TrainingReport};
pub use recommendations::{
    CatalogRecommender, DietProfile, FoodCatalog, FoodRecommender, GuidanceTable,
    GuidanceTableRecommender, RecommendationResult, RecommendationStrategy, Recommendations,
};
