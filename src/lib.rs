// ABOUTME: Main library entry point for the calorie advisor
// ABOUTME: Wires configuration, dataset loading, validation, model caching, and recommendations together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Advisor
//!
//! Predicts calories burned during exercise with a regression forest fitted
//! on historical sessions, and recommends foods for the user's body-mass-index
//! category, activity level, and dietary preference.
//!
//! ## Architecture
//!
//! - **calorie-core**: errors, constants, and domain models (re-exported here)
//! - **calorie-intelligence**: forest, feature engineering, recommenders
//! - this crate: configuration, logging, CSV loading, input validation, the
//!   fitted-model cache, and the [`advisor::CalorieAdvisor`] orchestrator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calorie_advisor::advisor::{build_recommender, CalorieAdvisor};
//! use calorie_advisor::config::AppConfig;
//! use calorie_advisor::dataset::TrainingData;
//! use calorie_advisor::models::{DietPreference, UserInput};
//!
//! # fn main() -> calorie_advisor::errors::AppResult<()> {
//! let config = AppConfig::from_env()?;
//! let data = TrainingData::load(&config.data.exercise_csv, &config.data.calories_csv)?;
//! let advisor = CalorieAdvisor::new(&config, data, build_recommender(&config)?)?;
//! let assessment = advisor.assess(&UserInput::default(), Some(DietPreference::Vegetarian))?;
//! println!("{} kcal", assessment.calories_burned);
//! # Ok(())
//! # }
//! ```

pub use calorie_core::{constants, errors, models};

/// Request orchestration
pub mod advisor;

/// Fitted-model cache
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// CSV dataset loading
pub mod dataset;

/// Structured logging setup
pub mod logging;

/// Form input validation
pub mod validation;
