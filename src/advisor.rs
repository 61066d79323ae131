// ABOUTME: Request orchestration: validate input, fetch or fit the model, predict, and recommend
// ABOUTME: The single entry point shared by the CLI and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calorie Advisor
//!
//! [`CalorieAdvisor::assess`] runs one form submission end to end:
//!
//! 1. validate every field
//! 2. derive BMI and its category
//! 3. fetch the fitted model from the cache, fitting it on a miss
//! 4. predict calories burned and the per-minute rate
//! 5. optionally ask the configured recommender for food guidance

use crate::cache::{Clock, ModelCache, SystemClock};
use crate::config::AppConfig;
use crate::constants::bounds::MAX_DURATION_MIN;
use crate::dataset::TrainingData;
use crate::errors::{AppError, AppResult};
use crate::models::{round2, BmiCategory, DietPreference, UserInput};
use crate::validation::validate_user_input;
use calorie_intelligence::{
    CalorieEstimator, CatalogRecommender, DietProfile, FittedModel, FoodCatalog, FoodRecommender,
    GuidanceTable, GuidanceTableRecommender, RecommendationResult, RecommendationStrategy,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// How concerning a BMI category is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Normal weight
    Healthy,
    /// Underweight or overweight
    NeedsAttention,
    /// Obese
    AtRisk,
}

impl HealthStatus {
    /// Status for a BMI category
    #[must_use]
    pub const fn from_category(category: BmiCategory) -> Self {
        match category {
            BmiCategory::NormalWeight => Self::Healthy,
            BmiCategory::Underweight | BmiCategory::Overweight => Self::NeedsAttention,
            BmiCategory::Obese => Self::AtRisk,
        }
    }

    /// Message shown next to the BMI
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Healthy => "Your BMI is in the healthy range! Maintain your current habits.",
            Self::NeedsAttention => {
                "Your BMI suggests room for improvement. Consider consulting a nutritionist."
            }
            Self::AtRisk => {
                "Your BMI indicates significant health risk. Please consult a healthcare professional."
            }
        }
    }
}

/// Result of one assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Assessment identifier
    pub id: Uuid,
    /// When the assessment was produced
    pub generated_at: DateTime<Utc>,
    /// Body mass index, two decimals
    pub bmi: f64,
    /// BMI category
    pub bmi_category: BmiCategory,
    /// Health status derived from the category
    pub health_status: HealthStatus,
    /// Message for the health status
    pub health_message: String,
    /// Predicted calories burned, two decimals
    pub calories_burned: f64,
    /// Calories burned per minute of exercise, two decimals
    pub calories_per_minute: f64,
    /// Exercise duration in minutes
    pub duration_min: f64,
    /// Duration as a share of the 120-minute maximum, 0 to 100
    pub duration_progress_pct: u8,
    /// Fingerprint of the training data the model was fitted on
    pub model_fingerprint: String,
    /// Food recommendations, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationResult>,
}

/// Build the recommender selected by `config`
///
/// # Errors
///
/// Returns a configuration error if the guidance table file cannot be read
/// or parsed, and a lookup error if it is missing a BMI or activity entry
pub fn build_recommender(config: &AppConfig) -> AppResult<Arc<dyn FoodRecommender>> {
    match config.strategy {
        RecommendationStrategy::Table => {
            let table = match &config.guidance_table_path {
                Some(path) => {
                    let json = fs::read_to_string(path).map_err(|e| {
                        AppError::config(format!(
                            "cannot read guidance table {}: {e}",
                            path.display()
                        ))
                        .with_source(e)
                    })?;
                    info!(path = %path.display(), "Loading guidance tables from file");
                    GuidanceTable::from_json(&json)?
                }
                None => GuidanceTable::builtin(),
            };
            Ok(Arc::new(GuidanceTableRecommender::new(table)?))
        }
        RecommendationStrategy::Catalog => Ok(Arc::new(CatalogRecommender::new(
            FoodCatalog::builtin(),
            config.recommendation.clone(),
        ))),
    }
}

/// Validates, predicts, and recommends for form submissions
pub struct CalorieAdvisor<C: Clock = SystemClock> {
    training_data: TrainingData,
    estimator: CalorieEstimator,
    cache: ModelCache<C>,
    recommender: Arc<dyn FoodRecommender>,
}

impl CalorieAdvisor<SystemClock> {
    /// Advisor over `training_data` using the wall clock for model expiry
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid
    pub fn new(
        config: &AppConfig,
        training_data: TrainingData,
        recommender: Arc<dyn FoodRecommender>,
    ) -> AppResult<Self> {
        Self::with_clock(config, training_data, recommender, Arc::new(SystemClock))
    }
}

impl<C: Clock> CalorieAdvisor<C> {
    /// Advisor with an injected cache clock
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid
    pub fn with_clock(
        config: &AppConfig,
        training_data: TrainingData,
        recommender: Arc<dyn FoodRecommender>,
        clock: Arc<C>,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            training_data,
            estimator: CalorieEstimator::new(config.forest.clone()),
            cache: ModelCache::with_clock(&config.cache, clock),
            recommender,
        })
    }

    /// Training data in use
    #[must_use]
    pub const fn training_data(&self) -> &TrainingData {
        &self.training_data
    }

    /// Fitted-model cache
    #[must_use]
    pub const fn cache(&self) -> &ModelCache<C> {
        &self.cache
    }

    /// Name of the active recommendation strategy
    #[must_use]
    pub fn recommender_name(&self) -> &'static str {
        self.recommender.name()
    }

    /// The fitted model for the current training data, fitting on a cache miss
    ///
    /// # Errors
    ///
    /// Returns the fit error when the training data cannot be fitted
    pub fn model(&self) -> AppResult<Arc<FittedModel>> {
        self.cache.get_or_fit(self.training_data.fingerprint(), || {
            self.estimator.fit_records(self.training_data.records())
        })
    }

    /// Predicted calories burned for a validated input, unrounded
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range input, or the model's
    /// fit or alignment error
    pub fn predict_calories(&self, input: &UserInput) -> AppResult<f64> {
        validate_user_input(input)?;
        self.model()?.predict(&input.to_prediction_input())
    }

    /// Recommendations for a profile from the configured strategy
    ///
    /// # Errors
    ///
    /// Returns the recommender's lookup error
    pub fn recommend(&self, profile: &DietProfile) -> AppResult<RecommendationResult> {
        self.recommender.recommend(profile)
    }

    /// Run a full assessment
    ///
    /// Recommendations are produced only when `diet` is given; pass
    /// [`DietPreference::NoPreference`] for generic guidance.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every out-of-range field, or a
    /// fit, alignment, or lookup error from the model or recommender
    pub fn assess(
        &self,
        input: &UserInput,
        diet: Option<DietPreference>,
    ) -> AppResult<Assessment> {
        validate_user_input(input)?;

        let bmi = input.bmi();
        let bmi_category = BmiCategory::from_bmi(bmi);
        let health_status = HealthStatus::from_category(bmi_category);

        let model = self.model()?;
        let estimate = model.predict(&input.to_prediction_input())?;
        let calories_burned = round2(estimate);
        let calories_per_minute = round2(estimate / input.duration_min);
        // Clamped to 0..=100 so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let duration_progress_pct =
            ((input.duration_min / MAX_DURATION_MIN) * 100.0).clamp(0.0, 100.0) as u8;

        let recommendations = diet
            .map(|preference| {
                let profile =
                    DietProfile::new(bmi_category, input.activity_level, Some(preference));
                self.recommender.recommend(&profile)
            })
            .transpose()?;

        debug!(
            bmi,
            bmi_category = %bmi_category,
            calories_burned,
            strategy = self.recommender.name(),
            "Assessment complete"
        );

        Ok(Assessment {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            bmi,
            bmi_category,
            health_status,
            health_message: health_status.message().to_owned(),
            calories_burned,
            calories_per_minute,
            duration_min: input.duration_min,
            duration_progress_pct,
            model_fingerprint: self.training_data.fingerprint().to_owned(),
            recommendations,
        })
    }
}
