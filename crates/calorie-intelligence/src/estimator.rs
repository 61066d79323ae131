// ABOUTME: CalorieEstimator fits the regression forest on joined training data and predicts calories
// ABOUTME: FittedModel pins the feature column order and rejects predictions it cannot align
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calorie Estimator
//!
//! Fit pipeline: join sources, engineer features, fit the forest, score the
//! fit in-sample. Predictions are reindexed to the fitted column order before
//! they reach the forest; an input that lacks a column gets 0 for it.

#![allow(clippy::cast_precision_loss)] // Safe: row counts are far below 2^52
#![allow(clippy::cast_possible_truncation)] // Safe: elapsed milliseconds fit in u64

use crate::config::ForestConfig;
use crate::features::{join_sources, FeatureFrame};
use crate::forest::{Forest, RandomForestRegressor};
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{CalorieRecord, ExerciseRecord, PredictionInput, TrainingRecord};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// In-sample fit statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rows used for fitting
    pub rows: usize,
    /// Feature columns
    pub feature_count: usize,
    /// Trees in the ensemble
    pub n_estimators: usize,
    /// Coefficient of determination on the training rows
    pub r_squared: f64,
    /// Mean absolute error on the training rows (kcal)
    pub mean_absolute_error: f64,
    /// Wall time spent fitting
    pub fit_duration_ms: u64,
}

/// A fitted calorie model
///
/// `FittedModel::default()` is an unfitted model; predicting with it fails
/// with an alignment error.
#[derive(Debug, Clone, Default)]
pub struct FittedModel {
    feature_columns: Vec<String>,
    forest: Forest,
    report: TrainingReport,
}

impl FittedModel {
    /// Feature columns in the order seen during fit
    #[must_use]
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Fit statistics
    #[must_use]
    pub const fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Whether the model has been fitted and its forest width matches its columns
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.feature_columns.is_empty()
            && self.forest.is_fitted()
            && self.forest.n_features() == self.feature_columns.len()
    }

    /// Predict calories burned for one input
    ///
    /// The input is aligned to [`Self::feature_columns`] first. Inference is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns an alignment error if the model is unfitted or the estimate is
    /// negative or non-finite, which signals an integration fault
    pub fn predict(&self, input: &PredictionInput) -> AppResult<f64> {
        if !self.is_fitted() {
            return Err(AppError::alignment(format!(
                "model is unfitted or its forest expects {} features for {} columns",
                self.forest.n_features(),
                self.feature_columns.len()
            )));
        }

        let row = input.align(&self.feature_columns);
        let estimate = self
            .forest
            .predict_row(&row)
            .ok_or_else(|| AppError::alignment("model has no fitted trees"))?;

        if !estimate.is_finite() || estimate < 0.0 {
            warn!(estimate, "Calorie estimate outside the label domain");
            return Err(AppError::alignment(format!(
                "calorie estimate {estimate} is outside the label domain"
            )));
        }
        Ok(estimate)
    }

    /// Feature importances paired with column names, highest first
    #[must_use]
    pub fn feature_importances(&self) -> Vec<(String, f64)> {
        let mut pairs: Vec<(String, f64)> = self
            .feature_columns
            .iter()
            .cloned()
            .zip(self.forest.importances().iter().copied())
            .collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }
}

/// Fits [`FittedModel`]s from historical sessions
#[derive(Debug, Clone, Default)]
pub struct CalorieEstimator {
    config: ForestConfig,
}

impl CalorieEstimator {
    /// Create an estimator with the given forest hyperparameters
    #[must_use]
    pub const fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Join the two source tables and fit
    ///
    /// # Errors
    ///
    /// Returns a data error if either table is empty, the join is empty, or a
    /// row cannot be encoded; a configuration error for bad hyperparameters
    pub fn fit(
        &self,
        exercise: &[ExerciseRecord],
        calories: &[CalorieRecord],
    ) -> AppResult<FittedModel> {
        let records = join_sources(exercise, calories)?;
        self.fit_records(&records)
    }

    /// Fit on already-joined records
    ///
    /// # Errors
    ///
    /// Returns a data error for empty or malformed records and a configuration
    /// error for bad hyperparameters
    pub fn fit_records(&self, records: &[TrainingRecord]) -> AppResult<FittedModel> {
        let started = Instant::now();
        let frame = FeatureFrame::from_records(records)?;
        let forest = RandomForestRegressor::new(self.config.clone())
            .fit(frame.matrix(), frame.labels())?;

        let fitted = forest.predict(frame.matrix());
        let (r_squared, mean_absolute_error) = fit_scores(frame.labels(), &fitted);
        let report = TrainingReport {
            rows: frame.matrix().n_rows(),
            feature_count: frame.columns().len(),
            n_estimators: forest.n_trees(),
            r_squared,
            mean_absolute_error,
            fit_duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            rows = report.rows,
            features = report.feature_count,
            trees = report.n_estimators,
            r_squared = report.r_squared,
            mae = report.mean_absolute_error,
            duration_ms = report.fit_duration_ms,
            "Fitted calorie model"
        );

        Ok(FittedModel {
            feature_columns: frame.columns().to_vec(),
            forest,
            report,
        })
    }
}

/// R² and mean absolute error of `predicted` against `actual`
fn fit_scores(actual: &[f64], predicted: &[f64]) -> (f64, f64) {
    let n = actual.len().max(1) as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    let mut abs_err = 0.0;
    for (&y, &p) in actual.iter().zip(predicted) {
        ss_res += (y - p).powi(2);
        ss_tot += (y - mean).powi(2);
        abs_err += (y - p).abs();
    }
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };
    (r_squared, abs_err / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calorie_core::errors::ErrorCode;
    use crate::forest::FeatureMatrix;
    use calorie_core::models::Gender;

    fn records() -> Vec<TrainingRecord> {
        (0..60)
            .map(|i| {
                let duration = f64::from(5 + i % 25);
                let exercise = ExerciseRecord {
                    user_id: i.to_string(),
                    gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    age: f64::from(20 + i % 40),
                    height_cm: 170.0,
                    weight_kg: 70.0,
                    duration_min: duration,
                    heart_rate: 90.0 + duration,
                    body_temp: 39.0,
                    activity_level: None,
                };
                TrainingRecord::from_parts(&exercise, duration * 6.0)
            })
            .collect()
    }

    fn quick_estimator() -> CalorieEstimator {
        CalorieEstimator::new(ForestConfig {
            n_estimators: 25,
            ..ForestConfig::default()
        })
    }

    #[test]
    fn test_unfitted_model_is_an_alignment_error() {
        let err = FittedModel::default()
            .predict(&PredictionInput::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlignmentError);
    }

    #[test]
    fn test_column_count_mismatch_is_an_alignment_error() {
        let x = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0], vec![3.0, 0.0]]).unwrap();
        let forest = RandomForestRegressor::new(ForestConfig {
            n_estimators: 3,
            max_features: 2,
            ..ForestConfig::default()
        })
        .fit(&x, &[1.0, 2.0, 3.0])
        .unwrap();
        let model = FittedModel {
            feature_columns: vec!["Duration".to_owned()],
            forest,
            report: TrainingReport::default(),
        };

        assert!(!model.is_fitted());
        let err = model
            .predict(&PredictionInput::default().with("Duration", 10.0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlignmentError);
    }

    #[test]
    fn test_prediction_is_repeatable() {
        let model = quick_estimator().fit_records(&records()).unwrap();
        let input = PredictionInput::default()
            .with("Duration", 20.0)
            .with("Heart_Rate", 110.0);
        let first = model.predict(&input).unwrap();
        let second = model.predict(&input).unwrap();
        assert!((first - second).abs() < f64::EPSILON);
        assert!(first.is_finite() && first >= 0.0);
    }

    #[test]
    fn test_report_and_importances() {
        let model = quick_estimator().fit_records(&records()).unwrap();
        assert_eq!(model.report().rows, 60);
        assert_eq!(model.report().n_estimators, 25);
        assert!(model.report().r_squared > 0.5);

        let importances = model.feature_importances();
        assert_eq!(importances.len(), model.feature_columns().len());
        let session_share: f64 = importances
            .iter()
            .filter(|(name, _)| name == "Duration" || name == "Heart_Rate")
            .map(|(_, value)| value)
            .sum();
        assert!(session_share > 0.5, "duration share {session_share}");
    }
}
