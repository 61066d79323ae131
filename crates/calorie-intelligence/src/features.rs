// ABOUTME: Feature engineering: joins the source tables, derives BMI, and encodes categorical columns
// ABOUTME: Produces the ordered column list and matrix a FittedModel is aligned against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::forest::FeatureMatrix;
use calorie_core::constants::features;
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{calculate_bmi, CalorieRecord, ExerciseRecord, TrainingRecord};
use std::collections::{BTreeSet, HashMap};

/// Inner-join exercise sessions to calorie outcomes on the user identifier
///
/// Every matching pair is kept, in exercise-table order. The identifier is
/// dropped from the result.
///
/// # Errors
///
/// Returns a data error if either table is empty or no identifiers match
pub fn join_sources(
    exercise: &[ExerciseRecord],
    calories: &[CalorieRecord],
) -> AppResult<Vec<TrainingRecord>> {
    if exercise.is_empty() {
        return Err(AppError::data("exercise table has no rows"));
    }
    if calories.is_empty() {
        return Err(AppError::data("calorie table has no rows"));
    }

    let mut by_user: HashMap<&str, Vec<f64>> = HashMap::with_capacity(calories.len());
    for record in calories {
        by_user
            .entry(record.user_id.as_str())
            .or_default()
            .push(record.calories);
    }

    let joined: Vec<TrainingRecord> = exercise
        .iter()
        .flat_map(|session| {
            by_user
                .get(session.user_id.as_str())
                .into_iter()
                .flatten()
                .map(move |&calories| TrainingRecord::from_parts(session, calories))
        })
        .collect();

    if joined.is_empty() {
        return Err(AppError::data(
            "joining exercise and calorie tables on User_ID produced no rows",
        ));
    }
    Ok(joined)
}

/// Engineered features with their labels
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    columns: Vec<String>,
    matrix: FeatureMatrix,
    labels: Vec<f64>,
}

impl FeatureFrame {
    /// Engineer features from joined training records
    ///
    /// # Errors
    ///
    /// Returns a data error for an empty record set, non-finite values, or
    /// negative calorie labels
    pub fn from_records(records: &[TrainingRecord]) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::data("no training records to engineer features from"));
        }

        let columns = feature_columns(records);
        let activity_columns = &columns[features::NUMERIC_COLUMNS.len()..];

        let mut rows = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if !record.calories.is_finite() || record.calories < 0.0 {
                return Err(AppError::data(format!(
                    "training row {index} has invalid calories {}",
                    record.calories
                )));
            }
            rows.push(encode_record(record, activity_columns));
            labels.push(record.calories);
        }

        Ok(Self {
            matrix: FeatureMatrix::from_rows(&rows)?,
            columns,
            labels,
        })
    }

    /// Ordered feature column names
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature matrix in column order
    #[must_use]
    pub const fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    /// Calorie labels, one per row
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }
}

/// Column names in model order: numeric columns, then one-hot activity columns
/// for every level except the lexicographically first
fn feature_columns(records: &[TrainingRecord]) -> Vec<String> {
    let levels: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.activity_level.as_deref())
        .collect();

    features::NUMERIC_COLUMNS
        .iter()
        .map(|&name| name.to_owned())
        .chain(levels.into_iter().skip(1).map(features::activity_column))
        .collect()
}

fn encode_record(record: &TrainingRecord, activity_columns: &[String]) -> Vec<f64> {
    let mut row = vec![
        record.gender.encoded(),
        record.age,
        record.height_cm,
        record.weight_kg,
        record.duration_min,
        record.heart_rate,
        record.body_temp,
        calculate_bmi(record.weight_kg, record.height_cm),
    ];
    let own_column = record
        .activity_level
        .as_deref()
        .map(features::activity_column);
    row.extend(activity_columns.iter().map(|column| {
        if own_column.as_ref() == Some(column) {
            1.0
        } else {
            0.0
        }
    }));
    row
}
