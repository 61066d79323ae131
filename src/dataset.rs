// ABOUTME: CSV loading for the exercise session and calorie outcome tables
// ABOUTME: Joins both tables on User_ID and fingerprints the result for model cache keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Data
//!
//! Exercise header: `User_ID, Gender, Age, Height, Weight, Duration,
//! Heart_Rate, Body_Temp` with an optional `Activity_Level`. Calorie header:
//! `User_ID, Calories`. Every fault names the file and the data row (1-based,
//! header excluded).

use crate::errors::{AppError, AppResult};
use crate::models::{CalorieRecord, ExerciseRecord, Gender, TrainingRecord};
use calorie_intelligence::features::join_sources;
use csv::{Error as CsvError, ReaderBuilder, Trim};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ExerciseRow {
    #[serde(rename = "User_ID")]
    user_id: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "Height")]
    height: f64,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Duration")]
    duration: f64,
    #[serde(rename = "Heart_Rate")]
    heart_rate: f64,
    #[serde(rename = "Body_Temp")]
    body_temp: f64,
    #[serde(rename = "Activity_Level", default)]
    activity_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalorieRow {
    #[serde(rename = "User_ID")]
    user_id: String,
    #[serde(rename = "Calories")]
    calories: f64,
}

/// Parse exercise sessions from any CSV reader
///
/// `source` names the input in error messages.
///
/// # Errors
///
/// Returns a data error for malformed rows or an unknown gender label
pub fn read_exercise<R: Read>(reader: R, source: &str) -> AppResult<Vec<ExerciseRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<ExerciseRow>().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| row_error(source, row_number, &e))?;
        let gender = Gender::parse(&row.gender).ok_or_else(|| {
            AppError::data(format!(
                "{source}: row {row_number}: unknown gender '{}'",
                row.gender
            ))
        })?;
        records.push(ExerciseRecord {
            user_id: row.user_id,
            gender,
            age: row.age,
            height_cm: row.height,
            weight_kg: row.weight,
            duration_min: row.duration,
            heart_rate: row.heart_rate,
            body_temp: row.body_temp,
            activity_level: row.activity_level.filter(|level| !level.is_empty()),
        });
    }

    debug!(source, rows = records.len(), "Read exercise table");
    Ok(records)
}

/// Parse calorie outcomes from any CSV reader
///
/// # Errors
///
/// Returns a data error for malformed rows
pub fn read_calories<R: Read>(reader: R, source: &str) -> AppResult<Vec<CalorieRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<CalorieRow>().enumerate() {
        let row = row.map_err(|e| row_error(source, index + 1, &e))?;
        records.push(CalorieRecord {
            user_id: row.user_id,
            calories: row.calories,
        });
    }

    debug!(source, rows = records.len(), "Read calorie table");
    Ok(records)
}

fn row_error(source: &str, row_number: usize, error: &CsvError) -> AppError {
    AppError::data(format!("{source}: row {row_number}: {error}"))
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|e| {
        AppError::data(format!("cannot open {}: {e}", path.display())).with_source(e)
    })
}

/// Both source tables and their join
#[derive(Debug, Clone)]
pub struct TrainingData {
    exercise: Vec<ExerciseRecord>,
    calories: Vec<CalorieRecord>,
    records: Vec<TrainingRecord>,
    fingerprint: String,
}

impl TrainingData {
    /// Load and join both CSV files
    ///
    /// # Errors
    ///
    /// Returns a data error if a file cannot be read, a row is malformed,
    /// either table is empty, or the join produces no rows
    pub fn load(exercise_path: &Path, calories_path: &Path) -> AppResult<Self> {
        let exercise = read_exercise(open(exercise_path)?, &exercise_path.display().to_string())?;
        let calories = read_calories(open(calories_path)?, &calories_path.display().to_string())?;
        let data = Self::from_records(exercise, calories)?;

        info!(
            exercise = %exercise_path.display(),
            calories = %calories_path.display(),
            joined_rows = data.records.len(),
            fingerprint = %data.fingerprint,
            "Loaded training data"
        );
        Ok(data)
    }

    /// Join in-memory tables
    ///
    /// # Errors
    ///
    /// Returns a data error if either table is empty or the join produces no rows
    pub fn from_records(
        exercise: Vec<ExerciseRecord>,
        calories: Vec<CalorieRecord>,
    ) -> AppResult<Self> {
        let records = join_sources(&exercise, &calories)?;
        let fingerprint = fingerprint_records(&records);
        Ok(Self {
            exercise,
            calories,
            records,
            fingerprint,
        })
    }

    /// Exercise sessions as loaded
    #[must_use]
    pub fn exercise(&self) -> &[ExerciseRecord] {
        &self.exercise
    }

    /// Calorie outcomes as loaded
    #[must_use]
    pub fn calories(&self) -> &[CalorieRecord] {
        &self.calories
    }

    /// Joined training records
    #[must_use]
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// SHA-256 hex digest of the joined records
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Load and join the exercise and calorie tables
///
/// # Errors
///
/// See [`TrainingData::load`]
pub fn load_training_data(exercise_path: &Path, calories_path: &Path) -> AppResult<TrainingData> {
    TrainingData::load(exercise_path, calories_path)
}

fn fingerprint_records(records: &[TrainingRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update([u8::from(record.gender == Gender::Male)]);
        for value in [
            record.age,
            record.height_cm,
            record.weight_kg,
            record.duration_min,
            record.heart_rate,
            record.body_temp,
            record.calories,
        ] {
            hasher.update(value.to_le_bytes());
        }
        if let Some(level) = &record.activity_level {
            hasher.update(level.as_bytes());
        }
        hasher.update([0xff]);
    }
    hex::encode(hasher.finalize())
}
