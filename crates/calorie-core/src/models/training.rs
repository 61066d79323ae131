// ABOUTME: Historical training records: exercise sessions, calorie outcomes, and joined rows
// ABOUTME: Records are immutable once loaded; BMI is derived later during feature engineering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::body::Gender;
use serde::{Deserialize, Serialize};

/// One row of the exercise session table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Join key shared with the calorie table
    pub user_id: String,
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Session duration in minutes
    pub duration_min: f64,
    /// Average heart rate during the session
    pub heart_rate: f64,
    /// Body temperature in degrees Celsius
    pub body_temp: f64,
    /// Activity level label, when the table carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
}

/// One row of the calorie outcome table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieRecord {
    /// Join key shared with the exercise table
    pub user_id: String,
    /// Calories burned during the session
    pub calories: f64,
}

/// Exercise session joined with its calorie outcome, identifier dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Session duration in minutes
    pub duration_min: f64,
    /// Average heart rate during the session
    pub heart_rate: f64,
    /// Body temperature in degrees Celsius
    pub body_temp: f64,
    /// Activity level label, when the table carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// Label: calories burned
    pub calories: f64,
}

impl TrainingRecord {
    /// Combine an exercise row with its calorie outcome
    #[must_use]
    pub fn from_parts(exercise: &ExerciseRecord, calories: f64) -> Self {
        Self {
            gender: exercise.gender,
            age: exercise.age,
            height_cm: exercise.height_cm,
            weight_kg: exercise.weight_kg,
            duration_min: exercise.duration_min,
            heart_rate: exercise.heart_rate,
            body_temp: exercise.body_temp,
            activity_level: exercise.activity_level.clone(),
            calories,
        }
    }
}
