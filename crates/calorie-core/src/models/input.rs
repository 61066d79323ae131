// ABOUTME: User-submitted form input and the named feature map used for prediction
// ABOUTME: PredictionInput aligns itself to a fitted model's column order, filling gaps with zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::body::{calculate_bmi, ActivityLevel, BmiCategory, Gender};
use crate::constants::features;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional wearable tracker readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerMetrics {
    /// Heart rate (bpm)
    pub heart_rate: f64,
    /// Steps taken today
    pub steps: u32,
    /// Kilometers walked today
    pub kms_walked: f64,
    /// Pulse rate throughout the day (bpm)
    pub pulse_rate: f64,
    /// Hours slept
    pub hours_slept: f64,
    /// Blood oxygen (%)
    pub blood_oxygen: f64,
}

impl Default for TrackerMetrics {
    fn default() -> Self {
        Self {
            heart_rate: 80.0,
            steps: 0,
            kms_walked: 0.0,
            pulse_rate: 80.0,
            hours_slept: 7.0,
            blood_oxygen: 98.0,
        }
    }
}

/// A single user-submitted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Exercise duration in minutes
    pub duration_min: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Body temperature in degrees Celsius
    pub body_temp_c: f64,
    /// Gender
    pub gender: Gender,
    /// Tracker readings, absent when the user has no tracker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerMetrics>,
    /// Water intake in liters
    pub water_intake_l: f64,
}

impl Default for UserInput {
    fn default() -> Self {
        Self {
            age: 30,
            height_cm: 170.0,
            weight_kg: 70.0,
            duration_min: 30.0,
            activity_level: ActivityLevel::LightWalking,
            body_temp_c: 37.0,
            gender: Gender::Male,
            tracker: None,
            water_intake_l: 2.0,
        }
    }
}

impl UserInput {
    /// Body mass index rounded to two decimals
    #[must_use]
    pub fn bmi(&self) -> f64 {
        calculate_bmi(self.weight_kg, self.height_cm)
    }

    /// BMI category, recomputed from weight and height
    #[must_use]
    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }

    /// Build the named feature map for prediction
    ///
    /// Tracker fields are zero when no tracker is used. The activity level is
    /// emitted as a one-hot indicator column; alignment discards any name the
    /// model was not fitted on.
    #[must_use]
    pub fn to_prediction_input(&self) -> PredictionInput {
        let tracker = self.tracker;
        let tracked = |read: fn(&TrackerMetrics) -> f64| tracker.as_ref().map_or(0.0, read);

        PredictionInput::default()
            .with(features::AGE, f64::from(self.age))
            .with(features::HEIGHT, self.height_cm)
            .with(features::WEIGHT, self.weight_kg)
            .with(features::BMI, self.bmi())
            .with(features::DURATION, self.duration_min)
            .with(
                &features::activity_column(self.activity_level.label()),
                1.0,
            )
            .with(features::BODY_TEMP, self.body_temp_c)
            .with(features::GENDER, self.gender.encoded())
            .with(features::HEART_RATE, tracked(|t| t.heart_rate))
            .with(features::STEPS_TAKEN, tracked(|t| f64::from(t.steps)))
            .with(features::KMS_WALKED, tracked(|t| t.kms_walked))
            .with(features::PULSE_RATE, tracked(|t| t.pulse_rate))
            .with(features::HOURS_SLEPT, tracked(|t| t.hours_slept))
            .with(features::BLOOD_OXYGEN, tracked(|t| t.blood_oxygen))
            .with(features::WATER_INTAKE, self.water_intake_l)
    }
}

/// Named feature values for a single prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    values: BTreeMap<String, f64>,
}

impl PredictionInput {
    /// Set a named feature, returning the updated input
    #[must_use]
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    /// Value of a named feature
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Remove a named feature
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Reindex to `columns`: absent names become 0, names not in `columns` are dropped
    #[must_use]
    pub fn align(&self, columns: &[String]) -> Vec<f64> {
        columns
            .iter()
            .map(|column| self.values.get(column).copied().unwrap_or(0.0))
            .collect()
    }

    /// Names of the columns in `columns` that this input does not provide
    #[must_use]
    pub fn missing_columns<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        columns
            .iter()
            .filter(|column| !self.values.contains_key(column.as_str()))
            .map(String::as_str)
            .collect()
    }
}
