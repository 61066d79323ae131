// ABOUTME: Form input validation against the documented physiological bounds
// ABOUTME: Collects every violation in field order into a single ValidationFailed error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::bounds;
use crate::errors::{AppError, AppResult};
use crate::models::UserInput;

/// Inclusive range check; NaN never passes
fn within((low, high): (f64, f64), value: f64) -> bool {
    (low..=high).contains(&value)
}

/// Check every field of `input`
///
/// Tracker fields are checked only when tracker readings are present.
///
/// # Errors
///
/// Returns a validation error whose violations list every failed field
pub fn validate_user_input(input: &UserInput) -> AppResult<()> {
    let mut violations = Vec::new();

    if !within(bounds::AGE_YEARS, f64::from(input.age)) {
        let (low, high) = bounds::AGE_YEARS;
        violations.push(format!(
            "Please enter a valid age between {low} and {high} years"
        ));
    }
    if !within(bounds::HEIGHT_CM, input.height_cm) {
        let (low, high) = bounds::HEIGHT_CM;
        violations.push(format!(
            "Please enter a valid height between {low}cm and {high}cm"
        ));
    }
    if !within(bounds::WEIGHT_KG, input.weight_kg) {
        let (low, high) = bounds::WEIGHT_KG;
        violations.push(format!(
            "Please enter a valid weight between {low}kg and {high}kg"
        ));
    }
    if !(input.duration_min > 0.0 && input.duration_min <= bounds::MAX_DURATION_MIN) {
        violations.push(format!(
            "Please enter a valid exercise duration greater than 0 and up to {} minutes",
            bounds::MAX_DURATION_MIN
        ));
    }
    if !within(bounds::BODY_TEMP_C, input.body_temp_c) {
        let (low, high) = bounds::BODY_TEMP_C;
        violations.push(format!(
            "Please enter a valid body temperature between {low}°C and {high}°C"
        ));
    }

    if let Some(tracker) = &input.tracker {
        let checks = [
            (
                bounds::HEART_RATE_BPM,
                tracker.heart_rate,
                "heart rate",
                " bpm",
            ),
            (bounds::STEPS, f64::from(tracker.steps), "step count", ""),
            (bounds::KMS_WALKED, tracker.kms_walked, "distance walked", "km"),
            (
                bounds::PULSE_RATE_BPM,
                tracker.pulse_rate,
                "pulse rate",
                " bpm",
            ),
            (bounds::HOURS_SLEPT, tracker.hours_slept, "sleep duration", " hours"),
            (
                bounds::BLOOD_OXYGEN_PCT,
                tracker.blood_oxygen,
                "blood oxygen level",
                "%",
            ),
        ];
        for (range, value, field, unit) in checks {
            if !within(range, value) {
                let (low, high) = range;
                violations.push(format!(
                    "Please enter a valid {field} between {low}{unit} and {high}{unit}"
                ));
            }
        }
    }

    if !within(bounds::WATER_INTAKE_L, input.water_intake_l) {
        let (low, high) = bounds::WATER_INTAKE_L;
        violations.push(format!(
            "Please enter a valid water intake between {low}L and {high}L"
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(violations))
    }
}
