// ABOUTME: Body composition and activity models: gender, BMI categories, activity levels
// ABOUTME: BMI is always derived from weight and height, never stored independently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::bmi::{NORMAL_UP_TO, OVERWEIGHT_UP_TO, UNDERWEIGHT_BELOW};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender as collected by the form and stored in the exercise table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male (encoded as 1)
    Male,
    /// Female (encoded as 0)
    Female,
}

impl Gender {
    /// Binary encoding used as a model feature
    #[must_use]
    pub const fn encoded(self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }

    /// Parse a gender label case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown gender '{s}'"))
    }
}

/// Body mass index category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI from 18.5 up to and including 24.9
    #[serde(rename = "Normal weight")]
    NormalWeight,
    /// BMI above 24.9 up to and including 29.9
    Overweight,
    /// BMI above 29.9
    Obese,
}

impl BmiCategory {
    /// All categories in ascending BMI order
    pub const ALL: [Self; 4] = [
        Self::Underweight,
        Self::NormalWeight,
        Self::Overweight,
        Self::Obese,
    ];

    /// Categorize a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Self::Underweight
        } else if bmi <= NORMAL_UP_TO {
            Self::NormalWeight
        } else if bmi <= OVERWEIGHT_UP_TO {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body mass index rounded to two decimals
///
/// `bmi = weight_kg / (height_cm / 100)^2`
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Round to two decimals
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityLevel {
    /// Sedentary
    #[serde(rename = "No activity")]
    NoActivity,
    /// Light walking
    #[serde(rename = "Light walking")]
    LightWalking,
    /// Regular exercise
    #[serde(rename = "Regular exercise")]
    RegularExercise,
}

impl ActivityLevel {
    /// All levels from least to most active
    pub const ALL: [Self; 3] = [Self::NoActivity, Self::LightWalking, Self::RegularExercise];

    /// Label as stored in the exercise table and shown on the form
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoActivity => "No activity",
            Self::LightWalking => "Light walking",
            Self::RegularExercise => "Regular exercise",
        }
    }

    /// Whether protein-forward ranking applies
    #[must_use]
    pub const fn is_high_activity(self) -> bool {
        matches!(self, Self::RegularExercise)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "no activity" | "none" | "sedentary" => Ok(Self::NoActivity),
            "light walking" | "light" | "walking" => Ok(Self::LightWalking),
            "regular exercise" | "regular" | "active" => Ok(Self::RegularExercise),
            _ => Err(format!("unknown activity level '{s}'")),
        }
    }
}
