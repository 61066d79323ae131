// ABOUTME: Workspace constants for feature names, input bounds, cache defaults, and env variables
// ABOUTME: Organized by domain so callers import only the group they need
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Feature column names used by the training tables and the fitted model
pub mod features {
    /// Binary-encoded gender (male = 1)
    pub const GENDER: &str = "Gender";
    /// Age in years
    pub const AGE: &str = "Age";
    /// Height in centimeters
    pub const HEIGHT: &str = "Height";
    /// Weight in kilograms
    pub const WEIGHT: &str = "Weight";
    /// Exercise duration in minutes
    pub const DURATION: &str = "Duration";
    /// Heart rate in beats per minute
    pub const HEART_RATE: &str = "Heart_Rate";
    /// Body temperature in degrees Celsius
    pub const BODY_TEMP: &str = "Body_Temp";
    /// Derived body mass index
    pub const BMI: &str = "BMI";
    /// Steps taken today (tracker)
    pub const STEPS_TAKEN: &str = "Steps_Taken";
    /// Kilometers walked (tracker)
    pub const KMS_WALKED: &str = "Kms_Walked";
    /// Pulse rate throughout the day (tracker)
    pub const PULSE_RATE: &str = "Pulse_Rate";
    /// Hours slept (tracker)
    pub const HOURS_SLEPT: &str = "Hours_Slept";
    /// Blood oxygen percentage (tracker)
    pub const BLOOD_OXYGEN: &str = "Blood_Oxygen";
    /// Water intake in liters
    pub const WATER_INTAKE: &str = "Water_Intake";
    /// Prefix of one-hot activity level columns
    pub const ACTIVITY_LEVEL_PREFIX: &str = "Activity_Level_";

    /// Numeric columns in model order, before the one-hot activity columns
    pub const NUMERIC_COLUMNS: [&str; 8] = [
        GENDER, AGE, HEIGHT, WEIGHT, DURATION, HEART_RATE, BODY_TEMP, BMI,
    ];

    /// Build the one-hot column name for an activity level label
    #[must_use]
    pub fn activity_column(level: &str) -> String {
        format!("{ACTIVITY_LEVEL_PREFIX}{level}")
    }
}

/// Accepted ranges for user-submitted form fields (inclusive)
pub mod bounds {
    /// Age range in years
    pub const AGE_YEARS: (f64, f64) = (10.0, 100.0);
    /// Height range in centimeters
    pub const HEIGHT_CM: (f64, f64) = (100.0, 250.0);
    /// Weight range in kilograms
    pub const WEIGHT_KG: (f64, f64) = (30.0, 200.0);
    /// Maximum exercise duration in minutes (minimum is exclusive zero)
    pub const MAX_DURATION_MIN: f64 = 120.0;
    /// Body temperature range in degrees Celsius
    pub const BODY_TEMP_C: (f64, f64) = (35.0, 42.0);
    /// Heart rate range in beats per minute
    pub const HEART_RATE_BPM: (f64, f64) = (40.0, 200.0);
    /// Daily steps range
    pub const STEPS: (f64, f64) = (0.0, 50_000.0);
    /// Kilometers walked range
    pub const KMS_WALKED: (f64, f64) = (0.0, 50.0);
    /// Pulse rate range in beats per minute
    pub const PULSE_RATE_BPM: (f64, f64) = (40.0, 200.0);
    /// Hours slept range
    pub const HOURS_SLEPT: (f64, f64) = (0.0, 24.0);
    /// Blood oxygen percentage range
    pub const BLOOD_OXYGEN_PCT: (f64, f64) = (70.0, 100.0);
    /// Water intake range in liters
    pub const WATER_INTAKE_L: (f64, f64) = (0.0, 10.0);
}

/// Body mass index category thresholds
pub mod bmi {
    /// Below this value the category is underweight
    pub const UNDERWEIGHT_BELOW: f64 = 18.5;
    /// Up to and including this value the category is normal weight
    pub const NORMAL_UP_TO: f64 = 24.9;
    /// Up to and including this value the category is overweight
    pub const OVERWEIGHT_UP_TO: f64 = 29.9;
}

/// Model cache defaults
pub mod cache {
    /// Fitted model time-to-live (1 hour)
    pub const DEFAULT_MODEL_TTL_SECS: u64 = 3_600;
    /// Maximum number of fitted models kept at once
    pub const DEFAULT_MAX_MODELS: usize = 4;
}

/// Regression forest defaults
pub mod forest {
    /// Number of trees
    pub const DEFAULT_ESTIMATORS: usize = 200;
    /// Depth cap per tree
    pub const DEFAULT_MAX_DEPTH: usize = 6;
    /// Features sampled per split
    pub const DEFAULT_MAX_FEATURES: usize = 3;
    /// Minimum rows required to split a node
    pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
    /// Default sampling seed
    pub const DEFAULT_SEED: u64 = 42;
}

/// Recommendation defaults
pub mod recommendation {
    /// Items returned by catalog ranking when the caller does not ask for a count
    pub const DEFAULT_COUNT: usize = 5;
    /// Sampling seed for catalog ranking
    pub const DEFAULT_SEED: u64 = 42;
    /// Items in the fallback recommendation
    pub const FALLBACK_COUNT: usize = 3;
}

/// Environment variable names
pub mod env_config {
    /// Exercise session CSV path
    pub const EXERCISE_CSV: &str = "CALORIE_EXERCISE_CSV";
    /// Calorie outcome CSV path
    pub const CALORIES_CSV: &str = "CALORIE_CALORIES_CSV";
    /// Number of trees
    pub const FOREST_ESTIMATORS: &str = "FOREST_ESTIMATORS";
    /// Depth cap
    pub const FOREST_MAX_DEPTH: &str = "FOREST_MAX_DEPTH";
    /// Features per split
    pub const FOREST_MAX_FEATURES: &str = "FOREST_MAX_FEATURES";
    /// Minimum rows to split
    pub const FOREST_MIN_SAMPLES_SPLIT: &str = "FOREST_MIN_SAMPLES_SPLIT";
    /// Sampling seed, or `none`
    pub const FOREST_SEED: &str = "FOREST_SEED";
    /// Model cache TTL in seconds
    pub const MODEL_CACHE_TTL_SECS: &str = "MODEL_CACHE_TTL_SECS";
    /// Model cache capacity
    pub const MODEL_CACHE_MAX_ENTRIES: &str = "MODEL_CACHE_MAX_ENTRIES";
    /// Default recommendation count
    pub const RECOMMENDATION_COUNT: &str = "RECOMMENDATION_COUNT";
    /// Recommendation sampling seed
    pub const RECOMMENDATION_SEED: &str = "RECOMMENDATION_SEED";
    /// Recommendation strategy (`table` or `catalog`)
    pub const RECOMMENDATION_STRATEGY: &str = "RECOMMENDATION_STRATEGY";
    /// Optional JSON guidance table override
    pub const GUIDANCE_TABLE_PATH: &str = "GUIDANCE_TABLE_PATH";
}

/// Service identification for structured logging
pub mod service_names {
    /// Service name reported at startup
    pub const CALORIE_ADVISOR: &str = "calorie-advisor";
}
