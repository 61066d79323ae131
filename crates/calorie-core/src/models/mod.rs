// ABOUTME: Domain models shared by the estimator, recommenders, and the advisor service
// ABOUTME: Re-exports body, diet, training, and input model types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Gender, BMI categories, and activity levels
pub mod body;
/// Dietary preferences, diet types, meal types, and food items
pub mod diet;
/// User form input and prediction feature maps
pub mod input;
/// Historical exercise and calorie records
pub mod training;

pub use body::{calculate_bmi, round2, ActivityLevel, BmiCategory, Gender};
pub use diet::{DietPreference, DietType, FoodItem, MealType};
pub use input::{PredictionInput, TrackerMetrics, UserInput};
pub use training::{CalorieRecord, ExerciseRecord, TrainingRecord};
