// ABOUTME: Food recommendation contract shared by the guidance-table and catalog-ranking strategies
// ABOUTME: Defines DietProfile, RecommendationResult, and the FoodRecommender trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Recommendations
//!
//! Two interchangeable strategies implement [`FoodRecommender`]:
//!
//! - [`GuidanceTableRecommender`] looks the profile up in static nested
//!   tables and returns a five-section [`GuidancePlan`].
//! - [`CatalogRecommender`] filters, samples, and re-orders a fixed
//!   [`FoodCatalog`] and returns ranked items with nutrition facts.
//!
//! Unknown diet preferences are never errors. Missing BMI or activity keys in
//! a guidance table are [`calorie_core::errors::ErrorCode::LookupError`].

mod catalog;
mod guidance;
mod ranking;

pub use catalog::FoodCatalog;
pub use guidance::{
    ActivityGuidance, BmiAnalysis, BmiGuidance, DietGuidance, GuidancePlan, GuidanceTable,
    GuidanceTableRecommender, MealTiming,
};
pub use ranking::CatalogRecommender;

use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{ActivityLevel, BmiCategory, DietPreference, DietType, FoodItem, MealType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Everything a recommender needs to know about the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietProfile {
    /// BMI category
    pub bmi_category: BmiCategory,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Dietary preference; [`DietPreference::NoPreference`] when none was given
    #[serde(default)]
    pub diet_preference: DietPreference,
    /// Requested number of ranked items; the recommender default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl DietProfile {
    /// Build a profile; a missing preference means "no preference"
    #[must_use]
    pub fn new(
        bmi_category: BmiCategory,
        activity_level: ActivityLevel,
        diet_preference: Option<DietPreference>,
    ) -> Self {
        Self {
            bmi_category,
            activity_level,
            diet_preference: diet_preference.unwrap_or_default(),
            limit: None,
        }
    }

    /// Request a specific number of ranked items
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The inputs that produced a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// BMI category
    pub bmi_category: BmiCategory,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Dietary preference
    pub diet_preference: DietPreference,
}

impl From<&DietProfile> for ProfileSummary {
    fn from(profile: &DietProfile) -> Self {
        Self {
            bmi_category: profile.bmi_category,
            activity_level: profile.activity_level,
            diet_preference: profile.diet_preference.clone(),
        }
    }
}

/// Nutrition facts as displayed: integer calories, gram strings for macros
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Calories per serving
    pub calories: u32,
    /// Protein, e.g. "25g"
    pub protein: String,
    /// Carbohydrates, e.g. "40g"
    pub carbs: String,
    /// Fat, e.g. "15g"
    pub fat: String,
    /// Fiber, e.g. "5g"
    pub fiber: String,
}

/// One ranked catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedFood {
    /// Food name
    pub food: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Diet classification
    pub diet_type: DietType,
    /// Nutrition facts
    pub nutrition: NutritionFacts,
}

impl From<&FoodItem> for RecommendedFood {
    fn from(item: &FoodItem) -> Self {
        Self {
            food: item.name.clone(),
            meal_type: item.meal_type,
            diet_type: item.diet_type,
            nutrition: NutritionFacts {
                calories: item.calories,
                protein: format!("{}g", item.protein_g),
                carbs: format!("{}g", item.carbs_g),
                fat: format!("{}g", item.fat_g),
                fiber: format!("{}g", item.fiber_g),
            },
        }
    }
}

/// Strategy-specific payload of a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "items", rename_all = "snake_case")]
pub enum Recommendations {
    /// Static guidance sections
    Guidance(Box<GuidancePlan>),
    /// Ranked catalog items
    Ranked(Vec<RecommendedFood>),
}

/// A recommendation together with the profile that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Inputs that produced the recommendation
    pub summary: ProfileSummary,
    /// Strategy output
    pub recommendations: Recommendations,
}

impl RecommendationResult {
    /// Guidance sections, when produced by the table strategy
    #[must_use]
    pub fn guidance(&self) -> Option<&GuidancePlan> {
        match &self.recommendations {
            Recommendations::Guidance(plan) => Some(plan.as_ref()),
            Recommendations::Ranked(_) => None,
        }
    }

    /// Ranked items, when produced by the catalog strategy
    #[must_use]
    pub fn ranked(&self) -> Option<&[RecommendedFood]> {
        match &self.recommendations {
            Recommendations::Ranked(items) => Some(items.as_slice()),
            Recommendations::Guidance(_) => None,
        }
    }
}

/// Recommend foods for a profile
pub trait FoodRecommender: Send + Sync {
    /// Strategy name for logs and output
    fn name(&self) -> &'static str;

    /// Produce a recommendation for `profile`
    ///
    /// # Errors
    ///
    /// Implementations return a lookup error when a closed-enum key is missing
    /// from their tables
    fn recommend(&self, profile: &DietProfile) -> AppResult<RecommendationResult>;
}

/// Which recommender to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStrategy {
    /// Static guidance tables
    #[default]
    Table,
    /// Catalog ranking
    Catalog,
}

impl RecommendationStrategy {
    /// Configuration label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Catalog => "catalog",
        }
    }
}

impl fmt::Display for RecommendationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecommendationStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "guidance" => Ok(Self::Table),
            "catalog" | "ranking" | "ml" => Ok(Self::Catalog),
            other => Err(AppError::config(format!(
                "unknown recommendation strategy '{other}', expected 'table' or 'catalog'"
            ))),
        }
    }
}
