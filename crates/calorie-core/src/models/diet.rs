// ABOUTME: Diet models: dietary preferences, catalog diet types, meal types, and food items
// ABOUTME: "No preference" is a first-class variant and unknown preferences are kept verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Dietary preference selected by the user
///
/// Diet is open-ended: anything that is not a recognized label is kept as
/// [`DietPreference::Unlisted`] so recommenders can apply their fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietPreference {
    /// No dietary restriction
    #[default]
    NoPreference,
    /// Vegetarian
    Vegetarian,
    /// Vegan
    Vegan,
    /// Non-vegetarian
    NonVegetarian,
    /// Pescatarian
    Pescatarian,
    /// Eggs and dairy but no meat
    Eggitarian,
    /// Gluten-free
    GlutenFree,
    /// Ketogenic
    Keto,
    /// Paleo
    Paleo,
    /// Mediterranean
    Mediterranean,
    /// The form's explicit "Other" choice
    Other,
    /// Any label not listed above
    Unlisted(String),
}

impl DietPreference {
    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::NoPreference => "No preference",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::NonVegetarian => "Non-Vegetarian",
            Self::Pescatarian => "Pescatarian",
            Self::Eggitarian => "Eggitarian",
            Self::GlutenFree => "Gluten-Free",
            Self::Keto => "Keto",
            Self::Paleo => "Paleo",
            Self::Mediterranean => "Mediterranean",
            Self::Other => "Other",
            Self::Unlisted(label) => label,
        }
    }

    /// Parse a label; never fails because unknown labels become [`Self::Unlisted`]
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "no preference" | "none" => Self::NoPreference,
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "non-vegetarian" | "non vegetarian" | "nonvegetarian" => Self::NonVegetarian,
            "pescatarian" => Self::Pescatarian,
            "eggitarian" => Self::Eggitarian,
            "gluten-free" | "gluten free" => Self::GlutenFree,
            "keto" => Self::Keto,
            "paleo" => Self::Paleo,
            "mediterranean" => Self::Mediterranean,
            "other" => Self::Other,
            _ => Self::Unlisted(trimmed.to_owned()),
        }
    }

    /// Whether a catalog diet type satisfies this preference (case-insensitive)
    #[must_use]
    pub fn matches(&self, diet_type: DietType) -> bool {
        self.label().eq_ignore_ascii_case(diet_type.label())
    }
}

impl From<String> for DietPreference {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DietPreference> for String {
    fn from(value: DietPreference) -> Self {
        value.label().to_owned()
    }
}

impl FromStr for DietPreference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diet classification of a catalog item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    /// Vegetarian
    Vegetarian,
    /// Vegan
    Vegan,
    /// Contains meat
    NonVegetarian,
    /// Contains fish but no other meat
    Pescatarian,
}

impl DietType {
    /// Catalog label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::NonVegetarian => "non-vegetarian",
            Self::Pescatarian => "pescatarian",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Meal slot of a catalog item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Catalog label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog food item with nutrition facts per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name
    pub name: String,
    /// Calories per serving
    pub calories: u32,
    /// Protein per serving (grams)
    pub protein_g: u32,
    /// Carbohydrates per serving (grams)
    pub carbs_g: u32,
    /// Fat per serving (grams)
    pub fat_g: u32,
    /// Fiber per serving (grams)
    pub fiber_g: u32,
    /// Meal slot
    pub meal_type: MealType,
    /// Diet classification
    pub diet_type: DietType,
}

impl FoodItem {
    /// Text used by the similarity index
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("{} {} {}", self.name, self.meal_type, self.diet_type)
    }
}
