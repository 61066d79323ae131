// ABOUTME: Static guidance tables keyed by BMI category, activity level, and diet preference
// ABOUTME: Tables are checked for completeness on load; unlisted diets fall back to generic advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DietProfile, FoodRecommender, ProfileSummary, RecommendationResult, Recommendations};
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{ActivityLevel, BmiCategory, DietPreference};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Food focus for one BMI category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiGuidance {
    /// What the diet should emphasize
    pub focus: String,
    /// Suggested foods
    pub foods: Vec<String>,
    /// Nutrition tip
    pub tips: String,
}

/// Workout nutrition and hydration for one activity level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGuidance {
    /// Before a workout
    pub pre_workout: String,
    /// After a workout
    pub post_workout: String,
    /// General advice
    pub general: String,
    /// Daily hydration target
    pub hydration: String,
}

/// Diet-specific suggestions; each diet fills the fields that apply to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietGuidance {
    /// Protein sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proteins: Vec<String>,
    /// Carbohydrate sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carbs: Vec<String>,
    /// Staple foods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foods: Vec<String>,
    /// Example meals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meals: Vec<String>,
    /// Free-form advice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl DietGuidance {
    fn is_empty(&self) -> bool {
        self.proteins.is_empty()
            && self.carbs.is_empty()
            && self.foods.is_empty()
            && self.meals.is_empty()
            && self.advice.is_none()
    }
}

/// Suggested meal per slot for one BMI category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTiming {
    /// Breakfast suggestion
    pub breakfast: String,
    /// Lunch suggestion
    pub lunch: String,
    /// Dinner suggestion
    pub dinner: String,
    /// Snack suggestion
    pub snacks: String,
}

/// The guidance tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceTable {
    /// Focus per BMI category
    pub bmi: HashMap<BmiCategory, BmiGuidance>,
    /// Workout guidance per activity level
    pub activity: HashMap<ActivityLevel, ActivityGuidance>,
    /// Guidance per diet label, matched case-insensitively
    pub diets: BTreeMap<String, DietGuidance>,
    /// Used when the preference has no entry in `diets`
    pub unlisted_diet: DietGuidance,
    /// Meal slot suggestions per BMI category
    pub meal_timing: HashMap<BmiCategory, MealTiming>,
    /// Regional sample day plans, each keyed by BMI category
    pub sample_plans: BTreeMap<String, HashMap<BmiCategory, Vec<String>>>,
    /// Tips shown to everyone
    pub additional_tips: Vec<String>,
}

impl GuidanceTable {
    /// Parse a table from JSON and check it is complete
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed JSON and a lookup error
    /// when a BMI category or activity level is missing from a sub-table
    pub fn from_json(json: &str) -> AppResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check every closed-enum key resolves in every sub-table
    ///
    /// # Errors
    ///
    /// Returns a lookup error naming the first missing key, or a configuration
    /// error when a section that is always shown is empty
    pub fn validate(&self) -> AppResult<()> {
        for category in BmiCategory::ALL {
            if !self.bmi.contains_key(&category) {
                return Err(AppError::lookup("bmi", category));
            }
            if !self.meal_timing.contains_key(&category) {
                return Err(AppError::lookup("meal_timing", category));
            }
            for (region, plans) in &self.sample_plans {
                if !plans.contains_key(&category) {
                    return Err(AppError::lookup(&format!("sample_plans.{region}"), category));
                }
            }
        }
        for level in ActivityLevel::ALL {
            if !self.activity.contains_key(&level) {
                return Err(AppError::lookup("activity", level));
            }
        }
        if self.sample_plans.is_empty() {
            return Err(AppError::config("guidance table has no sample meal plans"));
        }
        if self.unlisted_diet.is_empty() {
            return Err(AppError::config("guidance table has no fallback diet advice"));
        }
        if self.additional_tips.is_empty() {
            return Err(AppError::config("guidance table has no additional tips"));
        }
        Ok(())
    }

    /// Guidance for a diet preference, falling back to the generic entry
    #[must_use]
    pub fn diet_guidance(&self, preference: &DietPreference) -> &DietGuidance {
        if *preference == DietPreference::NoPreference {
            return &self.unlisted_diet;
        }
        self.diets
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(preference.label()))
            .map_or(&self.unlisted_diet, |(_, guidance)| guidance)
    }

    /// Built-in tables
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            bmi: builtin_bmi(),
            activity: builtin_activity(),
            diets: builtin_diets(),
            unlisted_diet: DietGuidance {
                advice: Some(
                    "Focus on whole, unprocessed foods appropriate for your dietary needs".into(),
                ),
                ..DietGuidance::default()
            },
            meal_timing: builtin_meal_timing(),
            sample_plans: builtin_sample_plans(),
            additional_tips: strings(&[
                "Eat mindfully and chew slowly",
                "Stay hydrated throughout the day",
                "Include a variety of colorful vegetables",
                "Limit processed foods and added sugars",
            ]),
        }
    }
}

impl Default for GuidanceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// BMI section of a guidance plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiAnalysis {
    /// BMI category
    pub category: BmiCategory,
    /// What the diet should emphasize
    pub focus: String,
    /// Suggested foods
    pub recommended_foods: Vec<String>,
    /// Nutrition tip
    pub tips: String,
}

/// Five-section guidance for one profile, plus general tips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidancePlan {
    /// BMI-based focus
    pub bmi_analysis: BmiAnalysis,
    /// Workout nutrition and hydration
    pub activity: ActivityGuidance,
    /// Diet-specific suggestions
    pub diet: DietGuidance,
    /// Meal slot suggestions
    pub meal_timing: MealTiming,
    /// Regional sample day plans
    pub sample_meal_plans: BTreeMap<String, Vec<String>>,
    /// General tips
    pub additional_tips: Vec<String>,
}

/// Strategy A: static table lookup
#[derive(Debug, Clone, Default)]
pub struct GuidanceTableRecommender {
    table: GuidanceTable,
}

impl GuidanceTableRecommender {
    /// Wrap a table after checking it is complete
    ///
    /// # Errors
    ///
    /// Returns the table's validation error
    pub fn new(table: GuidanceTable) -> AppResult<Self> {
        table.validate()?;
        Ok(Self { table })
    }

    /// The tables in use
    #[must_use]
    pub const fn table(&self) -> &GuidanceTable {
        &self.table
    }
}

impl FoodRecommender for GuidanceTableRecommender {
    fn name(&self) -> &'static str {
        "guidance_table"
    }

    fn recommend(&self, profile: &DietProfile) -> AppResult<RecommendationResult> {
        let category = profile.bmi_category;
        let table = &self.table;

        let bmi = table
            .bmi
            .get(&category)
            .ok_or_else(|| AppError::lookup("bmi", category))?;
        let activity = table
            .activity
            .get(&profile.activity_level)
            .ok_or_else(|| AppError::lookup("activity", profile.activity_level))?;
        let meal_timing = table
            .meal_timing
            .get(&category)
            .ok_or_else(|| AppError::lookup("meal_timing", category))?;

        let mut sample_meal_plans = BTreeMap::new();
        for (region, plans) in &table.sample_plans {
            let plan = plans
                .get(&category)
                .ok_or_else(|| AppError::lookup(&format!("sample_plans.{region}"), category))?;
            sample_meal_plans.insert(region.clone(), plan.clone());
        }

        debug!(
            bmi_category = %category,
            activity_level = %profile.activity_level,
            diet = %profile.diet_preference,
            "Built guidance plan"
        );

        let plan = GuidancePlan {
            bmi_analysis: BmiAnalysis {
                category,
                focus: bmi.focus.clone(),
                recommended_foods: bmi.foods.clone(),
                tips: bmi.tips.clone(),
            },
            activity: activity.clone(),
            diet: table.diet_guidance(&profile.diet_preference).clone(),
            meal_timing: meal_timing.clone(),
            sample_meal_plans,
            additional_tips: table.additional_tips.clone(),
        };

        Ok(RecommendationResult {
            summary: ProfileSummary::from(profile),
            recommendations: Recommendations::Guidance(Box::new(plan)),
        })
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&item| item.to_owned()).collect()
}

fn builtin_bmi() -> HashMap<BmiCategory, BmiGuidance> {
    let entry = |focus: &str, foods: &[&str], tips: &str| BmiGuidance {
        focus: focus.to_owned(),
        foods: strings(foods),
        tips: tips.to_owned(),
    };
    HashMap::from([
        (
            BmiCategory::Underweight,
            entry(
                "Calorie-dense, nutrient-rich foods",
                &["nuts and seeds", "avocados", "whole milk dairy", "whole grains", "healthy oils"],
                "Eat frequent, smaller meals throughout the day",
            ),
        ),
        (
            BmiCategory::NormalWeight,
            entry(
                "Balanced nutrition for maintenance",
                &["lean proteins", "whole grains", "fruits and vegetables", "healthy fats"],
                "Maintain variety in your diet",
            ),
        ),
        (
            BmiCategory::Overweight,
            entry(
                "High-fiber, low-calorie density foods",
                &["leafy greens", "lean proteins", "legumes", "whole fruits", "whole grains"],
                "Focus on portion control and mindful eating",
            ),
        ),
        (
            BmiCategory::Obese,
            entry(
                "Nutrient-dense, low-calorie foods",
                &[
                    "non-starchy vegetables",
                    "lean proteins",
                    "low-sugar fruits",
                    "whole grains in moderation",
                ],
                "Consult a nutritionist for personalized guidance",
            ),
        ),
    ])
}

fn builtin_activity() -> HashMap<ActivityLevel, ActivityGuidance> {
    let entry = |pre: &str, post: &str, general: &str, hydration: &str| ActivityGuidance {
        pre_workout: pre.to_owned(),
        post_workout: post.to_owned(),
        general: general.to_owned(),
        hydration: hydration.to_owned(),
    };
    HashMap::from([
        (
            ActivityLevel::NoActivity,
            entry(
                "Not applicable",
                "Not applicable",
                "Focus on lighter meals that are easy to digest",
                "2-2.5 liters of water daily",
            ),
        ),
        (
            ActivityLevel::LightWalking,
            entry(
                "Light snack with complex carbs (e.g., banana, whole grain toast)",
                "Protein + carb combo (e.g., yogurt with berries)",
                "Moderate protein intake with balanced carbs",
                "2.5-3 liters of water daily",
            ),
        ),
        (
            ActivityLevel::RegularExercise,
            entry(
                "Carbohydrates for energy (e.g., oatmeal, fruit)",
                "Protein-rich recovery meal (e.g., chicken with quinoa)",
                "Higher protein intake for muscle recovery",
                "3+ liters with electrolytes during workouts",
            ),
        ),
    ])
}

fn builtin_diets() -> BTreeMap<String, DietGuidance> {
    let proteins_and_meals = |proteins: &[&str], meals: &[&str]| DietGuidance {
        proteins: strings(proteins),
        meals: strings(meals),
        ..DietGuidance::default()
    };
    let foods_and_meals = |foods: &[&str], meals: &[&str]| DietGuidance {
        foods: strings(foods),
        meals: strings(meals),
        ..DietGuidance::default()
    };

    BTreeMap::from([
        (
            "Vegetarian".to_owned(),
            proteins_and_meals(
                &["paneer", "lentils", "chickpeas", "dairy", "soy products"],
                &[
                    "dal with rice",
                    "vegetable stir-fry with tofu",
                    "cheese sandwich with whole grain bread",
                ],
            ),
        ),
        (
            "Vegan".to_owned(),
            proteins_and_meals(
                &["tofu", "tempeh", "legumes", "quinoa", "nuts and seeds"],
                &["chickpea curry", "lentil soup", "vegetable stir-fry with quinoa"],
            ),
        ),
        (
            "Non-Vegetarian".to_owned(),
            proteins_and_meals(
                &["chicken", "fish", "eggs", "lean meat", "dairy"],
                &[
                    "grilled chicken with vegetables",
                    "fish with brown rice",
                    "omelette with whole grain toast",
                ],
            ),
        ),
        (
            "Eggitarian".to_owned(),
            proteins_and_meals(
                &["eggs", "dairy", "plant proteins"],
                &["vegetable omelette", "scrambled eggs with toast", "egg curry with rice"],
            ),
        ),
        (
            "Gluten-Free".to_owned(),
            DietGuidance {
                carbs: strings(&["rice", "quinoa", "potatoes", "gluten-free oats"]),
                ..proteins_and_meals(
                    &["meat", "fish", "eggs", "legumes", "dairy"],
                    &["grilled fish with rice", "stir-fried vegetables with quinoa"],
                )
            },
        ),
        (
            "Keto".to_owned(),
            foods_and_meals(
                &["avocados", "cheese", "nuts", "meat", "leafy greens", "olive oil"],
                &[
                    "cheese omelette with avocado",
                    "grilled chicken with broccoli",
                    "salmon with asparagus",
                ],
            ),
        ),
        (
            "Paleo".to_owned(),
            foods_and_meals(
                &["lean meats", "fish", "fruits", "vegetables", "nuts and seeds"],
                &["grilled steak with sweet potato", "salmon with roasted vegetables"],
            ),
        ),
        (
            "Mediterranean".to_owned(),
            foods_and_meals(
                &["olive oil", "fish", "whole grains", "nuts", "legumes", "vegetables"],
                &["grilled fish with quinoa salad", "hummus with whole grain pita"],
            ),
        ),
        (
            "Other".to_owned(),
            DietGuidance {
                advice: Some("Focus on whole, unprocessed foods and balanced macronutrients".into()),
                ..DietGuidance::default()
            },
        ),
    ])
}

fn builtin_meal_timing() -> HashMap<BmiCategory, MealTiming> {
    let entry = |breakfast: &str, lunch: &str, dinner: &str, snacks: &str| MealTiming {
        breakfast: breakfast.to_owned(),
        lunch: lunch.to_owned(),
        dinner: dinner.to_owned(),
        snacks: snacks.to_owned(),
    };
    HashMap::from([
        (
            BmiCategory::Underweight,
            entry(
                "Dense smoothie (milk, banana, peanut butter, oats)",
                "Rice with dal and ghee + protein portion",
                "Protein + carb combo (e.g., chicken with rice)",
                "Nuts, cheese, dried fruits",
            ),
        ),
        (
            BmiCategory::NormalWeight,
            entry(
                "Whole grain toast with eggs and avocado",
                "Balanced plate with protein, carbs, and vegetables",
                "Lighter protein with vegetables",
                "Fruits, yogurt, handful of nuts",
            ),
        ),
        (
            BmiCategory::Overweight,
            entry(
                "Greek yogurt with berries and nuts",
                "Salad with lean protein and healthy fats",
                "Lean protein with non-starchy vegetables",
                "Vegetables with hummus, small portion of nuts",
            ),
        ),
        (
            BmiCategory::Obese,
            entry(
                "Vegetable omelette with small portion of whole grains",
                "Vegetable soup with lean protein",
                "Small portion of protein with vegetables",
                "Raw vegetables, small portion of protein-rich snacks",
            ),
        ),
    ])
}

fn builtin_sample_plans() -> BTreeMap<String, HashMap<BmiCategory, Vec<String>>> {
    let indian = HashMap::from([
        (
            BmiCategory::Underweight,
            strings(&["Poha with nuts", "Dal rice with ghee", "Chapati with paneer curry"]),
        ),
        (
            BmiCategory::NormalWeight,
            strings(&["Idli with sambar", "Rotli with dal and sabzi", "Grilled fish with quinoa"]),
        ),
        (
            BmiCategory::Overweight,
            strings(&[
                "Vegetable upma",
                "Dal with rotli and salad",
                "Grilled chicken with vegetables",
            ]),
        ),
        (
            BmiCategory::Obese,
            strings(&[
                "Vegetable soup",
                "Dal with small portion of rotli",
                "Stir-fried vegetables with tofu",
            ]),
        ),
    ]);
    let western = HashMap::from([
        (
            BmiCategory::Underweight,
            strings(&[
                "Oatmeal with nuts and honey",
                "Pasta with meat sauce",
                "Grilled chicken with mashed potatoes",
            ]),
        ),
        (
            BmiCategory::NormalWeight,
            strings(&[
                "Greek yogurt with granola",
                "Quinoa salad with chicken",
                "Salmon with roasted vegetables",
            ]),
        ),
        (
            BmiCategory::Overweight,
            strings(&[
                "Scrambled eggs with spinach",
                "Grilled chicken salad",
                "Vegetable stir-fry with tofu",
            ]),
        ),
        (
            BmiCategory::Obese,
            strings(&[
                "Vegetable omelette",
                "Lentil soup",
                "Grilled fish with steamed vegetables",
            ]),
        ),
    ]);
    BTreeMap::from([("Indian".to_owned(), indian), ("Western".to_owned(), western)])
}
