// ABOUTME: Fixed food catalog with per-serving nutrition facts
// ABOUTME: Built once at startup and never mutated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use calorie_core::models::{DietType, FoodItem, MealType};

/// (name, calories, protein, carbs, fat, fiber, meal, diet)
type CatalogRow = (&'static str, u32, u32, u32, u32, u32, MealType, DietType);

const BUILTIN_ITEMS: [CatalogRow; 15] = [
    ("Oatmeal with berries", 300, 12, 50, 5, 8, MealType::Breakfast, DietType::Vegetarian),
    ("Grilled chicken with vegetables", 400, 35, 20, 15, 6, MealType::Lunch, DietType::NonVegetarian),
    ("Salmon with quinoa", 450, 30, 40, 20, 5, MealType::Dinner, DietType::Pescatarian),
    ("Greek yogurt with honey", 200, 20, 20, 5, 2, MealType::Snack, DietType::Vegetarian),
    ("Egg white omelet with spinach", 280, 25, 10, 15, 4, MealType::Breakfast, DietType::Vegetarian),
    ("Brown rice with tofu", 350, 15, 60, 10, 7, MealType::Lunch, DietType::Vegetarian),
    ("Avocado toast", 250, 8, 25, 15, 6, MealType::Breakfast, DietType::Vegetarian),
    ("Grilled fish with sweet potato", 380, 25, 40, 15, 5, MealType::Dinner, DietType::Pescatarian),
    ("Fruit smoothie", 320, 10, 50, 5, 4, MealType::Snack, DietType::Vegetarian),
    ("Grilled vegetables with hummus", 280, 8, 30, 12, 8, MealType::Snack, DietType::Vegan),
    ("Chicken salad", 350, 30, 15, 20, 5, MealType::Lunch, DietType::NonVegetarian),
    ("Quinoa bowl with vegetables", 400, 12, 70, 8, 9, MealType::Dinner, DietType::Vegan),
    ("Cottage cheese with fruits", 220, 25, 10, 5, 2, MealType::Snack, DietType::Vegetarian),
    ("Whole wheat pasta with tomato sauce", 420, 15, 75, 10, 6, MealType::Lunch, DietType::Vegetarian),
    ("Grilled shrimp salad", 300, 28, 15, 18, 4, MealType::Dinner, DietType::Pescatarian),
];

/// An immutable list of food items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodCatalog {
    items: Vec<FoodItem>,
}

impl FoodCatalog {
    /// Catalog over the given items
    #[must_use]
    pub const fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    /// The fifteen-item built-in catalog
    #[must_use]
    pub fn builtin() -> Self {
        let items = BUILTIN_ITEMS
            .iter()
            .map(
                |&(name, calories, protein_g, carbs_g, fat_g, fiber_g, meal_type, diet_type)| {
                    FoodItem {
                        name: name.to_owned(),
                        calories,
                        protein_g,
                        carbs_g,
                        fat_g,
                        fiber_g,
                        meal_type,
                        diet_type,
                    }
                },
            )
            .collect();
        Self { items }
    }

    /// All items in catalog order
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position and item with this name (case-insensitive)
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(usize, &FoodItem)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| item.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.len(), 15);
        let vegetarian = catalog
            .items()
            .iter()
            .filter(|item| item.diet_type == DietType::Vegetarian)
            .count();
        assert_eq!(vegetarian, 8);
    }

    #[test]
    fn test_find_ignores_case() {
        let catalog = FoodCatalog::builtin();
        let (index, item) = catalog.find("avocado TOAST").unwrap();
        assert_eq!(index, 6);
        assert_eq!(item.calories, 250);
        assert!(catalog.find("Deep fried butter").is_none());
    }
}
