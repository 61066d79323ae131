// ABOUTME: Catalog ranking strategy: diet filter, seeded sample, then profile-driven stable sorts
// ABOUTME: Never returns an empty list for a non-empty catalog; internal faults fall back to a fixed sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::catalog::FoodCatalog;
use super::{
    DietProfile, FoodRecommender, ProfileSummary, RecommendationResult, Recommendations,
    RecommendedFood,
};
use crate::config::RecommendationConfig;
use crate::similarity::TfIdfIndex;
use calorie_core::errors::{AppError, AppResult};
use calorie_core::models::{BmiCategory, DietPreference, FoodItem};
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;
use tracing::{debug, warn};

/// Strategy B: rank a fixed catalog for a profile
#[derive(Debug, Clone)]
pub struct CatalogRecommender {
    catalog: FoodCatalog,
    index: TfIdfIndex,
    config: RecommendationConfig,
}

impl Default for CatalogRecommender {
    fn default() -> Self {
        Self::new(FoodCatalog::builtin(), RecommendationConfig::default())
    }
}

impl CatalogRecommender {
    /// Index `catalog` for ranking and similarity queries
    #[must_use]
    pub fn new(catalog: FoodCatalog, config: RecommendationConfig) -> Self {
        let descriptors: Vec<String> = catalog.items().iter().map(FoodItem::descriptor).collect();
        Self {
            index: TfIdfIndex::fit(&descriptors),
            catalog,
            config,
        }
    }

    /// The catalog being ranked
    #[must_use]
    pub const fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Filter, sample, order, and truncate the catalog for `profile`
    ///
    /// # Errors
    ///
    /// Returns an internal error when the catalog is empty
    pub fn rank(&self, profile: &DietProfile) -> AppResult<Vec<RecommendedFood>> {
        if self.catalog.is_empty() {
            return Err(AppError::internal("food catalog is empty"));
        }
        let limit = profile.limit.unwrap_or(self.config.default_count);
        let items = self.catalog.items();

        let mut candidates: Vec<&FoodItem> = match &profile.diet_preference {
            DietPreference::NoPreference => items.iter().collect(),
            preference => items
                .iter()
                .filter(|item| preference.matches(item.diet_type))
                .collect(),
        };
        if candidates.is_empty() {
            debug!(
                diet = %profile.diet_preference,
                "No catalog items match diet preference, using the full catalog"
            );
            candidates = items.iter().collect();
        }

        if candidates.len() > limit {
            candidates = sample(&candidates, limit, self.config.seed);
        }

        // Protein first, calories second: calories stay the primary order and protein breaks ties
        if profile.activity_level.is_high_activity() {
            candidates.sort_by_key(|item| Reverse(item.protein_g));
        }
        match profile.bmi_category {
            BmiCategory::Underweight => candidates.sort_by_key(|item| Reverse(item.calories)),
            BmiCategory::Overweight | BmiCategory::Obese => {
                candidates.sort_by_key(|item| item.calories);
            }
            BmiCategory::NormalWeight => {}
        }

        candidates.truncate(limit);
        Ok(candidates.into_iter().map(RecommendedFood::from).collect())
    }

    /// Fixed-seed sample used when ranking fails
    ///
    /// Draws from the built-in catalog when this recommender's catalog is empty.
    #[must_use]
    pub fn fallback(&self, profile: &DietProfile) -> RecommendationResult {
        let builtin;
        let catalog = if self.catalog.is_empty() {
            builtin = FoodCatalog::builtin();
            &builtin
        } else {
            &self.catalog
        };
        let all: Vec<&FoodItem> = catalog.items().iter().collect();
        let picked = sample(&all, self.config.fallback_count, self.config.seed);

        RecommendationResult {
            summary: ProfileSummary::from(profile),
            recommendations: Recommendations::Ranked(
                picked.into_iter().map(RecommendedFood::from).collect(),
            ),
        }
    }

    /// Up to `n` catalog items whose descriptions are most similar to `name`
    ///
    /// # Errors
    ///
    /// Returns a lookup error when `name` is not in the catalog
    pub fn similar_foods(&self, name: &str, n: usize) -> AppResult<Vec<RecommendedFood>> {
        let (position, _) = self
            .catalog
            .find(name)
            .ok_or_else(|| AppError::lookup("food catalog", name))?;
        Ok(self
            .index
            .most_similar(position, n)
            .into_iter()
            .filter_map(|(other, _)| self.catalog.items().get(other))
            .map(RecommendedFood::from)
            .collect())
    }
}

/// Reproducible sample of `amount` items (all of them, reordered, when fewer exist)
fn sample<'a>(items: &[&'a FoodItem], amount: usize, seed: u64) -> Vec<&'a FoodItem> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    index::sample(&mut rng, items.len(), amount.min(items.len()))
        .into_iter()
        .map(|i| items[i])
        .collect()
}

impl FoodRecommender for CatalogRecommender {
    fn name(&self) -> &'static str {
        "catalog_ranking"
    }

    fn recommend(&self, profile: &DietProfile) -> AppResult<RecommendationResult> {
        match self.rank(profile) {
            Ok(ranked) => Ok(RecommendationResult {
                summary: ProfileSummary::from(profile),
                recommendations: Recommendations::Ranked(ranked),
            }),
            Err(error) => {
                warn!(error = %error, "Catalog ranking failed, returning fallback recommendations");
                Ok(self.fallback(profile))
            }
        }
    }
}
