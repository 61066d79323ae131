// ABOUTME: Bagged regression forest: bootstrap sampling, parallel tree fitting, mean aggregation
// ABOUTME: Each tree draws from its own seeded stream so results do not depend on thread scheduling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Regression Forest
//!
//! A random forest regressor in the classic shape: every tree is grown on a
//! bootstrap sample of the training rows, each split considers a random
//! subset of `max_features` columns, and the forest prediction is the mean of
//! the tree predictions.
//!
//! Trees are fitted in parallel with rayon. Tree `t` seeds its own
//! `ChaCha8Rng` from `base_seed + t`, so a fixed base seed reproduces the same
//! forest regardless of how the work is scheduled.

#![allow(clippy::cast_precision_loss)] // Safe: tree and row counts are far below 2^52

mod tree;

pub use tree::RegressionTree;

use crate::config::ForestConfig;
use calorie_core::errors::{AppError, AppResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;
use tree::TreeParams;

/// Dense row-major matrix of feature values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from equal-length rows
    ///
    /// # Errors
    ///
    /// Returns a data error if the rows are ragged or contain non-finite values
    pub fn from_rows(rows: &[Vec<f64>]) -> AppResult<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(AppError::data(format!(
                    "row {index} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            if let Some(col) = row.iter().position(|v| !v.is_finite()) {
                return Err(AppError::data(format!(
                    "row {index} column {col} is not a finite number"
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            data,
        })
    }

    /// Number of rows
    #[must_use]
    pub const fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    #[must_use]
    pub const fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Value at `(row, col)`; callers index within bounds
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    /// One row as a slice
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }
}

/// Fits [`Forest`]s with a fixed set of hyperparameters
#[derive(Debug, Clone, Default)]
pub struct RandomForestRegressor {
    config: ForestConfig,
}

impl RandomForestRegressor {
    /// Create a regressor with the given hyperparameters
    #[must_use]
    pub const fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Fit a forest on `x` with labels `y`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid hyperparameters and a data
    /// error when the matrix is empty or does not match the label count
    pub fn fit(&self, x: &FeatureMatrix, y: &[f64]) -> AppResult<Forest> {
        self.config.validate()?;
        if x.n_rows() == 0 || x.n_cols() == 0 {
            return Err(AppError::data("cannot fit a forest on an empty feature matrix"));
        }
        if x.n_rows() != y.len() {
            return Err(AppError::data(format!(
                "feature matrix has {} rows but {} labels were given",
                x.n_rows(),
                y.len()
            )));
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let params = TreeParams {
            max_depth: self.config.max_depth,
            max_features: self.config.max_features,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
        };
        let bootstrap = self.config.bootstrap;
        let n_rows = x.n_rows();

        let fitted: Vec<(RegressionTree, Vec<f64>)> = (0..self.config.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(t as u64));
                let sample: Vec<usize> = if bootstrap {
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                RegressionTree::fit(x, y, sample, params, &mut rng)
            })
            .collect();

        let mut importances = vec![0.0; x.n_cols()];
        let mut trees = Vec::with_capacity(fitted.len());
        for (tree, tree_importances) in fitted {
            for (total, gain) in importances.iter_mut().zip(tree_importances) {
                *total += gain;
            }
            trees.push(tree);
        }
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            for value in &mut importances {
                *value /= sum;
            }
        }

        debug!(
            trees = trees.len(),
            rows = n_rows,
            features = x.n_cols(),
            "Fitted regression forest"
        );

        Ok(Forest {
            trees,
            importances,
            n_features: x.n_cols(),
        })
    }
}

/// A fitted forest
///
/// The default value has no trees and represents "not fitted".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<RegressionTree>,
    importances: Vec<f64>,
    n_features: usize,
}

impl Forest {
    /// Whether the forest holds at least one tree
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Number of trees
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of features the forest was fitted on
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Normalized impurity-decrease importance per feature, summing to 1
    #[must_use]
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    /// Mean of the tree predictions for one aligned row; `None` when unfitted
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> Option<f64> {
        if self.trees.is_empty() {
            return None;
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        Some(total / self.trees.len() as f64)
    }

    /// Predict every row of a matrix
    #[must_use]
    pub fn predict(&self, x: &FeatureMatrix) -> Vec<f64> {
        (0..x.n_rows())
            .filter_map(|r| self.predict_row(x.row(r)))
            .collect()
    }
}
