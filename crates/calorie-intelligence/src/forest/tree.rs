// ABOUTME: CART regression tree with variance-reduction splits and random feature subsets
// ABOUTME: Used as the base learner of the bagged regression forest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: row counts are far below 2^52

use super::FeatureMatrix;
use rand::seq::index;
use rand::Rng;

/// Gains below this are treated as no improvement
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits shared by every tree of a forest
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub max_features: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// A fitted regression tree
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow a tree over the rows listed in `sample` (duplicates allowed)
    ///
    /// Returns the tree and the total squared-error reduction credited to each feature.
    pub(crate) fn fit<R: Rng>(
        x: &FeatureMatrix,
        y: &[f64],
        sample: Vec<usize>,
        params: TreeParams,
        rng: &mut R,
    ) -> (Self, Vec<f64>) {
        let mut builder = TreeBuilder {
            x,
            y,
            params,
            rng,
            nodes: Vec::new(),
            importances: vec![0.0; x.n_cols()],
            pairs: Vec::with_capacity(sample.len()),
        };
        builder.grow(&sample, 0);
        let TreeBuilder {
            nodes, importances, ..
        } = builder;
        (Self { nodes }, importances)
    }

    /// Predict the label of one aligned feature row
    #[must_use]
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut current = 0;
        loop {
            match self.nodes.get(current) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    current = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    /// Number of nodes, leaves included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf path, counted in splits
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, node: usize) -> usize {
        match self.nodes.get(node) {
            Some(Node::Split { left, right, .. }) => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
            _ => 0,
        }
    }
}

struct TreeBuilder<'a, R: Rng> {
    x: &'a FeatureMatrix,
    y: &'a [f64],
    params: TreeParams,
    rng: &'a mut R,
    nodes: Vec<Node>,
    importances: Vec<f64>,
    // reused (value, label) buffer for split scans
    pairs: Vec<(f64, f64)>,
}

impl<R: Rng> TreeBuilder<'_, R> {
    fn grow(&mut self, rows: &[usize], depth: usize) -> usize {
        let node_index = self.nodes.len();
        let mean = rows.iter().map(|&r| self.y[r]).sum::<f64>() / rows.len().max(1) as f64;
        self.nodes.push(Node::Leaf { value: mean });

        let splittable = depth < self.params.max_depth
            && rows.len() >= self.params.min_samples_split
            && rows.len() >= 2 * self.params.min_samples_leaf;
        if !splittable {
            return node_index;
        }

        let Some(split) = self.best_split(rows) else {
            return node_index;
        };

        // stable partition: rows at or below the threshold go left
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&r| self.x.get(r, split.feature) <= split.threshold);
        if left_rows.is_empty() || right_rows.is_empty() {
            return node_index;
        }

        self.importances[split.feature] += split.gain;
        let left = self.grow(&left_rows, depth + 1);
        let right = self.grow(&right_rows, depth + 1);
        self.nodes[node_index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_index
    }

    fn best_split(&mut self, rows: &[usize]) -> Option<SplitCandidate> {
        let n_cols = self.x.n_cols();
        let n = rows.len();
        let total: f64 = rows.iter().map(|&r| self.y[r]).sum();
        let parent_score = total * total / n as f64;
        let min_leaf = self.params.min_samples_leaf;

        let candidates = index::sample(&mut *self.rng, n_cols, self.params.max_features.min(n_cols));
        let mut best: Option<SplitCandidate> = None;

        for feature in candidates.iter() {
            self.pairs.clear();
            self.pairs
                .extend(rows.iter().map(|&r| (self.x.get(r, feature), self.y[r])));
            self.pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            for k in 0..n - 1 {
                let (value, label) = self.pairs[k];
                let next_value = self.pairs[k + 1].0;
                left_sum += label;

                if value >= next_value {
                    continue;
                }
                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let right_sum = total - left_sum;
                let score = left_sum * left_sum / n_left as f64
                    + right_sum * right_sum / n_right as f64;
                let gain = score - parent_score;
                if gain <= MIN_GAIN || best.is_some_and(|b| gain <= b.gain) {
                    continue;
                }

                let mut threshold = value + (next_value - value) / 2.0;
                if threshold >= next_value {
                    threshold = value;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    gain,
                });
            }
        }

        best
    }
}
