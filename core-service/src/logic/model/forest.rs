//! Random Forest - bagged ensemble of CART trees
//!
//! Probability = trung bình failure_ratio của các tree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, TreeParams};
use crate::logic::features::FEATURE_COUNT;

// ============================================================================
// CONFIG
// ============================================================================

/// Default number of trees
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Default seed (reproducible training)
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// None = floor(sqrt(FEATURE_COUNT))
    pub max_features: Option<usize>,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    fn tree_params(&self) -> TreeParams {
        let sqrt_features = (FEATURE_COUNT as f64).sqrt().floor() as usize;
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self
                .max_features
                .unwrap_or(sqrt_features)
                .clamp(1, FEATURE_COUNT),
        }
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on already-scaled features. Caller guarantees non-empty input.
    pub fn fit(x: &[[f64; FEATURE_COUNT]], labels: &[u8], params: &ForestParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let tree_params = params.tree_params();
        let n = x.len();

        let trees = (0..params.n_estimators)
            .map(|_| {
                let indices: Vec<usize> = if params.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(x, labels, indices, &tree_params, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Mean failure probability across trees, always in [0, 1]
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }

        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(features)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty() && self.trees.iter().all(DecisionTree::is_well_formed)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Vec<[f64; FEATURE_COUNT]>, Vec<u8>) {
        let mut x = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
            let v = i as f64 / 40.0;
            x.push([v, v * 2.0, 1.0 - v]);
            labels.push(if i >= 20 { 1 } else { 0 });
        }
        (x, labels)
    }

    #[test]
    fn test_default_max_features_is_sqrt() {
        assert_eq!(ForestParams::default().tree_params().max_features, 1);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, labels) = toy_data();
        let params = ForestParams { n_estimators: 10, ..Default::default() };

        let a = RandomForest::fit(&x, &labels, &params);
        let b = RandomForest::fit(&x, &labels, &params);

        assert_eq!(a, b);
        assert_eq!(a.n_estimators(), 10);
        assert!(a.is_well_formed());
    }

    #[test]
    fn test_probabilities_bounded() {
        let (x, labels) = toy_data();
        let params = ForestParams { n_estimators: 15, ..Default::default() };
        let forest = RandomForest::fit(&x, &labels, &params);

        assert!(forest.predict_proba(&[0.0, 0.0, 1.0]) < 0.5);
        assert!(forest.predict_proba(&[1.0, 2.0, 0.0]) > 0.5);

        for extreme in [[1e9, -1e9, 1e9], [-1e300, 1e300, 0.0]] {
            let p = forest.predict_proba(&extreme);
            assert!(p.is_finite() && (0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_empty_forest_is_neutral() {
        let forest = RandomForest { trees: Vec::new() };
        assert_eq!(forest.predict_proba(&[0.0; FEATURE_COUNT]), 0.5);
        assert!(!forest.is_well_formed());
    }
}
