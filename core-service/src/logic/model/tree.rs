//! Decision Tree - CART with Gini impurity
//!
//! Cây nhị phân lưu dạng arena (Vec<Node>), root = index 0.
//! Leaf lưu tỷ lệ class failure → tree trả về probability, không chỉ label.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Fraction of failure samples that reached this leaf
        failure_ratio: f64,
        samples: usize,
    },
    Split {
        feature: usize,
        /// Go left when value <= threshold
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// None = grow until pure
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features drawn per split
    pub max_features: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: FEATURE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

// ============================================================================
// TRAINING
// ============================================================================

impl DecisionTree {
    /// Fit on the rows of `x` selected by `indices` (duplicates allowed, for bagging).
    ///
    /// `labels` are 0 (normal) / 1 (failure).
    pub fn fit(
        x: &[[f64; FEATURE_COUNT]],
        labels: &[u8],
        indices: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, labels, indices, 0, params, rng);
        tree
    }

    fn grow(
        &mut self,
        x: &[[f64; FEATURE_COUNT]],
        labels: &[u8],
        indices: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let n = indices.len();
        let positives = indices.iter().filter(|&&i| labels[i] == 1).count();
        let failure_ratio = if n > 0 { positives as f64 / n as f64 } else { 0.5 };

        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf { failure_ratio, samples: n });

        let is_pure = positives == 0 || positives == n;
        let depth_reached = params.max_depth.map_or(false, |d| depth >= d);
        if is_pure || depth_reached || n < params.min_samples_split.max(2) {
            return node_id;
        }

        let Some(split) = best_split(x, labels, &indices, params.max_features, rng) else {
            return node_id;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| x[i][split.feature] <= split.threshold);

        let left = self.grow(x, labels, left_idx, depth + 1, params, rng);
        let right = self.grow(x, labels, right_idx, depth + 1, params, rng);

        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        node_id
    }

    // ========================================================================
    // INFERENCE
    // ========================================================================

    /// Failure probability of the leaf this sample falls into
    pub fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf { failure_ratio, .. }) => return *failure_ratio,
                Some(Node::Split { feature, threshold, left, right }) => {
                    id = if features[*feature] <= *threshold { *left } else { *right };
                }
                // Empty or malformed tree
                None => return 0.5,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Every child index points inside the arena and after its parent
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(id, node)| match node {
                Node::Leaf { failure_ratio, .. } => (0.0..=1.0).contains(failure_ratio),
                Node::Split { feature, threshold, left, right } => {
                    *feature < FEATURE_COUNT
                        && threshold.is_finite()
                        && *left > id
                        && *right > id
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }
}

// ============================================================================
// SPLIT SEARCH
// ============================================================================

/// Gini impurity of a binary node: 2p(1-p)
fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

/// Draw features in random order; stop after `max_features` once a valid split exists
fn best_split(
    x: &[[f64; FEATURE_COUNT]],
    labels: &[u8],
    indices: &[usize],
    max_features: usize,
    rng: &mut StdRng,
) -> Option<BestSplit> {
    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);

    let mut best: Option<BestSplit> = None;

    for (visited, &feature) in features.iter().enumerate() {
        if visited >= max_features.max(1) && best.is_some() {
            break;
        }

        if let Some(candidate) = best_split_on(x, labels, indices, feature) {
            if best.map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
    }

    best
}

fn best_split_on(
    x: &[[f64; FEATURE_COUNT]],
    labels: &[u8],
    indices: &[usize],
    feature: usize,
) -> Option<BestSplit> {
    let mut column: Vec<(f64, u8)> = indices.iter().map(|&i| (x[i][feature], labels[i])).collect();
    column.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = column.len();
    let total_pos = column.iter().filter(|(_, l)| *l == 1).count();

    let mut left_n = 0;
    let mut left_pos = 0;
    let mut best: Option<BestSplit> = None;

    for j in 0..n.saturating_sub(1) {
        left_n += 1;
        if column[j].1 == 1 {
            left_pos += 1;
        }

        let (current, next) = (column[j].0, column[j + 1].0);
        if current >= next {
            continue;
        }

        let right_n = n - left_n;
        let right_pos = total_pos - left_pos;
        let impurity = (left_n as f64 * gini(left_pos, left_n)
            + right_n as f64 * gini(right_pos, right_n))
            / n as f64;

        if best.map_or(true, |b| impurity < b.impurity) {
            let mid = current + (next - current) / 2.0;
            // Midpoint can round up to `next` for adjacent floats
            let threshold = if mid < next { mid } else { current };
            best = Some(BestSplit { feature, threshold, impurity });
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
