//! Helper functions for tree building.
//!
//! Trees are grown over index lists into the shared training matrix rather
//! than over copied sub-matrices.

use super::{Leaf, Node, TreeNode};
use crate::primitives::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

/// Settings shared by every node of one tree while it is grown.
pub(super) struct BuildContext<'a> {
    pub max_depth: Option<usize>,
    pub n_classes: usize,
    /// Number of candidate features drawn per split
    pub n_candidate_features: usize,
    pub rng: &'a mut StdRng,
}

/// Best split found for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Split {
    pub feature_idx: usize,
    pub threshold: f32,
    pub gain: f32,
}

// ============================================================================
// Impurity
// ============================================================================

/// Count labels per class.
pub(super) fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &idx in indices {
        counts[y[idx]] += 1;
    }
    counts
}

/// Gini impurity from class counts.
///
/// Formula: Gini = 1 - Σ(p_i²) where p_i is the proportion of class i
pub(super) fn gini_from_counts(counts: &[usize]) -> f32 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f32;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f32 / n;
            p * p
        })
        .sum::<f32>()
}

/// Weighted Gini impurity of a two-way split.
pub(super) fn gini_split(left: &[usize], right: &[usize]) -> f32 {
    let n_left: usize = left.iter().sum();
    let n_right: usize = right.iter().sum();
    let n_total = (n_left + n_right) as f32;
    if n_total == 0.0 {
        return 0.0;
    }
    (n_left as f32 / n_total) * gini_from_counts(left)
        + (n_right as f32 / n_total) * gini_from_counts(right)
}

/// Most frequent class; ties go to the lowest class index.
pub(super) fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

// ============================================================================
// Split search
// ============================================================================

/// Sorted unique values of one feature over `indices`.
///
/// Values closer than 1e-10 are merged.
pub(super) fn sorted_unique_values(x: &Matrix<f32>, feature_idx: usize, indices: &[usize]) -> Vec<f32> {
    let mut values: Vec<f32> = indices.iter().map(|&i| x.get(i, feature_idx)).collect();
    values.sort_by(f32::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() <= 1e-10);
    values
}

/// Find the best threshold for one feature.
///
/// Tries every midpoint between consecutive unique values and returns the
/// threshold with the highest strictly positive gain.
pub(super) fn find_best_split_for_feature(
    x: &Matrix<f32>,
    y: &[usize],
    indices: &[usize],
    feature_idx: usize,
    n_classes: usize,
    parent_impurity: f32,
) -> Option<Split> {
    let unique_values = sorted_unique_values(x, feature_idx, indices);
    if unique_values.len() < 2 {
        return None;
    }

    let mut best: Option<Split> = None;
    for pair in unique_values.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;
        let mut left = vec![0usize; n_classes];
        let mut right = vec![0usize; n_classes];
        for &idx in indices {
            if x.get(idx, feature_idx) <= threshold {
                left[y[idx]] += 1;
            } else {
                right[y[idx]] += 1;
            }
        }
        let gain = parent_impurity - gini_split(&left, &right);
        if gain > best.map_or(0.0, |s| s.gain) {
            best = Some(Split {
                feature_idx,
                threshold,
                gain,
            });
        }
    }
    best
}

/// Find the best split among `features`, in the given order.
///
/// Earlier features win ties.
pub(super) fn find_best_split(
    x: &Matrix<f32>,
    y: &[usize],
    indices: &[usize],
    features: &[usize],
    n_classes: usize,
    parent_impurity: f32,
) -> Option<Split> {
    let mut best: Option<Split> = None;
    for &feature_idx in features {
        if let Some(split) =
            find_best_split_for_feature(x, y, indices, feature_idx, n_classes, parent_impurity)
        {
            if split.gain > best.map_or(0.0, |s| s.gain) {
                best = Some(split);
            }
        }
    }
    best
}

/// Draw `k` distinct feature indices, returned sorted.
pub(super) fn sample_features(n_features: usize, k: usize, rng: &mut StdRng) -> Vec<usize> {
    if k >= n_features {
        return (0..n_features).collect();
    }
    let mut picked = rand::seq::index::sample(rng, n_features, k).into_vec();
    picked.sort_unstable();
    picked
}

/// Partition `indices` by `x[i, feature] <= threshold`.
pub(super) fn split_indices_by_threshold(
    x: &Matrix<f32>,
    indices: &[usize],
    feature_idx: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    indices
        .iter()
        .copied()
        .partition(|&idx| x.get(idx, feature_idx) <= threshold)
}

// ============================================================================
// Tree building
// ============================================================================

fn make_leaf(counts: Vec<usize>) -> TreeNode {
    TreeNode::Leaf(Leaf {
        class_label: majority_class(&counts),
        n_samples: counts.iter().sum(),
        class_counts: counts,
    })
}

/// Build a decision tree recursively.
///
/// A node becomes a leaf when it is pure, when `max_depth` is reached, or
/// when no split yields positive gain. Candidate features are drawn per node;
/// if none of them separates the node, every feature is tried before giving
/// up, so the tree still fits its bootstrap sample.
pub(super) fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    indices: &[usize],
    depth: usize,
    ctx: &mut BuildContext<'_>,
) -> TreeNode {
    let counts = class_counts(y, indices, ctx.n_classes);
    let impurity = gini_from_counts(&counts);

    let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    let depth_reached = ctx.max_depth.is_some_and(|max| depth >= max);
    if is_pure || depth_reached || indices.len() < 2 {
        return make_leaf(counts);
    }

    let n_features = x.n_cols();
    let candidates = sample_features(n_features, ctx.n_candidate_features, ctx.rng);
    let split = find_best_split(x, y, indices, &candidates, ctx.n_classes, impurity).or_else(|| {
        if candidates.len() < n_features {
            let all: Vec<usize> = (0..n_features).collect();
            find_best_split(x, y, indices, &all, ctx.n_classes, impurity)
        } else {
            None
        }
    });

    let Some(split) = split else {
        return make_leaf(counts);
    };

    let (left_indices, right_indices) =
        split_indices_by_threshold(x, indices, split.feature_idx, split.threshold);
    if left_indices.is_empty() || right_indices.is_empty() {
        return make_leaf(counts);
    }

    let left = build_tree(x, y, &left_indices, depth + 1, ctx);
    let right = build_tree(x, y, &right_indices, depth + 1, ctx);

    TreeNode::Node(Node {
        feature_idx: split.feature_idx,
        threshold: split.threshold,
        impurity_decrease: split.gain * indices.len() as f32,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Accumulate impurity decrease per feature over a tree.
pub(super) fn accumulate_importances(node: &TreeNode, importances: &mut [f32]) {
    if let TreeNode::Node(internal) = node {
        importances[internal.feature_idx] += internal.impurity_decrease;
        accumulate_importances(&internal.left, importances);
        accumulate_importances(&internal.right, importances);
    }
}

/// Bootstrap sample: `n_samples` indices drawn with replacement.
pub(super) fn bootstrap_sample(n_samples: usize, rng: &mut StdRng) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    (0..n_samples).map(|_| dist.sample(rng)).collect()
}
