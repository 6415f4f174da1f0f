//! Decision tree and random forest classifiers.
//!
//! This module implements:
//! - CART classification trees using Gini impurity
//! - Random Forest: bootstrap-sampled trees with per-split feature sampling,
//!   soft voting for class probabilities
//!
//! # Example
//!
//! ```
//! use symptom_dx::prelude::*;
//!
//! // Three conditions over four symptoms (multi-hot rows)
//! let x = Matrix::from_vec(3, 4, vec![
//!     1.0, 1.0, 0.0, 0.0, // class 0
//!     0.0, 1.0, 1.0, 0.0, // class 1
//!     0.0, 0.0, 1.0, 1.0, // class 2
//! ]).expect("valid dimensions");
//! let y = vec![0, 1, 2];
//!
//! let mut forest = RandomForestClassifier::new(50).with_random_state(42);
//! forest.fit(&x, &y).expect("fit should succeed");
//!
//! let proba = forest.predict_proba(&x).expect("fitted");
//! let row_sum: f32 = proba.row_slice(0).iter().sum();
//! assert!((row_sum - 1.0).abs() < 1e-4);
//! ```

mod helpers;

use crate::error::{DxError, Result};
use crate::primitives::Matrix;
use crate::traits::ProbabilisticClassifier;
use helpers::{accumulate_importances, bootstrap_sample, build_tree, BuildContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Gini gain times the number of samples reaching this node
    pub impurity_decrease: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Majority class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
    /// Training samples per class (length = number of classes)
    pub class_counts: Vec<usize>,
}

impl Leaf {
    /// Class distribution of the training samples in this leaf.
    #[must_use]
    pub fn distribution(&self) -> Vec<f32> {
        let n = self.n_samples.max(1) as f32;
        self.class_counts.iter().map(|&c| c as f32 / n).collect()
    }
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class counts
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    /// Walks down to the leaf that `sample` falls into.
    fn leaf_for(&self, sample: &[f32]) -> &Leaf {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Node(internal) => {
                    node = if sample[internal.feature_idx] <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }
}

/// How many features are drawn as split candidates at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// Every feature is considered
    All,
    /// ⌊√n_features⌋, at least 1
    #[default]
    Sqrt,
    /// ⌊log2(n_features)⌋, at least 1
    Log2,
    /// A fixed number, clamped to `1..=n_features`
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete count for `n_features` features.
    #[must_use]
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
            MaxFeatures::Count(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

fn validate_training_data(x: &Matrix<f32>, y: &[usize]) -> Result<()> {
    let (n_rows, _) = x.shape();
    if n_rows != y.len() {
        return Err(DxError::dimension_mismatch("labels", n_rows, y.len()));
    }
    if n_rows == 0 {
        return Err(DxError::invalid_catalog("cannot fit with zero samples"));
    }
    Ok(())
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity for splitting criterion and builds trees recursively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    max_features: MaxFeatures,
    random_state: Option<u64>,
    n_features: Option<usize>,
    n_classes: usize,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier that considers every feature.
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            max_features: MaxFeatures::All,
            random_state: None,
            n_features: None,
            n_classes: 0,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the per-split feature sampling strategy.
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the random state used for feature sampling.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Depth of the fitted tree, `None` before fit.
    pub fn depth(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::depth)
    }

    /// Grows the tree with an explicit class count and random source.
    ///
    /// The forest uses this so that every tree reports probabilities over the
    /// same label set even when its bootstrap sample misses some classes.
    pub(crate) fn fit_with_rng(
        &mut self,
        x: &Matrix<f32>,
        y: &[usize],
        n_classes: usize,
        rng: &mut StdRng,
    ) -> Result<()> {
        validate_training_data(x, y)?;
        if let Some(&label) = y.iter().find(|&&label| label >= n_classes) {
            return Err(DxError::dimension_mismatch("n_classes", n_classes, label + 1));
        }
        let n_features = x.n_cols();
        let indices: Vec<usize> = (0..x.n_rows()).collect();
        let mut ctx = BuildContext {
            max_depth: self.max_depth,
            n_classes,
            n_candidate_features: self.max_features.resolve(n_features),
            rng,
        };
        self.tree = Some(build_tree(x, y, &indices, 0, &mut ctx));
        self.n_features = Some(n_features);
        self.n_classes = n_classes;
        Ok(())
    }

    fn fitted_tree(&self) -> Result<&TreeNode> {
        self.tree.as_ref().ok_or(DxError::NotFitted)
    }

    fn check_features(&self, n_features: usize) -> Result<()> {
        match self.n_features {
            Some(expected) if expected != n_features => Err(DxError::dimension_mismatch(
                "features",
                expected,
                n_features,
            )),
            _ => Ok(()),
        }
    }

    /// Class distribution of the leaf that `sample` falls into.
    pub(crate) fn leaf_distribution(&self, sample: &[f32]) -> Result<Vec<f32>> {
        let tree = self.fitted_tree()?;
        self.check_features(sample.len())?;
        Ok(tree.leaf_for(sample).distribution())
    }

    /// Impurity-decrease importance per feature, normalized to sum to 1.
    ///
    /// Returns `None` before fit. A tree with no splits yields all zeros.
    pub fn feature_importances(&self) -> Option<Vec<f32>> {
        let tree = self.tree.as_ref()?;
        let mut importances = vec![0.0; self.n_features?];
        accumulate_importances(tree, &mut importances);
        let total: f32 = importances.iter().sum();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        }
        Some(importances)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbabilisticClassifier for DecisionTreeClassifier {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let n_classes = y.iter().max().map_or(0, |&max| max + 1);
        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(x, y, n_classes, &mut rng)
    }

    fn predict_proba(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        self.fitted_tree()?;
        self.check_features(x.n_cols())?;
        let mut data = Vec::with_capacity(x.n_rows() * self.n_classes);
        for row in 0..x.n_rows() {
            data.extend(self.leaf_distribution(x.row_slice(row))?);
        }
        Matrix::from_vec(x.n_rows(), self.n_classes, data)
            .map_err(|_| DxError::dimension_mismatch("n_classes", self.n_classes, x.n_rows()))
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Random Forest classifier - an ensemble of decision trees.
///
/// Each tree is grown on a bootstrap sample with random feature selection at
/// every split. Class probabilities are the mean of the leaf class
/// distributions across trees. With a fixed `random_state` the fitted forest,
/// and therefore every probability it reports, is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    n_estimators: usize,
    max_depth: Option<usize>,
    max_features: MaxFeatures,
    random_state: Option<u64>,
    n_classes: usize,
    n_features: Option<usize>,
}

impl RandomForestClassifier {
    /// Creates a new Random Forest classifier.
    ///
    /// # Arguments
    ///
    /// * `n_estimators` - Number of trees in the forest
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            max_features: MaxFeatures::default(),
            random_state: None,
            n_classes: 0,
            n_features: None,
        }
    }

    /// Sets the maximum depth for each tree.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the per-split feature sampling strategy.
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the random state for reproducibility.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Configured number of trees.
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// The fitted trees (empty before fit).
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.trees
    }

    /// Mean of the per-tree feature importances, renormalized to sum to 1.
    ///
    /// Returns `None` before fit.
    pub fn feature_importances(&self) -> Option<Vec<f32>> {
        let n_features = self.n_features?;
        if self.trees.is_empty() {
            return None;
        }
        let mut totals = vec![0.0f32; n_features];
        for tree in &self.trees {
            for (total, value) in totals.iter_mut().zip(tree.feature_importances()?) {
                *total += value;
            }
        }
        let sum: f32 = totals.iter().sum();
        if sum > 0.0 {
            for value in &mut totals {
                *value /= sum;
            }
        }
        Some(totals)
    }
}

impl ProbabilisticClassifier for RandomForestClassifier {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(DxError::invalid_hyperparameter(
                "n_estimators",
                self.n_estimators,
                ">0",
            ));
        }
        validate_training_data(x, y)?;

        let (n_samples, n_features) = x.shape();
        let n_classes = y.iter().max().map_or(0, |&max| max + 1);
        let base_seed = self.random_state.unwrap_or_else(rand::random);

        let mut trees = Vec::with_capacity(self.n_estimators);
        for i in 0..self.n_estimators {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let bootstrap_indices = bootstrap_sample(n_samples, &mut rng);
            let bootstrap_x = x.select_rows(&bootstrap_indices);
            let bootstrap_y: Vec<usize> = bootstrap_indices.iter().map(|&idx| y[idx]).collect();

            let mut tree = DecisionTreeClassifier::new().with_max_features(self.max_features);
            if let Some(max_depth) = self.max_depth {
                tree = tree.with_max_depth(max_depth);
            }
            tree.fit_with_rng(&bootstrap_x, &bootstrap_y, n_classes, &mut rng)?;
            trees.push(tree);
        }

        self.trees = trees;
        self.n_classes = n_classes;
        self.n_features = Some(n_features);
        Ok(())
    }

    fn predict_proba(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        if self.trees.is_empty() {
            return Err(DxError::NotFitted);
        }
        if let Some(expected) = self.n_features {
            if expected != x.n_cols() {
                return Err(DxError::dimension_mismatch("features", expected, x.n_cols()));
            }
        }

        let n_trees = self.trees.len() as f32;
        let mut proba = Matrix::zeros(x.n_rows(), self.n_classes);
        for row in 0..x.n_rows() {
            let sample = x.row_slice(row);
            let mut sums = vec![0.0f32; self.n_classes];
            for tree in &self.trees {
                for (sum, p) in sums.iter_mut().zip(tree.leaf_distribution(sample)?) {
                    *sum += p;
                }
            }
            for (class_idx, sum) in sums.into_iter().enumerate() {
                proba.set(row, class_idx, sum / n_trees);
            }
        }
        Ok(proba)
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}
