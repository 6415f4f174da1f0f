//! Core traits for models the weighted classifier can drive.
//!
//! The classifier only needs a full probability distribution over labels,
//! so any model implementing [`ProbabilisticClassifier`] can stand in for the
//! default random forest.

use crate::error::Result;
use crate::primitives::Matrix;

/// A multi-class model producing a probability per label.
///
/// Labels are dense indices `0..n_classes`. `fit` is called exactly once at
/// startup; every other method takes `&self` so a trained model can be shared
/// across threads without locking.
///
/// # Examples
///
/// ```
/// use symptom_dx::prelude::*;
///
/// let x = Matrix::from_vec(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
/// let mut model = RandomForestClassifier::new(10).with_random_state(42);
/// model.fit(&x, &[0, 1]).unwrap();
///
/// let proba = model.predict_proba(&x).unwrap();
/// assert_eq!(proba.shape(), (2, 2));
/// ```
pub trait ProbabilisticClassifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is invalid (row/label mismatch, no samples).
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()>;

    /// Returns `(n_samples, n_classes)` probabilities; every row sums to 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature count differs
    /// from training.
    fn predict_proba(&self, x: &Matrix<f32>) -> Result<Matrix<f32>>;

    /// Number of labels seen during `fit` (0 before).
    fn n_classes(&self) -> usize;

    /// Predicts the most probable label per sample.
    ///
    /// Ties go to the lowest label index.
    ///
    /// # Errors
    ///
    /// Same as [`ProbabilisticClassifier::predict_proba`].
    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let proba = self.predict_proba(x)?;
        Ok((0..proba.n_rows())
            .map(|row| argmax(proba.row_slice(row)))
            .collect())
    }
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = idx;
        }
    }
    best
}
