//! Ranked predictions and the policy that produces them.
//!
//! Probabilities become percentages rounded to two decimals. Only those above
//! the threshold are kept, sorted by confidence (catalog order on ties) and
//! truncated to the top K.

use crate::error::{DxError, Result};
use serde::{Deserialize, Serialize};

/// Probabilities must be strictly above this to be reported.
pub const DEFAULT_MIN_PROBABILITY: f32 = 0.10;

/// Maximum number of predictions per request.
pub const DEFAULT_TOP_K: usize = 3;

/// One ranked condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Condition name
    pub condition: String,
    /// Percentage in (threshold, 100], rounded to 2 decimals
    pub confidence: f64,
}

impl Prediction {
    /// Builds a prediction from a raw probability.
    pub fn from_probability(condition: impl Into<String>, probability: f32) -> Self {
        Self {
            condition: condition.into(),
            confidence: round_confidence(probability),
        }
    }
}

/// Converts a probability to a percentage rounded to 2 decimals.
#[must_use]
pub fn round_confidence(probability: f32) -> f64 {
    (f64::from(probability) * 100.0 * 100.0).round() / 100.0
}

/// Filter / sort / truncate settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingPolicy {
    /// Exclusive lower bound on probability, in [0, 1)
    pub min_probability: f32,
    /// Maximum number of predictions returned, at least 1
    pub top_k: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_probability: DEFAULT_MIN_PROBABILITY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RankingPolicy {
    /// Checks the policy bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidHyperparameter`] if `min_probability` is
    /// outside [0, 1) or `top_k` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_probability) {
            return Err(DxError::invalid_hyperparameter(
                "min_probability",
                self.min_probability,
                "0 <= value < 1",
            ));
        }
        if self.top_k == 0 {
            return Err(DxError::invalid_hyperparameter("top_k", self.top_k, ">0"));
        }
        Ok(())
    }

    /// Ranks one probability per label.
    ///
    /// A probability is kept when it exceeds `min_probability` and its
    /// rounded percentage still exceeds the threshold percentage. The sort is
    /// stable, so equal confidences stay in label order. An empty result
    /// means no confident match.
    pub fn rank<S: AsRef<str>>(&self, labels: &[S], probabilities: &[f32]) -> Vec<Prediction> {
        let floor = f64::from(self.min_probability) * 100.0;
        let mut predictions: Vec<Prediction> = labels
            .iter()
            .zip(probabilities)
            .filter(|(_, &p)| p > self.min_probability)
            .map(|(label, &p)| Prediction::from_probability(label.as_ref(), p))
            .filter(|prediction| prediction.confidence > floor)
            .collect();
        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions.truncate(self.top_k);
        predictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.63), 63.0);
        assert_eq!(round_confidence(1.0), 100.0);
        assert_eq!(round_confidence(0.123_456), 12.35);
    }

    #[test]
    fn test_rank_filters_sorts_and_truncates() {
        let policy = RankingPolicy::default();
        let ranked = policy.rank(&LABELS, &[0.05, 0.30, 0.15, 0.40, 0.10]);
        let names: Vec<&str> = ranked.iter().map(|p| p.condition.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "C"]);
        assert_eq!(ranked[0].confidence, 40.0);
    }

    #[test]
    fn test_rank_threshold_is_strict() {
        let ranked = RankingPolicy::default().rank(&LABELS, &[0.10, 0.10, 0.10, 0.10, 0.60]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].condition, "E");
    }

    #[test]
    fn test_rank_drops_values_that_round_to_threshold() {
        let ranked = RankingPolicy::default().rank(&LABELS[..2], &[0.100_01, 0.899_99]);
        assert_eq!(ranked.len(), 1);
        assert!(ranked.iter().all(|p| p.confidence > 10.0));
    }

    #[test]
    fn test_rank_ties_keep_label_order() {
        let ranked = RankingPolicy::default().rank(&LABELS, &[0.2, 0.2, 0.2, 0.2, 0.2]);
        let names: Vec<&str> = ranked.iter().map(|p| p.condition.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rank_empty_when_nothing_confident() {
        let ranked = RankingPolicy::default().rank(&LABELS, &[0.05, 0.1, 0.02, 0.08, 0.09]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_policy_validation() {
        assert!(RankingPolicy::default().validate().is_ok());
        let bad_threshold = RankingPolicy {
            min_probability: 1.0,
            ..RankingPolicy::default()
        };
        assert!(bad_threshold.validate().is_err());
        let bad_k = RankingPolicy {
            top_k: 0,
            ..RankingPolicy::default()
        };
        assert!(bad_k.validate().is_err());
    }

    #[test]
    fn test_policy_serde_defaults() {
        let policy: RankingPolicy = serde_json::from_str(r#"{"top_k": 5}"#).expect("valid");
        assert_eq!(policy.top_k, 5);
        assert_eq!(policy.min_probability, DEFAULT_MIN_PROBABILITY);
    }
}
