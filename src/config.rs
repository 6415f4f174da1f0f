//! Engine configuration: forest hyperparameters and the ranking policy.
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [forest]
//! n_estimators = 100
//! random_state = 42
//! max_features = "sqrt"
//!
//! [ranking]
//! min_probability = 0.10
//! top_k = 3
//! ```

use crate::error::{DxError, Result};
use crate::prediction::RankingPolicy;
use crate::tree::{MaxFeatures, RandomForestClassifier};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Seed; `None` draws a fresh seed and gives up reproducibility
    pub random_state: Option<u64>,
    /// Maximum tree depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Candidate features per split
    pub max_features: MaxFeatures,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: Some(42),
            max_depth: None,
            max_features: MaxFeatures::Sqrt,
        }
    }
}

impl ForestConfig {
    /// Checks hyperparameter bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidHyperparameter`] for zero trees or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(DxError::invalid_hyperparameter(
                "n_estimators",
                self.n_estimators,
                ">0",
            ));
        }
        if self.max_depth == Some(0) {
            return Err(DxError::invalid_hyperparameter("max_depth", 0, ">0 or unset"));
        }
        Ok(())
    }

    /// An untrained forest with these settings.
    pub fn build(&self) -> RandomForestClassifier {
        let mut forest =
            RandomForestClassifier::new(self.n_estimators).with_max_features(self.max_features);
        if let Some(depth) = self.max_depth {
            forest = forest.with_max_depth(depth);
        }
        if let Some(seed) = self.random_state {
            forest = forest.with_random_state(seed);
        }
        forest
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model settings
    pub forest: ForestConfig,
    /// Filter / sort / truncate settings
    pub ranking: RankingPolicy,
}

impl EngineConfig {
    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidHyperparameter`] for the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.forest.validate()?;
        self.ranking.validate()
    }

    /// Parses a TOML configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed TOML or
    /// [`DxError::InvalidHyperparameter`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file; `.json` is read as JSON, anything else as
    /// TOML.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let config: Self = serde_json::from_str(&text)?;
            config.validate()?;
            Ok(config)
        } else {
            Self::from_toml_str(&text)
        }
    }
}
