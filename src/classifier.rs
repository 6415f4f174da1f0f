//! Weighted classifier: catalog-trained model plus severity weighting and
//! ranking.
//!
//! A [`WeightedClassifier`] only exists trained. [`WeightedClassifier::train`]
//! encodes each condition's canonical symptoms (unweighted), fits the model
//! once, and the result is read-only from then on. Severity weights touch the
//! query vector only, never the training data.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::encoder::SymptomEncoder;
use crate::error::{DxError, Result};
use crate::prediction::{Prediction, RankingPolicy};
use crate::primitives::{Matrix, Vector};
use crate::severity::SeverityMap;
use crate::traits::ProbabilisticClassifier;
use crate::tree::RandomForestClassifier;
use log::info;
use std::time::Instant;

/// Trained model over a catalog, with its label schema and ranking policy.
#[derive(Debug, Clone)]
pub struct WeightedClassifier<M = RandomForestClassifier> {
    model: M,
    labels: Vec<String>,
    universe: Vec<String>,
    ranking: RankingPolicy,
}

/// Encodes every condition's canonical symptoms, one row per label.
pub fn training_matrix(catalog: &Catalog, encoder: &SymptomEncoder) -> Result<Matrix<f32>> {
    let rows: Vec<Vector<f32>> = catalog
        .conditions()
        .iter()
        .map(|condition| encoder.encode(&condition.symptoms))
        .collect();
    Matrix::from_rows(&rows).map_err(|e| DxError::invalid_catalog(e.to_string()))
}

impl WeightedClassifier<RandomForestClassifier> {
    /// Trains the default random forest described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or training fails.
    pub fn train(catalog: &Catalog, encoder: &SymptomEncoder, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::train_with(config.forest.build(), catalog, encoder, config.ranking)
    }
}

impl<M: ProbabilisticClassifier> WeightedClassifier<M> {
    /// Trains any probabilistic model on the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidCatalog`] for fewer than two labels,
    /// [`DxError::InvalidHyperparameter`] for a bad ranking policy, or
    /// whatever the model's `fit` reports.
    pub fn train_with(
        mut model: M,
        catalog: &Catalog,
        encoder: &SymptomEncoder,
        ranking: RankingPolicy,
    ) -> Result<Self> {
        ranking.validate()?;
        if catalog.len() < 2 {
            return Err(DxError::invalid_catalog(format!(
                "need at least 2 condition labels, got {}",
                catalog.len()
            )));
        }
        if encoder.is_empty() {
            return Err(DxError::invalid_catalog("symptom universe is empty"));
        }

        let started = Instant::now();
        let x = training_matrix(catalog, encoder)?;
        let y: Vec<usize> = (0..catalog.len()).collect();
        model.fit(&x, &y)?;
        if model.n_classes() != catalog.len() {
            return Err(DxError::invalid_catalog(format!(
                "model learned {} labels, catalog has {}",
                model.n_classes(),
                catalog.len()
            )));
        }

        info!(
            "trained classifier on {} conditions x {} symptoms in {:?}",
            catalog.len(),
            encoder.len(),
            started.elapsed()
        );
        Ok(Self {
            model,
            labels: catalog.labels().into_iter().map(String::from).collect(),
            universe: encoder.universe().to_vec(),
            ranking,
        })
    }

    /// Condition labels in model order (catalog order).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Length a query vector must have.
    pub fn n_features(&self) -> usize {
        self.universe.len()
    }

    /// The ranking policy applied by [`WeightedClassifier::predict`].
    pub fn ranking(&self) -> RankingPolicy {
        self.ranking
    }

    /// The underlying trained model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Scales each slot by its symptom's severity (1.0 when absent).
    ///
    /// Severities for symptoms outside the universe have no slot and are
    /// ignored here; [`crate::engine::DiagnosisEngine::diagnose`] rejects them.
    pub fn weight(&self, vector: &Vector<f32>, severities: &SeverityMap) -> Vector<f32> {
        vector
            .iter()
            .zip(&self.universe)
            .map(|(value, symptom)| (f64::from(value) * severities.get(symptom)) as f32)
            .collect()
    }

    /// Full probability distribution over labels for one vector.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::DimensionMismatch`] if the vector length differs from
    /// the universe size.
    pub fn probabilities(&self, vector: &Vector<f32>) -> Result<Vec<f32>> {
        if vector.len() != self.n_features() {
            return Err(DxError::dimension_mismatch(
                "universe",
                self.n_features(),
                vector.len(),
            ));
        }
        let x = Matrix::from_rows(std::slice::from_ref(vector)).map_err(|_| {
            DxError::dimension_mismatch("universe", self.n_features(), vector.len())
        })?;
        let proba = self.model.predict_proba(&x)?;
        Ok(proba.row_slice(0).to_vec())
    }

    /// Ranked predictions for one (weighted) vector.
    ///
    /// An empty list is a valid outcome: nothing cleared the threshold.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedClassifier::probabilities`].
    pub fn predict(&self, weighted: &Vector<f32>) -> Result<Vec<Prediction>> {
        let probabilities = self.probabilities(weighted)?;
        Ok(self.ranking.rank(&self.labels, &probabilities))
    }
}

impl WeightedClassifier<RandomForestClassifier> {
    /// Symptoms ranked by how much the forest relies on them.
    pub fn symptom_importances(&self) -> Vec<(String, f32)> {
        let Some(importances) = self.model.feature_importances() else {
            return Vec::new();
        };
        let mut ranked: Vec<(String, f32)> = self
            .universe
            .iter()
            .cloned()
            .zip(importances)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}
