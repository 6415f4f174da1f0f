//! Diagnosis engine: the immutable service object behind every request.
//!
//! A [`DiagnosisEngine`] owns the catalog, the encoder derived from it and
//! the classifier trained on it. It is built once, is `Send + Sync`, and
//! answers any number of concurrent [`DiagnosisEngine::diagnose`] calls
//! through `&self`.
//!
//! # Example
//!
//! ```
//! use symptom_dx::engine::DiagnosisEngine;
//! use symptom_dx::severity::SeverityMap;
//!
//! let engine = DiagnosisEngine::with_reference_catalog().unwrap();
//! let predictions = engine
//!     .diagnose(&["fever", "cough", "sore throat", "runny nose", "fatigue", "sneezing"],
//!               &SeverityMap::new())
//!     .unwrap();
//! assert_eq!(predictions[0].condition, "Common Cold");
//! ```

use crate::catalog::{Catalog, Condition};
use crate::classifier::WeightedClassifier;
use crate::config::EngineConfig;
use crate::encoder::SymptomEncoder;
use crate::error::Result;
use crate::prediction::Prediction;
use crate::severity::SeverityMap;
use log::debug;

/// Catalog, encoder and trained classifier, ready to serve.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: Catalog,
    encoder: SymptomEncoder,
    classifier: WeightedClassifier,
    config: EngineConfig,
}

impl DiagnosisEngine {
    /// Validates `config`, derives the universe and trains the classifier.
    ///
    /// # Errors
    ///
    /// Startup failures are fatal: an invalid config, an empty universe or a
    /// failed fit returns `Err` and no engine exists.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let encoder = SymptomEncoder::from_catalog(&catalog)?;
        let classifier = WeightedClassifier::train(&catalog, &encoder, &config)?;
        Ok(Self {
            catalog,
            encoder,
            classifier,
            config,
        })
    }

    /// Engine over the built-in reference catalog with default settings.
    ///
    /// # Errors
    ///
    /// Only if training the reference catalog fails.
    pub fn with_reference_catalog() -> Result<Self> {
        Self::new(Catalog::reference(), EngineConfig::default())
    }

    /// The symptom universe callers may choose from.
    pub fn universe(&self) -> &[String] {
        self.encoder.universe()
    }

    /// The catalog the classifier was trained on.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a condition by name.
    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.catalog.get(name)
    }

    /// Settings the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The symptom encoder.
    pub fn encoder(&self) -> &SymptomEncoder {
        &self.encoder
    }

    /// The trained classifier.
    pub fn classifier(&self) -> &WeightedClassifier {
        &self.classifier
    }

    /// Validates a request, then encodes, weights and predicts.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    ///
    /// 1. [`DxError::EmptyInput`](crate::error::DxError::EmptyInput) for no symptoms
    /// 2. [`DxError::InvalidSymptom`](crate::error::DxError::InvalidSymptom) for
    ///    unknown symptoms
    /// 3. [`DxError::InvalidSymptom`](crate::error::DxError::InvalidSymptom) for
    ///    severity keys outside the universe
    ///
    /// Severity values are validated when the [`SeverityMap`] is built.
    /// An empty `Ok` means no condition cleared the threshold.
    ///
    /// # Errors
    ///
    /// As listed above.
    pub fn diagnose<S: AsRef<str>>(
        &self,
        symptoms: &[S],
        severities: &SeverityMap,
    ) -> Result<Vec<Prediction>> {
        self.encoder.validate(symptoms)?;
        self.encoder.check_known(severities.symptoms())?;

        let vector = self.encoder.encode(symptoms);
        let weighted = self.classifier.weight(&vector, severities);
        let predictions = self.classifier.predict(&weighted)?;
        debug!(
            "diagnosed {} symptoms ({} weighted): {} predictions",
            symptoms.len(),
            severities.len(),
            predictions.len()
        );
        Ok(predictions)
    }
}
