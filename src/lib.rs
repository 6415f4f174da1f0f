//! symptom-dx: symptom-to-diagnosis prediction engine in pure Rust.
//!
//! Given a set of symptoms and optional per-symptom severities, the engine
//! returns a short ranked list of probable conditions with confidence
//! percentages. A random forest is trained once on a catalog of conditions
//! and their canonical symptoms; every request afterwards is read-only.
//!
//! # Quick Start
//!
//! ```
//! use symptom_dx::prelude::*;
//!
//! let engine = DiagnosisEngine::with_reference_catalog().unwrap();
//!
//! let severities = SeverityMap::from_pairs([("fever", 3.0)]).unwrap();
//! let predictions = engine
//!     .diagnose(&["fever", "cough", "sneezing", "runny nose"], &severities)
//!     .unwrap();
//!
//! assert!(predictions.len() <= 3);
//! for p in &predictions {
//!     assert!(p.confidence > 10.0 && p.confidence <= 100.0);
//! }
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`catalog`]: Conditions, the reference catalog and catalog files
//! - [`encoder`]: Symptom universe and multi-hot encoding
//! - [`severity`]: Validated per-symptom severity multipliers
//! - [`tree`]: Decision tree and random forest classifiers
//! - [`prediction`]: Ranked predictions and the ranking policy
//! - [`classifier`]: Catalog-trained classifier with severity weighting
//! - [`config`]: Forest and ranking settings
//! - [`engine`]: The request-serving engine
//! - [`registry`]: Shared handle with atomic catalog reload

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod prediction;
pub mod prelude;
pub mod primitives;
pub mod registry;
pub mod severity;
pub mod traits;
pub mod tree;

pub use error::{DxError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::ProbabilisticClassifier;
