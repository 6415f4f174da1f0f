//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use symptom_dx::prelude::*;
//! ```

pub use crate::catalog::{Catalog, Condition};
pub use crate::classifier::WeightedClassifier;
pub use crate::config::{EngineConfig, ForestConfig};
pub use crate::encoder::SymptomEncoder;
pub use crate::engine::DiagnosisEngine;
pub use crate::error::{DxError, Result};
pub use crate::prediction::{Prediction, RankingPolicy};
pub use crate::primitives::{Matrix, Vector};
pub use crate::registry::EngineHandle;
pub use crate::severity::SeverityMap;
pub use crate::traits::ProbabilisticClassifier;
pub use crate::tree::{DecisionTreeClassifier, MaxFeatures, RandomForestClassifier};
