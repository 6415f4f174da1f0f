//! Error types for diagnosis engine operations.
//!
//! Caller mistakes (unknown symptoms, empty input, malformed severities) and
//! startup failures (an untrainable catalog) are distinct variants so the
//! outer layer can re-prompt for the former and abort on the latter.

use thiserror::Error;

/// Main error type for engine operations.
///
/// # Examples
///
/// ```
/// use symptom_dx::error::DxError;
///
/// let err = DxError::InvalidSymptom {
///     names: vec!["unknown_symptom".to_string()],
/// };
/// assert!(err.to_string().contains("unknown_symptom"));
/// ```
#[derive(Error, Debug)]
pub enum DxError {
    /// One or more symptom names are not part of the symptom universe.
    #[error("Invalid symptoms: {}", .names.join(", "))]
    InvalidSymptom {
        /// Offending names, in input order
        names: Vec<String>,
    },

    /// No symptoms were supplied.
    #[error("Empty input: at least one symptom is required")]
    EmptyInput,

    /// A severity value is non-positive, non-finite or not a number.
    #[error("Invalid severity for '{symptom}': {value} (expected a positive number)")]
    InvalidSeverity {
        /// Symptom the severity was given for
        symptom: String,
        /// The raw value as supplied
        value: String,
    },

    /// The catalog cannot be trained on.
    #[error("Invalid catalog: {message}")]
    InvalidCatalog {
        /// What is wrong with the catalog
        message: String,
    },

    /// Invalid hyperparameter or ranking setting.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Vector or matrix dimensions don't match the trained model.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A model was queried before `fit`.
    #[error("Model not fitted")]
    NotFitted,

    /// I/O error while reading a catalog or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog or config could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DxError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid catalog error
    #[must_use]
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Returns true when the error is the caller's fault and the request can
    /// be corrected and retried.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSymptom { .. } | Self::EmptyInput | Self::InvalidSeverity { .. }
        )
    }
}

impl From<serde_json::Error> for DxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON: {err}"))
    }
}

impl From<toml::de::Error> for DxError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(format!("TOML: {err}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, DxError>;
