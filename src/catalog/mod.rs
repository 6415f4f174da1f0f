//! Condition catalog: the conditions the engine can predict and their
//! canonical symptom sets.
//!
//! Catalog order is label order. A catalog is validated once when it is
//! built and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use symptom_dx::catalog::{Catalog, Condition};
//!
//! let catalog = Catalog::new(vec![
//!     Condition::new("Common Cold", &["fever", "cough", "sneezing"], 1.0),
//!     Condition::new("Migraine", &["headache", "nausea"], 1.4),
//! ]).expect("valid catalog");
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.label_of("Migraine"), Some(1));
//! ```

mod reference;

use crate::error::{DxError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A known condition with its canonical symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique condition name (also the prediction label)
    pub name: String,
    /// Canonical symptom names
    pub symptoms: Vec<String>,
    /// Base severity weight; informational, not used in scoring
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,
}

fn default_base_weight() -> f64 {
    1.0
}

impl Condition {
    /// Convenience constructor.
    pub fn new(name: &str, symptoms: &[&str], base_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            symptoms: symptoms.iter().map(|s| (*s).to_string()).collect(),
            base_weight,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DxError::invalid_catalog("condition name must not be empty"));
        }
        if self.symptoms.is_empty() {
            return Err(DxError::invalid_catalog(format!(
                "condition '{}' has no symptoms",
                self.name
            )));
        }
        if self.symptoms.iter().any(|s| s.trim().is_empty()) {
            return Err(DxError::invalid_catalog(format!(
                "condition '{}' has an empty symptom name",
                self.name
            )));
        }
        if !self.base_weight.is_finite() || self.base_weight <= 0.0 {
            return Err(DxError::invalid_catalog(format!(
                "condition '{}' has base weight {}, expected a positive number",
                self.name, self.base_weight
            )));
        }
        Ok(())
    }
}

/// On-disk shape: `{ "conditions": [...] }` / `[[conditions]]`.
#[derive(Deserialize)]
struct CatalogFile {
    conditions: Vec<Condition>,
}

/// Validated, ordered collection of conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    conditions: Vec<Condition>,
}

impl Catalog {
    /// Builds a catalog, rejecting anything the classifier cannot train on.
    ///
    /// Symptom names are trimmed; duplicates within a condition collapse,
    /// keeping first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidCatalog`] for fewer than two conditions,
    /// duplicate or empty names, empty symptom sets or non-positive weights.
    pub fn new(conditions: Vec<Condition>) -> Result<Self> {
        if conditions.len() < 2 {
            return Err(DxError::invalid_catalog(format!(
                "need at least 2 conditions, got {}",
                conditions.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(conditions.len());
        for mut condition in conditions {
            condition.validate()?;
            condition.name = condition.name.trim().to_string();
            if !seen.insert(condition.name.clone()) {
                return Err(DxError::invalid_catalog(format!(
                    "duplicate condition '{}'",
                    condition.name
                )));
            }
            let mut symptoms_seen = HashSet::new();
            condition.symptoms = condition
                .symptoms
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| symptoms_seen.insert(s.clone()))
                .collect();
            normalized.push(condition);
        }

        debug!("catalog validated: {} conditions", normalized.len());
        Ok(Self {
            conditions: normalized,
        })
    }

    /// The built-in reference catalog of 15 common conditions.
    pub fn reference() -> Self {
        reference::conditions()
    }

    /// Parses a JSON catalog: either `{"conditions": [...]}` or a bare array.
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON and
    /// [`DxError::InvalidCatalog`] for an untrainable catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let conditions: Vec<Condition> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value::<CatalogFile>(value)?.conditions
        };
        Self::new(conditions)
    }

    /// Parses a TOML catalog with `[[conditions]]` tables.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::from_json_str`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.conditions)
    }

    /// Loads a catalog file; `.toml` is read as TOML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        debug!("loading catalog from {}", path.display());
        if is_toml {
            Self::from_toml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    /// Conditions in label order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Condition names in label order.
    pub fn labels(&self) -> Vec<&str> {
        self.conditions.iter().map(|c| c.name.as_str()).collect()
    }

    /// Label index of a condition.
    pub fn label_of(&self, name: &str) -> Option<usize> {
        self.conditions.iter().position(|c| c.name == name)
    }

    /// Looks up a condition by name.
    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn two() -> Vec<Condition> {
        vec![
            Condition::new("A", &["x", "y"], 1.0),
            Condition::new("B", &["y", "z"], 2.0),
        ]
    }

    #[test]
    fn test_reference_catalog_shape() {
        let catalog = Catalog::reference();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.labels()[0], "Common Cold");
        assert_eq!(catalog.label_of("Tension Headache"), Some(14));
        let flu = catalog.get("Influenza").expect("present");
        assert!((flu.base_weight - 1.5).abs() < 1e-12);
        assert_eq!(flu.symptoms.len(), 7);
    }

    #[test]
    fn test_rejects_single_condition() {
        let err = Catalog::new(vec![Condition::new("A", &["x"], 1.0)]).expect_err("too small");
        assert!(matches!(err, DxError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut conditions = two();
        conditions[1].name = " A ".to_string();
        let err = Catalog::new(conditions).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_empty_symptoms() {
        let mut conditions = two();
        conditions[0].symptoms.clear();
        assert!(Catalog::new(conditions).is_err());

        let mut conditions = two();
        conditions[0].symptoms.push("  ".to_string());
        assert!(Catalog::new(conditions).is_err());
    }

    #[test]
    fn test_rejects_bad_base_weight() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut conditions = two();
            conditions[0].base_weight = weight;
            assert!(Catalog::new(conditions).is_err(), "weight {weight}");
        }
    }

    #[test]
    fn test_normalizes_symptoms() {
        let conditions = vec![
            Condition::new("A", &[" x", "x ", "y"], 1.0),
            Condition::new("B", &["z"], 1.0),
        ];
        let catalog = Catalog::new(conditions).expect("valid");
        assert_eq!(catalog.conditions()[0].symptoms, vec!["x", "y"]);
    }

    #[test]
    fn test_from_json_object_and_array() {
        let object = r#"{"conditions": [
            {"name": "A", "symptoms": ["x"], "base_weight": 1.0},
            {"name": "B", "symptoms": ["y"]}
        ]}"#;
        let catalog = Catalog::from_json_str(object).expect("valid");
        assert!((catalog.conditions()[1].base_weight - 1.0).abs() < 1e-12);

        let array = r#"[{"name": "A", "symptoms": ["x"]}, {"name": "B", "symptoms": ["y"]}]"#;
        assert_eq!(Catalog::from_json_str(array).expect("valid").len(), 2);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Catalog::from_json_str("{not json").expect_err("malformed");
        assert!(matches!(err, DxError::Serialization(_)));
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            [[conditions]]
            name = "A"
            symptoms = ["x", "y"]
            base_weight = 1.2

            [[conditions]]
            name = "B"
            symptoms = ["z"]
        "#;
        let catalog = Catalog::from_toml_str(text).expect("valid");
        assert_eq!(catalog.labels(), vec!["A", "B"]);
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "[[conditions]]\nname = \"A\"\nsymptoms = [\"x\"]\n\n[[conditions]]\nname = \"B\"\nsymptoms = [\"y\"]"
        )
        .expect("write");
        assert_eq!(Catalog::from_path(file.path()).expect("valid").len(), 2);

        let missing = Catalog::from_path("/nonexistent/catalog.json").expect_err("missing");
        assert!(matches!(missing, DxError::Io(_)));
    }
}
