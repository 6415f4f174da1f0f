//! Per-symptom severity multipliers supplied by the caller.
//!
//! Every value in a [`SeverityMap`] is a finite number strictly greater than
//! zero; construction fails otherwise, so a malformed value can never fall
//! back to the default of 1.0.

use crate::error::{DxError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multiplier used for symptoms without an explicit severity.
pub const DEFAULT_SEVERITY: f64 = 1.0;

/// Validated mapping from symptom name to severity multiplier.
///
/// # Example
///
/// ```
/// use symptom_dx::severity::SeverityMap;
///
/// let severities = SeverityMap::from_pairs([("fever", 5.0)]).unwrap();
/// assert_eq!(severities.get("fever"), 5.0);
/// assert_eq!(severities.get("cough"), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct SeverityMap {
    values: BTreeMap<String, f64>,
}

fn check_value(symptom: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(symptom, value))
    }
}

fn invalid(symptom: &str, value: impl ToString) -> DxError {
    DxError::InvalidSeverity {
        symptom: symptom.to_string(),
        value: value.to_string(),
    }
}

impl SeverityMap {
    /// An empty map: every symptom weighs 1.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from numeric pairs. Later pairs override earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidSeverity`] for the first non-positive or
    /// non-finite value.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (symptom, value) in pairs {
            map.insert(symptom, value)?;
        }
        Ok(map)
    }

    /// Builds a map from raw textual values, e.g. form fields.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidSeverity`] quoting the text as given for
    /// values that are not numbers or are not positive.
    pub fn parse<I, S, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (symptom, raw) in entries {
            let symptom = symptom.into();
            let raw = raw.as_ref().trim();
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => {
                    map.values.insert(symptom, value);
                }
                _ => return Err(invalid(&symptom, raw)),
            }
        }
        Ok(map)
    }

    /// Parses a `NAME=VALUE` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidSeverity`] if there is no `=` or the value is
    /// invalid.
    pub fn parse_assignment(text: &str) -> Result<(String, f64)> {
        let Some((name, raw)) = text.rsplit_once('=') else {
            return Err(invalid(text, ""));
        };
        let name = name.trim().to_string();
        let value = Self::parse([(name.clone(), raw)])?.get(&name);
        Ok((name, value))
    }

    /// Inserts or replaces a severity.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidSeverity`] if `value` is not positive and
    /// finite; the map is left unchanged.
    pub fn insert(&mut self, symptom: impl Into<String>, value: f64) -> Result<()> {
        let symptom = symptom.into();
        let value = check_value(&symptom, value)?;
        self.values.insert(symptom, value);
        Ok(())
    }

    /// Severity for `symptom`, or [`DEFAULT_SEVERITY`].
    pub fn get(&self, symptom: &str) -> f64 {
        self.values.get(symptom).copied().unwrap_or(DEFAULT_SEVERITY)
    }

    /// Symptoms with an explicit severity, sorted.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no severity was given.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for SeverityMap {
    type Error = DxError;

    fn try_from(values: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_pairs(values)
    }
}

impl From<SeverityMap> for BTreeMap<String, f64> {
    fn from(map: SeverityMap) -> Self {
        map.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        let map = SeverityMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get("anything"), 1.0);
    }

    #[test]
    fn test_from_pairs_rejects_non_positive() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = SeverityMap::from_pairs([("fever", bad)]).expect_err("invalid");
            assert!(matches!(err, DxError::InvalidSeverity { ref symptom, .. } if symptom == "fever"));
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = SeverityMap::parse([("fever", "very")]).expect_err("not a number");
        match err {
            DxError::InvalidSeverity { symptom, value } => {
                assert_eq!(symptom, "fever");
                assert_eq!(value, "very");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_numbers() {
        let map = SeverityMap::parse([("fever", " 2.5 "), ("cough", "3")]).expect("valid");
        assert_eq!(map.get("fever"), 2.5);
        assert_eq!(map.get("cough"), 3.0);
        assert_eq!(map.symptoms().collect::<Vec<_>>(), vec!["cough", "fever"]);
    }

    #[test]
    fn test_parse_accepts_tiny_and_huge_positive_values() {
        let map = SeverityMap::parse([("fever", "1e-50"), ("cough", "1e39")]).expect("positive");
        assert!(map.get("fever") > 0.0);
        assert_eq!(map.get("fever"), 1e-50);
        assert_eq!(map.get("cough"), 1e39);
    }

    #[test]
    fn test_parse_error_quotes_raw_text() {
        for raw in ["-1e-50", "0.0", "1e400", "NaN"] {
            match SeverityMap::parse([("fever", raw)]).expect_err(raw) {
                DxError::InvalidSeverity { symptom, value } => {
                    assert_eq!(symptom, "fever");
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            SeverityMap::parse_assignment("sore throat=4").expect("valid"),
            ("sore throat".to_string(), 4.0)
        );
        assert!(SeverityMap::parse_assignment("fever").is_err());
        assert!(SeverityMap::parse_assignment("fever=-1").is_err());
    }

    #[test]
    fn test_failed_insert_leaves_map_unchanged() {
        let mut map = SeverityMap::from_pairs([("fever", 2.0)]).expect("valid");
        assert!(map.insert("fever", 0.0).is_err());
        assert_eq!(map.get("fever"), 2.0);
    }

    #[test]
    fn test_serde_validates() {
        let map: SeverityMap = serde_json::from_str(r#"{"fever": 5.0}"#).expect("valid");
        assert_eq!(map.get("fever"), 5.0);
        assert!(serde_json::from_str::<SeverityMap>(r#"{"fever": -5.0}"#).is_err());
        assert_eq!(
            serde_json::to_string(&map).expect("serializable"),
            r#"{"fever":5.0}"#
        );
    }
}
