//! Symptom encoder: multi-hot encoding over the symptom universe.
//!
//! The universe is every distinct symptom in the catalog, sorted, so slot
//! positions are identical across runs for the same catalog.
//!
//! # Example
//!
//! ```
//! use symptom_dx::catalog::Catalog;
//! use symptom_dx::encoder::SymptomEncoder;
//!
//! let encoder = SymptomEncoder::from_catalog(&Catalog::reference()).unwrap();
//! let v = encoder.encode(["fever", "cough"]);
//! assert_eq!(v.len(), encoder.len());
//! assert!((v.sum() - 2.0).abs() < 1e-6);
//! ```

use crate::catalog::Catalog;
use crate::error::{DxError, Result};
use crate::primitives::Vector;
use log::warn;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Bidirectional mapping between symptom names and vector slots.
#[derive(Debug, Clone)]
pub struct SymptomEncoder {
    universe: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SymptomEncoder {
    /// Derives the universe from a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidCatalog`] if the catalog has no symptoms.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let universe: BTreeSet<&str> = catalog
            .conditions()
            .iter()
            .flat_map(|c| c.symptoms.iter().map(String::as_str))
            .collect();
        Self::from_symptoms(universe)
    }

    /// Builds an encoder over an explicit vocabulary (sorted and deduplicated).
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidCatalog`] if the vocabulary is empty.
    pub fn from_symptoms<I, S>(symptoms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let universe: Vec<String> = symptoms
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if universe.is_empty() {
            return Err(DxError::invalid_catalog("symptom universe is empty"));
        }
        let positions = universe
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Ok(Self {
            universe,
            positions,
        })
    }

    /// The fixed, ordered symptom vocabulary.
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    /// Number of slots in an encoded vector.
    pub fn len(&self) -> usize {
        self.universe.len()
    }

    /// Never true: an encoder always has at least one symptom.
    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    /// Whether `name` belongs to the universe.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Slot of a symptom.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Symptom stored at a slot.
    pub fn symptom_at(&self, slot: usize) -> Option<&str> {
        self.universe.get(slot).map(String::as_str)
    }

    /// Multi-hot encodes a symptom set: 1.0 where present, 0.0 elsewhere.
    ///
    /// Input order and duplicates do not affect the result. Input is expected
    /// to be validated with [`SymptomEncoder::validate`]; unknown names are
    /// logged and contribute nothing.
    pub fn encode<I, S>(&self, symptoms: I) -> Vector<f32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut data = vec![0.0f32; self.universe.len()];
        for symptom in symptoms {
            let name = symptom.as_ref();
            match self.position(name) {
                Some(slot) => data[slot] = 1.0,
                None => warn!("encode called with unvalidated symptom '{name}'"),
            }
        }
        Vector::from_vec(data)
    }

    /// Checks a symptom set against the universe.
    ///
    /// # Errors
    ///
    /// - [`DxError::EmptyInput`] if the set is empty
    /// - [`DxError::InvalidSymptom`] naming every unknown symptom, in input
    ///   order without repeats
    pub fn validate<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<()> {
        if symptoms.is_empty() {
            return Err(DxError::EmptyInput);
        }
        self.check_known(symptoms.iter().map(|s| s.as_ref()))
    }

    /// Fails with [`DxError::InvalidSymptom`] if any name is unknown.
    pub(crate) fn check_known<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let unknown: Vec<String> = names
            .into_iter()
            .filter(|name| !self.contains(name) && seen.insert(*name))
            .map(str::to_string)
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(DxError::InvalidSymptom { names: unknown })
        }
    }

    /// [`SymptomEncoder::validate`] followed by [`SymptomEncoder::encode`].
    ///
    /// # Errors
    ///
    /// Same as [`SymptomEncoder::validate`].
    pub fn try_encode<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Vector<f32>> {
        self.validate(symptoms)?;
        Ok(self.encode(symptoms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> SymptomEncoder {
        SymptomEncoder::from_catalog(&Catalog::reference()).expect("reference catalog")
    }

    #[test]
    fn test_universe_sorted_and_distinct() {
        let encoder = encoder();
        let universe = encoder.universe();
        assert!(universe.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(universe[0], "abdominal pain");
        assert_eq!(encoder.len(), 37);
    }

    #[test]
    fn test_position_round_trip() {
        let encoder = encoder();
        let slot = encoder.position("fever").expect("known");
        assert_eq!(encoder.symptom_at(slot), Some("fever"));
        assert_eq!(encoder.position("unknown_symptom"), None);
        assert_eq!(encoder.symptom_at(encoder.len()), None);
    }

    #[test]
    fn test_encode_order_and_duplicates_irrelevant() {
        let encoder = encoder();
        let a = encoder.encode(["fever", "cough", "fatigue"]);
        let b = encoder.encode(vec!["fatigue", "fever", "cough", "fever"]);
        assert_eq!(a, b);
        assert!((a.sum() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_encode_sets_only_named_slots() {
        let encoder = encoder();
        let v = encoder.encode(["headache"]);
        let slot = encoder.position("headache").expect("known");
        for (idx, value) in v.iter().enumerate() {
            let expected = if idx == slot { 1.0 } else { 0.0 };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_validate_empty() {
        let empty: [&str; 0] = [];
        assert!(matches!(encoder().validate(&empty), Err(DxError::EmptyInput)));
    }

    #[test]
    fn test_validate_lists_unknown_names_once() {
        let err = encoder()
            .validate(&["fever", "glowing", "unknown_symptom", "glowing"])
            .expect_err("unknown names");
        match err {
            DxError::InvalidSymptom { names } => {
                assert_eq!(names, vec!["glowing", "unknown_symptom"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_try_encode() {
        let encoder = encoder();
        let v = encoder.try_encode(&["cough"]).expect("valid");
        assert_eq!(v, encoder.encode(["cough"]));
        assert!(encoder.try_encode(&["nope"]).is_err());
    }

    #[test]
    fn test_from_symptoms_empty() {
        let empty: Vec<&str> = Vec::new();
        assert!(matches!(
            SymptomEncoder::from_symptoms(empty),
            Err(DxError::InvalidCatalog { .. })
        ));
    }
}
