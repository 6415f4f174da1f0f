//! Built-in reference catalog.

use super::{Catalog, Condition};

const REFERENCE: &[(&str, &[&str], f64)] = &[
    (
        "Common Cold",
        &["fever", "cough", "sore throat", "runny nose", "fatigue", "sneezing"],
        1.0,
    ),
    (
        "Influenza",
        &[
            "high fever",
            "cough",
            "sore throat",
            "muscle aches",
            "fatigue",
            "headache",
            "chills",
        ],
        1.5,
    ),
    (
        "Strep Throat",
        &[
            "sore throat",
            "fever",
            "difficulty swallowing",
            "swollen lymph nodes",
            "red tonsils",
        ],
        1.8,
    ),
    (
        "Gastroenteritis",
        &["nausea", "vomiting", "diarrhea", "abdominal pain", "fever"],
        1.2,
    ),
    (
        "Migraine",
        &[
            "headache",
            "nausea",
            "sensitivity to light",
            "sensitivity to sound",
            "dizziness",
        ],
        1.4,
    ),
    (
        "Pneumonia",
        &["high fever", "cough", "shortness of breath", "chest pain", "fatigue"],
        2.0,
    ),
    (
        "Bronchitis",
        &["cough", "wheezing", "chest tightness", "fatigue", "mucus production"],
        1.3,
    ),
    (
        "Allergic Rhinitis",
        &["runny nose", "sneezing", "itchy eyes", "nasal congestion", "itchy throat"],
        1.0,
    ),
    (
        "Sinusitis",
        &[
            "facial pain",
            "nasal congestion",
            "headache",
            "fever",
            "thick nasal discharge",
        ],
        1.5,
    ),
    (
        "COVID-19",
        &[
            "fever",
            "cough",
            "shortness of breath",
            "loss of taste",
            "fatigue",
            "loss of smell",
        ],
        2.0,
    ),
    (
        "Tonsillitis",
        &["sore throat", "fever", "difficulty swallowing", "white patches on tonsils"],
        1.8,
    ),
    (
        "Laryngitis",
        &["hoarseness", "sore throat", "dry cough", "difficulty speaking"],
        1.2,
    ),
    (
        "Asthma",
        &["wheezing", "shortness of breath", "chest tightness", "cough"],
        1.7,
    ),
    (
        "Food Poisoning",
        &["nausea", "vomiting", "diarrhea", "abdominal pain", "fever"],
        1.3,
    ),
    (
        "Tension Headache",
        &["headache", "neck stiffness", "sensitivity to light", "fatigue"],
        1.1,
    ),
];

pub(super) fn conditions() -> Catalog {
    Catalog {
        conditions: REFERENCE
            .iter()
            .map(|(name, symptoms, weight)| Condition::new(name, symptoms, *weight))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_passes_validation() {
        let catalog = conditions();
        let validated =
            Catalog::new(catalog.conditions().to_vec()).expect("reference catalog is valid");
        assert_eq!(validated, catalog);
    }
}
