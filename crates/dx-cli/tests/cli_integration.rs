//! CLI integration tests for dx

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn dx() -> Command {
    Command::cargo_bin("dx").expect("Failed to find dx binary")
}

fn catalog_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_symptoms_lists_universe() {
    dx().arg("symptoms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Symptoms (37)"))
        .stdout(predicate::str::contains("abdominal pain"));
}

#[test]
fn test_symptoms_json() {
    let output = dx().args(["symptoms", "--json"]).output().unwrap();
    assert!(output.status.success());
    let universe: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(universe.len(), 37);
    assert!(universe.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_conditions_lists_catalog() {
    dx().arg("conditions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Common Cold"))
        .stdout(predicate::str::contains("Migraine"));
}

// ============================================================================
// Predict
// ============================================================================

#[test]
fn test_predict_common_cold() {
    dx().args([
        "predict",
        "-s",
        "fever",
        "-s",
        "cough",
        "-s",
        "sore throat",
        "-s",
        "runny nose",
        "-s",
        "fatigue",
        "-s",
        "sneezing",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("1. Common Cold"));
}

#[test]
fn test_predict_json() {
    let output = dx()
        .args(["predict", "-s", "fever", "-s", "cough", "--severity", "fever=5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["severities"]["fever"], 5.0);
    let predictions = value["predictions"].as_array().unwrap();
    assert!(predictions.len() <= 3);
    for p in predictions {
        let confidence = p["confidence"].as_f64().unwrap();
        assert!(confidence > 10.0 && confidence <= 100.0);
    }
}

#[test]
fn test_predict_unknown_symptom_exit_code() {
    dx().args(["predict", "-s", "unknown_symptom"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown_symptom"));
}

#[test]
fn test_predict_bad_severity_exit_code() {
    dx().args(["predict", "-s", "fever", "--severity", "fever=-1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid severity"));
}

#[test]
fn test_predict_requires_symptom() {
    dx().arg("predict").assert().failure();
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_custom_toml_catalog() {
    let file = catalog_file(
        ".toml",
        r#"
[[conditions]]
name = "Flu"
symptoms = ["fever", "chills"]

[[conditions]]
name = "Sprain"
symptoms = ["swelling", "joint pain"]
"#,
    );
    dx().args(["symptoms", "--catalog"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Symptoms (4)"));
}

#[test]
fn test_invalid_catalog_exit_code() {
    let file = catalog_file(".json", r#"[{"name": "Only", "symptoms": ["fever"]}]"#);
    dx().args(["conditions", "--catalog"])
        .arg(file.path())
        .assert()
        .code(4);
}

#[test]
fn test_missing_catalog_exit_code() {
    dx().args(["symptoms", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_config_exit_code() {
    let config = catalog_file(".toml", "[forest]\nn_estimators = 0\n");
    dx().args(["predict", "-s", "fever", "--config"])
        .arg(config.path())
        .assert()
        .code(4);
}

#[test]
fn test_importances_top() {
    let output = dx()
        .args(["importances", "--top", "5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let ranked: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ranked.len(), 5);
}
