//! Predict command: ranks probable conditions for a symptom set.

use super::load_engine;
use crate::error::Result;
use crate::output;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use symptom_dx::prediction::Prediction;
use symptom_dx::severity::SeverityMap;

/// Prediction result for JSON output
#[derive(Serialize)]
struct PredictResult<'a> {
    symptoms: &'a [String],
    severities: &'a SeverityMap,
    predictions: Vec<Prediction>,
}

/// Parses repeated `NAME=VALUE` flags; later assignments win.
fn parse_severities(assignments: &[String]) -> Result<SeverityMap> {
    let mut severities = SeverityMap::new();
    for assignment in assignments {
        let (name, value) = SeverityMap::parse_assignment(assignment)?;
        severities.insert(name, value)?;
    }
    Ok(severities)
}

/// Run the predict command
pub(crate) fn run(
    symptoms: &[String],
    severity_flags: &[String],
    catalog: Option<&Path>,
    config: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let severities = parse_severities(severity_flags)?;
    let engine = load_engine(catalog, config)?;
    let predictions = engine.diagnose(symptoms, &severities)?;

    if json_output {
        return output::json(&PredictResult {
            symptoms,
            severities: &severities,
            predictions,
        });
    }

    output::section("Diagnosis");
    output::kv("Symptoms", symptoms.join(", "));
    if !severities.is_empty() {
        let weighted: Vec<String> = severities
            .symptoms()
            .map(|name| format!("{name}={}", severities.get(name)))
            .collect();
        output::kv("Severities", weighted.join(", "));
    }
    println!();

    if predictions.is_empty() {
        output::info("No confident match: no condition scored above the threshold.");
        return Ok(());
    }
    for (rank, prediction) in predictions.iter().enumerate() {
        println!(
            "  {}. {:<24} {} {}",
            rank + 1,
            prediction.condition.bold(),
            output::bar(prediction.confidence).green(),
            output::percent(prediction.confidence)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_parse_severities() {
        let map = parse_severities(&["fever=2".to_string(), "fever=3.5".to_string()])
            .expect("valid");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("fever"), 3.5);
    }

    #[test]
    fn test_parse_severities_rejects_bad_value() {
        let err = parse_severities(&["fever=hot".to_string()]).expect_err("not a number");
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
