//! Importances command: symptoms ranked by forest feature importance.

use super::load_engine;
use crate::error::Result;
use crate::output;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Importance {
    symptom: String,
    importance: f32,
}

/// Run the importances command
pub(crate) fn run(
    top: usize,
    catalog: Option<&Path>,
    config: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let engine = load_engine(catalog, config)?;
    let ranked: Vec<Importance> = engine
        .classifier()
        .symptom_importances()
        .into_iter()
        .take(top)
        .map(|(symptom, importance)| Importance {
            symptom,
            importance,
        })
        .collect();

    if json_output {
        return output::json(&ranked);
    }

    output::section(&format!("Top {} symptoms", ranked.len()));
    for entry in &ranked {
        let percent = f64::from(entry.importance) * 100.0;
        println!(
            "  {:<24} {} {}",
            entry.symptom,
            output::bar(percent),
            output::percent(percent)
        );
    }
    Ok(())
}
