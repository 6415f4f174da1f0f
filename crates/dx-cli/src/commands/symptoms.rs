//! Symptoms command: lists the symptom universe for a catalog.

use super::load_catalog;
use crate::error::Result;
use crate::output;
use std::path::Path;
use symptom_dx::encoder::SymptomEncoder;

/// Run the symptoms command
pub(crate) fn run(catalog: Option<&Path>, json_output: bool) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let encoder = SymptomEncoder::from_catalog(&catalog)?;

    if json_output {
        return output::json(&encoder.universe());
    }

    output::section(&format!("Symptoms ({})", encoder.len()));
    for symptom in encoder.universe() {
        println!("  {symptom}");
    }
    Ok(())
}
