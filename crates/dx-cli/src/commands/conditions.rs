//! Conditions command: lists catalog conditions in label order.

use super::load_catalog;
use crate::error::Result;
use crate::output;
use colored::Colorize;
use std::path::Path;

/// Run the conditions command
pub(crate) fn run(catalog: Option<&Path>, json_output: bool) -> Result<()> {
    let catalog = load_catalog(catalog)?;

    if json_output {
        return output::json(&catalog);
    }

    output::section(&format!("Conditions ({})", catalog.len()));
    for (label, condition) in catalog.conditions().iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            label,
            condition.name.bold(),
            format!("(weight {:.1})", condition.base_weight).dimmed()
        );
        println!("      {}", condition.symptoms.join(", "));
    }
    Ok(())
}
