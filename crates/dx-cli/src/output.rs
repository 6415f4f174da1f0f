//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Print an error message
pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Print a value as pretty JSON
pub(crate) fn json<T: Serialize>(value: &T) -> crate::error::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| crate::error::CliError::Engine(e.into()))?;
    println!("{text}");
    Ok(())
}

/// Horizontal bar for a percentage, one cell per 5%
pub(crate) fn bar(percent: f64) -> String {
    let cells = (percent.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("{}{}", "█".repeat(cells), "░".repeat(20 - cells))
}

/// Format a confidence percentage with two decimals
pub(crate) fn percent(value: f64) -> String {
    format!("{value:6.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_constant() {
        for value in [0.0, 12.5, 63.0, 100.0, 150.0] {
            assert_eq!(bar(value).chars().count(), 20);
        }
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(50.0).chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(bar(100.0).chars().filter(|&c| c == '█').count(), 20);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(63.0), " 63.00%");
        assert_eq!(percent(100.0), "100.00%");
    }
}
