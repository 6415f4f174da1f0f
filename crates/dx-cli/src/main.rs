//! dx - symptom-to-diagnosis command line
//!
//! Usage:
//!   dx symptoms                                   # List selectable symptoms
//!   dx conditions                                 # List known conditions
//!   dx predict -s fever -s cough                  # Rank probable conditions
//!   dx predict -s fever --severity fever=3        # Weight a symptom
//!   dx predict -s fever --catalog my.toml --json  # Custom catalog, JSON output
//!   dx importances --top 5                        # Most informative symptoms

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;

use commands::{conditions, importances, predict, symptoms};

/// dx - symptom-to-diagnosis prediction
///
/// Ranks the most probable conditions for a set of symptoms.
#[derive(Parser)]
#[command(name = "dx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Catalog file (JSON or TOML); defaults to the built-in catalog
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symptom universe
    Symptoms,

    /// List catalog conditions and their canonical symptoms
    Conditions,

    /// Rank probable conditions for a set of symptoms
    Predict {
        /// Symptom name (repeatable)
        #[arg(short, long = "symptom", value_name = "SYMPTOM", required = true)]
        symptoms: Vec<String>,

        /// Severity multiplier as NAME=VALUE (repeatable)
        #[arg(long = "severity", value_name = "NAME=VALUE")]
        severities: Vec<String>,

        /// Engine config file (TOML or JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show symptoms ranked by forest feature importance
    Importances {
        /// Number of symptoms to show
        #[arg(long, default_value = "10")]
        top: usize,

        /// Engine config file (TOML or JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_env("DX_LOG")
        .init();

    let catalog = cli.catalog.as_deref();
    let result = match cli.command {
        Commands::Symptoms => symptoms::run(catalog, cli.json),
        Commands::Conditions => conditions::run(catalog, cli.json),
        Commands::Predict {
            symptoms,
            severities,
            config,
        } => predict::run(
            &symptoms,
            &severities,
            catalog,
            config.as_deref(),
            cli.json,
        ),
        Commands::Importances { top, config } => {
            importances::run(top, catalog, config.as_deref(), cli.json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), LevelFilter::Warn);
        assert_eq!(log_level(2, false), LevelFilter::Debug);
        assert_eq!(log_level(5, true), LevelFilter::Error);
    }

    #[test]
    fn test_predict_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "dx", "predict", "-s", "fever", "-s", "cough", "--severity", "fever=2",
        ])
        .expect("valid args");
        match cli.command {
            Commands::Predict {
                symptoms,
                severities,
                ..
            } => {
                assert_eq!(symptoms, vec!["fever", "cough"]);
                assert_eq!(severities, vec!["fever=2"]);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_predict_requires_a_symptom() {
        assert!(Cli::try_parse_from(["dx", "predict"]).is_err());
    }
}
