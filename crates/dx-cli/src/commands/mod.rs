//! Command implementations and the loading helpers they share.

pub(crate) mod conditions;
pub(crate) mod importances;
pub(crate) mod predict;
pub(crate) mod symptoms;

use crate::error::{CliError, Result};
use log::info;
use std::path::Path;
use symptom_dx::catalog::Catalog;
use symptom_dx::config::EngineConfig;
use symptom_dx::engine::DiagnosisEngine;

fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// The catalog at `path`, or the built-in one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            validate_path(path)?;
            let catalog = Catalog::from_path(path)?;
            info!("loaded {} conditions from {}", catalog.len(), path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::reference()),
    }
}

/// The config at `path`, or the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            validate_path(path)?;
            Ok(EngineConfig::from_path(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Loads catalog and config, then trains an engine.
pub(crate) fn load_engine(
    catalog: Option<&Path>,
    config: Option<&Path>,
) -> Result<DiagnosisEngine> {
    let catalog = load_catalog(catalog)?;
    let config = load_config(config)?;
    Ok(DiagnosisEngine::new(catalog, config)?)
}
