//! Error types for dx-cli

use std::path::PathBuf;
use std::process::ExitCode;
use symptom_dx::DxError;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Not a file (e.g., directory)
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Bad symptoms or severities; the user can correct and retry
    #[error("{0}")]
    InvalidInput(DxError),

    /// Catalog or config that cannot produce an engine
    #[error("{0}")]
    InvalidSetup(DxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else the engine reports
    #[error("Engine error: {0}")]
    Engine(DxError),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::from(2),
            Self::FileNotFound(_) | Self::NotAFile(_) => ExitCode::from(3),
            Self::InvalidSetup(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(7),
            Self::Engine(_) => ExitCode::from(1),
        }
    }
}

impl From<DxError> for CliError {
    fn from(e: DxError) -> Self {
        match e {
            e if e.is_input_error() => Self::InvalidInput(e),
            DxError::InvalidCatalog { .. }
            | DxError::InvalidHyperparameter { .. }
            | DxError::Serialization(_) => Self::InvalidSetup(e),
            DxError::Io(io) => Self::Io(io),
            e => Self::Engine(e),
        }
    }
}
