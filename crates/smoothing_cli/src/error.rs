//! Error types for the gausswalk CLI.

use thiserror::Error;

use crate::config::ConfigError;
use smoothing_core::types::SmoothingError;
use smoothing_walk::SynthesisError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Synthesis error
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Kernel construction error
    #[error("Kernel error: {0}")]
    Kernel(#[from] SmoothingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error
    #[error("CSV serialisation error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
