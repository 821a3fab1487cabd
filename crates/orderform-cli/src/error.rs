//! Error types for the CLI application.

use orderform_extractor::ExtractorError;
use orderform_gatekeeper::GatekeeperError;
use orderform_llm::LlmError;
use orderform_sheets::{FormatError, SheetError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider setup error
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Extraction job failed
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// Record failed validation
    #[error(transparent)]
    Rejected(#[from] GatekeeperError),

    /// Record could not be formatted
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Row could not be appended
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),
}
