//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use orderform_extractor::ExtractorConfig;
use orderform_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extraction provider
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Chunking, timeout and concurrency
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Record checks before formatting
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Destination sheet
    #[serde(default)]
    pub sheet: SheetSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which provider backs extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Scripted offline provider
    Mock,
    /// Local Ollama server
    Ollama,
    /// Google Gemini API
    Gemini,
}

/// Provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Provider kind
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    /// API endpoint (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable holding the Gemini API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Attempts per provider call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed reply of the mock provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_response: Option<String>,
}

/// Destination sheet settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSettings {
    /// JSON-lines file rows are appended to
    #[serde(default = "default_sheet_path")]
    pub path: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".orderform").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if there is no file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.extractor.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            endpoint: None,
            model: None,
            api_key_env: default_api_key_env(),
            max_retries: default_max_retries(),
            mock_response: None,
        }
    }
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            path: default_sheet_path(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_kind() -> ProviderKind {
    ProviderKind::Gemini
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_sheet_path() -> PathBuf {
    PathBuf::from("orders.jsonl")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
