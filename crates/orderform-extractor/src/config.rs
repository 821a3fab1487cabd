//! Extraction job settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chunking, timeout, and fan-out settings for one extraction job
///
/// Missing keys in TOML fall back to [`ExtractorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Characters per chunk
    pub max_chunk_size: usize,

    /// Per-call provider deadline in seconds
    pub extraction_timeout_secs: u64,

    /// Chunks extracted concurrently; 1 processes them strictly in sequence
    pub max_concurrency: usize,

    /// Request the provider's JSON output mode
    pub json_mode: bool,
}

impl Default for ExtractorConfig {
    /// Sequential extraction in 5000-character chunks
    fn default() -> Self {
        Self {
            max_chunk_size: 5_000,
            extraction_timeout_secs: 120,
            max_concurrency: 1,
            json_mode: true,
        }
    }
}

impl ExtractorConfig {
    /// Smaller chunks, a one-minute deadline, four calls in flight
    pub fn aggressive() -> Self {
        Self {
            max_chunk_size: 3_000,
            extraction_timeout_secs: 60,
            max_concurrency: 4,
            ..Self::default()
        }
    }

    /// Large chunks and a five-minute deadline for slow local models
    pub fn lenient() -> Self {
        Self {
            max_chunk_size: 10_000,
            extraction_timeout_secs: 300,
            ..Self::default()
        }
    }

    /// Per-call provider deadline
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Reject settings the extractor cannot run with
    pub fn validate(&self) -> Result<(), String> {
        let zero = [
            ("max_chunk_size", self.max_chunk_size == 0),
            ("extraction_timeout_secs", self.extraction_timeout_secs == 0),
            ("max_concurrency", self.max_concurrency == 0),
        ];
        match zero.iter().find(|(_, is_zero)| *is_zero) {
            Some((name, _)) => Err(format!("{} must be greater than 0", name)),
            None => Ok(()),
        }
    }

    /// Parse from a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Invalid extractor config: {}", e))
    }

    /// Render as a TOML document
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Cannot render extractor config: {}", e))
    }
}
