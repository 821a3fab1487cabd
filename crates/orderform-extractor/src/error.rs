//! Error types for the Extractor

use thiserror::Error;

/// Errors that abort a whole extraction job
///
/// Unparseable provider output is not one of these: it becomes a degraded
/// chunk and the job carries on.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error on chunk {chunk}: {message}")]
    Llm {
        /// Zero-based chunk index
        chunk: usize,
        /// Provider error text
        message: String,
    },

    /// Provider call did not finish in time
    #[error("Extraction timeout on chunk {0}")]
    Timeout(usize),

    /// A worker task panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
