//! Result types for extraction jobs

use orderform_domain::CanonicalRecord;
use serde::Serialize;
use uuid::Uuid;

/// Result of one extraction job
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// The reconciled record for the whole document
    pub record: CanonicalRecord,

    /// Chunks whose responses could not be parsed
    pub degraded: Vec<DegradedChunk>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// A chunk whose provider response did not parse into a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradedChunk {
    /// Zero-based chunk index
    pub index: usize,

    /// The cleaned response text
    pub raw_text: String,
}

/// Metadata about an extraction job
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Identifier of this job (time-ordered)
    pub job_id: Uuid,

    /// Timestamp when extraction finished (seconds since the Unix epoch)
    pub timestamp: u64,

    /// Name of the LLM model used
    pub model_name: String,

    /// Number of chunks the text was split into
    pub chunk_count: usize,

    /// Number of chunks that degraded
    pub degraded_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
