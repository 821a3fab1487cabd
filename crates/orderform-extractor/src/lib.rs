//! Orderform Extractor
//!
//! Turns the raw text of a payroll services order form into one canonical
//! record using an LLM.
//!
//! # Architecture
//!
//! ```text
//! RawText → TextChunker → PromptBuilder → LlmProvider → parser → ResultMerger → CanonicalRecord
//! ```
//!
//! # Key Features
//!
//! - **Chunking**: contiguous, lossless, character-bounded chunks
//! - **One call per chunk**: no retries at this layer; provider errors fail the job
//! - **Degraded chunks**: unparseable responses are kept as raw text and skipped by the merge
//! - **Explicit merge policy**: see [`FIELD_POLICIES`]
//! - **Bounded fan-out**: optional concurrent calls, merged in chunk order
//!
//! # Example Usage
//!
//! ```no_run
//! use orderform_extractor::{Extractor, ExtractorConfig};
//! use orderform_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"client": {"dsp_name": "Acme Logistics"}}"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let result = extractor.extract("DSP Name: Acme Logistics").await?;
//!
//! println!("Chunks: {}", result.metadata.chunk_count);
//! println!("Degraded: {}", result.metadata.degraded_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod merge;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::TextChunker;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use merge::{merge, FieldSlot, MergePolicy, ResultMerger, FIELD_POLICIES};
pub use parser::{clean_response, parse_chunk_response};
pub use prompt::{PromptBuilder, SCHEMA_HINT};
pub use types::{DegradedChunk, ExtractionMetadata, ExtractionResult};
