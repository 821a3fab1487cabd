//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates.

use crate::row::FormattedRow;

/// Trait for generative extraction providers
///
/// Implemented by the infrastructure layer (orderform-llm). Prompt in, text
/// out; the call may fail.
pub trait LlmProvider {
    /// Error type for provider operations
    type Error;

    /// Generate a free-form text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with the provider's JSON output mode, if it has one
    ///
    /// `schema_hint` names the expected top-level shape; providers without a
    /// structured mode fall back to [`LlmProvider::generate`].
    fn generate_structured(&self, prompt: &str, schema_hint: &str) -> Result<String, Self::Error>;

    /// Name of the model answering the prompts, recorded in job metadata
    fn model_name(&self) -> &str;
}

/// Trait for the destination spreadsheet
///
/// Implemented by orderform-sheets. Rows are appended verbatim; no schema
/// negotiation happens with the destination.
pub trait SheetAppender {
    /// Error type for append operations
    type Error;

    /// Append one row after the last existing row
    fn append_row(&mut self, row: &FormattedRow) -> Result<(), Self::Error>;
}
