//! Orderform LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from
//! `orderform-domain`. The extractor receives one of these as an explicitly
//! constructed value, so tests can substitute a fake.
//!
//! # Providers
//!
//! - `MockProvider`: scripted replies, no network
//! - `OllamaProvider`: a local Ollama server
//! - `GeminiProvider`: Google Gemini `generateContent`
//!
//! # Examples
//!
//! ```
//! use orderform_llm::MockProvider;
//! use orderform_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"client": null}"#);
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, r#"{"client": null}"#);
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod ollama;
mod retry;
mod runtime;

use orderform_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Provider call failures
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport failure or unexpected HTTP status
    #[error("Provider communication failed: {0}")]
    Communication(String),

    /// Response body did not have the expected shape
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    /// Provider asked us to slow down
    #[error("Provider rate limit hit")]
    RateLimitExceeded,

    /// Provider does not serve the requested model
    #[error("Unknown model: {0}")]
    ModelNotAvailable(String),

    /// Provider is missing credentials or settings
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Anything else
    #[error("Provider error: {0}")]
    Other(String),
}

/// A scripted reply for prompts containing a marker
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    /// (marker, reply) pairs checked in insertion order
    by_marker: Vec<(String, Scripted)>,
    /// Replies handed out in call order once no marker matched
    sequence: VecDeque<String>,
    prompts: Vec<String>,
}

/// Offline provider with scripted replies
///
/// Returns pre-configured responses without making any network calls.
/// Replies are chosen in this order: the first registered marker contained
/// in the prompt, then the next queued sequence reply, then the default.
///
/// # Examples
///
/// ```
/// use orderform_llm::MockProvider;
/// use orderform_domain::traits::LlmProvider;
///
/// // Route by chunk content
/// let mut provider = MockProvider::default();
/// provider.add_response("PAGE 1", "first");
/// provider.add_response("PAGE 2", "second");
/// assert_eq!(provider.generate("... PAGE 2 ...").unwrap(), "second");
///
/// // Or hand out replies in call order
/// let provider = MockProvider::sequence(["a", "b"]);
/// assert_eq!(provider.generate("x").unwrap(), "a");
/// assert_eq!(provider.generate("x").unwrap(), "b");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Reply with `response` to every unscripted prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider that replies with `responses` in call order
    ///
    /// Once the queue is exhausted the default response (`"{}"`) is used.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new("{}");
        provider
            .state()
            .sequence
            .extend(responses.into_iter().map(Into::into));
        provider
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reply with `response` to any prompt containing `marker`
    pub fn add_response(&mut self, marker: impl Into<String>, response: impl Into<String>) {
        self.state()
            .by_marker
            .push((marker.into(), Scripted::Reply(response.into())));
    }

    /// Fail any prompt containing `marker`
    pub fn add_error(&mut self, marker: impl Into<String>) {
        self.state().by_marker.push((marker.into(), Scripted::Fail));
    }

    /// Calls made so far
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let scripted = state
            .by_marker
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(state
                .sequence
                .pop_front()
                .unwrap_or_else(|| self.default_response.clone())),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema_hint: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
