//! Local models served by Ollama
//!
//! Talks to `/api/generate` with streaming off. In structured mode the
//! request sets `"format": "json"` so the model is constrained to emit one
//! JSON value.
//!
//! ```no_run
//! use orderform_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1").unwrap();
//! ```

use crate::retry::{http_error, send_error, with_backoff, Attempt};
use crate::runtime::block_on;
use crate::LlmError;
use orderform_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Where a stock Ollama install listens
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// HTTP timeout per request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama-backed provider
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Provider for `model` on the server at `endpoint`
    ///
    /// A trailing `/` on the endpoint is ignored.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Provider for `model` on [`DEFAULT_ENDPOINT`]
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Attempts per call (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion, retrying transient failures
    ///
    /// A 404 means the model is not pulled and is not retried.
    pub async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: json_mode.then_some("json"),
        };

        let url = url.as_str();
        let request = &request;
        with_backoff("Ollama", self.max_retries, move || self.attempt(url, request)).await
    }

    async fn attempt(
        &self,
        url: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<Attempt<String>, LlmError> {
        let response = match self.client.post(url).json(request).send().await {
            Ok(response) => response,
            Err(e) => return Ok(Attempt::Retry(send_error(e))),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            return Ok(Attempt::Retry(http_error(response).await));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        debug!("Ollama returned {} chars", body.response.len());
        Ok(Attempt::Done(body.response))
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(self.complete(prompt, false))?
    }

    fn generate_structured(&self, prompt: &str, _schema_hint: &str) -> Result<String, Self::Error> {
        block_on(self.complete(prompt, true))?
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
