//! Gemini Provider Implementation
//!
//! Calls the Google Generative Language `generateContent` endpoint. The API
//! key is passed in by the caller (typically read from an environment
//! variable); this crate never looks it up on its own.

use crate::retry::{http_error, send_error, with_backoff, Attempt};
use crate::runtime::block_on;
use crate::LlmError;
use orderform_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for order-form extraction
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when `api_key` is empty.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("Gemini API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Generate text with the Gemini API
    ///
    /// With `json_mode` the response MIME type is pinned to
    /// `application/json`.
    pub async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: json_mode.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let url = self.url();
        let url = url.as_str();
        let request = &request_body;
        with_backoff("Gemini", self.max_retries, move || self.attempt(url, request)).await
    }

    async fn attempt(
        &self,
        url: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<Attempt<String>, LlmError> {
        let sent = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(e) => return Ok(Attempt::Retry(send_error(e))),
        };

        let status = response.status();
        match status {
            reqwest::StatusCode::NOT_FOUND => Err(LlmError::ModelNotAvailable(self.model.clone())),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => Err(
                LlmError::NotConfigured(format!("Gemini rejected the API key (HTTP {})", status)),
            ),
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                Ok(Attempt::Retry(LlmError::RateLimitExceeded))
            }
            _ if !status.is_success() => Ok(Attempt::Retry(http_error(response).await)),
            _ => {
                let body: GenerateContentResponse = response.json().await.map_err(|e| {
                    LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                let text = body.into_text().ok_or_else(|| {
                    LlmError::InvalidResponse("Response has no candidates".to_string())
                })?;
                debug!("Gemini returned {} chars", text.len());
                Ok(Attempt::Done(text))
            }
        }
    }
}

impl LlmProviderTrait for GeminiProvider {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_rejected() {
        let result = GeminiProvider::new("  ", DEFAULT_MODEL);
        assert!(matches!(result, Err(LlmError::NotConfigured(_))));
    }

    #[test]
    fn test_url_includes_model() {
        let provider = GeminiProvider::new("key", "gemini-test")
            .unwrap()
            .with_endpoint("http://localhost:8089/v1beta/");
        assert_eq!(
            provider.url(),
            "http://localhost:8089/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: "hello" }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("{\"a\": 1}"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.into_text().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let provider = GeminiProvider::new("key", DEFAULT_MODEL)
            .unwrap()
            .with_endpoint("http://127.0.0.1:9")
            .with_max_retries(1);
        let result = provider.complete("test", true).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
