//! Provider selection from configuration.

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::{CliError, Result};
use orderform_domain::traits::LlmProvider;
use orderform_llm::{gemini, LlmError, MockProvider, OllamaProvider, GeminiProvider};

/// Fallback Ollama model when none is configured
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// The configured extraction provider.
pub enum Provider {
    /// Scripted offline provider
    Mock(MockProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
    /// Google Gemini API
    Gemini(GeminiProvider),
}

impl Provider {
    /// Build the provider described by `settings`.
    ///
    /// The Gemini API key is read from the environment variable the settings
    /// name; it is never stored in the config file.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        match settings.kind {
            ProviderKind::Mock => Ok(Provider::Mock(MockProvider::new(
                settings.mock_response.as_deref().unwrap_or("{}"),
            ))),
            ProviderKind::Ollama => {
                let model = settings.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
                let provider = match &settings.endpoint {
                    Some(endpoint) => OllamaProvider::new(endpoint, model)?,
                    None => OllamaProvider::default_endpoint(model)?,
                };
                Ok(Provider::Ollama(provider.with_max_retries(settings.max_retries)))
            }
            ProviderKind::Gemini => {
                let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
                    CliError::Config(format!(
                        "Gemini API key not found: set the {} environment variable",
                        settings.api_key_env
                    ))
                })?;
                let model = settings.model.as_deref().unwrap_or(gemini::DEFAULT_MODEL);
                let mut provider = GeminiProvider::new(api_key, model)?;
                if let Some(endpoint) = &settings.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                Ok(Provider::Gemini(provider.with_max_retries(settings.max_retries)))
            }
        }
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::Mock(provider) => provider.generate(prompt),
            Provider::Ollama(provider) => provider.generate(prompt),
            Provider::Gemini(provider) => provider.generate(prompt),
        }
    }

    fn generate_structured(
        &self,
        prompt: &str,
        schema_hint: &str,
    ) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::Mock(provider) => provider.generate_structured(prompt, schema_hint),
            Provider::Ollama(provider) => provider.generate_structured(prompt, schema_hint),
            Provider::Gemini(provider) => provider.generate_structured(prompt, schema_hint),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::Mock(provider) => provider.model_name(),
            Provider::Ollama(provider) => provider.model_name(),
            Provider::Gemini(provider) => provider.model_name(),
        }
    }
}
