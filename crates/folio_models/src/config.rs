//! Connection settings for an OpenAI-compatible endpoint.

use folio_core::ProviderConfig;
use folio_error::{ProviderError, ProviderErrorKind};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.cerebras.ai/v1")
    pub base_url: String,
    /// Model identifier to use for inference
    pub model: String,
    /// Bearer key sent with every request
    pub api_key: Option<String>,
    /// Default completion length cap
    pub max_tokens: Option<u32>,
    /// Default sampling temperature
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration without an API key
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Build from the `[provider]` section, reading the key from its environment variable.
    ///
    /// `.env` files are loaded first.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or empty.
    pub fn from_provider_config(provider: &ProviderConfig) -> Result<Self, ProviderError> {
        let _ = dotenvy::dotenv();

        let var = provider.api_key_env();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::Configuration(format!(
                    "{} not set",
                    var
                )))
            })?;

        Ok(Self {
            base_url: provider.base_url().clone(),
            model: provider.model().clone(),
            api_key: Some(api_key),
            max_tokens: *provider.max_tokens(),
            temperature: *provider.temperature(),
        })
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_trims_slash() {
        let config = ClientConfig::new("http://localhost:8080/v1/", "m");
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("http://x", "m").with_api_key("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let provider: ProviderConfig = serde_json::from_value(serde_json::json!({
            "base_url": "http://x",
            "model": "m",
            "api_key_env": "FOLIO_TEST_KEY_THAT_IS_NEVER_SET",
        }))
        .unwrap();
        let err = ClientConfig::from_provider_config(&provider).unwrap_err();
        assert!(matches!(err.kind, ProviderErrorKind::Configuration(_)));
    }
}
