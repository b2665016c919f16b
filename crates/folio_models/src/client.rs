use crate::{convert, ChatCompletionRequest, ChatCompletionResponse, ClientConfig};
use folio_core::{GenerateRequest, GenerateResponse, ProviderConfig};
use folio_error::{FolioResult, ProviderError, ProviderErrorKind};
use folio_interface::CompletionDriver;
use tracing::instrument;

/// Client for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl OpenAICompatibleClient {
    /// Create a new client
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: ClientConfig) -> Self {
        tracing::debug!("Creating completion client");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the `[provider]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key variable is unset.
    pub fn from_provider_config(provider: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(ClientConfig::from_provider_config(provider)?))
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let mut req = self
            .client
            .post(&url)
            .json(request)
            .header("Content-Type", "application/json");

        if let Some(api_key) = &self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Provider returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            }));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            ProviderError::new(ProviderErrorKind::Deserialization(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

#[async_trait::async_trait]
impl CompletionDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(messages = req.messages.len()))]
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let mut req = req.clone();
        req.max_tokens = req.max_tokens.or(self.config.max_tokens);
        req.temperature = req.temperature.or(self.config.temperature);

        let chat_request = convert::to_chat_request(&req, &self.config.model)?;
        let response = self.chat_completion(&chat_request).await?;
        Ok(convert::from_chat_response(&response)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
