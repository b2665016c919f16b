//! Conversion between Folio and chat completion API types

use crate::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage};
use folio_core::{FinishReason, GenerateRequest, GenerateResponse};
use folio_error::{ProviderError, ProviderErrorKind};

/// Convert a GenerateRequest into a chat completion request for `model`.
///
/// A model named on the request takes precedence over `model`.
#[tracing::instrument(skip(request))]
pub fn to_chat_request(
    request: &GenerateRequest,
    model: &str,
) -> Result<ChatCompletionRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::new(ProviderErrorKind::Configuration(
            "Request must contain at least one message".into(),
        )));
    }

    let messages = request
        .messages
        .iter()
        .map(|m| ChatMessage::new(m.role.to_string(), m.content.clone()))
        .collect::<Vec<_>>();

    ChatCompletionRequestBuilder::default()
        .model(request.model.clone().unwrap_or_else(|| model.to_string()))
        .messages(messages)
        .max_tokens(request.max_tokens)
        .temperature(request.temperature)
        .build()
        .map_err(|e| {
            ProviderError::new(ProviderErrorKind::Configuration(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Convert a chat completion response into a GenerateResponse using the first choice.
#[tracing::instrument(skip(response))]
pub fn from_chat_response(
    response: &ChatCompletionResponse,
) -> Result<GenerateResponse, ProviderError> {
    let choice = response
        .choices()
        .first()
        .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?;

    if let Some(usage) = response.usage() {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens(),
            completion_tokens = usage.completion_tokens(),
            "Token usage"
        );
    }

    Ok(GenerateResponse {
        text: choice.message().content().clone(),
        finish_reason: choice
            .finish_reason()
            .as_deref()
            .map(FinishReason::from_provider),
    })
}
