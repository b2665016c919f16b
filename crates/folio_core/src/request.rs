//! Request and response types for completion providers.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Provider-neutral completion request.
///
/// # Examples
///
/// ```
/// use folio_core::{GenerateRequestBuilder, Message};
///
/// let request = GenerateRequestBuilder::default()
///     .messages(vec![Message::user("Topic: mars")])
///     .max_tokens(Some(4096))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(4096));
/// assert!(request.model.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier overriding the driver default
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Request carrying a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            ..Default::default()
        }
    }
}

/// Why generation stopped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string.
    ///
    /// ```
    /// use folio_core::FinishReason;
    ///
    /// assert_eq!(FinishReason::from_provider("length"), FinishReason::Length);
    /// assert_eq!(FinishReason::from_provider("tool_calls"), FinishReason::Other);
    /// ```
    pub fn from_provider(reason: &str) -> Self {
        match reason {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Other,
        }
    }
}

/// Text returned by a completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw completion text
    pub text: String,
    /// Why the provider stopped generating, when reported
    pub finish_reason: Option<FinishReason>,
}

impl GenerateResponse {
    /// Response with text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
        }
    }
}
