//! OpenAI-compatible completion driver for Folio.
//!
//! [`OpenAICompatibleClient`] posts prompts to `{base_url}/chat/completions`
//! on any OpenAI-compatible API. The bundled configuration points it at
//! Cerebras with the key read from `CEREBRAS_API_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use folio_core::{FolioConfig, GenerateRequest};
//! use folio_interface::CompletionDriver;
//! use folio_models::OpenAICompatibleClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FolioConfig::load()?;
//! let client = OpenAICompatibleClient::from_provider_config(config.provider())?;
//!
//! let response = client.generate(&GenerateRequest::from_prompt("Say hello")).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod request;
mod response;

pub use client::OpenAICompatibleClient;
pub use config::ClientConfig;
pub use convert::{from_chat_response, to_chat_request};
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatMessage};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
