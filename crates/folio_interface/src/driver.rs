//! Completion provider trait.

use async_trait::async_trait;
use folio_core::{GenerateRequest, GenerateResponse};
use folio_error::FolioResult;

/// Core trait every completion backend implements.
///
/// One call is one round: the prompt goes out, the completion text comes
/// back. Drivers do not retry.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse>;

    /// Provider name (e.g., "cerebras", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "qwen-3-235b-a22b-instruct-2507").
    fn model_name(&self) -> &str;
}
