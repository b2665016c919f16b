//! HTTP transport command handler.

use folio_core::FolioConfig;
use folio_error::FolioResult;
use folio_interface::CompletionDriver;
use folio_narrative::ContinuationExecutor;
use folio_server::{AppState, create_router, serve};

/// Handle `folio serve`.
pub async fn handle_serve<D: CompletionDriver + 'static>(
    executor: ContinuationExecutor<D>,
    config: &FolioConfig,
    bind: Option<String>,
) -> FolioResult<()> {
    let addr = bind.unwrap_or_else(|| config.server().bind().clone());
    tracing::info!(
        addr = %addr,
        provider = executor.driver().provider_name(),
        model = executor.driver().model_name(),
        protocol = %executor.protocol(),
        "Starting Folio server"
    );

    let router = create_router(AppState::new(executor));
    serve(router, &addr).await
}
