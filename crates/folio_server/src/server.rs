//! Listener startup.

use axum::Router;
use folio_error::{FolioResult, ServerError, ServerErrorKind};

/// Bind `addr` and serve `router` until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[tracing::instrument(skip(router))]
pub async fn serve(router: Router, addr: &str) -> FolioResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind(format!("{}: {}", addr, e)))
    })?;

    tracing::info!(addr, "Folio server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    Ok(())
}
