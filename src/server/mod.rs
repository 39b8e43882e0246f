// HTTP query surface over a passenger repository.

mod routes;

pub use routes::{create_router, ApiError, SharedRepository};

use crate::utils::error::Result;
use tokio::net::TcpListener;

/// Serves the API on `addr` until Ctrl-C.
pub async fn serve(addr: &str, repo: SharedRepository) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(repo))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
