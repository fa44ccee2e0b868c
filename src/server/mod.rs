//! JSON API over the selected-stock store and the chart analyses.

mod error;
mod routes;
mod session;
mod state;

pub use {error::ApiError, state::AppState};

use {
    anyhow::{Context, Result},
    axum::Router,
    std::{net::SocketAddr, sync::Arc},
    tower_http::cors::CorsLayer,
};

pub fn router(state: Arc<AppState>) -> Router {
    routes::api_router()
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    log::info!("stock-lens listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {e}");
        return;
    }
    log::info!("Shutdown signal received, gracefully stopping…");
}
