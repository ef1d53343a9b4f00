mod error;
mod handler;
mod params;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
pub use error::ApiError;
pub use params::SpotParams;
use spots::{PostgresSpotStore, SpotContext, StoreConfig};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn build_router(context: Arc<SpotContext>) -> Router {
    Router::new()
        .route("/spots", get(handler::get_spots))
        .with_state(context)
        .layer(TraceLayer::new_for_http())
}

/// Connects to the store, then serves until Ctrl-C or SIGTERM. The store
/// connection is released after the last in-flight request completes.
pub async fn server(tcp_addr: String, store_config: StoreConfig) -> Result<()> {
    let store = PostgresSpotStore::connect(&store_config)
        .await
        .with_context(|| format!("Failed to reach spot store {store_config:?}"))?;
    let store = Arc::new(store);
    let context = Arc::new(SpotContext::new(store.clone()));

    let listener = TcpListener::bind(&tcp_addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {tcp_addr}"))?;
    info!("listening on {tcp_addr}");

    axum::serve(listener, build_router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("spot store connection closed");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
