//! HTTP endpoint exposing the tracer.
//!
//! Provides two endpoints:
//! - `POST /api/trace` - runs one trace and returns the result as JSON
//! - `GET /health` - liveness check
//!
//! Concurrent requests are served concurrently; each one is an independent
//! trace sharing only the immutable HTTP client.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error_handling::ServerError;

use handlers::{health_handler, trace_handler};
pub use types::{ErrorBody, ServerState, TraceRequest};

/// Builds the endpoint router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/trace", post(trace_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds the listener described by `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let address = config.listen_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind { address, source })
}

/// Serves the endpoint on `listener` until `state.shutdown` is cancelled.
///
/// Cancelling the token also stops in-flight traces at their next hop
/// boundary, so shutdown does not wait for slow redirect chains.
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Trace server listening on http://{}/", addr);
        log::info!("  - Trace: POST http://{}/api/trace", addr);
        log::info!("  - Health: GET http://{}/health", addr);
    }

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(ServerError::Serve)?;

    log::info!("Trace server stopped");
    Ok(())
}

/// Binds and serves in one call.
pub async fn start_server(config: &ServerConfig, state: ServerState) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve(listener, state).await
}
