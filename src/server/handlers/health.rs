//! Liveness handler.

use axum::http::StatusCode;

/// Always answers `200 ok` while the server is accepting connections.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
