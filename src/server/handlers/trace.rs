//! Trace handler.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{ErrorBody, ServerState, TraceRequest};
use crate::app::normalize_url;
use crate::trace::TraceResult;

/// Runs one trace per request.
///
/// - `200` with the trace result for every completed trace, including traces
///   whose `error` field is set
/// - `400` when the body is not a JSON object or has no `url` field
/// - `500` when the result cannot be serialized
pub async fn trace_handler(State(state): State<ServerState>, body: Bytes) -> Response {
    let request: TraceRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::debug!("Rejected malformed trace request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"));
        }
    };

    let Some(raw_url) = request.url else {
        return error_response(StatusCode::BAD_REQUEST, "URL is required".to_string());
    };

    let url = normalize_url(&raw_url);
    let options = request
        .options
        .unwrap_or_default()
        .merge_onto(state.defaults.clone());

    log::info!("Tracing {}", url);
    let result = state
        .tracer
        .trace_with_cancel(&url, &options, &state.shutdown)
        .await;

    json_response(&result)
}

fn json_response(result: &TraceResult) -> Response {
    match serde_json::to_string(result) {
        Ok(json) => (
            StatusCode::OK,
            [("content-type", "application/json")],
            json,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to serialize trace result: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize trace result: {e}"),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
    (status, [("content-type", "application/json")], body).into_response()
}
