//! HTTP client initialization.

use reqwest::ClientBuilder;

use crate::config::DEFAULT_USER_AGENT;

/// Initializes the HTTP client used for redirect tracing.
///
/// Creates a `reqwest::Client` with redirects disabled so every hop can be
/// inspected manually. Status codes are never turned into errors by reqwest
/// unless `error_for_status` is called, so 3xx/4xx/5xx responses all arrive
/// as ordinary responses.
///
/// No client-wide timeouts are configured: the per-hop timeout from the trace
/// options is set on each request and bounds connect, send and receive
/// together. The `User-Agent` here is only a fallback.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client() -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(DEFAULT_USER_AGENT)
        .build()
}
