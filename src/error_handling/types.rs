//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::trace::TraceOutcome;

// Leading text of each `TraceError` message; `TraceResult::outcome` matches on these.
pub(crate) const INVALID_URL_MESSAGE: &str = "Invalid URL";
pub(crate) const INVALID_LOCATION_MESSAGE: &str = "Invalid redirect location";
pub(crate) const REDIRECT_LOOP_MESSAGE: &str = "Circular redirect detected";
pub(crate) const REDIRECT_LIMIT_MESSAGE: &str = "Maximum number of redirects";
pub(crate) const CANCELLED_MESSAGE: &str = "Trace cancelled";

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for the trace endpoint.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("Failed to bind trace server to {address}: {source}")]
    Bind {
        /// `host:port` the bind was attempted on
        address: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error after binding.
    #[error("Trace server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Reasons a trace did not end in a clean terminal response.
///
/// The tracer never propagates these; their `Display` output is what ends up
/// in `TraceResult::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The URL given to the tracer has no http(s) scheme or does not parse.
    #[error("{}: {}", INVALID_URL_MESSAGE, .0)]
    InvalidUrl(String),

    /// A `Location` header could not be resolved against the hop's URL.
    #[error("{}: {}", INVALID_LOCATION_MESSAGE, .0)]
    InvalidLocation(String),

    /// DNS, connect, TLS or timeout failure while issuing a request.
    #[error("{0}")]
    Network(String),

    /// The next redirect target was already visited in this trace.
    #[error("{}", REDIRECT_LOOP_MESSAGE)]
    RedirectLoop,

    /// The configured redirect limit was reached while still being redirected.
    #[error("{} ({}) reached", REDIRECT_LIMIT_MESSAGE, .0)]
    RedirectLimitExceeded(u32),

    /// The caller cancelled the trace.
    #[error("{}", CANCELLED_MESSAGE)]
    Cancelled,
}

impl TraceError {
    /// How a trace that failed with this error is classified.
    pub fn outcome(&self) -> TraceOutcome {
        match self {
            TraceError::InvalidUrl(_) | TraceError::InvalidLocation(_) => {
                TraceOutcome::InvalidInput
            }
            TraceError::Network(_) => TraceOutcome::NetworkFault,
            TraceError::RedirectLoop => TraceOutcome::RedirectLoop,
            TraceError::RedirectLimitExceeded(_) => TraceOutcome::RedirectLimitExceeded,
            TraceError::Cancelled => TraceOutcome::Cancelled,
        }
    }
}

/// Categories of transport failures, used when logging network faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// The request could not be built (bad URL, invalid header)
    HttpRequestBuilderError,
    /// The per-hop timeout elapsed
    HttpRequestTimeoutError,
    /// DNS, TCP or TLS connection failure
    HttpRequestConnectError,
    /// Failure while sending the request
    HttpRequestRequestError,
    /// Failure reading the response body
    HttpRequestBodyError,
    /// Failure decoding the response
    HttpRequestDecodeError,
    /// Error status surfaced by `error_for_status`
    HttpRequestStatusError,
    /// Anything reqwest does not classify
    HttpRequestOtherError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestStatusError => "HTTP request status error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
        }
    }
}
