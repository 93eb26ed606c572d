//! Trace endpoint data structures.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::trace::{PartialTraceOptions, RedirectTracer, TraceOptions};

/// Shared state for the trace endpoint.
///
/// Holds no per-trace data: every request gets its own trace invocation.
#[derive(Clone)]
pub struct ServerState {
    /// Shared tracer; cloning it shares the HTTP client
    pub tracer: RedirectTracer,
    /// Defaults that request options are merged onto
    pub defaults: TraceOptions,
    /// Cancelled on shutdown; in-flight traces stop at their next hop boundary
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// State with default trace options and a fresh shutdown token.
    pub fn new(tracer: RedirectTracer) -> Self {
        Self {
            tracer,
            defaults: TraceOptions::default(),
            shutdown: CancellationToken::new(),
        }
    }
}

/// Body of `POST /api/trace`.
///
/// `url` is optional at the type level so that a missing field can be
/// answered with 400 instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct TraceRequest {
    /// URL to trace; normalized before tracing
    pub url: Option<String>,
    /// Per-request overrides of the server's default options
    #[serde(default)]
    pub options: Option<PartialTraceOptions>,
}

/// JSON body for 4xx/5xx responses of the endpoint itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Why the request was rejected
    pub error: String,
}
