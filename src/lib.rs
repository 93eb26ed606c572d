//! redirect_trace library: hop-by-hop HTTP redirect tracing
//!
//! This library follows the redirect chain of a URL one request at a time,
//! recording each hop's status code, headers, `Location` and timing, and
//! reports how the chain ended (terminal response, loop, redirect limit or
//! network fault).
//!
//! # Example
//!
//! ```no_run
//! use redirect_trace::{normalize_url, RedirectTracer, TraceOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tracer = RedirectTracer::with_default_client()?;
//! let url = normalize_url("example.com");
//! let result = tracer.trace(&url, &TraceOptions::default()).await;
//!
//! println!("{} -> {} ({} redirects)", result.initial_url, result.final_url, result.redirect_count);
//! if let Some(error) = &result.error {
//!     println!("trace stopped: {error}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod server;
mod trace;

// Re-export public API
pub use app::{first_url_line, normalize_url, render_text, validate_and_normalize_url};
pub use config::{LogFormat, LogLevel, ServerConfig};
pub use error_handling::{
    categorize_reqwest_error, ErrorType, InitializationError, ServerError, TraceError,
};
pub use trace::{
    describe_status, has_http_scheme, resolve_location, status_category, Hop, HopTiming,
    PartialTraceOptions, RedirectTracer, StatusCategory, TraceOptions, TraceOutcome, TraceResult,
};
