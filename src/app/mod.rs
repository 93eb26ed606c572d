//! Caller-side helpers shared by the CLI and the trace endpoint.

pub mod output;
pub mod url;

// Re-export public API
pub use output::render_text;
pub use url::{first_url_line, normalize_url, validate_and_normalize_url};
