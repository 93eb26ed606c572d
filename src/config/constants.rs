//! Configuration constants.
//!
//! This module defines the defaults used by the tracer, the trace endpoint
//! and the CLI.

/// Default User-Agent string sent on every hop.
///
/// Mimics a current desktop Chrome on Windows. Sites commonly serve different
/// redirects (or block outright) when the User-Agent looks like a bot, so the
/// default is a realistic browser string rather than the reqwest default.
///
/// Users can override this via the `--user-agent` CLI flag or the
/// `options.userAgent` field of a trace request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Per-hop request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// Redirect handling
/// Maximum number of redirects followed before a trace gives up
pub const DEFAULT_MAX_REDIRECTS: u32 = 20;

/// Maximum URL length (2048 characters) accepted from callers.
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Trace endpoint
/// Address the trace endpoint binds to by default (loopback only)
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Port the trace endpoint listens on by default
pub const DEFAULT_PORT: u16 = 8787;
