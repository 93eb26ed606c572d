//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, timeouts, limits)
//! - CLI option types and parsing
//! - Server configuration

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, LogFormat, LogLevel, OutputFormat, ServeArgs, ServerConfig, TraceArgs};
