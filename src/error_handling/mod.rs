//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization and the trace endpoint
//! - The trace failure taxonomy reported through `TraceResult::error`
//! - Categorization of transport errors for logging
//!
//! The tracer itself never returns an error: every failure listed in
//! `TraceError` is converted into the `error` string of the result.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, error_chain_message};
pub use types::{ErrorType, InitializationError, ServerError, TraceError};
pub(crate) use types::{
    CANCELLED_MESSAGE, INVALID_LOCATION_MESSAGE, INVALID_URL_MESSAGE, REDIRECT_LIMIT_MESSAGE,
    REDIRECT_LOOP_MESSAGE,
};
