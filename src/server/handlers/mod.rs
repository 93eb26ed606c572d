//! Trace endpoint HTTP handlers.

mod health;
mod trace;

pub use health::health_handler;
pub use trace::trace_handler;
