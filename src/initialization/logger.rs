//! Logger initialization.
//!
//! `env_logger` with two output formats: colored plain text for terminals and
//! one JSON object per line for log collectors.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first, then `level` overrides the global filter and the
/// crate's own module. HTTP plumbing crates are capped at `info` so that
/// `--log-level debug` shows hops rather than connection-pool chatter.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-hop debug output
/// redirect_trace --log-level debug trace example.com
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=redirect_trace=debug,hyper_util=info redirect_trace serve
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("redirect_trace", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    level_emoji(level),
                    record.target().cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

/// Renders one structured log line.
fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let text = level.to_string();
    match level {
        Level::Error => text.red(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.blue(),
        Level::Trace => text.purple(),
    }
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}
