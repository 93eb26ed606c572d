//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_MAX_REDIRECTS, DEFAULT_PORT, DEFAULT_TIMEOUT_MS,
    DEFAULT_USER_AGENT,
};
use crate::trace::TraceOptions;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the `trace` subcommand prints its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON in the same shape the trace endpoint returns
    Json,
    /// One line per hop, followed by a summary
    Text,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Trace a single URL (https:// is assumed when no scheme is given)
/// redirect_trace trace example.com
///
/// # Only inspect the first response
/// redirect_trace trace http://example.com --no-follow
///
/// # Run the trace endpoint
/// redirect_trace serve --port 8787
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_trace",
    version,
    about = "Traces the redirect chain of a URL hop by hop."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trace one URL and print the result
    Trace(TraceArgs),
    /// Serve the trace endpoint over HTTP
    Serve(ServeArgs),
}

/// Arguments of the `trace` subcommand.
#[derive(Debug, Args)]
pub struct TraceArgs {
    /// URL to trace. Only the first non-empty line is used when several are given.
    #[arg(value_parser)]
    pub url: String,

    /// HTTP User-Agent header value sent on every hop
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-hop request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Make a single request and report it without following any redirect
    #[arg(long)]
    pub no_follow: bool,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: u32,

    /// Output format: json|text
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl TraceArgs {
    /// Builds the tracer options described by these arguments.
    pub fn to_options(&self) -> TraceOptions {
        TraceOptions {
            user_agent: self.user_agent.clone(),
            timeout_ms: self.timeout_ms,
            follow_redirects: !self.no_follow,
            max_redirects: self.max_redirects,
        }
    }
}

/// Arguments of the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind the trace endpoint to
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

/// Trace endpoint configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use redirect_trace::ServerConfig;
///
/// let config = ServerConfig {
///     port: 9000,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind: String,
    /// Port to listen on (0 picks a free port)
    pub port: u16,
}

impl ServerConfig {
    /// Returns the `host:port` string the listener binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self {
            bind: args.bind.clone(),
            port: args.port,
        }
    }
}
