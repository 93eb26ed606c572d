//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_trace` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use redirect_trace::config::{Cli, Command, OutputFormat, ServeArgs, TraceArgs};
use redirect_trace::initialization::init_logger_with;
use redirect_trace::server::{self, ServerState};
use redirect_trace::{render_text, validate_and_normalize_url, RedirectTracer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; RUST_LOG may be set there
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let tracer = RedirectTracer::with_default_client().context("Failed to initialize HTTP client")?;

    match cli.command {
        Command::Trace(args) => run_trace(&tracer, &args).await,
        Command::Serve(args) => run_server(tracer, &args).await,
    }
}

async fn run_trace(tracer: &RedirectTracer, args: &TraceArgs) -> Result<()> {
    let Some(url) = validate_and_normalize_url(&args.url) else {
        eprintln!("redirect_trace error: not a traceable URL: {}", args.url.trim());
        process::exit(1);
    };

    let result = tracer.trace(&url, &args.to_options()).await;

    match args.output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).context("Failed to serialize trace result")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text(&result)),
    }

    if result.error.is_some() {
        process::exit(1);
    }
    Ok(())
}

async fn run_server(tracer: RedirectTracer, args: &ServeArgs) -> Result<()> {
    let config = ServerConfig::from(args);
    let state = ServerState::new(tracer);

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutdown requested");
        }
        shutdown.cancel();
    });

    server::start_server(&config, state)
        .await
        .context("Trace server failed")
}
