//! HTTP redirect chain tracing.
//!
//! This module follows redirect chains manually, one request per hop, so that
//! every intermediate response (status, headers, `Location`, timing) is
//! recorded. Transport-level redirect following is always disabled; the
//! tracer decides what to follow.
//!
//! A trace never fails as a Rust error. Invalid input, network faults,
//! redirect loops and an exhausted redirect budget all end up in
//! `TraceResult::error` next to whatever hops were recorded.

mod classify;
mod request;
mod resolve;
mod types;

use std::time::Instant;

use chrono::Utc;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::error_handling::{
    categorize_reqwest_error, error_chain_message, InitializationError, TraceError,
};
use crate::initialization::init_redirect_client;

pub use classify::{describe_status, status_category, StatusCategory};
pub use resolve::{has_http_scheme, resolve_location, validate_trace_url};
pub use types::{Hop, HopTiming, PartialTraceOptions, TraceOptions, TraceOutcome, TraceResult};

use request::RequestHeaders;

/// Follows redirect chains hop by hop.
///
/// Holds only an immutable HTTP client, so one tracer can serve any number of
/// concurrent traces. Each call owns its own hop list and counters.
///
/// # Example
///
/// ```no_run
/// use redirect_trace::{RedirectTracer, TraceOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tracer = RedirectTracer::with_default_client()?;
/// let result = tracer.trace("https://example.com", &TraceOptions::default()).await;
/// for hop in &result.hops {
///     println!("{} {}", hop.status_code, hop.url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RedirectTracer {
    client: reqwest::Client,
}

/// A failed hop request, with whatever the transport still reported.
struct HopFailure {
    error: TraceError,
    partial: Option<Hop>,
}

impl From<TraceError> for HopFailure {
    fn from(error: TraceError) -> Self {
        Self {
            error,
            partial: None,
        }
    }
}

/// Mutable state of one trace in progress.
struct TraceState {
    initial_url: String,
    hops: Vec<Hop>,
    redirect_count: u32,
}

impl TraceState {
    fn new(url: &str) -> Self {
        Self {
            initial_url: url.to_string(),
            hops: Vec::new(),
            redirect_count: 0,
        }
    }

    fn visited(&self, url: &str) -> bool {
        self.hops.iter().any(|hop| hop.url == url)
    }

    /// Records any partial hop carried by a failure and returns its error.
    fn absorb(&mut self, failure: HopFailure) -> TraceError {
        if let Some(hop) = failure.partial {
            self.hops.push(hop);
        }
        failure.error
    }

    fn finish(self, started: Instant, failure: Option<TraceError>) -> TraceResult {
        let final_url = self
            .hops
            .last()
            .map(|hop| hop.url.clone())
            .unwrap_or_else(|| self.initial_url.clone());
        TraceResult {
            initial_url: self.initial_url,
            final_url,
            hops: self.hops,
            redirect_count: self.redirect_count,
            total_time_ms: Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
            error: failure.map(|e| e.to_string()),
        }
    }
}

impl RedirectTracer {
    /// Creates a tracer around an existing client.
    ///
    /// The client must have redirect following disabled
    /// (`reqwest::redirect::Policy::none()`), otherwise intermediate hops are
    /// invisible to the tracer.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates a tracer with a client from [`init_redirect_client`].
    pub fn with_default_client() -> Result<Self, InitializationError> {
        Ok(Self::new(init_redirect_client()?))
    }

    /// Traces `url` and returns every hop up to the terminal response.
    ///
    /// `url` must already carry an `http://` or `https://` scheme; callers
    /// normalize user input first (see `validate_and_normalize_url`).
    pub async fn trace(&self, url: &str, options: &TraceOptions) -> TraceResult {
        self.trace_with_cancel(url, options, &CancellationToken::new())
            .await
    }

    /// Like [`trace`](Self::trace), but stops as soon as `cancel` fires.
    ///
    /// The token is checked before each hop and raced against each in-flight
    /// request. A cancelled trace keeps the hops recorded so far.
    pub async fn trace_with_cancel(
        &self,
        url: &str,
        options: &TraceOptions,
        cancel: &CancellationToken,
    ) -> TraceResult {
        let started = Instant::now();
        let mut state = TraceState::new(url);

        if let Err(e) = validate_trace_url(url) {
            info!("Rejected trace input: {}", e);
            return state.finish(started, Some(e));
        }

        let outcome = if options.follow_redirects {
            self.follow_chain(&mut state, options, cancel).await
        } else {
            match self.fetch_hop(url, options, cancel).await {
                Ok(hop) => {
                    state.hops.push(hop);
                    Ok(())
                }
                Err(failure) => Err(state.absorb(failure)),
            }
        };

        let result = state.finish(started, outcome.err());
        debug!(
            "Traced {} -> {} ({} hop(s), {} redirect(s), {:?}ms)",
            result.initial_url,
            result.final_url,
            result.hops.len(),
            result.redirect_count,
            result.total_time_ms
        );
        result
    }

    async fn follow_chain(
        &self,
        state: &mut TraceState,
        options: &TraceOptions,
        cancel: &CancellationToken,
    ) -> Result<(), TraceError> {
        let mut current = state.initial_url.clone();

        loop {
            let hop = match self.fetch_hop(&current, options, cancel).await {
                Ok(hop) => hop,
                Err(failure) => return Err(state.absorb(failure)),
            };
            let location = hop.redirect_location().map(str::to_owned);
            state.hops.push(hop);

            let Some(location) = location else {
                return Ok(());
            };

            let next = resolve_location(&current, &location)?;

            // The looping redirect is neither recorded nor counted.
            if state.visited(&next) {
                info!("Circular redirect from {} back to {}", current, next);
                return Err(TraceError::RedirectLoop);
            }

            if state.redirect_count >= options.max_redirects {
                info!(
                    "Redirect limit ({}) reached at {}",
                    options.max_redirects, current
                );
                return Err(TraceError::RedirectLimitExceeded(options.max_redirects));
            }

            state.redirect_count += 1;
            current = next;
        }
    }

    /// Builds the GET for one hop.
    ///
    /// `options.timeout()` is the only time limit on the hop; the client
    /// carries no separate connect timeout that could undercut it.
    fn hop_request(&self, url: &str, options: &TraceOptions) -> reqwest::RequestBuilder {
        RequestHeaders::apply_to_request_builder(self.client.get(url))
            .header(reqwest::header::USER_AGENT, options.user_agent.as_str())
            .timeout(options.timeout())
    }

    /// Issues one GET without following redirects and records the response.
    async fn fetch_hop(
        &self,
        url: &str,
        options: &TraceOptions,
        cancel: &CancellationToken,
    ) -> Result<Hop, HopFailure> {
        if cancel.is_cancelled() {
            return Err(TraceError::Cancelled.into());
        }

        let request = self.hop_request(url, options);

        let start = Utc::now().timestamp_millis();
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TraceError::Cancelled.into()),
            response = request.send() => response,
        };
        let timing = HopTiming::new(start, Utc::now().timestamp_millis());

        match response {
            Ok(response) => {
                let hop = Hop::from_response(url, &response, timing);
                debug!(
                    "{} {} ({}ms){}",
                    hop.status_code,
                    url,
                    timing.duration,
                    hop.location
                        .as_deref()
                        .map(|l| format!(" -> {l}"))
                        .unwrap_or_default()
                );
                Ok(hop)
            }
            Err(e) => {
                let message = error_chain_message(&e);
                warn!("{} for {}: {}", categorize_reqwest_error(&e), url, message);
                let partial = e.status().map(|status| Hop::partial(url, status, timing));
                Err(HopFailure {
                    error: TraceError::Network(message),
                    partial,
                })
            }
        }
    }
}
