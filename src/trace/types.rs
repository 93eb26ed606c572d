//! Trace data structures.
//!
//! These types are serialized verbatim as the trace endpoint's response body,
//! so field names follow the wire contract (camelCase, `steps`, `totalTime`).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use crate::error_handling::{
    CANCELLED_MESSAGE, INVALID_LOCATION_MESSAGE, INVALID_URL_MESSAGE, REDIRECT_LIMIT_MESSAGE,
    REDIRECT_LOOP_MESSAGE,
};

use super::classify::{describe_status, status_category, StatusCategory};

/// Options controlling a single trace.
///
/// # Examples
///
/// ```
/// use redirect_trace::TraceOptions;
///
/// let options = TraceOptions {
///     max_redirects: 5,
///     ..Default::default()
/// };
/// assert!(options.follow_redirects);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Sent as the `User-Agent` header on every hop
    pub user_agent: String,
    /// Per-hop request timeout in milliseconds
    pub timeout_ms: u64,
    /// When false, exactly one request is made and reported
    pub follow_redirects: bool,
    /// Maximum number of redirects followed before giving up
    pub max_redirects: u32,
}

impl TraceOptions {
    /// Per-hop timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Trace options as they arrive on the wire, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTraceOptions {
    /// `userAgent`
    pub user_agent: Option<String>,
    /// `timeoutMs`
    pub timeout_ms: Option<u64>,
    /// `followRedirects`
    pub follow_redirects: Option<bool>,
    /// `maxRedirects`
    pub max_redirects: Option<u32>,
}

impl PartialTraceOptions {
    /// Fills every missing field from `base`.
    pub fn merge_onto(self, base: TraceOptions) -> TraceOptions {
        TraceOptions {
            user_agent: self.user_agent.unwrap_or(base.user_agent),
            timeout_ms: self.timeout_ms.unwrap_or(base.timeout_ms),
            follow_redirects: self.follow_redirects.unwrap_or(base.follow_redirects),
            max_redirects: self.max_redirects.unwrap_or(base.max_redirects),
        }
    }
}

/// Client-side timing of one hop, in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopTiming {
    /// Request sent
    pub start: i64,
    /// Response head received
    pub end: i64,
    /// Always `end - start`
    pub duration: i64,
}

impl HopTiming {
    /// Builds a timing record with `duration = end - start`.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            duration: end.saturating_sub(start),
        }
    }
}

/// One request/response pair in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    /// URL requested for this hop
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase as sent by the server
    pub status_text: String,
    /// Response headers keyed by lower-cased name; repeated headers keep the last value
    pub headers: BTreeMap<String, String>,
    /// Raw `Location` header value, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Client-side timing, absent only for hops rebuilt from stored data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<HopTiming>,
}

impl Hop {
    /// Returns the `Location` value when this hop is a followable redirect.
    ///
    /// Any status outside 300..=399, or a 3xx without `Location`, is terminal.
    pub fn redirect_location(&self) -> Option<&str> {
        if (300..400).contains(&self.status_code) {
            self.location.as_deref()
        } else {
            None
        }
    }

    /// Standard description of this hop's status code.
    pub fn describe(&self) -> &'static str {
        describe_status(self.status_code)
    }

    /// Status class of this hop.
    pub fn category(&self) -> StatusCategory {
        status_category(self.status_code)
    }
}

/// Outcome of a complete trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResult {
    /// The URL the trace started from
    pub initial_url: String,
    /// URL of the last recorded hop, or the initial URL when nothing was recorded
    pub final_url: String,
    /// Every recorded hop, in request order
    #[serde(rename = "steps")]
    pub hops: Vec<Hop>,
    /// Number of redirects actually followed
    pub redirect_count: u32,
    /// Wall-clock duration of the whole trace in milliseconds
    #[serde(rename = "totalTime", default, skip_serializing_if = "Option::is_none")]
    pub total_time_ms: Option<u64>,
    /// Set exactly when the trace did not end in a clean terminal response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Classification of how a trace ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceOutcome {
    /// Reached a terminal response (2xx, any 4xx/5xx, or a 3xx without `Location`)
    Success,
    /// The input URL or a redirect target was not a usable http(s) URL
    InvalidInput,
    /// A request failed at the transport level
    NetworkFault,
    /// A redirect pointed back to an already visited URL
    RedirectLoop,
    /// The redirect limit was reached while still being redirected
    RedirectLimitExceeded,
    /// The caller cancelled the trace
    Cancelled,
}

impl TraceResult {
    /// Classifies this result from its `error` field.
    pub fn outcome(&self) -> TraceOutcome {
        match self.error.as_deref() {
            None => TraceOutcome::Success,
            Some(REDIRECT_LOOP_MESSAGE) => TraceOutcome::RedirectLoop,
            Some(CANCELLED_MESSAGE) => TraceOutcome::Cancelled,
            Some(e) if e.starts_with(REDIRECT_LIMIT_MESSAGE) => TraceOutcome::RedirectLimitExceeded,
            Some(e) if e.starts_with(INVALID_URL_MESSAGE) || e.starts_with(INVALID_LOCATION_MESSAGE) => {
                TraceOutcome::InvalidInput
            }
            Some(_) => TraceOutcome::NetworkFault,
        }
    }

    /// The last recorded hop, if any.
    pub fn final_hop(&self) -> Option<&Hop> {
        self.hops.last()
    }

    /// Whether the trace ended without an error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::TraceError;

    fn hop(status: u16, location: Option<&str>) -> Hop {
        Hop {
            url: "https://a.example/".to_string(),
            status_code: status,
            status_text: String::new(),
            headers: BTreeMap::new(),
            location: location.map(str::to_string),
            timing: None,
        }
    }

    #[test]
    fn test_trace_options_default() {
        let options = TraceOptions::default();
        assert_eq!(options.timeout_ms, 10_000);
        assert_eq!(options.max_redirects, 20);
        assert!(options.follow_redirects);
        assert!(options.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(options.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_options_merge() {
        let partial: PartialTraceOptions =
            serde_json::from_str(r#"{"followRedirects": false, "maxRedirects": 2}"#)
                .expect("valid options");
        let merged = partial.merge_onto(TraceOptions::default());
        assert!(!merged.follow_redirects);
        assert_eq!(merged.max_redirects, 2);
        assert_eq!(merged.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(merged.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_redirect_location_requires_3xx() {
        assert_eq!(hop(301, Some("/b")).redirect_location(), Some("/b"));
        assert_eq!(hop(308, Some("/b")).redirect_location(), Some("/b"));
        assert_eq!(hop(200, Some("/b")).redirect_location(), None);
        assert_eq!(hop(404, Some("/b")).redirect_location(), None);
        assert_eq!(hop(302, None).redirect_location(), None);
    }

    #[test]
    fn test_hop_timing_duration() {
        let timing = HopTiming::new(1_000, 1_250);
        assert_eq!(timing.duration, 250);
    }

    #[test]
    fn test_trace_result_wire_names() {
        let result = TraceResult {
            initial_url: "https://a.example/".to_string(),
            final_url: "https://a.example/".to_string(),
            hops: vec![hop(200, None)],
            redirect_count: 0,
            total_time_ms: Some(12),
            error: None,
        };
        let value = serde_json::to_value(&result).expect("serializable");
        assert_eq!(value["initialUrl"], "https://a.example/");
        assert_eq!(value["finalUrl"], "https://a.example/");
        assert_eq!(value["redirectCount"], 0);
        assert_eq!(value["totalTime"], 12);
        assert_eq!(value["steps"][0]["statusCode"], 200);
        assert!(value["steps"][0]["headers"].is_object());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_outcome_classification() {
        let mut result = TraceResult {
            initial_url: "https://a.example/".to_string(),
            final_url: "https://a.example/".to_string(),
            hops: Vec::new(),
            redirect_count: 0,
            total_time_ms: None,
            error: None,
        };
        assert_eq!(result.outcome(), TraceOutcome::Success);

        result.error = Some("Circular redirect detected".to_string());
        assert_eq!(result.outcome(), TraceOutcome::RedirectLoop);

        result.error = Some("Maximum number of redirects (3) reached".to_string());
        assert_eq!(result.outcome(), TraceOutcome::RedirectLimitExceeded);

        result.error = Some("Invalid URL: example.com".to_string());
        assert_eq!(result.outcome(), TraceOutcome::InvalidInput);

        result.error = Some("error sending request: dns error".to_string());
        assert_eq!(result.outcome(), TraceOutcome::NetworkFault);
        assert!(!result.is_success());
    }

    #[test]
    fn test_outcome_agrees_with_every_trace_error() {
        let errors = [
            TraceError::InvalidUrl("example.com (relative URL without a base)".into()),
            TraceError::InvalidLocation("ftp://x/ (unsupported scheme ftp)".into()),
            TraceError::Network("error sending request: connection refused".into()),
            TraceError::RedirectLoop,
            TraceError::RedirectLimitExceeded(0),
            TraceError::RedirectLimitExceeded(20),
            TraceError::Cancelled,
        ];

        for error in errors {
            let result = TraceResult {
                initial_url: "https://a.example/".to_string(),
                final_url: "https://a.example/".to_string(),
                hops: Vec::new(),
                redirect_count: 0,
                total_time_ms: None,
                error: Some(error.to_string()),
            };
            assert_eq!(result.outcome(), error.outcome(), "misclassified: {error}");
        }
    }
}
