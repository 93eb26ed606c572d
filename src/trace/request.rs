//! Hop request building and response extraction.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;

use super::types::{Hop, HopTiming};

/// Browser-like request headers sent on every hop.
///
/// Sites often pick a different redirect target for clients that do not look
/// like a browser (or answer 403), so each hop carries the headers a desktop
/// Chrome navigation would. `User-Agent` is set separately from the trace
/// options.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// Copies response headers into a map keyed by lower-cased name.
///
/// Repeated headers keep the last value. Values that are not valid UTF-8 are
/// converted lossily rather than dropped.
pub fn extract_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (name, value) in headers {
        map.insert(
            name.as_str().to_ascii_lowercase(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    map
}

/// Reads the raw `Location` header, if any.
pub fn extract_location(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LOCATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Canonical reason phrase for a status code, empty when it has none.
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Reason phrase as the server sent it.
///
/// hyper only stores the phrase in the response extensions when it differs
/// from the canonical one, so a missing extension means the canonical phrase
/// (or HTTP/2, which has no phrase at all).
pub fn response_status_text(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => status_text(response.status()),
    }
}

impl Hop {
    /// Builds a hop from a received response.
    pub fn from_response(url: &str, response: &reqwest::Response, timing: HopTiming) -> Self {
        Self {
            status_text: response_status_text(response),
            ..Self::from_parts(url, response.status(), response.headers(), Some(timing))
        }
    }

    /// Builds a hop from a status code and header map.
    pub fn from_parts(
        url: &str,
        status: StatusCode,
        headers: &HeaderMap,
        timing: Option<HopTiming>,
    ) -> Self {
        Self {
            url: url.to_string(),
            status_code: status.as_u16(),
            status_text: status_text(status),
            headers: extract_headers(headers),
            location: extract_location(headers),
            timing,
        }
    }

    /// Best-effort hop for a failed request that still reported a status.
    pub fn partial(url: &str, status: StatusCode, timing: HopTiming) -> Self {
        Self::from_parts(url, status, &HeaderMap::new(), Some(timing))
    }
}
