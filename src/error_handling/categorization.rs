//! Transport error categorization.

use std::error::Error as StdError;

use super::types::ErrorType;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Timeouts are checked before connect errors because a connect timeout
/// reports both.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_status() {
        ErrorType::HttpRequestStatusError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Formats an error together with its source chain.
///
/// reqwest's own `Display` is only "error sending request for url (...)";
/// the useful part (connection refused, dns error, timed out) lives in the
/// sources. Consecutive duplicate messages are collapsed.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if parts.last() != Some(&msg) {
            parts.push(msg);
        }
        source = cause.source();
    }
    parts.join(": ")
}
