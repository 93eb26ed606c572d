//! Status code descriptions and categories.

use serde::{Deserialize, Serialize};

/// Status class of an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    /// Outside 200..=599
    #[serde(rename = "none")]
    None,
    /// 200..=299
    #[serde(rename = "2xx")]
    Success,
    /// 300..=399
    #[serde(rename = "3xx")]
    Redirect,
    /// 400..=499
    #[serde(rename = "4xx")]
    ClientError,
    /// 500..=599
    #[serde(rename = "5xx")]
    ServerError,
}

impl StatusCategory {
    /// Wire label (`"none"`, `"2xx"` ... `"5xx"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::None => "none",
            StatusCategory::Success => "2xx",
            StatusCategory::Redirect => "3xx",
            StatusCategory::ClientError => "4xx",
            StatusCategory::ServerError => "5xx",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the standard reason phrase for well-known status codes.
///
/// This is a fixed table, not derived from ranges: anything not listed
/// (including valid but uncommon codes such as 418) is `"Unknown Status"`.
pub fn describe_status(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        306 => "Switch Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown Status",
    }
}

/// Buckets a status code into its class using half-open ranges.
pub fn status_category(code: u16) -> StatusCategory {
    match code {
        200..=299 => StatusCategory::Success,
        300..=399 => StatusCategory::Redirect,
        400..=499 => StatusCategory::ClientError,
        500..=599 => StatusCategory::ServerError,
        _ => StatusCategory::None,
    }
}
