//! Caller-side URL normalization.
//!
//! The tracer only accepts absolute http(s) URLs. Everything that turns user
//! input into such a URL lives here: trimming, taking the first line of a
//! pasted batch, and defaulting to `https://`.

use log::warn;

use crate::config::MAX_URL_LENGTH;
use crate::trace::has_http_scheme;

/// Returns the first non-empty, trimmed line of `input`.
///
/// Batch input is accepted but only its first entry is traced.
pub fn first_url_line(input: &str) -> Option<&str> {
    input.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Normalizes raw input into something the tracer can be handed.
///
/// Takes the first non-empty line and prepends `https://` when no http(s)
/// scheme is present. No validation happens here: whatever comes out is
/// passed to the tracer, which reports unusable URLs in its result.
pub fn normalize_url(input: &str) -> String {
    let line = first_url_line(input).unwrap_or_default();
    if line.is_empty() || has_http_scheme(line) {
        line.to_string()
    } else {
        format!("https://{line}")
    }
}

/// Validates and normalizes a URL.
///
/// Like [`normalize_url`], but additionally rejects input that is empty, longer
/// than `MAX_URL_LENGTH` (before or after adding the scheme), or does not parse
/// as an http(s) URL. Logs a warning and returns `None` in those cases.
pub fn validate_and_normalize_url(input: &str) -> Option<String> {
    let Some(line) = first_url_line(input) else {
        warn!("Skipping empty URL input");
        return None;
    };

    if line.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            line.len(),
            MAX_URL_LENGTH,
            line.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = normalize_url(line);
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Some(normalized)
            }
            _ => {
                warn!("Skipping unsupported URL: {line}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {line}");
            None
        }
    }
}
