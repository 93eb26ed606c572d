//! URL validation and `Location` resolution.

use url::Url;

use crate::error_handling::TraceError;

/// Returns true when `url` starts with `http://` or `https://` (any case).
pub fn has_http_scheme(url: &str) -> bool {
    let starts_with = |prefix: &str| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// Checks that a URL handed to the tracer is an absolute http(s) URL.
pub fn validate_trace_url(url: &str) -> Result<(), TraceError> {
    if !has_http_scheme(url) {
        return Err(TraceError::InvalidUrl(format!(
            "{url} (must start with http:// or https://)"
        )));
    }
    Url::parse(url).map_err(|e| TraceError::InvalidUrl(format!("{url} ({e})")))?;
    Ok(())
}

/// Resolves a `Location` header value against the URL of the hop that sent it.
///
/// Absolute, protocol-relative (`//host/path`) and relative references
/// (including `..` segments) follow standard URL reference resolution. The
/// result must still be an http(s) URL.
pub fn resolve_location(base: &str, location: &str) -> Result<String, TraceError> {
    let base = Url::parse(base).map_err(|e| TraceError::InvalidUrl(format!("{base} ({e})")))?;
    let resolved = base
        .join(location.trim())
        .map_err(|e| TraceError::InvalidLocation(format!("{location} ({e})")))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved.to_string()),
        scheme => Err(TraceError::InvalidLocation(format!(
            "{location} (unsupported scheme {scheme})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_location() {
        let next = resolve_location("https://a.example/start", "https://b.example/")
            .expect("absolute location resolves");
        assert_eq!(next, "https://b.example/");
    }

    #[test]
    fn test_resolve_parent_relative_location() {
        let next = resolve_location("https://a.example/x/y", "../z").expect("relative resolves");
        assert_eq!(next, "https://a.example/z");
    }

    #[test]
    fn test_resolve_root_relative_location() {
        let next =
            resolve_location("http://a.example:8080/x/y?q=1", "/login").expect("resolves");
        assert_eq!(next, "http://a.example:8080/login");
    }

    #[test]
    fn test_resolve_sibling_relative_location() {
        let next = resolve_location("https://a.example/x/y", "z?next=1").expect("resolves");
        assert_eq!(next, "https://a.example/x/z?next=1");
    }

    #[test]
    fn test_resolve_protocol_relative_location() {
        let next = resolve_location("http://a.example/x", "//cdn.example/asset")
            .expect("protocol-relative resolves");
        assert_eq!(next, "http://cdn.example/asset");
    }

    #[test]
    fn test_resolve_rejects_non_http_scheme() {
        let err = resolve_location("https://a.example/", "ftp://files.example/")
            .expect_err("ftp is not traceable");
        assert!(matches!(err, TraceError::InvalidLocation(_)));
    }

    #[test]
    fn test_resolve_rejects_garbage_location() {
        let err = resolve_location("https://a.example/", "http://[::1")
            .expect_err("malformed host");
        assert!(err.to_string().starts_with("Invalid redirect location"));
    }

    #[test]
    fn test_has_http_scheme() {
        assert!(has_http_scheme("http://a.example"));
        assert!(has_http_scheme("https://a.example"));
        assert!(has_http_scheme("HTTPS://a.example"));
        assert!(!has_http_scheme("a.example"));
        assert!(!has_http_scheme("ftp://a.example"));
        assert!(!has_http_scheme("http:/a.example"));
        assert!(!has_http_scheme(""));
    }

    #[test]
    fn test_validate_trace_url() {
        assert!(validate_trace_url("https://a.example/").is_ok());
        assert!(matches!(
            validate_trace_url("a.example"),
            Err(TraceError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_trace_url("http://"),
            Err(TraceError::InvalidUrl(_))
        ));
    }
}
