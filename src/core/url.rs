//! Small helpers for the raw request line and `Host` header.
//!
//! Paths stay exactly as received (no percent-decoding) so absolute URLs
//! rebuilt from them compare byte-for-byte with redirect targets.

/// Split `path?query#fragment` into the path and the rest (including `?`/`#`).
pub fn split_query(full_path: &str) -> (&str, &str) {
    match full_path.find(['?', '#']) {
        Some(idx) => full_path.split_at(idx),
        None => (full_path, ""),
    }
}

/// Host header without port, lowercased.
///
/// Handles bracketed IPv6 literals (`[::1]:8000` -> `[::1]`).
pub fn hostname(host: &str) -> String {
    let host = host.trim();
    let name = if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Whether `target` names its own host, either as a full URL or in the
/// protocol-relative `//host/path` form.
pub fn is_absolute(target: &str) -> bool {
    is_protocol_relative(target) || url::Url::parse(target).is_ok_and(|url| url.has_host())
}

/// `//host/path`: absolute, but inherits the scheme of the request.
pub fn is_protocol_relative(target: &str) -> bool {
    target.starts_with("//")
}
