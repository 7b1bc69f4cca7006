//! Extract the resolution inputs from an incoming HTTP request.

use crate::config::DomainConfig;
use crate::resolve::DocRequest;
use tiny_http::Request;

/// Build a [`DocRequest`] from a tiny_http request.
pub fn doc_request(request: &Request, domain: &DomainConfig) -> DocRequest {
    doc_request_from_parts(
        header(request, "Host"),
        header(request, "X-Forwarded-Proto"),
        request.url(),
        domain,
    )
}

/// Build a [`DocRequest`] from raw header values.
///
/// Requests without a `Host` header are treated as addressed to the
/// production domain. The scheme trusts `X-Forwarded-Proto` from a fronting
/// proxy, falling back to the configured scheme.
pub fn doc_request_from_parts(
    host: Option<&str>,
    forwarded_proto: Option<&str>,
    url: &str,
    domain: &DomainConfig,
) -> DocRequest {
    let host = host
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(&domain.production);

    let scheme = forwarded_proto
        .and_then(|p| p.split(',').next())
        .map(str::trim)
        .filter(|p| matches!(*p, "http" | "https"))
        .unwrap_or(&domain.scheme);

    DocRequest::new(scheme, host, url)
}

fn header<'a>(request: &'a Request, name: &'static str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str())
}
