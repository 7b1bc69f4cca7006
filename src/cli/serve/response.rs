//! HTTP response handlers.

use crate::embed::not_found_page;
use crate::resolve::{DocRequest, NotFoundOutcome};
use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a file from the documentation tree.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond to a request whose page does not exist.
pub fn respond_not_found(
    request: Request,
    outcome: NotFoundOutcome,
    doc: &DocRequest,
) -> Result<()> {
    match outcome {
        NotFoundOutcome::Redirect(redirect) => {
            crate::debug!(
                "redirect";
                "{} -> {} ({})",
                doc.absolute_url(),
                redirect.location,
                redirect.status
            );
            let location = Header::from_bytes("Location", redirect.location.as_bytes())
                .map_err(|()| anyhow!("invalid redirect location `{}`", redirect.location))?;
            let response = Response::empty(StatusCode(redirect.status)).with_header(location);
            request.respond(response)?;
            Ok(())
        }
        NotFoundOutcome::Custom(page) => {
            crate::debug!("404"; "{}", page.resolved.full.display());
            if is_head_request(&request) {
                return send_head(request, 404, page.content_type);
            }
            send_body(request, 404, page.content_type, page.body)
        }
        NotFoundOutcome::Default => {
            if is_head_request(&request) {
                return send_head(request, 404, HTML);
            }
            let body = not_found_page(doc.path());
            send_body(request, 404, HTML, body.into_bytes())
        }
    }
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with 405 for anything other than GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

/// Methods the server answers; everything else gets 405.
pub fn is_supported_method(method: &Method) -> bool {
    matches!(method, Method::Get | Method::Head)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    // Static ASCII names and values always form a valid header
    Header::from_bytes(key, value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_methods() {
        assert!(is_supported_method(&Method::Get));
        assert!(is_supported_method(&Method::Head));
        assert!(!is_supported_method(&Method::Post));
        assert!(!is_supported_method(&Method::Delete));
    }

    #[test]
    fn test_static_headers() {
        let header = make_header("Content-Type", HTML);
        assert!(header.field.equiv("content-type"));
        assert_eq!(header.value.as_str(), HTML);
    }
}
