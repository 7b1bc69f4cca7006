//! Request resolution for hosted documentation.
//!
//! ```text
//! request ──► classify ──► try_redirect ──► (virtual host?) candidate search ──► default 404
//!                │                                   │
//!                └── path + layout ◄─────────────────┘
//! ```
//!
//! | Module      | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `path`      | Canonical relative paths, `ResolvedPath`          |
//! | `layout`    | Public/private tree selection                     |
//! | `redirect`  | Redirect rules, self-redirect loop suppression    |
//! | `classify`  | Host/path to project, language, version, file     |
//! | `not_found` | Missing-page orchestration                        |

mod classify;
mod layout;
mod not_found;
mod path;
mod redirect;

pub use classify::{Classified, DocPath, classify};
pub use layout::{Layout, select_root};
pub use not_found::{CANDIDATE_FILES, CustomPage, NotFoundOutcome, NotFoundResolver};
pub use path::{ResolvedPath, join_within, resolve_path};
pub use redirect::{Redirect, RedirectOutcome, try_redirect};

use crate::core::url::{is_absolute, is_protocol_relative, split_query};

/// The parts of an HTTP request resolution depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    /// `http` or `https`.
    pub scheme: String,
    /// `Host` header as sent, port included.
    pub host: String,
    /// Path plus query exactly as sent.
    pub full_path: String,
}

impl DocRequest {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        full_path: impl Into<String>,
    ) -> Self {
        let full_path = full_path.into();
        let full_path = if full_path.starts_with('/') {
            full_path
        } else {
            format!("/{full_path}")
        };
        Self {
            scheme: scheme.into(),
            host: host.into(),
            full_path,
        }
    }

    /// Build from an absolute URL such as `https://pip.example.io/en/v1/?q=1`.
    pub fn from_url(url: &url::Url) -> Option<Self> {
        let host = url.host_str()?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let full_path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        Some(Self::new(url.scheme(), host, full_path))
    }

    /// Path without query string or fragment.
    pub fn path(&self) -> &str {
        split_query(&self.full_path).0
    }

    /// Fully-qualified URL of this request.
    pub fn absolute_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.full_path)
    }

    /// Absolute URL for a redirect target seen from this request.
    ///
    /// Full URLs pass through, `//host/...` takes this request's scheme and
    /// anything else is a path on this request's host.
    pub fn absolute_for(&self, target: &str) -> String {
        if is_protocol_relative(target) {
            return format!("{}:{}", self.scheme, target);
        }
        if is_absolute(target) {
            return target.to_string();
        }
        let path = target.trim_start_matches('/');
        format!("{}://{}/{}", self.scheme, self.host, path)
    }
}

/// Failures absorbed while resolving a missing page, named for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no custom 404 page for `{0}`")]
    NotFound(String),
    #[error("Infinite Redirect: FROM URL is the same than TO URL. url={0}")]
    RedirectLoop(String),
    #[error("content store unavailable: {0}")]
    StoreUnavailable(#[from] crate::store::StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_request_absolute_url() {
        let request = DocRequest::new("https", "pip.example.io", "/en/v1/?q=1");
        assert_eq!(request.absolute_url(), "https://pip.example.io/en/v1/?q=1");
        assert_eq!(request.path(), "/en/v1/");
        assert_eq!(request.absolute_for("/new/"), "https://pip.example.io/new/");
    }

    #[test]
    fn test_absolute_for_targets() {
        let request = DocRequest::new("https", "pip.example.io", "/old/");
        assert_eq!(request.absolute_for("new/"), "https://pip.example.io/new/");
        assert_eq!(request.absolute_for(""), "https://pip.example.io/");
        assert_eq!(
            request.absolute_for("http://other.example.org/x"),
            "http://other.example.org/x"
        );
        assert_eq!(
            request.absolute_for("//cdn.example.org/x"),
            "https://cdn.example.org/x"
        );
    }

    #[test]
    fn test_doc_request_adds_leading_slash() {
        let request = DocRequest::new("http", "localhost", "en/");
        assert_eq!(request.full_path, "/en/");
    }

    #[test]
    fn test_doc_request_from_url() {
        let url = url::Url::parse("http://pip.example.io:8000/en/v1/gone/?a=b").unwrap();
        let request = DocRequest::from_url(&url).unwrap();
        assert_eq!(request.scheme, "http");
        assert_eq!(request.host, "pip.example.io:8000");
        assert_eq!(request.full_path, "/en/v1/gone/?a=b");
        assert_eq!(
            request.absolute_url(),
            "http://pip.example.io:8000/en/v1/gone/?a=b"
        );

        let url = url::Url::parse("https://pip.example.io").unwrap();
        assert_eq!(DocRequest::from_url(&url).unwrap().full_path, "/");
    }
}
