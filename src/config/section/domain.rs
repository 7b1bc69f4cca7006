//! `[domain]` section configuration.
//!
//! Decides which hosts carry project context.
//!
//! # Example
//!
//! ```toml
//! [domain]
//! production = "docs.example.com"   # path-based routing: /docs/<slug>/...
//! public = "example.io"             # subdomains: <slug>.example.io
//! scheme = "https"                  # used to build absolute URLs
//! ```
//!
//! Any other host is looked up in the projects' `domains` lists.

use serde::{Deserialize, Serialize};

/// Host routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Platform host that routes by path (`/docs/<slug>/`).
    pub production: String,

    /// Parent domain of per-project subdomains.
    pub public: String,

    /// Scheme of absolute URLs when the request does not say otherwise.
    pub scheme: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            production: "localhost".to_string(),
            public: "docs.localhost".to_string(),
            scheme: "http".to_string(),
        }
    }
}

impl DomainConfig {
    /// Project slug if `host` is a direct subdomain of the public domain.
    ///
    /// `host` must already be lowercase and without port.
    pub fn subdomain_slug<'a>(&self, host: &'a str) -> Option<&'a str> {
        let public = self.public.trim_matches('.').to_ascii_lowercase();
        if public.is_empty() {
            return None;
        }
        let slug = host.strip_suffix(public.as_str())?.strip_suffix('.')?;
        (!slug.is_empty() && !slug.contains('.')).then_some(slug)
    }

    /// Whether `host` is the path-routed platform host.
    pub fn is_production(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.production)
    }
}
