//! Redirect rules configured per project.

use serde::{Deserialize, Serialize};

/// Placeholder at the end of an `exact` rule's `from` that matches any suffix.
pub const REST: &str = "$rest";

/// How a rule's `from` is compared against the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
    /// Whole request path equals `from` (or starts with it, with `$rest`).
    Exact,
    /// Request path starts with `from`; the rest lands in the default version.
    Prefix,
    /// File part after `/{lang}/{version}/` equals `from`.
    Page,
}

/// A single configured redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    #[serde(rename = "type")]
    pub kind: RedirectKind,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default = "default_status")]
    pub status: u16,
}

fn default_status() -> u16 {
    302
}

impl RedirectRule {
    pub fn new(kind: RedirectKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
            status: default_status(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Check whether this rule applies.
    ///
    /// `path` is the project-relative request path without query string,
    /// `file` its part after the language/version segments.
    pub fn matches(&self, path: &str, file: &str) -> bool {
        match self.kind {
            RedirectKind::Exact => match self.from.strip_suffix(REST) {
                Some(prefix) => path.starts_with(prefix),
                None => path == self.from,
            },
            RedirectKind::Prefix => !self.from.is_empty() && path.starts_with(&self.from),
            RedirectKind::Page => {
                !self.from.is_empty()
                    && file.trim_start_matches('/') == self.from.trim_start_matches('/')
            }
        }
    }
}
