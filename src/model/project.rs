//! Project and version records.
//!
//! Both are read-only inputs for request handling: they are loaded once from
//! `[[projects]]` in `docserve.toml` and shared between worker threads.

use serde::{Deserialize, Serialize};

use super::RedirectRule;

/// Version served when a project does not name one.
pub const LATEST: &str = "latest";

/// Who may read a project's (or a version's) built documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

/// A documentation project, addressed by its unique slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub slug: String,

    #[serde(default)]
    pub privacy: Privacy,

    /// URLs carry no `/{language}/{version}/` segments.
    #[serde(default)]
    pub single_version: bool,

    #[serde(default = "default_language")]
    pub language: String,

    /// Falls back to [`LATEST`] when unset.
    #[serde(default)]
    pub default_version: Option<String>,

    /// Custom domains (CNAMEs) routed to this project.
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub versions: Vec<Version>,

    #[serde(default)]
    pub redirects: Vec<RedirectRule>,
}

/// A built version of a project, unique by slug within that project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub slug: String,

    /// Overrides the project privacy for this version when set.
    #[serde(default)]
    pub privacy: Option<Privacy>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Project {
    /// Create a public, multi-version project with no versions or rules.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            privacy: Privacy::Public,
            single_version: false,
            language: default_language(),
            default_version: None,
            domains: Vec::new(),
            versions: Vec::new(),
            redirects: Vec::new(),
        }
    }

    /// Slug of the version served when the request names none.
    pub fn default_version(&self) -> &str {
        self.default_version.as_deref().unwrap_or(LATEST)
    }

    /// Look up a version record by slug.
    pub fn version(&self, slug: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.slug == slug)
    }
}

impl Version {
    pub fn new(slug: impl Into<String>, privacy: Option<Privacy>) -> Self {
        Self {
            slug: slug.into(),
            privacy,
        }
    }
}
