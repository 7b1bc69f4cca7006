//! Request Classifier: host + path to project, language, version and file.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::DocRequest;
use crate::catalog::{Catalog, Routing};
use crate::core::url::split_query;
use crate::model::Project;

/// `/{language}/{version}/{file}` where the language looks like `en`, `pt-br`
/// or `zh_TW`.
fn doc_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/(?P<language>[a-z]{2,3}(?:[-_][a-zA-Z0-9]{2,8})?)/(?P<version>[^/]+)(?:/(?P<file>.*))?$")
            .unwrap()
    })
}

/// A project-relative path split into its documentation coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocPath {
    pub language: Option<String>,
    pub version: Option<String>,
    /// Path below the version root, without leading separator.
    pub file: String,
}

impl DocPath {
    /// Split `path` (query already stripped) for `project`.
    ///
    /// Single-version projects have no language/version segments. For the
    /// others the first two segments are taken as language and version when
    /// the first one looks like a language code; otherwise both stay unset
    /// and the whole path is the file.
    pub fn split(project: &Project, path: &str) -> Self {
        if !project.single_version
            && let Some(caps) = doc_path_regex().captures(path)
        {
            return Self {
                language: caps.name("language").map(|m| m.as_str().to_string()),
                version: caps.name("version").map(|m| m.as_str().to_string()),
                file: caps
                    .name("file")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            };
        }

        Self {
            language: None,
            version: None,
            file: path.trim_start_matches('/').to_string(),
        }
    }
}

/// Classification of a request that belongs to a project.
#[derive(Debug, Clone)]
pub struct Classified {
    pub project: Arc<Project>,
    pub routing: Routing,
    /// Project-relative path, query kept.
    pub remaining: String,
    pub doc: DocPath,
}

/// Find the project owning `request` and decompose its path.
///
/// `None` means the request is platform-generic: no project context at all.
pub fn classify(catalog: &dyn Catalog, request: &DocRequest) -> Option<Classified> {
    let owner = catalog.owner(&request.host, &request.full_path)?;
    let (path, _) = split_query(&owner.path);
    let doc = DocPath::split(&owner.project, path);

    Some(Classified {
        project: owner.project,
        routing: owner.routing,
        remaining: owner.path,
        doc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConfigCatalog;
    use crate::config::DomainConfig;

    fn multi() -> Project {
        Project::new("pip")
    }

    fn single() -> Project {
        let mut project = Project::new("flat");
        project.single_version = true;
        project
    }

    #[test]
    fn test_split_language_version_file() {
        let doc = DocPath::split(&multi(), "/en/v1/missing-page/");
        assert_eq!(doc.language.as_deref(), Some("en"));
        assert_eq!(doc.version.as_deref(), Some("v1"));
        assert_eq!(doc.file, "missing-page/");
    }

    #[test]
    fn test_split_regional_languages() {
        let doc = DocPath::split(&multi(), "/pt-br/latest/index.html");
        assert_eq!(doc.language.as_deref(), Some("pt-br"));

        let doc = DocPath::split(&multi(), "/zh_TW/stable/");
        assert_eq!(doc.language.as_deref(), Some("zh_TW"));
        assert_eq!(doc.version.as_deref(), Some("stable"));
        assert_eq!(doc.file, "");
    }

    #[test]
    fn test_split_version_without_trailing_slash() {
        let doc = DocPath::split(&multi(), "/en/latest");
        assert_eq!(doc.version.as_deref(), Some("latest"));
        assert_eq!(doc.file, "");
    }

    #[test]
    fn test_split_unrecognized_layout() {
        for path in ["/missing-page/", "/", "/English/v1/x.html", "/en"] {
            let doc = DocPath::split(&multi(), path);
            assert_eq!(doc.language, None, "{path}");
            assert_eq!(doc.version, None, "{path}");
            assert_eq!(doc.file, path.trim_start_matches('/'));
        }
    }

    #[test]
    fn test_split_single_version_keeps_whole_path() {
        let doc = DocPath::split(&single(), "/en/v1/page.html");
        assert_eq!(
            doc,
            DocPath {
                language: None,
                version: None,
                file: "en/v1/page.html".to_string(),
            }
        );
    }

    #[test]
    fn test_classify() {
        let domain = DomainConfig {
            production: "docs.example.com".to_string(),
            public: "example.com".to_string(),
            scheme: "https".to_string(),
        };
        let catalog = ConfigCatalog::new(domain, [multi(), single()]);

        let request = DocRequest::new("https", "pip.example.com", "/en/v1/missing-page/?q=1");
        let classified = classify(&catalog, &request).unwrap();
        assert_eq!(classified.project.slug, "pip");
        assert_eq!(classified.routing, Routing::Subdomain);
        assert_eq!(classified.remaining, "/en/v1/missing-page/?q=1");
        assert_eq!(classified.doc.version.as_deref(), Some("v1"));
        assert_eq!(classified.doc.file, "missing-page/");

        let request = DocRequest::new("https", "docs.example.com", "/docs/flat/en/v1/");
        let classified = classify(&catalog, &request).unwrap();
        assert_eq!(classified.routing, Routing::Generic);
        assert_eq!(classified.doc.language, None);
        assert_eq!(classified.doc.file, "en/v1/");

        let request = DocRequest::new("https", "docs.example.com", "/support/");
        assert!(classify(&catalog, &request).is_none());
    }
}
