//! Missing-Page Resolver: what to answer when nothing was found.
//!
//! Resolution runs through four states, each request on its own:
//!
//! 1. **redirect**: a matching redirect rule wins (self-redirects excluded).
//! 2. **virtual host check**: only subdomain/custom-domain requests may have
//!    a project-specific error page.
//! 3. **search**: `404.html` then `404/index.html`, first for the requested
//!    version, then for the default version. First readable file wins.
//! 4. **default**: the platform's own 404 page.
//!
//! Store failures only skip the candidate they happened on.

use std::sync::Arc;

use super::{
    Classified, DocRequest, Redirect, ResolveError, ResolvedPath, classify, resolve_path,
    select_root, try_redirect,
};
use crate::catalog::Catalog;
use crate::config::StorageConfig;
use crate::logger::Diagnostics;
use crate::model::Project;
use crate::store::{ContentStore, StoreError};
use crate::utils::mime;

/// Custom error page file names, in search order.
pub const CANDIDATE_FILES: [&str; 2] = ["404.html", "404/index.html"];

/// A project-provided error page, ready to send with status 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPage {
    pub project: String,
    /// Version the page was found under; `None` means the project default.
    pub version: Option<String>,
    pub resolved: ResolvedPath,
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Terminal outcome of missing-page resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundOutcome {
    Redirect(Redirect),
    Custom(CustomPage),
    Default,
}

/// Resolves missing pages against a catalog and a content store.
pub struct NotFoundResolver<'a> {
    catalog: &'a dyn Catalog,
    store: &'a dyn ContentStore,
    storage: &'a StorageConfig,
    sink: &'a dyn Diagnostics,
}

impl<'a> NotFoundResolver<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        store: &'a dyn ContentStore,
        storage: &'a StorageConfig,
        sink: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            catalog,
            store,
            storage,
            sink,
        }
    }

    /// Decide how to answer a request whose page does not exist.
    pub fn resolve(&self, request: &DocRequest) -> NotFoundOutcome {
        let classified = classify(self.catalog, request);

        if let Some(classified) = &classified
            && let Some(redirect) =
                try_redirect(self.catalog, request, classified, self.sink).into_redirect()
        {
            return NotFoundOutcome::Redirect(redirect);
        }

        let Some(classified) = classified.filter(|c| c.routing.is_virtual_host()) else {
            return NotFoundOutcome::Default;
        };

        match self.search(&classified) {
            Some(page) => NotFoundOutcome::Custom(page),
            None => {
                self.sink.debug(
                    "404",
                    &ResolveError::NotFound(classified.project.slug.clone()).to_string(),
                );
                NotFoundOutcome::Default
            }
        }
    }

    /// Probe the candidate pages in order and return the first readable one.
    pub fn search(&self, classified: &Classified) -> Option<CustomPage> {
        let project = &classified.project;
        let language = classified.doc.language.as_deref();
        let default_version = self.catalog.default_version(project);
        let versions = [
            classified.doc.version.as_deref(),
            Some(default_version.as_str()),
        ];

        for version in versions {
            for filename in CANDIDATE_FILES {
                let resolved = self.candidate(project, version, language, filename);
                match self.fetch(&resolved) {
                    Ok(Some(body)) => {
                        self.sink.debug(
                            "404",
                            &format!(
                                "serving custom page [project: {}] [version: {}]",
                                project.slug,
                                version.unwrap_or(&default_version)
                            ),
                        );
                        return Some(CustomPage {
                            project: project.slug.clone(),
                            version: version.map(str::to_string),
                            content_type: mime::from_path(&resolved.full),
                            resolved,
                            body,
                        });
                    }
                    Ok(None) => {}
                    Err(e) => {
                        self.sink
                            .debug("404", &ResolveError::StoreUnavailable(e).to_string());
                    }
                }
            }
        }

        None
    }

    /// Location of `filename` for one candidate version.
    fn candidate(
        &self,
        project: &Arc<Project>,
        version: Option<&str>,
        language: Option<&str>,
        filename: &str,
    ) -> ResolvedPath {
        let record = version.and_then(|slug| self.catalog.version(project, slug));
        let basepath = select_root(self.storage, project, record.as_ref());
        let relative = resolve_path(project, version, language, filename, true);
        ResolvedPath::new(basepath, &relative)
    }

    fn fetch(&self, resolved: &ResolvedPath) -> Result<Option<Vec<u8>>, StoreError> {
        if !self.store.exists(&resolved.full)? {
            return Ok(None);
        }
        self.store.read(&resolved.full).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConfigCatalog;
    use crate::config::DomainConfig;
    use crate::logger::RecordingSink;
    use crate::model::{Privacy, RedirectKind, RedirectRule, Version};
    use crate::store::FsStore;
    use parking_lot::Mutex;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// FsStore that remembers every existence check.
    #[derive(Default)]
    struct TracingStore {
        checked: Mutex<Vec<PathBuf>>,
        failing: Option<PathBuf>,
    }

    impl ContentStore for TracingStore {
        fn exists(&self, path: &Path) -> Result<bool, StoreError> {
            self.checked.lock().push(path.to_path_buf());
            if self.failing.as_deref() == Some(path) {
                return Err(StoreError::Io(
                    path.to_path_buf(),
                    std::io::Error::other("backend timeout"),
                ));
            }
            FsStore.exists(path)
        }

        fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
            FsStore.read(path)
        }
    }

    struct Fixture {
        _dir: TempDir,
        storage: StorageConfig,
        catalog: ConfigCatalog,
    }

    impl Fixture {
        fn new(project: Project) -> Self {
            let dir = TempDir::new().unwrap();
            let storage = StorageConfig::with_root(dir.path());
            let domain = DomainConfig {
                production: "docs.example.com".to_string(),
                public: "example.com".to_string(),
                scheme: "https".to_string(),
            };
            let catalog = ConfigCatalog::new(domain, [project]);
            Self {
                _dir: dir,
                storage,
                catalog,
            }
        }

        fn write(&self, tree: &str, relative: &str, body: &str) -> PathBuf {
            let path = self.storage.root.join(tree).join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, body).unwrap();
            path
        }

        fn resolve(&self, store: &dyn ContentStore, host: &str, path: &str) -> NotFoundOutcome {
            let sink = RecordingSink::default();
            let resolver = NotFoundResolver::new(&self.catalog, store, &self.storage, &sink);
            resolver.resolve(&DocRequest::new("https", host, path))
        }
    }

    fn project() -> Project {
        let mut project = Project::new("project");
        project.versions = vec![
            Version::new("v1", None),
            Version::new("v2", None),
            Version::new("latest", None),
        ];
        project
    }

    fn custom_body(outcome: &NotFoundOutcome) -> &str {
        match outcome {
            NotFoundOutcome::Custom(page) => std::str::from_utf8(&page.body).unwrap(),
            other => panic!("expected custom page, got {other:?}"),
        }
    }

    #[test]
    fn test_default_when_no_custom_page() {
        let fixture = Fixture::new(project());
        let outcome = fixture.resolve(&FsStore, "project.example.com", "/en/v1/missing-page/");
        assert_eq!(outcome, NotFoundOutcome::Default);
    }

    #[test]
    fn test_current_version_index_before_default_version() {
        let fixture = Fixture::new(project());
        fixture.write("public_web_root", "project/en/v2/404/index.html", "v2 index");
        fixture.write("public_web_root", "project/en/latest/404/index.html", "latest index");

        let store = TracingStore::default();
        let outcome = fixture.resolve(&store, "project.example.com", "/en/v2/missing/");
        assert_eq!(custom_body(&outcome), "v2 index");

        let checked = store.checked.lock().clone();
        assert_eq!(checked.len(), 2);
        assert!(checked[0].ends_with("project/en/v2/404.html"));
        assert!(checked[1].ends_with("project/en/v2/404/index.html"));
        assert!(checked.iter().all(|p| !p.to_string_lossy().contains("latest")));
    }

    #[test]
    fn test_falls_back_to_default_version() {
        let fixture = Fixture::new(project());
        fixture.write("public_web_root", "project/en/latest/404.html", "latest 404");

        let store = TracingStore::default();
        let outcome = fixture.resolve(&store, "project.example.com", "/en/v1/missing/");
        assert_eq!(custom_body(&outcome), "latest 404");
        assert_eq!(store.checked.lock().len(), 3);

        let NotFoundOutcome::Custom(page) = outcome else { unreachable!() };
        assert_eq!(page.version.as_deref(), Some("latest"));
        assert_eq!(page.resolved.relative, "en/latest/404.html");
        assert_eq!(page.content_type, mime::types::HTML);
    }

    #[test]
    fn test_private_version_served_from_private_root() {
        let mut project = project();
        project.versions[0].privacy = Some(Privacy::Private);
        let fixture = Fixture::new(project);
        fixture.write("public_web_root", "project/en/v1/404.html", "public copy");
        let private = fixture.write("private_web_root", "project/en/v1/404.html", "private copy");

        let outcome = fixture.resolve(&FsStore, "project.example.com", "/en/v1/missing-page/");
        assert_eq!(custom_body(&outcome), "private copy");

        let NotFoundOutcome::Custom(page) = outcome else { unreachable!() };
        assert_eq!(page.resolved.full, private);
        assert_eq!(page.resolved.basepath, fixture.storage.private_root().join("project"));
    }

    #[test]
    fn test_unknown_version_uses_project_privacy() {
        let mut project = project();
        project.privacy = Privacy::Private;
        let fixture = Fixture::new(project);
        fixture.write("private_web_root", "project/en/v9/404.html", "v9 private");

        let outcome = fixture.resolve(&FsStore, "project.example.com", "/en/v9/gone.html");
        assert_eq!(custom_body(&outcome), "v9 private");
    }

    #[test]
    fn test_generic_host_always_gets_default_page() {
        let fixture = Fixture::new(project());
        fixture.write("public_web_root", "project/en/v1/404.html", "custom");

        let outcome = fixture.resolve(&FsStore, "docs.example.com", "/docs/project/en/v1/gone/");
        assert_eq!(outcome, NotFoundOutcome::Default);

        let outcome = fixture.resolve(&FsStore, "unrelated.org", "/whatever/");
        assert_eq!(outcome, NotFoundOutcome::Default);
    }

    #[test]
    fn test_redirect_before_search() {
        let mut project = project();
        project.redirects = vec![
            RedirectRule::new(RedirectKind::Exact, "/old/", "https://project.example.com/new/")
                .with_status(301),
        ];
        let fixture = Fixture::new(project);
        fixture.write("public_web_root", "project/en/latest/404.html", "custom");

        let outcome = fixture.resolve(&FsStore, "project.example.com", "/old/");
        assert_eq!(
            outcome,
            NotFoundOutcome::Redirect(Redirect {
                location: "https://project.example.com/new/".to_string(),
                status: 301,
            })
        );
    }

    #[test]
    fn test_redirect_applies_on_generic_host() {
        let mut project = project();
        project.redirects = vec![RedirectRule::new(RedirectKind::Exact, "/old/", "/new/")];
        let fixture = Fixture::new(project);

        let outcome = fixture.resolve(&FsStore, "docs.example.com", "/docs/project/old/");
        assert!(matches!(outcome, NotFoundOutcome::Redirect(_)));
    }

    #[test]
    fn test_suppressed_loop_continues_to_search() {
        let mut project = project();
        project.redirects = vec![RedirectRule::new(
            RedirectKind::Exact,
            "/en/v1/loop/",
            "/en/v1/loop/",
        )];
        let fixture = Fixture::new(project);
        fixture.write("public_web_root", "project/en/v1/404.html", "v1 404");

        let sink = RecordingSink::default();
        let resolver = NotFoundResolver::new(&fixture.catalog, &FsStore, &fixture.storage, &sink);
        let outcome = resolver.resolve(&DocRequest::new(
            "https",
            "project.example.com",
            "/en/v1/loop/",
        ));

        assert_eq!(custom_body(&outcome), "v1 404");
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_store_failure_skips_candidate() {
        let fixture = Fixture::new(project());
        let first = fixture.write("public_web_root", "project/en/v1/404.html", "unreachable");
        fixture.write("public_web_root", "project/en/v1/404/index.html", "index");

        let store = TracingStore {
            failing: Some(first),
            ..TracingStore::default()
        };
        let outcome = fixture.resolve(&store, "project.example.com", "/en/v1/x/");
        assert_eq!(custom_body(&outcome), "index");
    }

    #[test]
    fn test_request_without_version_searches_default_twice() {
        let fixture = Fixture::new(project());
        let store = TracingStore::default();

        let outcome = fixture.resolve(&store, "project.example.com", "/missing-page/");
        assert_eq!(outcome, NotFoundOutcome::Default);

        let checked = store.checked.lock().clone();
        assert_eq!(checked.len(), 4);
        assert!(checked.iter().all(|p| p.to_string_lossy().contains("en/latest/404")));
    }

    #[test]
    fn test_single_version_project() {
        let mut project = Project::new("flat");
        project.single_version = true;
        let fixture = Fixture::new(project);
        fixture.write("public_web_root", "flat/404.html", "flat 404");

        let outcome = fixture.resolve(&FsStore, "flat.example.com", "/en/v1/page.html");
        assert_eq!(custom_body(&outcome), "flat 404");
    }

    #[test]
    fn test_custom_domain_is_virtual_host() {
        let mut project = project();
        project.domains = vec!["docs.project.org".to_string()];
        let fixture = Fixture::new(project);
        fixture.write("public_web_root", "project/en/v1/404.html", "cname 404");

        let outcome = fixture.resolve(&FsStore, "docs.project.org", "/en/v1/gone/");
        assert_eq!(custom_body(&outcome), "cname 404");
    }
}
