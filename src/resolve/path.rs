//! Path Resolver: project/version/language/file to a canonical relative path.
//!
//! Pure string composition. The physical root is chosen separately by
//! [`super::layout`]; [`ResolvedPath`] glues the two together.

use std::path::{Component, Path, PathBuf};

use crate::model::Project;

/// Compose the path of `filename` inside a project's documentation.
///
/// On a virtual host the path starts at `/`; otherwise it carries the
/// platform's `/docs/{slug}/` prefix. Single-version projects drop the
/// language and version segments; for the others a missing language or
/// version falls back to the project's language and default version.
///
/// ```ignore
/// resolve_path(&pip, Some("v1"), Some("en"), "404.html", true)  // "/en/v1/404.html"
/// resolve_path(&pip, None, None, "404.html", false)             // "/docs/pip/en/latest/404.html"
/// ```
pub fn resolve_path(
    project: &Project,
    version_slug: Option<&str>,
    language: Option<&str>,
    filename: &str,
    virtual_host: bool,
) -> String {
    let mut path = if virtual_host {
        String::from("/")
    } else {
        format!("/docs/{}/", project.slug)
    };

    if !project.single_version {
        let language = language.unwrap_or(&project.language);
        let version = version_slug.unwrap_or_else(|| project.default_version());
        path.push_str(language);
        path.push('/');
        path.push_str(version);
        path.push('/');
    }

    path.push_str(filename.trim_start_matches('/'));
    path
}

/// A file location split into its storage root and the path below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub basepath: PathBuf,
    /// Never starts with a separator.
    pub relative: String,
    /// `basepath` joined with `relative`, never outside `basepath`.
    pub full: PathBuf,
}

impl ResolvedPath {
    /// Join `relative` below `basepath`.
    ///
    /// Leading separators are stripped first: joining an absolute path would
    /// discard `basepath` entirely.
    pub fn new(basepath: impl Into<PathBuf>, relative: &str) -> Self {
        let basepath = basepath.into();
        let relative = relative.trim_start_matches('/').to_string();
        let full = join_within(&basepath, &relative);
        Self {
            basepath,
            relative,
            full,
        }
    }
}

/// Join `relative` onto `base`, keeping only normal components.
///
/// `.`/`..`, root and prefix components are dropped, so the result is always
/// `base` itself or a descendant of it.
pub fn join_within(base: &Path, relative: &str) -> PathBuf {
    let mut full = base.to_path_buf();
    for component in Path::new(relative).components() {
        if let Component::Normal(part) = component {
            full.push(part);
        }
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> Project {
        let mut project = Project::new("pip");
        project.default_version = Some("stable".to_string());
        project
    }

    fn single() -> Project {
        let mut project = Project::new("flat");
        project.single_version = true;
        project
    }

    #[test]
    fn test_virtual_host_path() {
        let project = multi();
        assert_eq!(
            resolve_path(&project, Some("v1"), Some("es"), "404.html", true),
            "/es/v1/404.html"
        );
        assert_eq!(
            resolve_path(&project, Some("v1"), Some("en"), "404/index.html", true),
            "/en/v1/404/index.html"
        );
    }

    #[test]
    fn test_generic_host_path_has_prefix() {
        let project = multi();
        assert_eq!(
            resolve_path(&project, Some("v1"), Some("en"), "404.html", false),
            "/docs/pip/en/v1/404.html"
        );
    }

    #[test]
    fn test_missing_version_and_language_use_project_defaults() {
        let project = multi();
        assert_eq!(
            resolve_path(&project, None, None, "index.html", true),
            "/en/stable/index.html"
        );
    }

    #[test]
    fn test_single_version_ignores_language_and_version() {
        let project = single();
        let expected = "/404.html";
        for (version, language) in [
            (None, None),
            (Some("v1"), None),
            (None, Some("de")),
            (Some("latest"), Some("en")),
        ] {
            assert_eq!(
                resolve_path(&project, version, language, "404.html", true),
                expected
            );
        }
        assert_eq!(
            resolve_path(&project, Some("v1"), Some("de"), "404.html", false),
            "/docs/flat/404.html"
        );
    }

    #[test]
    fn test_filename_leading_slash_trimmed() {
        let project = multi();
        assert_eq!(
            resolve_path(&project, Some("v1"), Some("en"), "/404.html", true),
            "/en/v1/404.html"
        );
    }

    #[test]
    fn test_resolved_path_strips_leading_separator() {
        let resolved = ResolvedPath::new("/srv/public/pip", "/en/v1/404.html");
        assert_eq!(resolved.relative, "en/v1/404.html");
        assert_eq!(resolved.full, PathBuf::from("/srv/public/pip/en/v1/404.html"));
        assert_eq!(resolved.full, resolved.basepath.join(&resolved.relative));
    }

    #[test]
    fn test_join_never_escapes_base() {
        let base = Path::new("/srv/public/pip");
        for relative in [
            "/etc/passwd",
            "../../etc/passwd",
            "en/../../../x",
            "//double/slash",
            "./en/./v1/404.html",
            "",
        ] {
            let full = join_within(base, relative);
            assert!(
                full.starts_with(base),
                "{relative:?} escaped to {}",
                full.display()
            );
            assert_ne!(full, PathBuf::from("/srv/public"));
        }
    }
}
