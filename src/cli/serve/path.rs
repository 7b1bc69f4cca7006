//! Request to filesystem path resolution for existing pages.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::StorageConfig;
use crate::core::url::split_query;
use crate::resolve::{DocRequest, classify, select_root};

/// File for a request that maps onto built documentation, if it exists.
///
/// The project root comes from the layout selector, so private versions are
/// read from the private tree.
pub fn resolve_file(
    catalog: &dyn Catalog,
    storage: &StorageConfig,
    request: &DocRequest,
) -> Option<PathBuf> {
    let classified = classify(catalog, request)?;
    let version = classified
        .doc
        .version
        .as_deref()
        .and_then(|slug| catalog.version(&classified.project, slug));
    let root = select_root(storage, &classified.project, version.as_ref());
    let (path, _) = split_query(&classified.remaining);
    resolve_path(path, &root)
}

/// Resolve URL path to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let path = split_query(url).0;
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}
