//! Content store holding built documentation.
//!
//! The resolvers only need two questions answered: does a file exist, and
//! what are its bytes. [`FsStore`] answers them from the local filesystem.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Content store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Read access to built documentation artifacts.
pub trait ContentStore: Send + Sync {
    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &Path) -> Result<bool, StoreError>;

    /// Read the whole file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;
}

/// Filesystem-backed content store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ContentStore for FsStore {
    fn exists(&self, path: &Path) -> Result<bool, StoreError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            // A path component being a regular file is just another miss
            Err(e) if e.kind() == ErrorKind::NotADirectory => Ok(false),
            Err(e) => Err(StoreError::Io(path.to_path_buf(), e)),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_only_for_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("404")).unwrap();
        fs::write(dir.path().join("404.html"), "custom").unwrap();

        let store = FsStore;
        assert!(store.exists(&dir.path().join("404.html")).unwrap());
        assert!(!store.exists(&dir.path().join("404")).unwrap());
        assert!(!store.exists(&dir.path().join("missing.html")).unwrap());
    }

    #[test]
    fn test_exists_below_a_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("404.html"), "custom").unwrap();

        let store = FsStore;
        assert!(!store.exists(&dir.path().join("404.html/index.html")).unwrap());
    }

    #[test]
    fn test_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("404.html");
        fs::write(&path, "<h1>gone</h1>").unwrap();

        assert_eq!(FsStore.read(&path).unwrap(), b"<h1>gone</h1>");

        let err = FsStore.read(&dir.path().join("nope.html")).unwrap_err();
        assert!(err.to_string().contains("nope.html"));
    }
}
