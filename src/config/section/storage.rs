//! `[storage]` section configuration.
//!
//! Physical layout of the built documentation:
//!
//! ```text
//! {root}/
//! ├── {public_dir}/{slug}/{lang}/{version}/...
//! └── {private_dir}/{slug}/{lang}/{version}/...
//! ```
//!
//! # Example
//!
//! ```toml
//! [storage]
//! root = "site"                    # relative to the config file
//! public_dir = "public_web_root"
//! private_dir = "private_web_root"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Content root settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Site root holding both trees.
    pub root: PathBuf,

    /// Tree for public projects and versions.
    pub public_dir: PathBuf,

    /// Tree for private projects and versions.
    pub private_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("site"),
            public_dir: PathBuf::from("public_web_root"),
            private_dir: PathBuf::from("private_web_root"),
        }
    }
}

impl StorageConfig {
    /// Storage rooted at `root` with the default tree names.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn public_root(&self) -> PathBuf {
        self.root.join(&self.public_dir)
    }

    pub fn private_root(&self) -> PathBuf {
        self.root.join(&self.private_dir)
    }

    /// Make a relative `root` absolute against the config directory.
    pub fn normalize(&mut self, config_dir: &Path) {
        if self.root.is_relative() {
            self.root = config_dir.join(&self.root);
        }
    }
}
