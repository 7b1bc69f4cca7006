//! Layout Selector: public vs private physical tree.

use std::path::PathBuf;

use crate::config::StorageConfig;
use crate::model::{Privacy, Project, Version};

/// Which of the two disjoint content trees holds a project's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Public,
    Private,
}

impl Layout {
    /// Layout governed by the version's privacy when known, else the project's.
    pub fn effective(project: &Project, version: Option<&Version>) -> Self {
        let privacy = version
            .and_then(|v| v.privacy)
            .unwrap_or(project.privacy);
        match privacy {
            Privacy::Public => Self::Public,
            Privacy::Private => Self::Private,
        }
    }

    /// Project root inside this layout's tree.
    pub fn project_root(self, storage: &StorageConfig, project: &Project) -> PathBuf {
        let tree = match self {
            Self::Public => storage.public_root(),
            Self::Private => storage.private_root(),
        };
        tree.join(&project.slug)
    }
}

/// Root directory for `project`, with `version` only picking the tree.
pub fn select_root(
    storage: &StorageConfig,
    project: &Project,
    version: Option<&Version>,
) -> PathBuf {
    Layout::effective(project, version).project_root(storage, project)
}
