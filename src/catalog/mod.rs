//! Project catalog: who owns a request, and what that project declares.
//!
//! The resolvers only talk to the [`Catalog`] trait. [`ConfigCatalog`]
//! answers from the `[[projects]]` loaded out of `docserve.toml`.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::{DomainConfig, HostConfig};
use crate::core::url::{hostname, split_query};
use crate::model::{Project, RedirectRule, Version};
use crate::resolve::DocPath;

/// How a request reached its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// `{slug}.{public domain}`
    Subdomain,
    /// A domain listed in the project's `domains`.
    CustomDomain,
    /// `/docs/{slug}/...` on any other host.
    Generic,
}

impl Routing {
    /// Subdomain and custom-domain requests carry implicit project context.
    pub fn is_virtual_host(self) -> bool {
        matches!(self, Self::Subdomain | Self::CustomDomain)
    }
}

/// Project owning a request plus the request path relative to it.
#[derive(Debug, Clone)]
pub struct Owner {
    pub project: Arc<Project>,
    pub routing: Routing,
    /// Path below the project (query kept), always starting with `/`.
    pub path: String,
}

/// Read-only lookups the resolvers need.
pub trait Catalog: Send + Sync {
    /// Project serving `host` + `full_path`, if any.
    fn owner(&self, host: &str, full_path: &str) -> Option<Owner>;

    /// Version record of `project` named `slug`.
    fn version(&self, project: &Project, slug: &str) -> Option<Version>;

    /// Redirect rule applying to `path` (query stripped), first declared wins.
    fn redirect(&self, project: &Project, path: &str) -> Option<RedirectRule>;

    /// Slug of the version served when a request names none.
    fn default_version(&self, project: &Project) -> String {
        project.default_version().to_string()
    }
}

/// Catalog built from the loaded configuration.
#[derive(Debug, Default)]
pub struct ConfigCatalog {
    domain: DomainConfig,
    projects: FxHashMap<String, Arc<Project>>,
    /// Lowercased custom domain -> project slug.
    domains: FxHashMap<String, String>,
}

impl ConfigCatalog {
    pub fn new(domain: DomainConfig, projects: impl IntoIterator<Item = Project>) -> Self {
        let mut catalog = Self {
            domain,
            ..Self::default()
        };
        for project in projects {
            for custom in &project.domains {
                catalog
                    .domains
                    .insert(hostname(custom), project.slug.clone());
            }
            catalog
                .projects
                .insert(project.slug.clone(), Arc::new(project));
        }
        catalog
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.domain.clone(), config.projects.iter().cloned())
    }

    pub fn project(&self, slug: &str) -> Option<Arc<Project>> {
        self.projects.get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Owner from a `/docs/{slug}/...` path.
    fn generic_owner(&self, full_path: &str) -> Option<Owner> {
        let rest = full_path.strip_prefix("/docs/")?;
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (slug, remainder) = rest.split_at(end);
        let project = self.project(slug)?;

        let path = if remainder.starts_with('/') {
            remainder.to_string()
        } else {
            format!("/{remainder}")
        };

        Some(Owner {
            project,
            routing: Routing::Generic,
            path,
        })
    }
}

impl Catalog for ConfigCatalog {
    fn owner(&self, host: &str, full_path: &str) -> Option<Owner> {
        let host = hostname(host);

        if self.domain.is_production(&host) {
            return self.generic_owner(full_path);
        }

        if let Some(slug) = self.domain.subdomain_slug(&host) {
            return self.project(slug).map(|project| Owner {
                project,
                routing: Routing::Subdomain,
                path: full_path.to_string(),
            });
        }

        if let Some(slug) = self.domains.get(&host) {
            return self.project(slug).map(|project| Owner {
                project,
                routing: Routing::CustomDomain,
                path: full_path.to_string(),
            });
        }

        self.generic_owner(full_path)
    }

    fn version(&self, project: &Project, slug: &str) -> Option<Version> {
        project.version(slug).cloned()
    }

    fn redirect(&self, project: &Project, path: &str) -> Option<RedirectRule> {
        let (path, _) = split_query(path);
        let doc = DocPath::split(project, path);
        project
            .redirects
            .iter()
            .find(|rule| rule.matches(path, &doc.file))
            .cloned()
    }
}
