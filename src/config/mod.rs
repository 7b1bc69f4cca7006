//! Host configuration management for `docserve.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── domain     # [domain]
//! │   ├── serve      # [serve]
//! │   └── storage    # [storage]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── handle     # Global config handle
//! └── mod.rs         # HostConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[serve]`        | HTTP server (interface, port, threads)         |
//! | `[domain]`       | Platform host, subdomain parent, URL scheme    |
//! | `[storage]`      | Site root with public/private trees            |
//! | `[[projects]]`   | Projects, their versions, domains, redirects   |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{DomainConfig, ServeConfig, StorageConfig};
pub use types::{ConfigDiagnostics, ConfigError, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    log,
    model::Project,
};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing docserve.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Host routing settings
    #[serde(default)]
    pub domain: DomainConfig,

    /// Content tree settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Hosted projects
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl HostConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. Relative storage
    /// paths are resolved against the config file's directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let Some(config_path) = find_config_file(&cli.config, &cwd) else {
            bail!(
                "Config file '{}' not found in {} or any parent directory",
                cli.config.display(),
                cwd.display()
            );
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Directory holding the config file.
    pub fn config_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or(Path::new(""))
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let config_dir = self.config_dir().to_path_buf();
        self.storage.normalize(&config_dir);
        self.apply_command_options(cli);
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Serve {
                interface,
                port,
                threads,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.threads, threads.as_ref());
            }
            // Resolve command doesn't modify config
            Commands::Resolve { .. } => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check the whole config, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.serve.threads == 0 {
            diag.error("serve.threads", "must be at least 1");
        }

        let mut slugs: FxHashMap<&str, usize> = FxHashMap::default();
        let mut domains: FxHashMap<String, &str> = FxHashMap::default();

        for (i, project) in self.projects.iter().enumerate() {
            if project.slug.trim().is_empty() {
                diag.error(format!("projects[{i}].slug"), "must not be empty");
            } else if project.slug.contains(['/', '.'])
                || project.slug.chars().any(|c| c.is_ascii_uppercase())
            {
                diag.error_with_hint(
                    format!("projects[{i}].slug"),
                    format!("`{}` is not a valid slug", project.slug),
                    "slugs are lowercase and used as subdomains and directory names",
                );
            } else if let Some(first) = slugs.insert(&project.slug, i) {
                diag.error(
                    format!("projects[{i}].slug"),
                    format!("`{}` is already used by projects[{first}]", project.slug),
                );
            }

            for domain in &project.domains {
                let key = domain.to_ascii_lowercase();
                if let Some(owner) = domains.get(&key) {
                    diag.error(
                        format!("projects[{i}].domains"),
                        format!("`{domain}` is already claimed by project `{owner}`"),
                    );
                } else {
                    domains.insert(key, &project.slug);
                }
            }

            for (j, rule) in project.redirects.iter().enumerate() {
                if !matches!(rule.status, 301 | 302) {
                    diag.error_with_hint(
                        format!("projects[{i}].redirects[{j}].status"),
                        format!("unsupported redirect status {}", rule.status),
                        "use 301 (permanent) or 302 (temporary)",
                    );
                }
            }
        }

        diag.into_result()
    }
}

/// Parse a config snippet for tests, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> HostConfig {
    let (parsed, ignored) = HostConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
