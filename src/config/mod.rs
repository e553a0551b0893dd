use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::constants::tag;

#[cfg(test)]
mod tests;

/// Settings for a single plugin run, resolved from flags and environment
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub dockerfile: String,
    pub context: String,
    pub tags: Vec<String>,
    pub args: Vec<String>,
    pub target: Option<String>,
    pub repo: String,
    pub create_repository: bool,
    pub region: String,
    pub labels: Vec<String>,
    pub registry: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub snapshot_mode: Option<String>,
    pub lifecycle_policy: Option<PathBuf>,
    pub repository_policy: Option<PathBuf>,
    pub enable_cache: bool,
    pub cache_repo: String,
    pub cache_ttl: u32,
    pub artifact_file: Option<PathBuf>,
    pub no_push: bool,
    pub verbosity: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dockerfile: "Dockerfile".to_string(),
            context: ".".to_string(),
            tags: vec![tag::DEFAULT.to_string()],
            args: Vec::new(),
            target: None,
            repo: String::new(),
            create_repository: false,
            region: crate::constants::ecr::DEFAULT_REGION.to_string(),
            labels: Vec::new(),
            registry: String::new(),
            access_key: None,
            secret_key: None,
            snapshot_mode: None,
            lifecycle_policy: None,
            repository_policy: None,
            enable_cache: false,
            cache_repo: String::new(),
            cache_ttl: 0,
            artifact_file: None,
            no_push: false,
            verbosity: None,
        }
    }
}

impl PluginConfig {
    /// Build the configuration from parsed flags.
    ///
    /// When no tags were given, tags are read from `tags_file` if it exists,
    /// otherwise the default tag is used.
    pub fn from_cli(cli: Cli, tags_file: &Path) -> Result<Self> {
        let mut tags = non_empty_items(cli.tags);
        if tags.is_empty() && tags_file.exists() {
            tags = read_tags_file(tags_file)?;
        }
        if tags.is_empty() {
            tags.push(tag::DEFAULT.to_string());
        }

        Ok(Self {
            dockerfile: cli.dockerfile,
            context: cli.context,
            tags,
            args: non_empty_items(cli.args),
            target: non_empty(cli.target),
            repo: cli.repo.unwrap_or_default(),
            create_repository: cli.create_repository,
            region: cli.region,
            labels: non_empty_items(cli.custom_labels),
            registry: cli.registry.unwrap_or_default(),
            access_key: non_empty(cli.access_key),
            secret_key: non_empty(cli.secret_key),
            snapshot_mode: non_empty(cli.snapshot_mode),
            lifecycle_policy: cli.lifecycle_policy,
            repository_policy: cli.repository_policy,
            enable_cache: cli.enable_cache,
            cache_repo: cli.cache_repo.unwrap_or_default(),
            cache_ttl: cli.cache_ttl,
            artifact_file: cli.artifact_file.filter(|p| !p.as_os_str().is_empty()),
            no_push: cli.no_push,
            verbosity: non_empty(cli.verbosity),
        })
    }

    /// Auth is only set up when pushing or when credentials were supplied.
    pub fn needs_auth(&self) -> bool {
        !self.no_push || self.access_key.is_some()
    }

    /// The repository is only created when pushing and explicitly requested.
    pub fn should_create_repository(&self) -> bool {
        !self.no_push && self.create_repository
    }

    /// Fully qualified image repository, e.g. `<registry>/<repo>`
    pub fn image_repo(&self) -> String {
        join_repo(&self.registry, &self.repo)
    }

    /// Fully qualified cache repository. Computed even when caching is off.
    pub fn cache_repo(&self) -> String {
        join_repo(&self.registry, &self.cache_repo)
    }
}

/// Join a registry host and a repository name with a `/`
pub fn join_repo(registry: &str, name: &str) -> String {
    format!("{}/{}", registry, name)
}

fn read_tags_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tags file {}", path.display()))?;

    Ok(content
        .split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_items(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
