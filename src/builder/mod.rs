use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info};

use crate::config::PluginConfig;


/// Everything the kaniko executor needs for one build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInvocation {
    pub dockerfile: String,
    pub context: String,
    pub tags: Vec<String>,
    pub args: Vec<String>,
    pub target: Option<String>,
    /// Fully qualified repository, `<registry>/<repo>`
    pub repo: String,
    pub labels: Vec<String>,
    pub snapshot_mode: Option<String>,
    pub enable_cache: bool,
    /// Fully qualified cache repository, set even when caching is off
    pub cache_repo: String,
    pub cache_ttl: u32,
    pub digest_file: PathBuf,
    pub no_push: bool,
    pub verbosity: Option<String>,
}

impl BuildInvocation {
    pub fn from_config(config: &PluginConfig, digest_file: &Path) -> Self {
        Self {
            dockerfile: config.dockerfile.clone(),
            context: config.context.clone(),
            tags: config.tags.clone(),
            args: config.args.clone(),
            target: config.target.clone(),
            repo: config.image_repo(),
            labels: config.labels.clone(),
            snapshot_mode: config.snapshot_mode.clone(),
            enable_cache: config.enable_cache,
            cache_repo: config.cache_repo(),
            cache_ttl: config.cache_ttl,
            digest_file: digest_file.to_path_buf(),
            no_push: config.no_push,
            verbosity: config.verbosity.clone(),
        }
    }

    /// Command line arguments for the kaniko executor
    pub fn executor_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--dockerfile={}", self.dockerfile),
            format!("--context=dir://{}", self.context),
        ];

        if !self.no_push {
            for tag in &self.tags {
                args.push(format!("--destination={}:{}", self.repo, tag));
            }
        }

        for arg in &self.args {
            args.push(format!("--build-arg={}", arg));
        }

        for label in &self.labels {
            args.push(format!("--label={}", label));
        }

        if let Some(target) = &self.target {
            args.push(format!("--target={}", target));
        }

        if self.enable_cache {
            args.push("--cache=true".to_string());
            args.push(format!("--cache-repo={}", self.cache_repo));
        }

        if self.cache_ttl > 0 {
            args.push(format!("--cache-ttl={}h", self.cache_ttl));
        }

        args.push(format!("--digest-file={}", self.digest_file.display()));

        if self.no_push {
            args.push("--no-push".to_string());
        }

        if let Some(verbosity) = &self.verbosity {
            args.push(format!("--verbosity={}", verbosity));
        }

        if let Some(mode) = &self.snapshot_mode {
            args.push(format!("--snapshotMode={}", mode));
        }

        args
    }
}

/// Runs an image build
pub trait ImageBuilder {
    fn build(&self, invocation: &BuildInvocation) -> Result<()>;
}

/// Builds and pushes by spawning the kaniko executor
pub struct KanikoExecutor {
    program: PathBuf,
}

impl KanikoExecutor {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }
}

impl ImageBuilder for KanikoExecutor {
    fn build(&self, invocation: &BuildInvocation) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(invocation.executor_args());

        debug!("Running command: {:?}", cmd);
        info!("Building {} with {}", invocation.repo, self.program.display());

        // Output is inherited so executor logs stream into the CI log
        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", self.program.display()))?;

        if !status.success() {
            error!("kaniko executor failed!");
            anyhow::bail!("kaniko executor exited with {}", status);
        }

        info!("Successfully built {}", invocation.repo);
        Ok(())
    }
}
