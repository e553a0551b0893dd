//! Plugin service for orchestrating a single run
//!
//! Sets up auth, provisions the repository and its policies, then hands off
//! to the image builder. Any failing step ends the run.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::{
    artifact::{self, ArtifactSpec},
    auth::setup_ecr_auth,
    builder::{BuildInvocation, ImageBuilder},
    config::PluginConfig,
    constants::path,
    policy::{upload_lifecycle_policy, upload_repository_policy},
    registry::RegistryProvider,
    repository::ensure_repository,
};

/// Files written during a run
#[derive(Debug, Clone)]
pub struct ServicePaths {
    /// Docker config holding the credential helper setup
    pub docker_config: PathBuf,
    /// Digest file written by the executor
    pub digest_file: PathBuf,
}

impl Default for ServicePaths {
    fn default() -> Self {
        Self {
            docker_config: PathBuf::from(path::DOCKER_CONFIG),
            digest_file: PathBuf::from(path::DIGEST_FILE),
        }
    }
}

pub struct PluginService;

impl PluginService {
    pub async fn run(
        config: &PluginConfig,
        provider: &dyn RegistryProvider,
        builder: &dyn ImageBuilder,
        paths: &ServicePaths,
    ) -> Result<()> {
        if config.needs_auth() {
            setup_ecr_auth(
                config.access_key.as_deref(),
                config.secret_key.as_deref(),
                &config.registry,
                &paths.docker_config,
            )?;
        } else {
            info!("Skipping registry auth (--no-push without credentials)");
        }

        if config.should_create_repository() {
            let api = provider.registry_api(&config.registry).await;
            ensure_repository(api.as_ref(), &config.repo, &config.registry).await?;
        }

        if let Some(policy) = &config.lifecycle_policy {
            let api = provider.lifecycle_api().await;
            upload_lifecycle_policy(api.as_ref(), &config.repo, policy).await?;
        }

        if let Some(policy) = &config.repository_policy {
            let api = provider.registry_api(&config.registry).await;
            upload_repository_policy(api.as_ref(), &config.repo, policy).await?;
        }

        let invocation = BuildInvocation::from_config(config, &paths.digest_file);
        builder.build(&invocation)?;

        artifact::emit(&ArtifactSpec::from_config(config), &paths.digest_file);
        Ok(())
    }
}
