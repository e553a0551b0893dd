//! Artifact metadata describing pushed images, for downstream CI steps

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::PluginConfig;
use crate::constants::artifact;


/// What to record about a run, taken from the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSpec {
    pub tags: Vec<String>,
    pub repo: String,
    pub registry: String,
    pub artifact_file: Option<PathBuf>,
    pub registry_type: String,
}

impl ArtifactSpec {
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            tags: config.tags.clone(),
            repo: config.repo.clone(),
            registry: config.registry.clone(),
            artifact_file: config.artifact_file.clone(),
            registry_type: artifact::REGISTRY_TYPE_ECR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerArtifact {
    pub kind: String,
    pub data: ArtifactData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactData {
    pub registry_type: String,
    pub registry_url: String,
    pub images: Vec<ArtifactImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactImage {
    pub image: String,
    pub digest: String,
}

impl DockerArtifact {
    /// One image entry per tag, all sharing `digest`
    pub fn new(spec: &ArtifactSpec, digest: &str) -> Self {
        let images = spec
            .tags
            .iter()
            .map(|tag| ArtifactImage {
                image: format!("{}:{}", spec.repo, tag),
                digest: digest.to_string(),
            })
            .collect();

        Self {
            kind: artifact::DOCKER_V1.to_string(),
            data: ArtifactData {
                registry_type: spec.registry_type.clone(),
                registry_url: spec.registry.clone(),
                images,
            },
        }
    }
}

pub fn write_artifact_file(path: &Path, artifact: &DockerArtifact) -> Result<()> {
    let json =
        serde_json::to_string_pretty(artifact).context("Failed to encode artifact metadata")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write artifact file {}", path.display()))?;
    Ok(())
}

/// Write the artifact file for a finished build, if one was requested.
///
/// The image is already pushed by the time this runs, so a missing digest
/// or a failed write only produces a warning.
pub fn emit(spec: &ArtifactSpec, digest_file: &Path) {
    let Some(path) = &spec.artifact_file else {
        return;
    };

    let digest = match std::fs::read_to_string(digest_file) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            warn!(
                "Unable to read digest file {}: {}",
                digest_file.display(),
                e
            );
            return;
        }
    };

    match write_artifact_file(path, &DockerArtifact::new(spec, &digest)) {
        Ok(()) => info!("Wrote artifact file {}", path.display()),
        Err(e) => warn!("Unable to write artifact file: {:#}", e),
    }
}
