//! Upload of repository lifecycle and access policies
//!
//! Policy documents are forwarded exactly as read; their JSON is not
//! inspected here.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use crate::registry::{LifecyclePolicyApi, RegistryApi};


/// Read a policy document verbatim
pub fn read_policy(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))
}

pub async fn upload_lifecycle_policy(
    api: &dyn LifecyclePolicyApi,
    repository: &str,
    path: &Path,
) -> Result<()> {
    check_repository(repository)?;
    let policy = read_policy(path)?;

    api.put_lifecycle_policy(repository, &policy)
        .await
        .context("error uploading ECR lifecycle policy")?;
    info!("Uploaded lifecycle policy for {}", repository);
    Ok(())
}

pub async fn upload_repository_policy(
    api: &dyn RegistryApi,
    repository: &str,
    path: &Path,
) -> Result<()> {
    check_repository(repository)?;
    let policy = read_policy(path)?;

    api.set_repository_policy(repository, &policy)
        .await
        .context("error uploading ECR repository policy")?;
    info!("Uploaded repository policy for {}", repository);
    Ok(())
}

fn check_repository(repository: &str) -> Result<()> {
    if repository.is_empty() {
        bail!("repo must be specified");
    }
    Ok(())
}
