use anyhow::{bail, Context, Result};
use tracing::info;

use crate::registry::RegistryApi;


/// Create `repository` unless it already exists.
///
/// Both arguments are checked before any API call is made.
pub async fn ensure_repository(
    api: &dyn RegistryApi,
    repository: &str,
    registry: &str,
) -> Result<()> {
    if registry.is_empty() {
        bail!("registry must be specified");
    }
    if repository.is_empty() {
        bail!("repo must be specified");
    }

    info!("Creating repository {} in {}", repository, registry);
    match api.create_repository(repository).await {
        Ok(()) => {
            info!("Created repository {}", repository);
            Ok(())
        }
        Err(e) if e.is_already_exists() => {
            info!("Repository {} already exists", repository);
            Ok(())
        }
        Err(e) => Err(e).context("failed to create repository"),
    }
}
