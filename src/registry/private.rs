use async_trait::async_trait;
use aws_sdk_ecr::Client;
use tracing::debug;

use super::{LifecyclePolicyApi, RegistryApi, RegistryError, RegistryKind};

/// Private ECR (`<account>.dkr.ecr.<region>.amazonaws.com`)
pub struct PrivateRegistry {
    client: Client,
}

impl PrivateRegistry {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RegistryApi for PrivateRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Private
    }

    async fn create_repository(&self, name: &str) -> Result<(), RegistryError> {
        debug!("CreateRepository {} (private)", name);
        match self
            .client
            .create_repository()
            .repository_name(name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                if let Some(service_err) = err.as_service_error() {
                    if service_err.is_repository_already_exists_exception() {
                        return Err(RegistryError::AlreadyExists {
                            repository: name.to_string(),
                        });
                    }
                }
                Err(RegistryError::api("CreateRepository", err))
            }
        }
    }

    async fn set_repository_policy(
        &self,
        name: &str,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        debug!("SetRepositoryPolicy {} (private)", name);
        self.client
            .set_repository_policy()
            .repository_name(name)
            .policy_text(policy_text)
            .send()
            .await
            .map_err(|e| RegistryError::api("SetRepositoryPolicy", e))?;
        Ok(())
    }
}

#[async_trait]
impl LifecyclePolicyApi for PrivateRegistry {
    async fn put_lifecycle_policy(
        &self,
        name: &str,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        debug!("PutLifecyclePolicy {}", name);
        self.client
            .put_lifecycle_policy()
            .repository_name(name)
            .lifecycle_policy_text(policy_text)
            .send()
            .await
            .map_err(|e| RegistryError::api("PutLifecyclePolicy", e))?;
        Ok(())
    }
}
