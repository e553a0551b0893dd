use async_trait::async_trait;
use aws_sdk_ecrpublic::Client;
use tracing::debug;

use super::{RegistryApi, RegistryError, RegistryKind};

/// Public ECR (`public.ecr.aws/<alias>`)
pub struct PublicRegistry {
    client: Client,
}

impl PublicRegistry {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RegistryApi for PublicRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Public
    }

    async fn create_repository(&self, name: &str) -> Result<(), RegistryError> {
        debug!("CreateRepository {} (public)", name);
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
        debug!("SetRepositoryPolicy {} (public)", name);
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
