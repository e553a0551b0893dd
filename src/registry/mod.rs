//! ECR registry API surfaces
//!
//! Private (`*.dkr.ecr.*`) and public (`public.ecr.aws`) registries are
//! served by two parallel AWS APIs. The registry host is classified once and
//! the matching [`RegistryApi`] implementation is used for every call.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use thiserror::Error;
use tracing::debug;

use crate::constants::ecr;

mod private;
mod public;

#[cfg(test)]
pub(crate) mod testing;

pub use private::PrivateRegistry;
pub use public::PublicRegistry;

/// Returns true if `registry` is the public ECR registry
pub fn is_public(registry: &str) -> bool {
    registry.starts_with(ecr::PUBLIC_DOMAIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Public,
    Private,
}

impl RegistryKind {
    pub fn classify(registry: &str) -> Self {
        if is_public(registry) {
            RegistryKind::Public
        } else {
            RegistryKind::Private
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("repository {repository} already exists")]
    AlreadyExists { repository: String },

    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

impl RegistryError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, RegistryError::AlreadyExists { .. })
    }

    pub(crate) fn api<E: std::error::Error>(operation: &'static str, err: E) -> Self {
        RegistryError::Api {
            operation,
            message: aws_sdk_ecr::error::DisplayErrorContext(err).to_string(),
        }
    }
}

/// Operations available on both registry flavours
#[async_trait]
pub trait RegistryApi: Send + Sync {
    fn kind(&self) -> RegistryKind;

    async fn create_repository(&self, name: &str) -> Result<(), RegistryError>;

    async fn set_repository_policy(&self, name: &str, policy_text: &str)
        -> Result<(), RegistryError>;
}

/// Lifecycle policies are only uploaded through the private ECR API
#[async_trait]
pub trait LifecyclePolicyApi: Send + Sync {
    async fn put_lifecycle_policy(&self, name: &str, policy_text: &str)
        -> Result<(), RegistryError>;
}

/// Hands out registry clients for a run
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    /// Client for the API surface `registry` belongs to
    async fn registry_api(&self, registry: &str) -> Box<dyn RegistryApi>;

    /// Client used for lifecycle policy uploads
    async fn lifecycle_api(&self) -> Box<dyn LifecyclePolicyApi>;
}

/// Provider backed by the AWS SDK.
///
/// The SDK config is resolved for every client, so credentials exported
/// earlier in the run are picked up.
pub struct AwsRegistryProvider {
    region: String,
}

impl AwsRegistryProvider {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    async fn load_config(&self) -> aws_config::SdkConfig {
        debug!("Loading AWS config for region {}", self.region);
        aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()))
            .load()
            .await
    }
}

#[async_trait]
impl RegistryProvider for AwsRegistryProvider {
    async fn registry_api(&self, registry: &str) -> Box<dyn RegistryApi> {
        let config = self.load_config().await;
        match RegistryKind::classify(registry) {
            RegistryKind::Public => Box::new(PublicRegistry::new(&config)),
            RegistryKind::Private => Box::new(PrivateRegistry::new(&config)),
        }
    }

    async fn lifecycle_api(&self) -> Box<dyn LifecyclePolicyApi> {
        let config = self.load_config().await;
        Box::new(PrivateRegistry::new(&config))
    }
}
