//! Registry authentication setup for the kaniko executor
//!
//! kaniko resolves registry credentials through a Docker config file. For ECR
//! that file delegates to the `ecr-login` credential helper, which in turn
//! reads the standard AWS credential chain. Static keys, when given, are
//! exported so the helper can find them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{ecr, env};


/// Docker config naming the credential helper for each ECR host.
///
/// The file is written from scratch on every run, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDescriptor {
    #[serde(rename = "credStore")]
    pub cred_store: String,
    #[serde(rename = "credHelpers")]
    pub cred_helpers: BTreeMap<String, String>,
}

impl CredentialDescriptor {
    /// Descriptor routing both the public domain and `registry` to `ecr-login`
    pub fn for_registry(registry: &str) -> Self {
        let helper = ecr::CREDENTIAL_HELPER.to_string();
        let mut cred_helpers = BTreeMap::new();
        cred_helpers.insert(ecr::PUBLIC_DOMAIN.to_string(), helper.clone());
        cred_helpers.insert(registry.to_string(), helper.clone());

        Self {
            cred_store: helper,
            cred_helpers,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self).context("failed to encode docker config")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("failed to create docker config file")?;
            }
        }
        std::fs::write(path, json).context("failed to create docker config file")?;
        Ok(())
    }
}

/// Prepare ECR authentication for the executor.
///
/// Exports the access and secret key when both are present, then writes the
/// credential descriptor to `config_path`. Fails before touching anything when
/// `registry` is empty.
pub fn setup_ecr_auth(
    access_key: Option<&str>,
    secret_key: Option<&str>,
    registry: &str,
    config_path: &Path,
) -> Result<()> {
    if registry.is_empty() {
        bail!("registry must be specified");
    }

    // With an IAM role neither key is needed
    match (non_empty(access_key), non_empty(secret_key)) {
        (Some(access_key), Some(secret_key)) => {
            export_var(env::AWS_ACCESS_KEY_ID, access_key)?;
            export_var(env::AWS_SECRET_ACCESS_KEY, secret_key)?;
            debug!("Exported static AWS credentials");
        }
        _ => debug!("No static AWS credentials, relying on the default chain"),
    }

    CredentialDescriptor::for_registry(registry).write(config_path)?;
    info!(
        "Wrote ECR credential helper config for {} to {}",
        registry,
        config_path.display()
    );
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `std::env::set_var` panics on values the platform cannot store, so check first.
fn export_var(key: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(anyhow::anyhow!("value contains a NUL byte"))
            .with_context(|| format!("failed to set {} environment variable", key));
    }
    std::env::set_var(key, value);
    Ok(())
}
