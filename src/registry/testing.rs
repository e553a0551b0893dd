//! In-memory registry used by unit tests

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{
    LifecyclePolicyApi, RegistryApi, RegistryError, RegistryKind, RegistryProvider,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateRepository {
        kind: RegistryKind,
        name: String,
    },
    SetRepositoryPolicy {
        kind: RegistryKind,
        name: String,
        policy: String,
    },
    PutLifecyclePolicy {
        name: String,
        policy: String,
    },
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    repositories: HashSet<String>,
    fail_with: Option<String>,
}

/// Records every call and keeps a set of existing repositories
#[derive(Clone, Default)]
pub struct RecordingProvider {
    state: Arc<Mutex<State>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .repositories
            .insert(name.to_string());
        self
    }

    /// Every API call fails with `message`
    pub fn failing(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_with = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn client(&self, kind: RegistryKind) -> RecordingRegistry {
        RecordingRegistry {
            kind,
            state: self.state.clone(),
        }
    }
}

#[async_trait]
impl RegistryProvider for RecordingProvider {
    async fn registry_api(&self, registry: &str) -> Box<dyn RegistryApi> {
        Box::new(self.client(RegistryKind::classify(registry)))
    }

    async fn lifecycle_api(&self) -> Box<dyn LifecyclePolicyApi> {
        Box::new(self.client(RegistryKind::Private))
    }
}

pub struct RecordingRegistry {
    kind: RegistryKind,
    state: Arc<Mutex<State>>,
}

impl RecordingRegistry {
    fn record(&self, operation: &'static str, call: Call) -> Result<(), RegistryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.fail_with {
            Some(message) => Err(RegistryError::Api {
                operation,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RegistryApi for RecordingRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    async fn create_repository(&self, name: &str) -> Result<(), RegistryError> {
        self.record(
            "CreateRepository",
            Call::CreateRepository {
                kind: self.kind,
                name: name.to_string(),
            },
        )?;

        let mut state = self.state.lock().unwrap();
        if !state.repositories.insert(name.to_string()) {
            return Err(RegistryError::AlreadyExists {
                repository: name.to_string(),
            });
        }
        Ok(())
    }

    async fn set_repository_policy(
        &self,
        name: &str,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        self.record(
            "SetRepositoryPolicy",
            Call::SetRepositoryPolicy {
                kind: self.kind,
                name: name.to_string(),
                policy: policy_text.to_string(),
            },
        )
    }
}

#[async_trait]
impl LifecyclePolicyApi for RecordingRegistry {
    async fn put_lifecycle_policy(
        &self,
        name: &str,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        self.record(
            "PutLifecyclePolicy",
            Call::PutLifecyclePolicy {
                name: name.to_string(),
                policy: policy_text.to_string(),
            },
        )
    }
}
