// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use everest_cli::domain::credential::reset::derive_hash;
use everest_cli::*;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::Span;

/// Namespaces and secrets held in memory.
#[derive(Clone, Default)]
struct FakeCluster {
    namespaces: HashMap<String, String>,
    secrets: Arc<Mutex<Vec<Secret>>>,
    fail_writes: bool,
}

impl FakeCluster {
    fn with_namespace(name: &str, uid: &str) -> Self {
        Self {
            namespaces: HashMap::from([(name.to_string(), uid.to_string())]),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl EverestKubeClient for FakeCluster {
    async fn get_namespace(&self, name: &str) -> Result<Namespace> {
        let uid = self
            .namespaces
            .get(name)
            .ok_or_else(|| EverestError::not_found("Namespace", name))?;
        Ok(Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                uid: Some(uid.clone()),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn set_secret(&self, secret: &Secret) -> Result<()> {
        if self.fail_writes {
            return Err(EverestError::KubeError("forbidden".to_string()));
        }
        self.secrets.lock().unwrap().push(secret.clone());
        Ok(())
    }
}

fn reset(cluster: &FakeCluster, namespace: &str) -> PasswordReset {
    PasswordReset::new(
        ResetConfig {
            namespace: namespace.to_string(),
        },
        Box::new(cluster.clone()),
        Span::none(),
    )
    .unwrap()
}

fn stored_hash(secret: &Secret) -> Vec<u8> {
    secret.data.as_ref().unwrap()["password"].0.clone()
}

#[tokio::test]
async fn test_reset_persists_derived_hash_only() {
    let cluster = FakeCluster::with_namespace("percona-everest", "3f1c-uid");
    let response = reset(&cluster, "percona-everest").run().await.unwrap();

    assert_eq!(response.password.len(), 128);

    let secrets = cluster.secrets.lock().unwrap();
    assert_eq!(secrets.len(), 1);
    let secret = &secrets[0];
    assert_eq!(secret.metadata.name.as_deref(), Some("everest-password"));
    assert_eq!(secret.metadata.namespace.as_deref(), Some("percona-everest"));
    assert_eq!(secret.type_.as_deref(), Some("Opaque"));

    let hash = stored_hash(secret);
    assert_eq!(hash, derive_hash(&response.password, b"3f1c-uid").to_vec());
    assert_ne!(hash, response.password.as_bytes());

    let serialized = serde_json::to_string(secret).unwrap();
    assert!(!serialized.contains(&response.password));
}

#[tokio::test]
async fn test_consecutive_resets_differ() {
    let cluster = FakeCluster::with_namespace("percona-everest", "3f1c-uid");
    let command = reset(&cluster, "percona-everest");

    let first = command.run().await.unwrap();
    let second = command.run().await.unwrap();
    assert_ne!(first.password, second.password);

    let secrets = cluster.secrets.lock().unwrap();
    assert_eq!(secrets.len(), 2);
    assert_ne!(stored_hash(&secrets[0]), stored_hash(&secrets[1]));
}

#[tokio::test]
async fn test_missing_namespace_is_wrapped() {
    let cluster = FakeCluster::default();
    let err = reset(&cluster, "percona-everest").run().await.unwrap_err();

    match &err {
        EverestError::Remote { context, source } => {
            assert_eq!(context, "could not get namespace from Kubernetes");
            assert!(matches!(**source, EverestError::NotFound { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(cluster.secrets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_secret_write_failure_is_wrapped() {
    let cluster = FakeCluster {
        fail_writes: true,
        ..FakeCluster::with_namespace("percona-everest", "3f1c-uid")
    };
    let err = reset(&cluster, "percona-everest").run().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "could not update password in Kubernetes: Kubernetes API error: forbidden"
    );
}

#[test]
fn test_reset_requires_namespace() {
    let result = PasswordReset::new(
        ResetConfig::default(),
        Box::new(FakeCluster::default()),
        Span::none(),
    );
    assert!(matches!(result, Err(EverestError::ConfigError(_))));
}

#[tokio::test]
#[ignore] // Requires Kubernetes cluster
async fn test_live_namespace_lookup() {
    let client = EverestKubeClientImpl::new().await.unwrap();
    let ns = client.get_namespace("default").await.unwrap();
    assert!(ns.metadata.uid.is_some());
}
