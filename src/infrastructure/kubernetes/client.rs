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

use crate::infrastructure::constants::FIELD_MANAGER;
use crate::shared::error::EverestError;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::api::PostParams;
use kube::{Api, Client};

/// Cluster-access operations the commands rely on.
#[async_trait::async_trait]
pub trait EverestKubeClient: Send + Sync {
    async fn get_namespace(&self, name: &str) -> Result<Namespace, EverestError>;

    /// Create the secret, or replace the existing one unconditionally.
    async fn set_secret(&self, secret: &Secret) -> Result<(), EverestError>;
}

pub struct EverestKubeClientImpl {
    client: Client,
}

impl EverestKubeClientImpl {
    pub async fn new() -> Result<Self, EverestError> {
        let client = Client::try_default().await.map_err(|e| {
            EverestError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, EverestError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new().await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| EverestError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| EverestError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                EverestError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            EverestError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl EverestKubeClient for EverestKubeClientImpl {
    async fn get_namespace(&self, name: &str) -> Result<Namespace, EverestError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        api.get(name).await.map_err(|e| {
            if let kube::Error::Api(ae) = e {
                if ae.code == 404 {
                    EverestError::not_found("Namespace", name)
                } else {
                    EverestError::KubeError(ae.message)
                }
            } else {
                EverestError::KubeError(e.to_string())
            }
        })
    }

    async fn set_secret(&self, secret: &Secret) -> Result<(), EverestError> {
        let namespace =
            secret.metadata.namespace.as_deref().ok_or_else(|| {
                EverestError::ConfigError("Secret namespace is required".to_string())
            })?;
        let name = secret
            .metadata
            .name
            .as_ref()
            .ok_or_else(|| EverestError::ConfigError("Secret name is required".to_string()))?;
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        let pp = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };
        match api.get(name).await {
            Ok(existing) => {
                api.replace(name, &pp, &replacement_secret(&existing, secret))
                    .await?;
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                api.create(&pp, secret).await?;
            }
            Err(e) => return Err(EverestError::KubeError(e.to_string())),
        }
        Ok(())
    }
}

/// The desired secret pinned to the stored object's resource version, so a
/// replace overwrites every data key instead of merging into them.
fn replacement_secret(existing: &Secret, desired: &Secret) -> Secret {
    let mut secret = desired.clone();
    secret.metadata.resource_version = existing.metadata.resource_version.clone();
    secret
}
