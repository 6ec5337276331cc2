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

use crate::infrastructure::constants::{
    API_DATABASE_CLUSTERS, API_DATABASE_ENGINES, API_KUBERNETES_PREFIX,
};
use crate::infrastructure::everest::models::{
    ApiErrorBody, DatabaseCluster, DatabaseEngineList, DeleteStatus,
};
use crate::shared::error::EverestError;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Control-plane operations the commands rely on.
#[async_trait::async_trait]
pub trait EverestClient: Send + Sync {
    async fn create_db_cluster(
        &self,
        kubernetes_id: &str,
        cluster: &DatabaseCluster,
    ) -> Result<DatabaseCluster, EverestError>;

    async fn delete_db_cluster(
        &self,
        kubernetes_id: &str,
        name: &str,
    ) -> Result<DeleteStatus, EverestError>;

    async fn list_database_engines(
        &self,
        kubernetes_id: &str,
    ) -> Result<DatabaseEngineList, EverestError>;
}

pub struct EverestClientImpl {
    client: Client,
    endpoint: String,
}

impl EverestClientImpl {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, EverestError> {
        Url::parse(endpoint).map_err(|e| {
            EverestError::ConfigError(format!("Invalid Everest endpoint '{}': {}", endpoint, e))
        })?;

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            EverestError::ConfigError(format!("Failed to create Everest client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn resource_url(&self, kubernetes_id: &str, resource: &str, name: Option<&str>) -> String {
        let mut url = format!(
            "{}{}/{}/{}",
            self.endpoint, API_KUBERNETES_PREFIX, kubernetes_id, resource
        );
        if let Some(name) = name {
            url.push('/');
            url.push_str(name);
        }
        url
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, EverestError>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    let text = String::from_utf8_lossy(&body).trim().to_string();
                    if text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("unknown error")
                            .to_string()
                    } else {
                        text
                    }
                });
            return Err(EverestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl EverestClient for EverestClientImpl {
    async fn create_db_cluster(
        &self,
        kubernetes_id: &str,
        cluster: &DatabaseCluster,
    ) -> Result<DatabaseCluster, EverestError> {
        let url = self.resource_url(kubernetes_id, API_DATABASE_CLUSTERS, None);
        debug!(url = %url, "POST database cluster");
        self.send(self.client.post(&url).json(cluster)).await
    }

    async fn delete_db_cluster(
        &self,
        kubernetes_id: &str,
        name: &str,
    ) -> Result<DeleteStatus, EverestError> {
        let url = self.resource_url(kubernetes_id, API_DATABASE_CLUSTERS, Some(name));
        debug!(url = %url, "DELETE database cluster");
        self.send(self.client.delete(&url)).await
    }

    async fn list_database_engines(
        &self,
        kubernetes_id: &str,
    ) -> Result<DatabaseEngineList, EverestError> {
        let url = self.resource_url(kubernetes_id, API_DATABASE_ENGINES, None);
        debug!(url = %url, "GET database engines");
        self.send(self.client.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_urls() {
        let client =
            EverestClientImpl::new("http://everest.local:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "http://everest.local:8080");
        assert_eq!(
            client.resource_url("k8s-1", API_DATABASE_CLUSTERS, None),
            "http://everest.local:8080/v1/kubernetes/k8s-1/database-clusters"
        );
        assert_eq!(
            client.resource_url("k8s-1", API_DATABASE_CLUSTERS, Some("mysql-a")),
            "http://everest.local:8080/v1/kubernetes/k8s-1/database-clusters/mysql-a"
        );
        assert_eq!(
            client.resource_url("k8s-1", API_DATABASE_ENGINES, None),
            "http://everest.local:8080/v1/kubernetes/k8s-1/database-engines"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = EverestClientImpl::new("not a url", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, EverestError::ConfigError(_)));
    }
}
