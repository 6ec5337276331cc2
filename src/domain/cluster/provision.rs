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

use crate::domain::cluster::payload::{
    convert_payload, DatabaseCluster, DatabaseClusterSpec, Engine, EngineType, Expose,
    ExposeType, Proxy, ProxyType, Resources, Storage,
};
use crate::domain::cluster::ClusterIdentity;
use crate::domain::quantity::parse_field;
use crate::infrastructure::constants::{
    DATABASE_CLUSTER_API_VERSION, DATABASE_CLUSTER_KIND, VERSION_LATEST,
};
use crate::infrastructure::everest::models as wire;
use crate::infrastructure::everest::EverestClient;
use crate::shared::error::EverestError;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::{debug, info, Instrument, Span};

/// Operator input for a new MySQL (Percona XtraDB Cluster) database.
#[derive(Debug, Clone)]
pub struct ClusterSpecRequest {
    pub identity: ClusterIdentity,
    /// Engine version, or `latest` for the operator's newest.
    pub version: String,
    pub nodes: u32,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub external_access: bool,
}

pub struct ProvisionMySql {
    request: ClusterSpecRequest,
    client: Box<dyn EverestClient>,
    span: Span,
}

impl ProvisionMySql {
    pub fn new(
        request: ClusterSpecRequest,
        client: Box<dyn EverestClient>,
        span: Span,
    ) -> Result<Self, EverestError> {
        request.identity.validate()?;
        Ok(Self {
            request,
            client,
            span,
        })
    }

    /// Validate the request and submit it. The cluster is created
    /// asynchronously by the operator; this returns once Everest accepts it.
    pub async fn run(&self) -> Result<bool, EverestError> {
        let name = &self.request.identity.name;
        async {
            info!("Preparing cluster config");
            let body = self.prepare_body()?;

            info!("Creating {:?} database cluster", name);
            self.client
                .create_db_cluster(&self.request.identity.kubernetes_id, &body)
                .await?;

            info!("Database cluster {:?} has been scheduled to Kubernetes", name);
            Ok::<_, EverestError>(true)
        }
        .instrument(self.span.clone())
        .await
    }

    pub fn prepare_body(&self) -> Result<wire::DatabaseCluster, EverestError> {
        let payload = self.build_spec()?;
        convert_payload(&payload)
    }

    pub fn build_spec(&self) -> Result<DatabaseCluster, EverestError> {
        let request = &self.request;
        let cpu = parse_field("cpu", &request.cpu)?;
        let memory = parse_field("memory", &request.memory)?;
        let disk = parse_field("disk", &request.disk)?;
        let replicas = replica_count(request.nodes)?;

        let expose_type = ExposeType::from_external_access(request.external_access);
        if expose_type == ExposeType::External {
            debug!("Enabling external access");
        }

        Ok(DatabaseCluster {
            api_version: DATABASE_CLUSTER_API_VERSION.to_string(),
            kind: DATABASE_CLUSTER_KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(request.identity.name.clone()),
                ..Default::default()
            },
            spec: DatabaseClusterSpec {
                paused: false,
                allow_unsafe_configuration: false,
                engine: Engine {
                    engine_type: EngineType::Pxc,
                    version: normalize_version(&request.version),
                    replicas,
                    storage: Storage {
                        size: disk,
                        class: None,
                    },
                    resources: Resources { cpu, memory },
                    user_secrets_name: None,
                    config: None,
                },
                proxy: Proxy {
                    proxy_type: ProxyType::HAProxy,
                    replicas: Some(replicas),
                    expose: Expose {
                        expose_type,
                        ip_source_ranges: Vec::new(),
                    },
                    config: None,
                },
            },
        })
    }
}

/// `latest` becomes the empty version, which the operator reads as its
/// newest engine. Anything else passes through untouched.
pub fn normalize_version(version: &str) -> String {
    if version == VERSION_LATEST {
        String::new()
    } else {
        version.to_string()
    }
}

fn replica_count(nodes: u32) -> Result<i32, EverestError> {
    if nodes == 0 {
        return Err(EverestError::validation(
            "nodes",
            nodes.to_string(),
            "must be at least 1",
        ));
    }
    i32::try_from(nodes).map_err(|_| {
        EverestError::validation("nodes", nodes.to_string(), "exceeds the maximum replica count")
    })
}
