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

//! Operator-side `DatabaseCluster` schema and its translation to the API
//! wire schema.
//!
//! Translation serializes the operator object to compact JSON and decodes
//! that JSON as the wire type. Only fields both schemas share survive:
//!
//! | operator field                       | wire field                     |
//! |--------------------------------------|--------------------------------|
//! | `apiVersion`, `kind`, `metadata`     | same                           |
//! | `spec.engine.{type,version,replicas}`| same, `version` "" when absent |
//! | `spec.engine.storage.{size,class}`   | same                           |
//! | `spec.engine.resources.{cpu,memory}` | same                           |
//! | `spec.proxy.{type,replicas,expose}`  | same                           |
//! | `spec.paused`                        | dropped                        |
//! | `spec.allowUnsafeConfiguration`      | dropped                        |
//! | `spec.engine.userSecretsName`        | dropped                        |
//! | (none)                               | `status`, `spec.monitoring`, `spec.backup` default to absent |

use crate::domain::quantity::Quantity;
use crate::infrastructure::everest::models as wire;
use crate::shared::error::EverestError;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCluster {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: DatabaseClusterSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseClusterSpec {
    pub paused: bool,
    pub allow_unsafe_configuration: bool,
    pub engine: Engine,
    pub proxy: Proxy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    #[serde(rename = "type")]
    pub engine_type: EngineType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub replicas: i32,
    pub storage: Storage,
    pub resources: Resources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_secrets_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub size: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: Quantity,
    pub memory: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    #[serde(rename = "type")]
    pub proxy_type: ProxyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    pub expose: Expose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expose {
    #[serde(rename = "type")]
    pub expose_type: ExposeType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_source_ranges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Pxc,
    Psmdb,
    Postgresql,
}

impl EngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::Pxc => "pxc",
            EngineType::Psmdb => "psmdb",
            EngineType::Postgresql => "postgresql",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    Mongos,
    #[serde(rename = "haproxy")]
    HAProxy,
    #[serde(rename = "proxysql")]
    ProxySQL,
    #[serde(rename = "pgbouncer")]
    PGBouncer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposeType {
    Internal,
    External,
}

impl ExposeType {
    pub fn from_external_access(external_access: bool) -> Self {
        if external_access {
            ExposeType::External
        } else {
            ExposeType::Internal
        }
    }
}

/// Compact JSON form of the operator object. Field order follows the
/// struct declarations and maps are sorted, so equal inputs always produce
/// identical bytes.
pub fn canonical_json(payload: &DatabaseCluster) -> Result<Vec<u8>, EverestError> {
    serde_json::to_vec(payload)
        .map_err(|e| EverestError::Internal(format!("cannot marshal payload to json: {}", e)))
}

/// Translate the operator object into the API wire schema.
pub fn convert_payload(payload: &DatabaseCluster) -> Result<wire::DatabaseCluster, EverestError> {
    let body = canonical_json(payload)?;
    debug!(payload = %String::from_utf8_lossy(&body), "Translated cluster payload");

    serde_json::from_slice(&body).map_err(|e| {
        EverestError::Internal(format!("cannot unmarshal payload back to json: {}", e))
    })
}
