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

//! Wire types exchanged with the Everest API.
//!
//! These mirror the API schema, not the operator's custom resource. Every
//! field tolerates absence so that payloads produced from the operator
//! schema decode with zero values where the two schemas disagree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DatabaseClusterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DatabaseClusterStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseClusterSpec {
    #[serde(default)]
    pub engine: Engine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    #[serde(default, rename = "type")]
    pub engine_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub memory: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    #[serde(default, rename = "type")]
    pub proxy_type: String,
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub expose: Expose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expose {
    #[serde(default, rename = "type")]
    pub expose_type: ExposeType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_source_ranges: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposeType {
    #[default]
    Internal,
    External,
}

impl ExposeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExposeType::Internal => "internal",
            ExposeType::External => "external",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

/// Response to a delete request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEngineList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<DatabaseEngine>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEngine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DatabaseEngineSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DatabaseEngineStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEngineSpec {
    #[serde(default, rename = "type")]
    pub engine_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseEngineStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_versions: Option<AvailableVersions>,
}

/// Version blocks keyed by version string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableVersions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<BTreeMap<String, Value>>,
}

/// Error body returned by the Everest API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_list_decodes_api_response() {
        let raw = r#"{
            "items": [
                {
                    "metadata": {"name": "percona-xtradb-cluster"},
                    "spec": {"type": "pxc"},
                    "status": {
                        "status": "installed",
                        "availableVersions": {
                            "engine": {
                                "8.0.32-24.2": {"status": "recommended"},
                                "8.0.31-23.2": {"status": "available"}
                            }
                        }
                    }
                },
                {"spec": {"type": "psmdb"}}
            ]
        }"#;
        let list: DatabaseEngineList = serde_json::from_str(raw).unwrap();
        let items = list.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].spec.as_ref().unwrap().engine_type, "pxc");
        let engine = items[0]
            .status
            .as_ref()
            .and_then(|s| s.available_versions.as_ref())
            .and_then(|v| v.engine.as_ref())
            .unwrap();
        assert!(engine.contains_key("8.0.32-24.2"));
        assert!(items[1].status.is_none());
    }

    #[test]
    fn test_missing_items_decode_as_none() {
        let list: DatabaseEngineList = serde_json::from_str("{}").unwrap();
        assert!(list.items.is_none());
    }

    #[test]
    fn test_expose_type_rejects_unknown_values() {
        assert!(serde_json::from_str::<ExposeType>("\"public\"").is_err());
        assert_eq!(
            serde_json::from_str::<ExposeType>("\"external\"").unwrap(),
            ExposeType::External
        );
    }
}
