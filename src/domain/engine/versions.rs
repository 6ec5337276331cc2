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

use crate::infrastructure::everest::models::DatabaseEngine;
use crate::infrastructure::everest::EverestClient;
use crate::shared::error::EverestError;
use semver::Version;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, Instrument, Span};

#[derive(Debug, Clone, Default)]
pub struct VersionsConfig {
    pub kubernetes_id: String,
    /// Only list this engine type, e.g. `pxc`.
    pub engine_type: Option<String>,
}

/// Parsed engine versions grouped by engine type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineVersionCatalog {
    engines: HashMap<String, Vec<Version>>,
}

impl EngineVersionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn get(&self, engine_type: &str) -> Option<&[Version]> {
        self.engines.get(engine_type).map(Vec::as_slice)
    }

    pub fn engine_types(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    fn bucket(&mut self, engine_type: &str) -> &mut Vec<Version> {
        self.engines.entry(engine_type.to_string()).or_default()
    }

    /// Versions of one engine, newest first. Versions of equal precedence
    /// (differing only in build metadata) keep their relative order.
    pub fn sorted(&self, engine_type: &str) -> Vec<Version> {
        let mut versions = self.engines.get(engine_type).cloned().unwrap_or_default();
        versions.sort_by(|a, b| b.cmp_precedence(a));
        versions
    }
}

impl fmt::Display for EngineVersionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::with_capacity(self.engines.len());
        for engine_type in self.engines.keys() {
            out.push(format!("-----{}-----", engine_type));
            out.extend(self.sorted(engine_type).iter().map(Version::to_string));
        }
        f.write_str(&out.join("\n"))
    }
}

impl Serialize for EngineVersionCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, Vec<String>> = self
            .engines
            .keys()
            .map(|engine_type| {
                let versions = self
                    .sorted(engine_type)
                    .iter()
                    .map(Version::to_string)
                    .collect();
                (engine_type.as_str(), versions)
            })
            .collect();
        sorted.serialize(serializer)
    }
}

pub struct VersionResolver {
    config: VersionsConfig,
    client: Box<dyn EverestClient>,
    span: Span,
}

impl VersionResolver {
    pub fn new(
        config: VersionsConfig,
        client: Box<dyn EverestClient>,
        span: Span,
    ) -> Result<Self, EverestError> {
        if config.kubernetes_id.trim().is_empty() {
            return Err(EverestError::config_error("kubernetes id is required"));
        }
        Ok(Self {
            config,
            client,
            span,
        })
    }

    pub async fn run(&self) -> Result<EngineVersionCatalog, EverestError> {
        async {
            let engines = self
                .client
                .list_database_engines(&self.config.kubernetes_id)
                .await?;

            match engines.items {
                Some(items) => self.parse_versions(&items),
                None => Ok(EngineVersionCatalog::new()),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    pub fn parse_versions(
        &self,
        items: &[DatabaseEngine],
    ) -> Result<EngineVersionCatalog, EverestError> {
        let mut catalog = EngineVersionCatalog::new();
        for db in items {
            let Some((engine_type, versions)) = self.available_versions(db) else {
                continue;
            };

            let bucket = catalog.bucket(engine_type);
            bucket.reserve(versions.len());
            for raw in versions {
                let version = Version::parse(raw)
                    .map_err(|e| EverestError::validation("version", raw.as_str(), e.to_string()))?;
                bucket.push(version);
            }
        }

        Ok(catalog)
    }

    /// Engine type and version strings of a record, or `None` when the
    /// record is filtered out or lacks version data.
    fn available_versions<'a>(
        &self,
        db: &'a DatabaseEngine,
    ) -> Option<(&'a str, Vec<&'a String>)> {
        let spec = db.spec.as_ref()?;

        if let Some(filter) = self.config.engine_type.as_deref() {
            if !filter.is_empty() && spec.engine_type != filter {
                return None;
            }
        }

        let engine = db
            .status
            .as_ref()
            .and_then(|status| status.available_versions.as_ref())
            .and_then(|available| available.engine.as_ref());
        if engine.is_none() {
            debug!(engine_type = %spec.engine_type, "Skipping engine without version data");
        }

        Some((spec.engine_type.as_str(), engine?.keys().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::everest::models::{
        AvailableVersions, DatabaseEngineList, DatabaseEngineSpec, DatabaseEngineStatus,
        DeleteStatus,
    };
    use crate::infrastructure::everest::models::DatabaseCluster as WireCluster;

    struct NoopClient;

    #[async_trait::async_trait]
    impl EverestClient for NoopClient {
        async fn create_db_cluster(
            &self,
            _kubernetes_id: &str,
            _cluster: &WireCluster,
        ) -> Result<WireCluster, EverestError> {
            unreachable!()
        }

        async fn delete_db_cluster(
            &self,
            _kubernetes_id: &str,
            _name: &str,
        ) -> Result<DeleteStatus, EverestError> {
            unreachable!()
        }

        async fn list_database_engines(
            &self,
            _kubernetes_id: &str,
        ) -> Result<DatabaseEngineList, EverestError> {
            Ok(DatabaseEngineList::default())
        }
    }

    fn resolver(engine_type: Option<&str>) -> VersionResolver {
        VersionResolver::new(
            VersionsConfig {
                kubernetes_id: "k8s-1".to_string(),
                engine_type: engine_type.map(str::to_string),
            },
            Box::new(NoopClient),
            Span::none(),
        )
        .unwrap()
    }

    fn engine(engine_type: &str, versions: &[&str]) -> DatabaseEngine {
        DatabaseEngine {
            metadata: None,
            spec: Some(DatabaseEngineSpec {
                engine_type: engine_type.to_string(),
            }),
            status: Some(DatabaseEngineStatus {
                status: Some("installed".to_string()),
                available_versions: Some(AvailableVersions {
                    engine: Some(
                        versions
                            .iter()
                            .map(|v| (v.to_string(), serde_json::json!({})))
                            .collect(),
                    ),
                    backup: None,
                    proxy: None,
                }),
            }),
        }
    }

    #[test]
    fn test_render_orders_newest_first() {
        let catalog = resolver(None)
            .parse_versions(&[engine("pxc", &["1.0.0", "2.1.0", "1.9.9"])])
            .unwrap();
        assert_eq!(catalog.to_string(), "-----pxc-----\n2.1.0\n1.9.9\n1.0.0");
    }

    #[test]
    fn test_prerelease_sorts_below_release() {
        let catalog = resolver(None)
            .parse_versions(&[engine("pxc", &["8.0.32", "8.0.32-24.2", "8.0.31-23.2"])])
            .unwrap();
        let sorted: Vec<String> = catalog.sorted("pxc").iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["8.0.32", "8.0.32-24.2", "8.0.31-23.2"]);
    }

    #[test]
    fn test_build_metadata_does_not_affect_order() {
        let catalog = resolver(None)
            .parse_versions(&[
                engine("pxc", &["1.0.0+b"]),
                engine("pxc", &["1.0.0+a"]),
                engine("pxc", &["1.0.0+c", "1.1.0"]),
            ])
            .unwrap();
        assert_eq!(
            catalog.to_string(),
            "-----pxc-----\n1.1.0\n1.0.0+b\n1.0.0+a\n1.0.0+c"
        );
        assert_eq!(
            serde_json::to_string(&catalog).unwrap(),
            r#"{"pxc":["1.1.0","1.0.0+b","1.0.0+a","1.0.0+c"]}"#
        );
    }

    #[test]
    fn test_rendering_does_not_reorder_catalog() {
        let catalog = resolver(None)
            .parse_versions(&[engine("pxc", &["1.0.0", "2.0.0"])])
            .unwrap();
        let before = catalog.clone();
        let _ = catalog.to_string();
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_skips_records_without_status_or_spec() {
        let mut no_status = engine("psmdb", &["6.0.5-4"]);
        no_status.status = None;
        let mut no_engine_block = engine("postgresql", &["15.4.0"]);
        no_engine_block
            .status
            .as_mut()
            .unwrap()
            .available_versions
            .as_mut()
            .unwrap()
            .engine = None;
        let no_spec = DatabaseEngine::default();

        let catalog = resolver(None)
            .parse_versions(&[no_status, no_engine_block, no_spec, engine("pxc", &["8.0.32"])])
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("psmdb").is_none());
        assert!(catalog.get("postgresql").is_none());
        assert_eq!(catalog.get("pxc").unwrap().len(), 1);
    }

    #[test]
    fn test_type_filter() {
        let catalog = resolver(Some("pxc"))
            .parse_versions(&[engine("pxc", &["8.0.32"]), engine("psmdb", &["6.0.5"])])
            .unwrap();
        assert_eq!(catalog.engine_types().collect::<Vec<_>>(), vec!["pxc"]);
    }

    #[test]
    fn test_invalid_version_fails_whole_resolution() {
        let err = resolver(None)
            .parse_versions(&[engine("pxc", &["8.0.32"]), engine("psmdb", &["6.0"])])
            .unwrap_err();
        match err {
            EverestError::Validation { field, value, .. } => {
                assert_eq!(field, "version");
                assert_eq!(value, "6.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_engine_type_records_share_bucket() {
        let catalog = resolver(None)
            .parse_versions(&[engine("pxc", &["8.0.31"]), engine("pxc", &["8.0.32"])])
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("pxc").unwrap().len(), 2);
    }

    #[test]
    fn test_json_output() {
        let catalog = resolver(None)
            .parse_versions(&[engine("pxc", &["1.0.0", "1.2.0"]), engine("psmdb", &["6.0.5"])])
            .unwrap();
        assert_eq!(
            serde_json::to_string(&catalog).unwrap(),
            r#"{"psmdb":["6.0.5"],"pxc":["1.2.0","1.0.0"]}"#
        );
    }

    #[test]
    fn test_requires_kubernetes_id() {
        let result = VersionResolver::new(VersionsConfig::default(), Box::new(NoopClient), Span::none());
        assert!(matches!(result, Err(EverestError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_missing_items_yield_empty_catalog() {
        let catalog = resolver(None).run().await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.to_string(), "");
    }
}
