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

//! Database cluster domain

pub mod delete;
pub mod payload;
pub mod provision;

use crate::shared::error::EverestError;

pub use self::delete::DeleteMySql;
pub use self::payload::{convert_payload, DatabaseCluster};
pub use self::provision::{ClusterSpecRequest, ProvisionMySql};

/// A database cluster inside a Kubernetes cluster registered with Everest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterIdentity {
    pub name: String,
    /// Everest's identifier of the Kubernetes cluster.
    pub kubernetes_id: String,
}

impl ClusterIdentity {
    pub fn new(
        name: impl Into<String>,
        kubernetes_id: impl Into<String>,
    ) -> Result<Self, EverestError> {
        let identity = Self {
            name: name.into(),
            kubernetes_id: kubernetes_id.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    pub fn validate(&self) -> Result<(), EverestError> {
        if self.name.trim().is_empty() {
            return Err(EverestError::config_error("database cluster name is required"));
        }
        if self.kubernetes_id.trim().is_empty() {
            return Err(EverestError::config_error("kubernetes id is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_requires_name_and_kubernetes_id() {
        assert!(ClusterIdentity::new("mysql-a", "k8s-1").is_ok());
        assert!(matches!(
            ClusterIdentity::new("", "k8s-1"),
            Err(EverestError::ConfigError(_))
        ));
        assert!(matches!(
            ClusterIdentity::new("mysql-a", "  "),
            Err(EverestError::ConfigError(_))
        ));
    }
}
