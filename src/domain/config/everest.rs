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

//! Configuration file for the Everest CLI
//!
//! ```toml
//! [everest]
//! endpoint = "http://127.0.0.1:8080"
//! kubernetes_id = "my-k8s"
//! timeout_secs = 30
//!
//! [kubernetes]
//! kubeconfig = "/home/me/.kube/config"
//! context = "prod"
//! ```

use crate::infrastructure::constants::{
    CONF_FILE_ENV, DEFAULT_EVEREST_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::shared::error::EverestError;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EverestConf {
    pub everest: EverestApiConf,
    pub kubernetes: KubernetesConf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EverestApiConf {
    pub endpoint: String,
    pub kubernetes_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for EverestApiConf {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EVEREST_ENDPOINT.to_string(),
            kubernetes_id: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl EverestApiConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesConf {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
}

impl EverestConf {
    /// Load configuration from a TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self, EverestError> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            EverestError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Explicit path, then the `EVEREST_CONF_FILE` environment variable,
    /// then built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, EverestError> {
        if let Some(path) = path {
            return Self::from(path);
        }
        match std::env::var(CONF_FILE_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::from(env_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EverestError> {
        if self.everest.endpoint.trim().is_empty() {
            return Err(EverestError::config_error("everest.endpoint must not be empty"));
        }
        if self.everest.timeout_secs == 0 {
            return Err(EverestError::config_error("everest.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Command line value first, then the config file value.
pub fn resolve_option(cli: Option<&str>, file: Option<&str>) -> Option<String> {
    let present = |value: &&str| !value.trim().is_empty();
    cli.filter(present)
        .or_else(|| file.filter(present))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let conf = EverestConf::default();
        assert_eq!(conf.everest.endpoint, "http://127.0.0.1:8080");
        assert_eq!(conf.everest.timeout(), Duration::from_secs(30));
        assert!(conf.everest.kubernetes_id.is_none());
        assert!(conf.kubernetes.kubeconfig.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[everest]\nendpoint = \"https://everest.example.com\"\nkubernetes_id = \"k8s-prod\"\n\n[kubernetes]\ncontext = \"prod\""
        )
        .unwrap();

        let conf = EverestConf::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(conf.everest.endpoint, "https://everest.example.com");
        assert_eq!(conf.everest.kubernetes_id.as_deref(), Some("k8s-prod"));
        assert_eq!(conf.everest.timeout_secs, 30);
        assert_eq!(conf.kubernetes.context.as_deref(), Some("prod"));
    }

    #[test]
    fn test_invalid_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[everest]\ntimeout_secs = 0").unwrap();
        let err = EverestConf::from(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, EverestError::ConfigError(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[everest\nendpoint=").unwrap();
        let err = EverestConf::from(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, EverestError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EverestConf::from("/nonexistent/everest.toml").unwrap_err();
        assert!(matches!(err, EverestError::ConfigError(_)));
    }

    #[test]
    fn test_resolve_option_priority() {
        assert_eq!(resolve_option(Some("cli"), Some("file")).as_deref(), Some("cli"));
        assert_eq!(resolve_option(None, Some("file")).as_deref(), Some("file"));
        assert_eq!(resolve_option(None, None), None);
        assert_eq!(resolve_option(Some(""), None), None);
        assert_eq!(resolve_option(Some(" "), Some("file")).as_deref(), Some("file"));
    }
}
