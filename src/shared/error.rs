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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, EverestError>;

#[derive(Error, Debug)]
pub enum EverestError {
    #[error("Validation error: cannot parse {field} '{value}': {message}")]
    Validation {
        field: String,
        value: String,
        message: String,
    },

    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: Box<EverestError>,
    },

    #[error("Everest API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("Resource not found: {resource_type} '{name}'")]
    NotFound { resource_type: String, name: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for EverestError {
    fn from(err: kube::Error) -> Self {
        EverestError::KubeError(err.to_string())
    }
}

impl EverestError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure with the operation that was being attempted.
    pub fn remote(context: impl Into<String>, source: EverestError) -> Self {
        Self::Remote {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn not_found(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// True for failures caused by malformed user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
