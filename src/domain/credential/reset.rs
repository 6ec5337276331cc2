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
    PASSWORD_ALPHABET, PASSWORD_LENGTH, PASSWORD_SECRET_KEY, PASSWORD_SECRET_NAME,
    PBKDF2_KEY_LENGTH, PBKDF2_ROUNDS, SECRET_TYPE_OPAQUE,
};
use crate::infrastructure::kubernetes::EverestKubeClient;
use crate::shared::error::EverestError;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, Instrument, Span};

#[derive(Debug, Clone, Default)]
pub struct ResetConfig {
    /// Namespace the Everest installation lives in.
    pub namespace: String,
}

#[derive(Clone, Serialize)]
pub struct ResetResponse {
    /// Plain-text password generated by the command.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl fmt::Display for ResetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your new password is:\n{}", self.password)
    }
}

impl fmt::Debug for ResetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetResponse")
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct PasswordReset {
    config: ResetConfig,
    client: Box<dyn EverestKubeClient>,
    span: Span,
}

impl PasswordReset {
    pub fn new(
        config: ResetConfig,
        client: Box<dyn EverestKubeClient>,
        span: Span,
    ) -> Result<Self, EverestError> {
        if config.namespace.trim().is_empty() {
            return Err(EverestError::config_error("namespace is required"));
        }
        Ok(Self {
            config,
            client,
            span,
        })
    }

    pub async fn run(&self) -> Result<ResetResponse, EverestError> {
        let namespace = &self.config.namespace;
        async {
            let ns = self
                .client
                .get_namespace(namespace)
                .await
                .map_err(|e| EverestError::remote("could not get namespace from Kubernetes", e))?;
            let uid = ns.metadata.uid.ok_or_else(|| {
                EverestError::remote(
                    "could not get namespace from Kubernetes",
                    EverestError::KubeError(format!("namespace '{}' has no uid", namespace)),
                )
            })?;

            let password = generate_password();
            let hash = derive_hash(&password, uid.as_bytes());

            self.client
                .set_secret(&password_secret(namespace, hash.to_vec()))
                .await
                .map_err(|e| {
                    EverestError::remote("could not update password in Kubernetes", e)
                })?;

            info!("Password secret {:?} updated", PASSWORD_SECRET_NAME);
            Ok::<_, EverestError>(ResetResponse { password })
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Random alphanumeric password from the OS random source.
pub fn generate_password() -> String {
    (0..PASSWORD_LENGTH)
        .map(|_| PASSWORD_ALPHABET[OsRng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

/// PBKDF2-HMAC-SHA256 of the password, salted with the namespace UID.
pub fn derive_hash(password: &str, salt: &[u8]) -> [u8; PBKDF2_KEY_LENGTH] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, PBKDF2_KEY_LENGTH>(
        password.as_bytes(),
        salt,
        PBKDF2_ROUNDS,
    )
}

pub fn password_secret(namespace: &str, hash: Vec<u8>) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(PASSWORD_SECRET_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        type_: Some(SECRET_TYPE_OPAQUE.to_string()),
        data: Some(BTreeMap::from([(
            PASSWORD_SECRET_KEY.to_string(),
            ByteString(hash),
        )])),
        ..Default::default()
    }
}
