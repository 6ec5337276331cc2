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

/// Everest API paths
pub const API_KUBERNETES_PREFIX: &str = "/v1/kubernetes";
pub const API_DATABASE_CLUSTERS: &str = "database-clusters";
pub const API_DATABASE_ENGINES: &str = "database-engines";

/// Everest defaults
pub const DEFAULT_EVEREST_ENDPOINT: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Custom resource identity
pub const DATABASE_CLUSTER_API_VERSION: &str = "everest.percona.com/v1alpha1";
pub const DATABASE_CLUSTER_KIND: &str = "DatabaseCluster";

/// Version sentinel meaning "let the operator pick the newest engine"
pub const VERSION_LATEST: &str = "latest";

/// Password secret
pub const PASSWORD_SECRET_NAME: &str = "everest-password";
pub const PASSWORD_SECRET_KEY: &str = "password";
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Password generation and derivation
pub const PASSWORD_LENGTH: usize = 128;
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const PBKDF2_ROUNDS: u32 = 4096;
pub const PBKDF2_KEY_LENGTH: usize = 32;

/// Field manager recorded on secret writes
pub const FIELD_MANAGER: &str = "everest-cli";

/// Configuration file environment variable
pub const CONF_FILE_ENV: &str = "EVEREST_CONF_FILE";
