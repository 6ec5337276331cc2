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

use crate::domain::cluster::ClusterIdentity;
use crate::infrastructure::everest::EverestClient;
use crate::infrastructure::prompt::Confirmer;
use crate::shared::error::EverestError;
use tracing::{info, Instrument, Span};

pub struct DeleteMySql {
    identity: ClusterIdentity,
    /// Skip the confirmation prompt.
    force: bool,
    client: Box<dyn EverestClient>,
    confirmer: Box<dyn Confirmer>,
    span: Span,
}

impl DeleteMySql {
    pub fn new(
        identity: ClusterIdentity,
        force: bool,
        client: Box<dyn EverestClient>,
        confirmer: Box<dyn Confirmer>,
        span: Span,
    ) -> Result<Self, EverestError> {
        identity.validate()?;
        Ok(Self {
            identity,
            force,
            client,
            confirmer,
            span,
        })
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "Are you sure you want to remove the {:?} database cluster?",
            self.identity.name
        )
    }

    /// Returns `false` when the operator declined and nothing was deleted.
    pub async fn run(&self) -> Result<bool, EverestError> {
        let name = &self.identity.name;
        async {
            if !self.force && !self.confirmer.confirm(&self.confirmation_message())? {
                info!("Exiting");
                return Ok(false);
            }

            info!("Deleting {:?} cluster", name);
            self.client
                .delete_db_cluster(&self.identity.kubernetes_id, name)
                .await?;

            info!("Cluster {:?} successfully deleted", name);
            Ok::<_, EverestError>(true)
        }
        .instrument(self.span.clone())
        .await
    }
}
