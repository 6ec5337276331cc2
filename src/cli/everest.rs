//! Everest database commands

use crate::cli::display::{OutputFormat, StatusIcon, TableRenderer};
use crate::domain::cluster::{ClusterIdentity, ClusterSpecRequest, DeleteMySql, ProvisionMySql};
use crate::domain::config::{resolve_option, EverestConf};
use crate::domain::credential::{PasswordReset, ResetConfig};
use crate::domain::engine::{VersionResolver, VersionsConfig};
use crate::infrastructure::everest::EverestClientImpl;
use crate::infrastructure::kubernetes::EverestKubeClientImpl;
use crate::infrastructure::prompt::TerminalConfirmer;
use clap::Parser;
use tracing::{error, info_span};

/// Connection flags shared by commands talking to the Everest API
#[derive(clap::Args, Debug, Clone)]
pub struct EverestArgs {
    /// Everest identifier of the Kubernetes cluster
    /// If not provided, will use everest.kubernetes_id from config file
    #[arg(long)]
    pub kubernetes_id: Option<String>,

    /// Everest API endpoint
    /// If not provided, will use everest.endpoint from config file
    #[arg(long)]
    pub everest_url: Option<String>,
}

impl EverestArgs {
    fn kubernetes_id(&self, conf: &EverestConf) -> anyhow::Result<String> {
        resolve_option(
            self.kubernetes_id.as_deref(),
            conf.everest.kubernetes_id.as_deref(),
        )
        .ok_or_else(|| anyhow::anyhow!("kubernetes id is required (use --kubernetes-id)"))
    }

    fn client(&self, conf: &EverestConf) -> anyhow::Result<EverestClientImpl> {
        let endpoint = resolve_option(
            self.everest_url.as_deref(),
            Some(conf.everest.endpoint.as_str()),
        )
        .unwrap_or_else(|| conf.everest.endpoint.clone());
        EverestClientImpl::new(&endpoint, conf.everest.timeout())
            .map_err(|e| anyhow::anyhow!("Failed to create Everest client: {}", e))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ProvisionMysqlCommand {
    /// Database cluster name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub everest: EverestArgs,

    /// Engine version, or "latest" to let the operator choose
    #[arg(long, default_value = "latest")]
    pub db_version: String,

    /// Number of database nodes
    #[arg(long, default_value = "3")]
    pub nodes: u32,

    /// CPUs per node
    #[arg(long, default_value = "1")]
    pub cpu: String,

    /// Memory per node
    #[arg(long, default_value = "2G")]
    pub memory: String,

    /// Disk storage per node
    #[arg(long, default_value = "15G")]
    pub disk: String,

    /// Expose the cluster outside of Kubernetes
    #[arg(long)]
    pub external_access: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteMysqlCommand {
    /// Database cluster name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub everest: EverestArgs,

    /// Do not ask for confirmation
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListVersionsCommand {
    #[command(flatten)]
    pub everest: EverestArgs,

    /// Only list versions of this engine type (e.g. pxc, psmdb, postgresql)
    #[arg(long = "type")]
    pub engine_type: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct PasswordResetCommand {
    /// Namespace Everest is installed in
    #[arg(long, short = 'n', default_value = "percona-everest")]
    pub namespace: String,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl ProvisionMysqlCommand {
    pub async fn execute(&self, conf: &EverestConf) -> anyhow::Result<()> {
        let kubernetes_id = self.everest.kubernetes_id(conf)?;
        let identity = ClusterIdentity::new(self.name.clone(), kubernetes_id)?;
        let client = self.everest.client(conf)?;

        let request = ClusterSpecRequest {
            identity,
            version: self.db_version.clone(),
            nodes: self.nodes,
            cpu: self.cpu.clone(),
            memory: self.memory.clone(),
            disk: self.disk.clone(),
            external_access: self.external_access,
        };

        let span = info_span!("provision", component = "provision/mysql");
        let command = ProvisionMySql::new(request.clone(), Box::new(client), span)?;

        println!("{}", TableRenderer::new().render_provision_summary(&request));

        command
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to provision database cluster: {}", e))?;

        println!(
            "{} Database cluster {} has been scheduled to Kubernetes",
            StatusIcon::outcome(true),
            self.name
        );
        Ok(())
    }
}

impl DeleteMysqlCommand {
    pub async fn execute(&self, conf: &EverestConf) -> anyhow::Result<()> {
        let kubernetes_id = self.everest.kubernetes_id(conf)?;
        let identity = ClusterIdentity::new(self.name.clone(), kubernetes_id)?;
        let client = self.everest.client(conf)?;

        let span = info_span!("delete", component = "delete/mysql");
        let command = DeleteMySql::new(
            identity,
            self.force,
            Box::new(client),
            Box::new(TerminalConfirmer),
            span,
        )?;

        let deleted = command
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete database cluster: {}", e))?;

        if deleted {
            println!(
                "{} Database cluster {} deleted successfully!",
                StatusIcon::outcome(true),
                self.name
            );
        } else {
            println!(
                "{} Database cluster {} was not deleted",
                StatusIcon::outcome(false),
                self.name
            );
        }
        Ok(())
    }
}

impl ListVersionsCommand {
    pub async fn execute(&self, conf: &EverestConf) -> anyhow::Result<()> {
        let config = VersionsConfig {
            kubernetes_id: self.everest.kubernetes_id(conf)?,
            engine_type: self.engine_type.clone(),
        };
        let client = self.everest.client(conf)?;

        let span = info_span!("versions", component = "list/versions");
        let command = VersionResolver::new(config, Box::new(client), span)?;

        let catalog = command
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list engine versions: {}", e))?;

        println!("{}", self.output.render(&catalog)?);
        Ok(())
    }
}

impl PasswordResetCommand {
    pub async fn execute(&self, conf: &EverestConf) -> anyhow::Result<()> {
        let kubeconfig = resolve_option(
            self.kubeconfig.as_deref(),
            conf.kubernetes.kubeconfig.as_deref(),
        );
        let context = resolve_option(self.context.as_deref(), conf.kubernetes.context.as_deref());

        let span = info_span!("password", component = "password/reset");
        let client = EverestKubeClientImpl::new_with_config(kubeconfig, context)
            .await
            .map_err(|e| {
                span.in_scope(|| {
                    error!(
                        "Could not connect to Kubernetes. \
                        Make sure Kubernetes is running and is accessible from this computer/server."
                    )
                });
                anyhow::anyhow!("Failed to create Kubernetes client: {}", e)
            })?;

        let command = PasswordReset::new(
            ResetConfig {
                namespace: self.namespace.clone(),
            },
            Box::new(client),
            span,
        )?;

        let response = command
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reset password: {}", e))?;

        println!("{}", self.output.render(&response)?);
        Ok(())
    }
}
