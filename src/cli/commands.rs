// CLI command definitions

use super::everest::{
    DeleteMysqlCommand, ListVersionsCommand, PasswordResetCommand, ProvisionMysqlCommand,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "everest",
    version,
    about = "Manage Everest database clusters",
    long_about = "A command line tool for provisioning and managing database clusters through Percona Everest"
)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the TOML configuration file
    /// If not specified, uses EVEREST_CONF_FILE or built-in defaults
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Provision a new database cluster
    #[command(subcommand)]
    Provision(ProvisionCommands),

    /// Delete a database cluster
    #[command(subcommand)]
    Delete(DeleteCommands),

    /// List Everest resources
    #[command(subcommand)]
    List(ListCommands),

    /// Manage the Everest admin password
    #[command(subcommand)]
    Password(PasswordCommands),
}

#[derive(clap::Subcommand, Debug)]
pub enum ProvisionCommands {
    /// Provision a MySQL (Percona XtraDB Cluster) database
    Mysql(ProvisionMysqlCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum DeleteCommands {
    /// Delete a MySQL database cluster
    Mysql(DeleteMysqlCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum ListCommands {
    /// List available database engine versions
    Versions(ListVersionsCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum PasswordCommands {
    /// Generate a new Everest admin password
    Reset(PasswordResetCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::display::OutputFormat;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_provision_defaults() {
        let args = CliArgs::parse_from([
            "everest",
            "provision",
            "mysql",
            "--name",
            "mysql-a",
            "--kubernetes-id",
            "k8s-1",
        ]);
        match args.command {
            Commands::Provision(ProvisionCommands::Mysql(cmd)) => {
                assert_eq!(cmd.name, "mysql-a");
                assert_eq!(cmd.db_version, "latest");
                assert_eq!(cmd.nodes, 3);
                assert_eq!(cmd.cpu, "1");
                assert_eq!(cmd.memory, "2G");
                assert_eq!(cmd.disk, "15G");
                assert!(!cmd.external_access);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "everest",
            "delete",
            "mysql",
            "--name",
            "mysql-a",
            "--force",
            "--verbose",
            "--config",
            "/etc/everest.toml",
        ]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/etc/everest.toml"));
        match args.command {
            Commands::Delete(DeleteCommands::Mysql(cmd)) => assert!(cmd.force),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_versions() {
        let args = CliArgs::parse_from([
            "everest", "list", "versions", "--type", "pxc", "--output", "json",
        ]);
        match args.command {
            Commands::List(ListCommands::Versions(cmd)) => {
                assert_eq!(cmd.engine_type.as_deref(), Some("pxc"));
                assert_eq!(cmd.output, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_password_reset() {
        let args = CliArgs::parse_from(["everest", "password", "reset", "-n", "everest-system"]);
        match args.command {
            Commands::Password(PasswordCommands::Reset(cmd)) => {
                assert_eq!(cmd.namespace, "everest-system");
                assert_eq!(cmd.output, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
