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

use clap::Parser;
use everest_cli::cli::commands::{
    Commands, DeleteCommands, ListCommands, PasswordCommands, ProvisionCommands,
};
use everest_cli::cli::CliArgs;
use everest_cli::EverestConf;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let conf = EverestConf::load(args.config.as_deref())?;

    match args.command {
        Commands::Provision(ProvisionCommands::Mysql(cmd)) => cmd.execute(&conf).await,
        Commands::Delete(DeleteCommands::Mysql(cmd)) => cmd.execute(&conf).await,
        Commands::List(ListCommands::Versions(cmd)) => cmd.execute(&conf).await,
        Commands::Password(PasswordCommands::Reset(cmd)) => cmd.execute(&conf).await,
    }
}
