//! Build automation for everest-cli
//!
//! Usage: cargo xtask <command>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN_NAME: &str = "everest";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for everest-cli")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the binary
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Also run tests that need a live Everest instance or Kubernetes cluster
        #[arg(long)]
        live: bool,
    },
    /// Package the release binary as a tarball
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Run format check, clippy and tests
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { live } => test(&sh, live),
        Commands::Dist { target } => dist(&sh, target),
        Commands::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if release {
        cmd!(sh, "cargo build --release").run()?;
    } else {
        cmd!(sh, "cargo build").run()?;
    }
    Ok(())
}

fn test(sh: &Shell, live: bool) -> Result<()> {
    if live {
        cmd!(sh, "cargo test --all -- --include-ignored").run()?;
    } else {
        cmd!(sh, "cargo test --all").run()?;
    }
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    let release_dir = match target {
        Some(ref triple) => {
            cmd!(sh, "cargo build --release --target {triple}").run()?;
            format!("target/{}/release", triple)
        }
        None => {
            cmd!(sh, "cargo build --release").run()?;
            "target/release".to_string()
        }
    };

    let dist_dir = project_root().join("dist");
    sh.create_dir(&dist_dir)?;
    sh.copy_file(
        project_root().join(release_dir).join(BIN_NAME),
        dist_dir.join(BIN_NAME),
    )?;

    let archive_name = format!("{}-{}.tar.gz", BIN_NAME, env!("CARGO_PKG_VERSION"));
    cmd!(sh, "tar -czf {archive_name} -C dist {BIN_NAME}")
        .run()
        .context("Failed to create tarball")?;

    println!("Distribution package created: {}", archive_name);
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings").run()?;
    test(sh, false)
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
