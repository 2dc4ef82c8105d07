//! bankopsd — the BankOps console status daemon.
//!
//! Polls the health endpoint of every core-banking backend and serves the
//! aggregated status:
//! - Endpoint registry (locked defaults or a TOML file)
//! - Health poller (30s rounds, 3s per-probe timeout)
//! - REST API + Prometheus gauges
//! - Dashboard status bar
//!
//! # Usage
//!
//! ```text
//! bankopsd serve --port 8088
//! bankopsd check --format json
//! bankopsd config > bankops.toml
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use bankops_core::{ConsoleConfig, EndpointRegistry};

mod check;
mod serve;

#[derive(Parser)]
#[command(name = "bankopsd", about = "BankOps console status daemon", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll every service and serve the status API and dashboard.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8088")]
        port: u16,

        /// Service registry file (default: locked service set).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Probe every service once and print the result.
    Check {
        /// Service registry file (default: locked service set).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the locked service registry as TOML.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,bankopsd=debug,bankops=debug"))?,
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, config } => {
            let registry = load_registry(config.as_deref())?;
            serve::run(port, registry).await
        }
        Command::Check { config, format } => {
            let registry = load_registry(config.as_deref())?;
            check::run(&registry, &format).await
        }
        Command::Config => {
            print!("{}", ConsoleConfig::locked().to_toml_string()?);
            Ok(())
        }
    }
}

/// Build the registry from `path`, or fall back to the locked set.
fn load_registry(path: Option<&Path>) -> anyhow::Result<Arc<EndpointRegistry>> {
    let registry = match path {
        Some(path) => {
            let registry = ConsoleConfig::load_registry(path)?;
            info!(path = %path.display(), endpoints = registry.len(), "service registry loaded");
            registry
        }
        None => EndpointRegistry::locked(),
    };
    Ok(Arc::new(registry))
}
