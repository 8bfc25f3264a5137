//! Scanplane CLI
//!
//! Command-line front end for the scanning/provisioning control plane.

mod commands;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scanplane")]
#[command(about = "Scan URLs and hosts, and render provisioning plans", long_about = None)]
struct Cli {
    /// Control plane API base URL
    #[arg(long, env = "SCANPLANE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr, panels to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanplane_cli=info,scanplane_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_url);
    config.validate()?;

    handle_command(cli.command, &config).await
}
