//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod diagram;
mod host_scan;
mod scan;
mod source;

pub use diagram::DiagramArgs;
pub use host_scan::HostScanArgs;
pub use scan::ScanArgs;
pub use source::SourceCommands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a public URL and show the suggested plan
    Scan(ScanArgs),
    /// Source (VM/host) registration
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },
    /// Run a host scan on an enrolled source and wait for its plan
    HostScan(HostScanArgs),
    /// Render the flow diagram of a saved scan report or job results
    Diagram(DiagramArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module. Operation failures
/// are shown on the status line and turn into a failing exit code.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    let succeeded = match command {
        Commands::Scan(args) => scan::handle_scan(args, config).await,
        Commands::Source { command } => source::handle_source_command(command, config).await,
        Commands::HostScan(args) => host_scan::handle_host_scan(args, config).await,
        Commands::Diagram(args) => diagram::handle_diagram(args)?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
