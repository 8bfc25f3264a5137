//! Source command handlers
//!
//! Handles source registration and lookup.

use clap::Subcommand;
use colored::*;
use scanplane_client::ControlPlaneClient;
use scanplane_client::session::{StatusBoard, StatusLine, require, run_guarded};
use scanplane_core::domain::source::{Source, SourceOs};
use scanplane_core::dto::source::CreateSource;

use crate::config::Config;
use crate::output::TerminalBoard;

/// Source subcommands
#[derive(Subcommand)]
pub enum SourceCommands {
    /// Register a new source and print its agent install command
    Create {
        /// Display name of the machine
        #[arg(long, default_value = "my-vm")]
        name: String,

        /// Operating system (linux or windows)
        #[arg(long, default_value = "linux")]
        os: SourceOs,
    },
    /// Get source details
    Get {
        /// Source ID
        id: String,
    },
    /// List all sources
    List,
}

/// Handle source commands
///
/// # Arguments
/// * `command` - The source command to execute
/// * `config` - The CLI configuration
pub async fn handle_source_command(command: SourceCommands, config: &Config) -> bool {
    let board = TerminalBoard::new();
    let client = ControlPlaneClient::new(&config.api_url);

    match command {
        SourceCommands::Create { name, os } => create_source(&board, &client, config, name, os).await,
        SourceCommands::Get { id } => get_source(&board, &client, config, &id).await,
        SourceCommands::List => list_sources(&board, &client, config).await,
    }
}

/// Register a source
async fn create_source(
    board: &TerminalBoard,
    client: &ControlPlaneClient,
    config: &Config,
    name: String,
    os: SourceOs,
) -> bool {
    let name = if name.trim().is_empty() {
        "my-vm".to_string()
    } else {
        name.trim().to_string()
    };

    let created = run_guarded(board, "Creating source...", async {
        require("API base URL", &config.api_url)?;
        client.create_source(CreateSource { name, os }).await
    })
    .await;

    let Some(created) = created else {
        return false;
    };

    board.show(StatusLine::info(format!(
        "Created source {}",
        created.source.source_id
    )));
    print_source_details(&created.source);

    println!("\n{}", "Enroll token:".bold());
    println!("  {}", created.enroll_token.dimmed());
    println!("\n{}", format!("Install ({}):", os).bold());
    println!("  {}", created.install.for_os(os));
    println!(
        "\n{} scanplane host-scan {}",
        "Next:".bold(),
        created.source.source_id
    );
    true
}

/// Get and display a single source
async fn get_source(
    board: &TerminalBoard,
    client: &ControlPlaneClient,
    config: &Config,
    id: &str,
) -> bool {
    let source = run_guarded(board, "Fetching source...", async {
        require("API base URL", &config.api_url)?;
        require("a source ID", id)?;
        client.get_source(id.trim()).await
    })
    .await;

    match source {
        Some(source) => {
            print_source_details(&source);
            true
        }
        None => false,
    }
}

/// List all sources
async fn list_sources(board: &TerminalBoard, client: &ControlPlaneClient, config: &Config) -> bool {
    let sources = run_guarded(board, "Listing sources...", async {
        require("API base URL", &config.api_url)?;
        client.list_sources().await
    })
    .await;

    let Some(sources) = sources else {
        return false;
    };

    if sources.is_empty() {
        println!("{}", "No sources registered.".yellow());
    } else {
        println!("{}", format!("Found {} source(s):", sources.len()).bold());
        println!();
        for source in sources {
            print_source_summary(&source);
        }
    }
    true
}

/// Print a source summary
fn print_source_summary(source: &Source) {
    println!("  {} Source {}", "▸".cyan(), source.source_id.bold());
    println!("    Name:   {}", source.name);
    println!("    OS:     {}", source.os);
    println!("    Status: {}", colorize_status(source));
    println!();
}

/// Print detailed source information
fn print_source_details(source: &Source) {
    println!("{}", "Source Details:".bold());
    println!("  ID:        {}", source.source_id.cyan());
    println!("  Name:      {}", source.name);
    println!("  OS:        {}", source.os);
    println!("  Status:    {}", colorize_status(source));

    if let Some(created) = source.created_at_utc() {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(agent) = &source.agent_id {
        println!("  Agent:     {}", agent);
    }
    if let Some(seen) = source.last_seen_utc() {
        println!("  Last seen: {}", seen.format("%Y-%m-%d %H:%M:%S"));
    }

    if !source.labels.is_empty() {
        println!("\n{}", "Labels:".bold());
        for (key, value) in &source.labels {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

/// Colorize source status for display
fn colorize_status(source: &Source) -> ColoredString {
    match source.status.as_str() {
        "online" => source.status.green(),
        "pending_enroll" => source.status.yellow(),
        _ => source.status.dimmed(),
    }
}
