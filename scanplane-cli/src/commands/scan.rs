//! URL scan command

use std::path::PathBuf;

use clap::Args;
use scanplane_client::ControlPlaneClient;
use scanplane_client::session::{StatusBoard, StatusLine, require, run_guarded};
use scanplane_core::domain::plan::Plan;
use scanplane_core::dto::scan::ScanRequest;

use crate::config::Config;
use crate::output::{self, TerminalBoard};

/// Arguments of `scanplane scan`
#[derive(Args)]
pub struct ScanArgs {
    /// URL to scan
    pub url: String,

    /// Write the flow diagram (SVG) to this file
    #[arg(long)]
    pub diagram_out: Option<PathBuf>,

    /// Also print the full scan report
    #[arg(long)]
    pub raw: bool,
}

/// Scan a URL and print the plan panels
pub async fn handle_scan(args: ScanArgs, config: &Config) -> bool {
    let board = TerminalBoard::new();
    let client = ControlPlaneClient::new(&config.api_url);

    let report = run_guarded(&board, "Scanning URL...", async {
        require("both API base and URL", &config.api_url)?;
        require("both API base and URL", &args.url)?;
        client.scan(ScanRequest::new(args.url.trim())).await
    })
    .await;

    let Some(report) = report else {
        return false;
    };

    board.show(StatusLine::info(format!("Scanned {}", args.url.trim())));
    if args.raw {
        output::print_json("Report:", &report);
    }

    let plan = Plan::from_payload(&report);
    output::print_plan(&plan);
    output::mount_diagram(&plan, args.diagram_out.as_deref());
    true
}
