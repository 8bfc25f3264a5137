//! Host scan command
//!
//! Starts a scan on an enrolled source, follows its progress on the status
//! line, and prints the resulting plan. Ctrl-C cancels the poll loop.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use scanplane_client::session::{
    BoardSink, StatusBoard, StatusLine, require, run_guarded, summary_line,
};
use scanplane_client::{CancellationToken, ControlPlaneClient, JobPoller};
use scanplane_core::domain::plan::Plan;
use scanplane_core::dto::job::ScanHostRequest;
use tracing::info;

use crate::config::Config;
use crate::output::{self, TerminalBoard};

/// Arguments of `scanplane host-scan`
#[derive(Args)]
pub struct HostScanArgs {
    /// Source ID of an enrolled machine
    pub source_id: String,

    /// Job kind to request
    #[arg(long)]
    pub kind: Option<String>,

    /// Delay between status polls, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Number of polls before fetching results regardless of status
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Write the flow diagram (SVG) to this file
    #[arg(long)]
    pub diagram_out: Option<PathBuf>,

    /// Also print the full results payload
    #[arg(long)]
    pub raw: bool,
}

/// Run a host scan to completion
pub async fn handle_host_scan(args: HostScanArgs, config: &Config) -> bool {
    let config = config
        .clone()
        .with_poll_overrides(args.interval_ms, args.max_attempts);
    let board = TerminalBoard::new();
    if let Err(e) = config.validate() {
        board.show(StatusLine::warning(e.to_string()));
        return false;
    }
    let client = ControlPlaneClient::new(&config.api_url);
    let poller = JobPoller::new(Arc::new(client.clone()), config.poll.clone());

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling host scan");
                cancel.cancel();
            }
        })
    };

    let sink = BoardSink::new(&board);
    let outcome = run_guarded(&board, "Starting VM scan job...", async {
        require("API base and Source ID", &config.api_url)?;
        require("API base and Source ID", &args.source_id)?;

        let request = ScanHostRequest {
            source_id: args.source_id.trim().to_string(),
            kind: args.kind.clone(),
        };
        poller
            .run(client.start_host_scan(request), &sink, &cancel)
            .await
    })
    .await;

    ctrl_c.abort();

    let Some(outcome) = outcome else {
        return false;
    };

    board.show(summary_line(&outcome));
    if args.raw {
        output::print_json("Results:", &outcome.results);
    }

    let plan = Plan::from_payload(&outcome.results);
    output::print_plan(&plan);
    output::mount_diagram(&plan, args.diagram_out.as_deref());
    true
}
