//! Status boundary for user-facing operations
//!
//! Front ends show one status line and a busy indicator per operation. This
//! module is the outermost call boundary: failures end here as a prefixed
//! status line and never propagate further, and the busy indicator is
//! cleared on every exit path.

use std::future::Future;

use scanplane_core::domain::job::format_pct;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::poller::{PollEvent, StatusSink};

/// Kind of status line, which decides its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Progress,
    Warning,
    Error,
}

impl StatusKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            StatusKind::Info => "",
            StatusKind::Progress => "⏳ ",
            StatusKind::Warning => "⚠️ ",
            StatusKind::Error => "❌ ",
        }
    }
}

/// One status line; each new line replaces the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn progress(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Progress,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Status line for a failed operation
    ///
    /// Input problems are warnings; transport failures, parse failures and
    /// cancellation are errors.
    pub fn from_error(err: &ClientError) -> Self {
        if err.is_input_error() {
            Self::warning(err.to_string())
        } else {
            Self::error(err.to_string())
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.text)
    }
}

/// Presentation slot for status lines and the busy indicator
pub trait StatusBoard: Send + Sync {
    /// Replace the current status line
    fn show(&self, line: StatusLine);

    /// Toggle the busy indicator
    fn set_busy(&self, busy: bool);
}

/// Holds the board busy until dropped
pub struct BusyGuard<'a> {
    board: &'a dyn StatusBoard,
}

impl<'a> BusyGuard<'a> {
    pub fn engage(board: &'a dyn StatusBoard) -> Self {
        board.set_busy(true);
        Self { board }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.board.set_busy(false);
    }
}

/// Runs `op` with the board busy and converts a failure into a status line
///
/// Returns `None` when the operation failed; the failure has already been
/// shown on the board.
pub async fn run_guarded<T, F>(board: &dyn StatusBoard, busy_text: &str, op: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    let _busy = BusyGuard::engage(board);
    board.show(StatusLine::progress(busy_text));

    match op.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} failed: {}", busy_text.trim_end_matches('.'), err);
            board.show(StatusLine::from_error(&err));
            None
        }
    }
}

/// Fails with an input error when a required field is blank
pub fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("Please enter {}.", field)));
    }
    Ok(())
}

/// Forwards poll events to a status board as progress lines
pub struct BoardSink<'a> {
    board: &'a dyn StatusBoard,
}

impl<'a> BoardSink<'a> {
    pub fn new(board: &'a dyn StatusBoard) -> Self {
        Self { board }
    }
}

impl StatusSink for BoardSink<'_> {
    fn emit(&self, event: &PollEvent) {
        let line = match event {
            PollEvent::Started { job_id } => {
                StatusLine::progress(format!("Job: {}\nState: queued\nProgress: polling...", job_id))
            }
            PollEvent::Snapshot(snapshot) => StatusLine::progress(snapshot.to_string()),
            PollEvent::BudgetExhausted { job_id, attempts } => StatusLine::warning(format!(
                "Job: {}\nNo terminal status after {} polls, fetching results anyway",
                job_id, attempts
            )),
            PollEvent::FetchingResults { job_id } => {
                StatusLine::progress(format!("Job: {}\nFetching results...", job_id))
            }
        };
        self.board.show(line);
    }
}

/// Final status line for a finished job
pub fn summary_line(outcome: &crate::poller::PollOutcome) -> StatusLine {
    let progress = outcome
        .last_snapshot
        .as_ref()
        .map(|s| format!("{} ({}%)", s.phase, format_pct(s.pct)))
        .unwrap_or_else(|| "unknown".to_string());
    let state = outcome
        .last_snapshot
        .as_ref()
        .map(|s| s.status.as_str())
        .unwrap_or("unknown");

    let text = format!(
        "Job: {}\nState: {}\nProgress: {}",
        outcome.job_id, state, progress
    );
    if outcome.termination.timed_out() {
        StatusLine::warning(text)
    } else {
        StatusLine::info(text)
    }
}
