//! Job domain types
//!
//! The control plane owns jobs; the client only observes them through the
//! status endpoint. These types model what is observed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase reported when the server omits one
pub const UNKNOWN_PHASE: &str = "unknown";

/// Status reported when the server omits one
pub const UNKNOWN_STATUS: &str = "unknown";

/// Progress sub-object of a status response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProgress {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub pct: Option<f64>,
}

/// Raw body of `GET /scanJobs/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusReport {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<JobProgress>,
}

impl JobStatusReport {
    /// Phase with the `"unknown"` default applied. An empty phase counts as absent.
    pub fn phase(&self) -> &str {
        self.progress
            .as_ref()
            .and_then(|p| p.phase.as_deref())
            .filter(|phase| !phase.is_empty())
            .unwrap_or(UNKNOWN_PHASE)
    }

    /// Percentage with the `0` default applied
    pub fn pct(&self) -> f64 {
        self.progress.as_ref().and_then(|p| p.pct).unwrap_or(0.0)
    }

    /// Status string with the `"unknown"` default applied
    pub fn status(&self) -> &str {
        self.status
            .as_deref()
            .filter(|status| !status.is_empty())
            .unwrap_or(UNKNOWN_STATUS)
    }
}

/// One observation of a job, emitted once per poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub job_id: String,
    pub status: String,
    pub phase: String,
    pub pct: f64,
    /// 1-based poll number that produced this snapshot
    pub attempt: u32,
    pub observed_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Builds a snapshot from a status response, applying field defaults
    pub fn from_report(job_id: &str, attempt: u32, report: &JobStatusReport) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: report.status().to_string(),
            phase: report.phase().to_string(),
            pct: report.pct(),
            attempt,
            observed_at: Utc::now(),
        }
    }

    /// Whether the job will not progress further.
    ///
    /// Backends signal completion differently, so any one of these is enough:
    /// status `done` (any case), phase `complete`, or exactly 100 percent.
    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.status, &self.phase, self.pct)
    }
}

/// Terminal check shared by snapshots and raw reports
pub fn is_terminal(status: &str, phase: &str, pct: f64) -> bool {
    status.eq_ignore_ascii_case("done") || phase == "complete" || pct == 100.0
}

impl std::fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Job: {}", self.job_id)?;
        writeln!(f, "State: {}", self.status)?;
        write!(f, "Progress: {} ({}%)", self.phase, format_pct(self.pct))
    }
}

/// Renders whole percentages without a fractional part
pub fn format_pct(pct: f64) -> String {
    if pct.fract() == 0.0 && pct.is_finite() {
        format!("{}", pct as i64)
    } else {
        format!("{:.1}", pct)
    }
}
