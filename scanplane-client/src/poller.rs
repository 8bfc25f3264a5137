//! Job poller
//!
//! Drives a long-running job from start to results:
//! `Idle → Starting → Polling(n) → FetchingResults → Done`, with `Failed`
//! reachable from every state on a transport error.
//!
//! Polls are spaced by a fixed interval and bounded by a retry budget. Running
//! out of budget is not an error: the results are fetched anyway, since the
//! server may hold partial results. Each snapshot is handed to a
//! [`StatusSink`] as soon as it is observed, in poll order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scanplane_core::domain::job::{JobStatusReport, StatusSnapshot};
use scanplane_core::dto::job::StartJobResponse;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};

/// Default delay before each status poll
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3500);

/// Default number of polls before giving up on a terminal status (~7 minutes)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// Status and results access for a single job
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn job_status(&self, job_id: &str) -> Result<JobStatusReport>;
    async fn job_results(&self, job_id: &str) -> Result<Value>;
}

/// Progress events surfaced while a job runs
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// The start call returned a job id
    Started { job_id: String },
    /// One status poll completed
    Snapshot(StatusSnapshot),
    /// The retry budget ran out before a terminal status
    BudgetExhausted { job_id: String, attempts: u32 },
    /// The poll loop exited and the results are being fetched
    FetchingResults { job_id: String },
}

/// Receives poll events as they happen
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: &PollEvent);
}

impl<F> StatusSink for F
where
    F: Fn(&PollEvent) + Send + Sync,
{
    fn emit(&self, event: &PollEvent) {
        self(event)
    }
}

/// Poll timing and budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before each status poll
    pub interval: Duration,
    /// Maximum number of status polls
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// How the poll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A snapshot met the terminal condition
    Terminal { attempts: u32 },
    /// The budget ran out first
    BudgetExhausted { attempts: u32 },
}

impl Termination {
    pub fn attempts(&self) -> u32 {
        match self {
            Termination::Terminal { attempts } | Termination::BudgetExhausted { attempts } => {
                *attempts
            }
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, Termination::BudgetExhausted { .. })
    }
}

/// Result of a completed poll sequence
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub job_id: String,
    pub termination: Termination,
    /// The last snapshot observed, if any poll ran
    pub last_snapshot: Option<StatusSnapshot>,
    /// The results payload, forwarded verbatim
    pub results: Value,
}

/// Poller state, tracked for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Starting,
    Polling(u32),
    FetchingResults,
    Done,
    Failed,
}

/// Drives jobs to completion against a [`JobApi`]
///
/// The poller keeps no per-job state between calls; every run owns its own
/// counter, so one poller can serve independent call sites.
pub struct JobPoller {
    api: Arc<dyn JobApi>,
    settings: PollSettings,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(api: Arc<dyn JobApi>, settings: PollSettings) -> Self {
        Self { api, settings }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Awaits the start call, then polls the job it created
    ///
    /// A start response without a job id fails with
    /// [`ClientError::MissingJobId`] and nothing is polled.
    pub async fn run<F>(
        &self,
        start: F,
        sink: &dyn StatusSink,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome>
    where
        F: Future<Output = Result<StartJobResponse>> + Send,
    {
        debug!("Job poller state: {:?}", PollState::Starting);

        let started = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(self.fail(ClientError::Cancelled)),
            started = start => started.map_err(|e| self.fail(e))?,
        };

        let Some(job_id) = started.job_id() else {
            let payload = serde_json::to_string_pretty(&started)
                .unwrap_or_else(|_| format!("{:?}", started));
            return Err(self.fail(ClientError::MissingJobId { payload }));
        };
        let job_id = job_id.to_string();

        info!("Started job {}", job_id);
        sink.emit(&PollEvent::Started {
            job_id: job_id.clone(),
        });

        self.poll(&job_id, sink, cancel).await
    }

    /// Polls an already started job until it terminates or the budget runs
    /// out, then fetches its results
    pub async fn poll(
        &self,
        job_id: &str,
        sink: &dyn StatusSink,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome> {
        let PollSettings {
            interval,
            max_attempts,
        } = self.settings;

        info!(
            "Polling job {} (interval: {:?}, budget: {})",
            job_id, interval, max_attempts
        );

        let mut attempts = 0;
        let mut last_snapshot = None;

        let termination = loop {
            if attempts >= max_attempts {
                warn!(
                    "Job {} not finished after {} polls, fetching results anyway",
                    job_id, attempts
                );
                sink.emit(&PollEvent::BudgetExhausted {
                    job_id: job_id.to_string(),
                    attempts,
                });
                break Termination::BudgetExhausted { attempts };
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.fail(ClientError::Cancelled)),
                _ = tokio::time::sleep(interval) => {}
            }

            attempts += 1;
            debug!("Job poller state: {:?}", PollState::Polling(attempts));

            let report = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.fail(ClientError::Cancelled)),
                report = self.api.job_status(job_id) => report.map_err(|e| self.fail(e))?,
            };

            let snapshot = StatusSnapshot::from_report(job_id, attempts, &report);
            debug!(
                "Job {} poll {}: status={} phase={} pct={}",
                job_id, attempts, snapshot.status, snapshot.phase, snapshot.pct
            );
            sink.emit(&PollEvent::Snapshot(snapshot.clone()));

            let terminal = snapshot.is_terminal();
            last_snapshot = Some(snapshot);
            if terminal {
                break Termination::Terminal { attempts };
            }
        };

        if cancel.is_cancelled() {
            return Err(self.fail(ClientError::Cancelled));
        }

        debug!("Job poller state: {:?}", PollState::FetchingResults);
        sink.emit(&PollEvent::FetchingResults {
            job_id: job_id.to_string(),
        });

        let results = self
            .api
            .job_results(job_id)
            .await
            .map_err(|e| self.fail(e))?;

        debug!("Job poller state: {:?}", PollState::Done);
        info!(
            "Job {} finished after {} poll(s){}",
            job_id,
            termination.attempts(),
            if termination.timed_out() {
                " (budget exhausted)"
            } else {
                ""
            }
        );

        Ok(PollOutcome {
            job_id: job_id.to_string(),
            termination,
            last_snapshot,
            results,
        })
    }

    fn fail(&self, err: ClientError) -> ClientError {
        debug!("Job poller state: {:?}", PollState::Failed);
        warn!("Job polling failed: {}", err);
        err
    }
}
