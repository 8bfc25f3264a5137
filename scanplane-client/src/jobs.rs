//! Host scan job endpoints

use async_trait::async_trait;
use scanplane_core::domain::job::JobStatusReport;
use scanplane_core::dto::job::{ScanHostRequest, StartJobResponse};
use serde_json::Value;

use crate::ControlPlaneClient;
use crate::error::Result;
use crate::poller::JobApi;

impl ControlPlaneClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Start a host scan on an enrolled source
    ///
    /// The response is returned as-is; a missing `job_id` is reported by the
    /// poller, not here.
    ///
    /// # Example
    /// ```no_run
    /// # use scanplane_client::ControlPlaneClient;
    /// # use scanplane_core::dto::job::ScanHostRequest;
    /// # async fn example() -> scanplane_client::Result<()> {
    /// let client = ControlPlaneClient::new("http://localhost:8080");
    /// let started = client.start_host_scan(ScanHostRequest::new("src-1a2b3c4d")).await?;
    /// println!("job: {:?}", started.job_id());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_host_scan(&self, req: ScanHostRequest) -> Result<StartJobResponse> {
        let url = self.endpoint(&["scanHost"])?;
        let response = self.client.post(url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `job_id` - The opaque job identifier
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatusReport> {
        let url = self.endpoint(&["scanJobs", job_id, "status"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Get the results payload of a job
    ///
    /// The server may answer for a job that has not finished; the payload is
    /// then partial or empty.
    pub async fn job_results(&self, job_id: &str) -> Result<Value> {
        let url = self.endpoint(&["scanJobs", job_id, "results"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl JobApi for ControlPlaneClient {
    async fn job_status(&self, job_id: &str) -> Result<JobStatusReport> {
        ControlPlaneClient::job_status(self, job_id).await
    }

    async fn job_results(&self, job_id: &str) -> Result<Value> {
        ControlPlaneClient::job_results(self, job_id).await
    }
}
