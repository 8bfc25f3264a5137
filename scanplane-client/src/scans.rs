//! URL scan and health endpoints

use scanplane_core::dto::health::HealthStatus;
use scanplane_core::dto::scan::ScanRequest;
use serde_json::Value;

use crate::ControlPlaneClient;
use crate::error::Result;

impl ControlPlaneClient {
    // =============================================================================
    // URL Scans
    // =============================================================================

    /// Scan a public URL
    ///
    /// The scan runs synchronously on the server. The report is opaque except
    /// for its `plan` object, see [`scanplane_core::domain::plan::Plan`].
    ///
    /// # Example
    /// ```no_run
    /// # use scanplane_client::ControlPlaneClient;
    /// # use scanplane_core::dto::scan::ScanRequest;
    /// # use scanplane_core::domain::plan::Plan;
    /// # async fn example() -> scanplane_client::Result<()> {
    /// let client = ControlPlaneClient::new("http://localhost:8080");
    /// let report = client.scan(ScanRequest::new("https://example.com")).await?;
    /// let plan = Plan::from_payload(&report);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scan(&self, req: ScanRequest) -> Result<Value> {
        let url = self.endpoint(&["scan"])?;
        let response = self.client.post(url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Check that the control plane is reachable
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
