//! Scanplane HTTP Client
//!
//! A type-safe HTTP client for the scanning/provisioning control plane, plus
//! the job poller that drives host scans to completion.
//!
//! # Example
//!
//! ```no_run
//! use scanplane_client::ControlPlaneClient;
//! use scanplane_core::dto::scan::ScanRequest;
//!
//! #[tokio::main]
//! async fn main() -> scanplane_client::Result<()> {
//!     let client = ControlPlaneClient::new("http://localhost:8080");
//!
//!     let report = client.scan(ScanRequest::new("https://example.com")).await?;
//!
//!     println!("Selected plan: {}", report["plan"]["selected_plan"]);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
pub mod poller;
mod scans;
pub mod session;
mod sources;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{JobApi, JobPoller, PollEvent, PollOutcome, PollSettings, StatusSink, Termination};
pub use tokio_util::sync::CancellationToken;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the control plane API
///
/// Methods are grouped by concern:
/// - URL scans and health
/// - Source registration
/// - Host scan jobs (start, status, results)
#[derive(Debug, Clone)]
pub struct ControlPlaneClient {
    /// Base URL of the control plane (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ControlPlaneClient {
    /// Create a new control plane client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the control plane API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use scanplane_client::ControlPlaneClient;
    ///
    /// let client = ControlPlaneClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use scanplane_client::ControlPlaneClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ControlPlaneClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the control plane
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are percent-encoded, so opaque ids can be passed as-is.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidRequest(
                "API base URL is empty".to_string(),
            ));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid API base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "API base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let endpoint = response.url().path().to_string();
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("{} answered {}: {}", endpoint, status, error_text);
            return Err(ClientError::api_error(endpoint, status, error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ControlPlaneClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ControlPlaneClient::new("http://localhost:8080/ ");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ControlPlaneClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ControlPlaneClient::new("http://localhost:8080");
        let url = client.endpoint(&["scanJobs", "job 1/2", "status"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/scanJobs/job%201%2F2/status");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ControlPlaneClient::new("http://localhost:8080/api/");
        let url = client.endpoint(&["scan"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/scan");
    }

    #[test]
    fn test_endpoint_rejects_bad_base() {
        let client = ControlPlaneClient::new("");
        assert!(matches!(
            client.endpoint(&["scan"]),
            Err(ClientError::InvalidRequest(_))
        ));

        let client = ControlPlaneClient::new("not a url");
        assert!(client.endpoint(&["scan"]).unwrap_err().is_input_error());
    }
}
