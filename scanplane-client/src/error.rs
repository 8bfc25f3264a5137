//! Error types for the Scanplane client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Scanplane client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("{endpoint}: HTTP {status} {reason}{}", body_suffix(.body))]
    ApiError {
        /// Path of the endpoint that failed
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
        /// Response body, as text
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A start call returned no job identifier
    #[error("No job_id returned.\n{payload}")]
    MissingJobId {
        /// The start response, pretty-printed
        payload: String,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!("\n{}", body)
    }
}

impl ClientError {
    /// Create an API error from the failing endpoint, status code and body
    pub fn api_error(
        endpoint: impl Into<String>,
        status: reqwest::StatusCode,
        body: impl Into<String>,
    ) -> Self {
        Self::ApiError {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: body.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if the failure came from missing or invalid input rather than transport
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::MissingJobId { .. })
    }
}
