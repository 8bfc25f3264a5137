//! Host scan job DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default job kind requested by `POST /scanHost`
pub const HOST_INVENTORY: &str = "host_inventory";

/// Request to start a host scan on an enrolled source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanHostRequest {
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ScanHostRequest {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            kind: None,
        }
    }
}

/// Response of a start-job call
///
/// Anything besides `job_id` is kept so it can be shown when the id is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartJobResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StartJobResponse {
    /// The job id, if present and non-empty
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref().filter(|id| !id.is_empty())
    }
}
