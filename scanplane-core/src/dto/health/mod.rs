//! Health check DTO

use serde::{Deserialize, Serialize};

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    /// Server time, unix seconds
    #[serde(default)]
    pub time: Option<i64>,
}
