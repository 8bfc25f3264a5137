//! Source domain model
//!
//! A source is a machine (VM or host) registered with the control plane.
//! Host scans run on the agent enrolled for a source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A machine registered with the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier for the source
    pub source_id: String,

    /// Display name chosen at creation
    pub name: String,

    /// Operating system as reported by the server, kept verbatim
    pub os: String,

    /// Lifecycle status as reported by the server (e.g. `pending_enroll`, `online`)
    pub status: String,

    #[serde(default)]
    pub labels: HashMap<String, String>,

    /// Agent enrolled for this source, once enrollment happened
    #[serde(default)]
    pub agent_id: Option<String>,

    /// Creation time, unix seconds
    pub created_at: i64,

    /// Last agent heartbeat, unix seconds
    #[serde(default)]
    pub last_seen: Option<i64>,
}

impl Source {
    /// The operating system, when it is one sources can be created with
    pub fn known_os(&self) -> Option<SourceOs> {
        self.os.parse().ok()
    }

    /// Whether an agent is enrolled and host scans can be started
    pub fn is_enrolled(&self) -> bool {
        self.agent_id.is_some()
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    pub fn last_seen_utc(&self) -> Option<DateTime<Utc>> {
        self.last_seen.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Operating system a source can be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOs {
    #[default]
    Linux,
    Windows,
}

impl std::fmt::Display for SourceOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceOs::Linux => write!(f, "linux"),
            SourceOs::Windows => write!(f, "windows"),
        }
    }
}

impl std::str::FromStr for SourceOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(SourceOs::Linux),
            "windows" => Ok(SourceOs::Windows),
            other => Err(format!("unsupported os '{}' (expected linux or windows)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_deserializes_server_shape() {
        let raw = r#"{
            "source_id": "src-1a2b3c4d",
            "name": "my-vm",
            "os": "linux",
            "labels": {},
            "status": "pending_enroll",
            "created_at": 1700000000,
            "agent_id": null,
            "last_seen": null
        }"#;

        let source: Source = serde_json::from_str(raw).unwrap();
        assert_eq!(source.os, "linux");
        assert_eq!(source.known_os(), Some(SourceOs::Linux));
        assert!(!source.is_enrolled());
        assert!(source.last_seen_utc().is_none());
        assert_eq!(
            source.created_at_utc().unwrap().format("%Y-%m-%d").to_string(),
            "2023-11-14"
        );
    }

    #[test]
    fn test_unlisted_os_still_deserializes() {
        let raw = r#"[
            {"source_id": "src-1", "name": "a", "os": "linux", "status": "online", "created_at": 1700000000},
            {"source_id": "src-2", "name": "b", "os": "macos", "status": "pending_enroll", "created_at": 1700000001}
        ]"#;

        let sources: Vec<Source> = serde_json::from_str(raw).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].os, "macos");
        assert_eq!(sources[0].known_os(), Some(SourceOs::Linux));
        assert_eq!(sources[1].known_os(), None);
    }

    #[test]
    fn test_os_parsing() {
        assert_eq!("Windows".parse::<SourceOs>().unwrap(), SourceOs::Windows);
        assert!("beos".parse::<SourceOs>().is_err());
        assert_eq!(SourceOs::default().to_string(), "linux");
    }
}
