//! Source DTOs
//!
//! Data transfer objects for source registration.

use serde::{Deserialize, Serialize};

use crate::domain::source::{Source, SourceOs};

/// Request to register a new source with the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSource {
    /// Display name for the machine
    pub name: String,

    /// Operating system of the machine
    pub os: SourceOs,
}

/// Response to a source registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSourceResponse {
    /// The registered source, pending enrollment
    pub source: Source,

    /// Short-lived token the agent uses to enroll
    pub enroll_token: String,

    /// Install one-liners per operating system
    pub install: InstallCommands,
}

/// Agent install command lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallCommands {
    pub linux: String,
    pub windows: String,
}

impl InstallCommands {
    /// The command matching the given operating system
    pub fn for_os(&self, os: SourceOs) -> &str {
        match os {
            SourceOs::Linux => &self.linux,
            SourceOs::Windows => &self.windows,
        }
    }
}
