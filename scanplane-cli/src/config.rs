//! Configuration module
//!
//! Handles CLI configuration: the control plane URL and poll settings.

use std::time::Duration;

use scanplane_client::PollSettings;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the control plane API
    pub api_url: String,

    /// Interval and budget for job polling
    pub poll: PollSettings,
}

impl Config {
    /// Creates a configuration with default poll settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            poll: PollSettings::default(),
        }
    }

    /// Overrides poll settings where given
    pub fn with_poll_overrides(mut self, interval_ms: Option<u64>, max_attempts: Option<u32>) -> Self {
        if let Some(ms) = interval_ms {
            self.poll.interval = Duration::from_millis(ms);
        }
        if let Some(max) = max_attempts {
            self.poll.max_attempts = max;
        }
        self
    }

    /// Validates the configuration
    ///
    /// An empty API URL is left to the command, which reports it as missing
    /// input on the status line.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.api_url.trim();
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        Ok(())
    }
}
