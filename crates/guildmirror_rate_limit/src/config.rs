//! Configuration for the retry controller.

use guildmirror_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry and pacing settings.
///
/// # Example
///
/// ```toml
/// [retry]
/// fallback_retry_after_ms = 1000
/// max_mutations_per_minute = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Wait used when a throttling response does not say how long to wait
    pub fallback_retry_after_ms: u64,

    /// Proactive pacing of mutations; `None` sends calls as fast as they complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_mutations_per_minute: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            fallback_retry_after_ms: 1000,
            max_mutations_per_minute: None,
        }
    }
}

impl RetryConfig {
    /// Fallback wait as a duration.
    pub fn fallback_retry_after(&self) -> Duration {
        Duration::from_millis(self.fallback_retry_after_ms)
    }

    /// Reject settings that would spin or stall.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback wait or the pacing quota is zero.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_retry_after_ms == 0 {
            return Err(ConfigError::invalid(
                "retry.fallback_retry_after_ms",
                "must be greater than 0",
            ));
        }
        if self.max_mutations_per_minute == Some(0) {
            return Err(ConfigError::invalid(
                "retry.max_mutations_per_minute",
                "must be greater than 0 when set",
            ));
        }
        Ok(())
    }
}
