//! Layered configuration for the guildmirror binary.

use guildmirror_core::Preferences;
use guildmirror_error::ConfigError;
use guildmirror_rate_limit::RetryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Restart policy for the [`Supervisor`](crate::Supervisor).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupervisorConfig {
    /// Restarts allowed after a failed run; `None` restarts without limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_restarts: Option<u32>,

    /// Pause before each restart
    pub restart_delay_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            max_restarts: Some(3),
            restart_delay_ms: 5000,
        }
    }
}

impl SupervisorConfig {
    /// Pause before each restart as a duration.
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

/// Complete guildmirror configuration.
///
/// # Configuration Files
///
/// Sources are merged in precedence order (later overrides earlier):
/// 1. Bundled defaults (`guildmirror.toml` in the repository root)
/// 2. User config (`~/.config/guildmirror/guildmirror.toml`)
/// 3. `./guildmirror.toml` in the working directory
/// 4. `GUILDMIRROR__<SECTION>__<KEY>` environment variables
///
/// # Example
///
/// ```toml
/// [preferences]
/// emojis_create = true
///
/// [retry]
/// fallback_retry_after_ms = 2000
///
/// [supervisor]
/// max_restarts = 5
/// restart_delay_ms = 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Stages to run
    pub preferences: Preferences,
    /// Throttling behaviour
    pub retry: RetryConfig,
    /// Restart policy
    pub supervisor: SupervisorConfig,
}

impl MirrorConfig {
    /// Load configuration from every source in precedence order.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        // Bundled defaults
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../../../guildmirror.toml"),
            FileFormat::Toml,
        ));

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/guildmirror/guildmirror.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("guildmirror").required(false))
            .add_source(
                Environment::with_prefix("GUILDMIRROR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Load configuration from `path` on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or holds
    /// invalid values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        use config::{Config, File, FileFormat};

        let builder = Config::builder()
            .add_source(File::from_str(
                include_str!("../../../guildmirror.toml"),
                FileFormat::Toml,
            ))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the deserializer cannot.
    ///
    /// # Errors
    ///
    /// Returns the first invalid retry setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retry.validate()
    }
}
