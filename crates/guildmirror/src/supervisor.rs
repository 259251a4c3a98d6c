//! Restart loop around replication runs.

use crate::{CredentialSource, Credentials, SupervisorConfig};
use guildmirror_error::{ConfigError, GuildMirrorError, GuildMirrorResult};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Re-invokes failed runs until one succeeds or the restart budget or the
/// credential source runs out.
///
/// The replication engine never retries a failed pipeline itself. A restart
/// waits the configured delay, then starts a fresh attempt from the
/// beginning against whatever state the destination was left in.
///
/// # Example
///
/// ```rust,ignore
/// let supervisor = Supervisor::new(&config.supervisor);
/// let report = supervisor
///     .run(&mut StaticCredentials::new(credentials), |creds| {
///         run_once(creds, config.preferences, &config.retry)
///     })
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Supervisor {
    max_restarts: Option<u32>,
    restart_delay: Duration,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(&SupervisorConfig::default())
    }
}

impl Supervisor {
    /// Create a supervisor with the configured restart budget.
    pub fn new(config: &SupervisorConfig) -> Self {
        Self {
            max_restarts: config.max_restarts,
            restart_delay: config.restart_delay(),
        }
    }

    /// Restart budget; `None` is unlimited.
    pub fn max_restarts(&self) -> Option<u32> {
        self.max_restarts
    }

    /// Run `attempt` with credentials from `source` until it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once the budget is spent or the
    /// source has no further credentials, or a configuration error if the
    /// source offered none to begin with.
    #[instrument(skip_all, fields(max_restarts = ?self.max_restarts))]
    pub async fn run<S, T, F, Fut>(&self, source: &mut S, mut attempt: F) -> GuildMirrorResult<T>
    where
        S: CredentialSource + ?Sized,
        F: FnMut(Credentials) -> Fut,
        Fut: Future<Output = GuildMirrorResult<T>>,
    {
        let mut restarts = 0u32;
        let mut last_error: Option<GuildMirrorError> = None;

        loop {
            let Some(credentials) = source.credentials(last_error.as_ref()) else {
                return Err(match last_error {
                    Some(err) => {
                        error!("No credentials left to retry with");
                        err
                    }
                    None => ConfigError::new("No credentials available").into(),
                });
            };

            if restarts > 0 {
                warn!(
                    restarts,
                    delay_ms = self.restart_delay.as_millis() as u64,
                    "Restarting after delay"
                );
                tokio::time::sleep(self.restart_delay).await;
            }

            info!(attempt = restarts + 1, "Starting run");
            let err = match attempt(credentials).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            error!(error = %err, "Run failed");

            if self.max_restarts.is_some_and(|max| restarts >= max) {
                error!(restarts, "Restart budget exhausted");
                return Err(err);
            }
            restarts += 1;
            last_error = Some(err);
        }
    }
}
