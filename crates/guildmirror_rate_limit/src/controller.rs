//! Retry controller built on tokio-retry2 and governor.

use crate::RetryConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use guildmirror_error::RemoteResult;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Wraps mutating calls with throttling-aware retry.
///
/// On `RemoteErrorKind::RateLimited` the controller suspends the caller for
/// the wait the service asked for (or the configured fallback) and reissues
/// the same call. There is no attempt cap: the service's throttling signal
/// decides when the call goes through. Every other error is returned on the
/// first occurrence.
///
/// Clones share the pacing quota and the throttle counter.
///
/// # Example
///
/// ```rust,ignore
/// let controller = RetryController::new(&RetryConfig::default());
/// let role_id = controller
///     .execute("create_role", || api.create_role(guild, &role))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RetryController {
    fallback: Duration,
    pacer: Option<Arc<DirectRateLimiter>>,
    throttled: Arc<AtomicU64>,
}

impl Default for RetryController {
    fn default() -> Self {
        Self::new(&RetryConfig::default())
    }
}

impl RetryController {
    /// Create a controller from configuration.
    pub fn new(config: &RetryConfig) -> Self {
        let pacer = config
            .max_mutations_per_minute
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        debug!(
            fallback_ms = config.fallback_retry_after_ms,
            paced = pacer.is_some(),
            "Creating retry controller"
        );

        Self {
            fallback: config.fallback_retry_after(),
            pacer,
            throttled: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of throttling responses absorbed so far.
    pub fn throttled_count(&self) -> u64 {
        self.throttled.load(Ordering::Relaxed)
    }

    /// Run `operation`, reissuing it for as long as it reports throttling.
    ///
    /// `label` names the call in logs.
    ///
    /// # Errors
    ///
    /// Returns the first error that is not a throttling response.
    #[instrument(skip(self, operation))]
    pub async fn execute<F, Fut, R>(&self, label: &str, operation: F) -> RemoteResult<R>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = RemoteResult<R>>,
    {
        // Unbounded and zero-length: the wait happens inside the attempt,
        // where the throttling response says how long it should be.
        let strategy = FixedInterval::new(Duration::ZERO);

        Retry::spawn(strategy, || async {
            if let Some(pacer) = &self.pacer {
                pacer.until_ready().await;
            }

            match operation().await {
                Ok(value) => Ok(value),
                Err(err) if err.kind().is_rate_limited() => {
                    let wait = err.retry_after().unwrap_or(self.fallback);
                    self.throttled.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        label,
                        wait_ms = wait.as_millis() as u64,
                        "Throttled, reissuing after requested wait"
                    );
                    tokio::time::sleep(wait).await;
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
                Err(err) => {
                    debug!(label, error = %err, "Not retrying");
                    Err(RetryError::Permanent(err))
                }
            }
        })
        .await
    }
}
