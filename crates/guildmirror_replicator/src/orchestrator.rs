//! The replication pipeline.

use crate::policy::{Disposition, classify};
use crate::report::{ItemFailure, ReplicationReport, StageReport};
use guildmirror_core::{GuildId, GuildSnapshot, IdRemap, Preferences, Stage};
use guildmirror_error::{RemoteResult, ReplicationError};
use guildmirror_interface::GuildApi;
use guildmirror_rate_limit::RetryController;
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Applies a [`GuildSnapshot`] to a destination guild.
///
/// Stages run in the fixed order of [`Stage::ALL`]; disabled stages are
/// skipped. Items within a stage are sent one at a time, each through the
/// [`RetryController`]. The first fatal failure aborts the run: mutations
/// already applied stay in place and nothing is resumed later.
///
/// The engine is not idempotent. Running it twice against the same
/// destination creates every role, category and channel twice.
///
/// # Example
///
/// ```rust,ignore
/// let snapshot = SnapshotReader::new(&api).read(source).await?;
/// let report = Replicator::new(&api, Preferences::default())
///     .run(&snapshot, destination)
///     .await?;
/// println!("Cloning completed in {:.2} seconds.", report.elapsed().as_secs_f64());
/// ```
pub struct Replicator<'a, A: GuildApi + ?Sized> {
    pub(crate) api: &'a A,
    preferences: Preferences,
    controller: RetryController,
}

impl<'a, A: GuildApi + ?Sized> Replicator<'a, A> {
    /// Create a replicator with a default retry controller.
    pub fn new(api: &'a A, preferences: Preferences) -> Self {
        Self {
            api,
            preferences,
            controller: RetryController::default(),
        }
    }

    /// Use `controller` for every mutation.
    pub fn with_controller(mut self, controller: RetryController) -> Self {
        self.controller = controller;
        self
    }

    /// Stages this replicator will run.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Run every enabled stage against `destination`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal failure with the stage and item it happened
    /// on. Per-item failures are collected in the report instead.
    #[instrument(
        skip(self, snapshot),
        fields(source = %snapshot.id(), destination = %destination)
    )]
    pub async fn run(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
    ) -> Result<ReplicationReport, ReplicationError> {
        let started = Instant::now();
        let mut remap = IdRemap::new();
        let mut stages = Vec::with_capacity(Stage::ALL.len());

        info!(
            stages = ?self.preferences.enabled_stages(),
            items = snapshot.item_count(),
            "Starting replication"
        );

        for stage in Stage::ALL {
            if !self.preferences.is_enabled(stage) {
                info!(%stage, "Stage skipped");
                stages.push(StageReport::skipped(stage));
                continue;
            }

            info!(%stage, "{}", stage.description());
            let stage_started = Instant::now();
            let mut report = StageReport::started(stage);

            match stage {
                Stage::GuildEdit => self.edit_guild(snapshot, destination, &mut report).await?,
                Stage::ChannelsDelete => self.delete_channels(destination, &mut report).await?,
                Stage::RolesCreate => {
                    self.create_roles(snapshot, destination, &mut remap, &mut report)
                        .await?
                }
                Stage::CategoriesCreate => {
                    self.create_categories(snapshot, destination, &mut remap, &mut report)
                        .await?
                }
                Stage::ChannelsCreate => {
                    self.create_channels(snapshot, destination, &remap, &mut report)
                        .await?
                }
                Stage::EmojisCreate => {
                    self.create_emojis(snapshot, destination, &mut report)
                        .await?
                }
            }

            let report = report.finish(stage_started.elapsed());
            info!(
                %stage,
                applied = report.applied(),
                failed = report.failures().len(),
                elapsed_ms = report.elapsed().as_millis() as u64,
                "Stage completed"
            );
            stages.push(report);
        }

        let report = ReplicationReport::new(
            stages,
            started.elapsed(),
            self.controller.throttled_count(),
        );
        info!(
            applied = report.applied(),
            elapsed_secs = report.elapsed().as_secs_f64(),
            "Replication completed"
        );
        Ok(report)
    }

    /// Read from the destination through the retry controller. Any failure
    /// is fatal.
    pub(crate) async fn read<T, F, Fut>(&self, stage: Stage, operation: F) -> Result<T, ReplicationError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        self.controller
            .execute(stage.as_ref(), operation)
            .await
            .map_err(|err| {
                error!(%stage, error = %err.kind(), "Aborting replication");
                ReplicationError::new(stage.to_string(), None, err)
            })
    }

    /// Send one mutation through the retry controller and apply the failure
    /// policy to the outcome.
    ///
    /// Returns `Ok(None)` when the item was skipped.
    pub(crate) async fn apply<T, F, Fut>(
        &self,
        report: &mut StageReport,
        item: &str,
        operation: F,
    ) -> Result<Option<T>, ReplicationError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        let stage = *report.stage();
        match self.controller.execute(stage.as_ref(), operation).await {
            Ok(value) => {
                debug!(%stage, item, "Applied");
                report.record_applied();
                Ok(Some(value))
            }
            Err(err) => match classify(stage, &err) {
                Disposition::SkipItem => {
                    warn!(%stage, item, error = %err.kind(), "Item skipped");
                    report.record_failure(ItemFailure::new(item, err));
                    Ok(None)
                }
                Disposition::Abort => {
                    error!(%stage, item, error = %err.kind(), "Aborting replication");
                    Err(ReplicationError::new(
                        stage.to_string(),
                        Some(item.to_string()),
                        err,
                    ))
                }
            },
        }
    }
}
