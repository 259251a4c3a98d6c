//! Results of a replication run.

use derive_getters::Getters;
use guildmirror_core::Stage;
use guildmirror_error::RemoteError;
use std::time::Duration;

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StageStatus {
    /// Disabled by preferences; nothing was sent
    Skipped,
    /// Every item was attempted
    Completed,
}

/// An item that was skipped after a recoverable failure.
#[derive(Debug, Clone, Getters)]
pub struct ItemFailure {
    /// Name of the item
    item: String,
    /// Why it was skipped
    error: RemoteError,
}

impl ItemFailure {
    pub(crate) fn new(item: impl Into<String>, error: RemoteError) -> Self {
        Self {
            item: item.into(),
            error,
        }
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, Getters)]
pub struct StageReport {
    /// Which stage
    stage: Stage,
    /// Whether it ran
    status: StageStatus,
    /// Mutations that succeeded
    applied: usize,
    /// Items skipped after recoverable failures
    failures: Vec<ItemFailure>,
    /// Wall-clock time spent in the stage
    elapsed: Duration,
}

impl StageReport {
    pub(crate) fn skipped(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            applied: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn started(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Completed,
            applied: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record_applied(&mut self) {
        self.applied += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: ItemFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}

/// Outcome of a successful run.
///
/// A run that returns a report finished every enabled stage. Individual
/// items may still have been skipped; see [`ReplicationReport::failures`].
#[derive(Debug, Clone, Getters)]
pub struct ReplicationReport {
    /// One entry per stage, in execution order, skipped stages included
    stages: Vec<StageReport>,
    /// Total wall-clock time
    elapsed: Duration,
    /// Throttling responses absorbed during the run
    throttled: u64,
}

impl ReplicationReport {
    pub(crate) fn new(stages: Vec<StageReport>, elapsed: Duration, throttled: u64) -> Self {
        Self {
            stages,
            elapsed,
            throttled,
        }
    }

    /// Report for `stage`.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }

    /// Every skipped item across all stages.
    pub fn failures(&self) -> impl Iterator<Item = (Stage, &ItemFailure)> {
        self.stages
            .iter()
            .flat_map(|report| report.failures.iter().map(move |f| (report.stage, f)))
    }

    /// Total mutations applied.
    pub fn applied(&self) -> usize {
        self.stages.iter().map(|report| report.applied).sum()
    }

    /// Whether no item was skipped.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
