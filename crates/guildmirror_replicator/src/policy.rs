//! What to do with an item whose mutation failed.

use guildmirror_core::Stage;
use guildmirror_error::{RemoteError, RemoteErrorKind};

/// Outcome of a failed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Disposition {
    /// Record the failure, skip the item, continue the stage
    SkipItem,
    /// Abort the run
    Abort,
}

/// Decide whether a failure on `stage` is per-item or fatal.
///
/// Malformed payloads are always per-item. Permission errors are per-item
/// only on stages nothing later depends on. Throttling never reaches this
/// point under the retry controller, so seeing it here is treated like any
/// other unexpected failure.
pub fn classify(stage: Stage, err: &RemoteError) -> Disposition {
    match err.kind() {
        RemoteErrorKind::InvalidPayload(_) => Disposition::SkipItem,
        RemoteErrorKind::PermissionDenied(_) if stage.tolerates_permission_denied() => {
            Disposition::SkipItem
        }
        _ => Disposition::Abort,
    }
}
