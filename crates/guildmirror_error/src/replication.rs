//! Replication pipeline failures.

use crate::{RemoteError, RemoteErrorKind};
use std::fmt;

/// A fatal failure that aborted a replication run.
///
/// Carries the stage that was running, the item being applied (if the
/// failure was item-specific) and the underlying remote error. Mutations
/// applied before the failure are not rolled back.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ReplicationError {
    stage: String,
    item: Option<String>,
    source: RemoteError,
    line: u32,
    file: &'static str,
}

impl ReplicationError {
    /// Create a new replication error with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use guildmirror_error::{RemoteError, RemoteErrorKind, ReplicationError};
    ///
    /// let cause = RemoteError::new(RemoteErrorKind::NotFound("Unknown Guild".into()));
    /// let err = ReplicationError::new("categories", Some("Text Channels".into()), cause);
    /// assert_eq!(err.stage(), "categories");
    /// assert!(err.to_string().contains("Text Channels"));
    /// ```
    #[track_caller]
    pub fn new(stage: impl Into<String>, item: Option<String>, source: RemoteError) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage: stage.into(),
            item,
            source,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Stage that was running.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Item being applied when the failure happened.
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Underlying remote error.
    pub fn remote(&self) -> &RemoteError {
        &self.source
    }

    /// Kind of the underlying remote error.
    pub fn kind(&self) -> &RemoteErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for ReplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replication Error: stage '{}'", self.stage)?;
        if let Some(item) = &self.item {
            write!(f, " failed on '{}'", item)?;
        } else {
            write!(f, " failed")?;
        }
        write!(
            f,
            ": {} at line {} in {}",
            self.source.kind(),
            self.line,
            self.file
        )
    }
}
