//! Run lifecycle state machine.

use guildmirror_error::LifecycleError;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

/// States a run passes through.
///
/// `Connecting → Ready → Replicating → Completed | Failed`. Failure is
/// reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the session to report ready
    Connecting,
    /// Session ready, pipeline not started
    Ready,
    /// Pipeline running
    Replicating,
    /// Pipeline finished
    Completed,
    /// Run aborted
    Failed,
}

impl SessionState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }

    fn allows(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Connecting, Ready) | (Ready, Replicating) | (Replicating, Completed)
        ) || (next == Failed && !self.is_terminal())
    }
}

/// Tracks the state of one run and rejects out-of-order transitions.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{Lifecycle, SessionState};
///
/// let mut lifecycle = Lifecycle::new();
/// lifecycle.advance(SessionState::Ready).unwrap();
/// assert!(lifecycle.advance(SessionState::Completed).is_err());
/// lifecycle.advance(SessionState::Replicating).unwrap();
/// lifecycle.advance(SessionState::Completed).unwrap();
/// assert!(lifecycle.state().is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: SessionState,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Start in `Connecting`.
    pub fn new() -> Self {
        Self {
            state: SessionState::Connecting,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move to `next`, or fail without changing state.
    #[track_caller]
    pub fn advance(&mut self, next: SessionState) -> Result<(), LifecycleError> {
        if !self.state.allows(next) {
            return Err(LifecycleError::new(
                self.state.to_string(),
                next.to_string(),
            ));
        }
        debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
        Ok(())
    }

    /// Move to `Failed` from whatever non-terminal state the run is in.
    ///
    /// Returns `false` if the run had already finished.
    pub fn fail(&mut self) -> bool {
        self.advance(SessionState::Failed).is_ok()
    }
}
