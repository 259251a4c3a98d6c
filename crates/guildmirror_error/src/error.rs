//! Top-level error wrapper types.

use crate::{ConfigError, LifecycleError, RemoteError, ReplicationError};

/// Every error a guildmirror run can end with.
///
/// # Examples
///
/// ```
/// use guildmirror_error::{GuildMirrorError, RemoteError, RemoteErrorKind};
///
/// let remote = RemoteError::new(RemoteErrorKind::AuthenticationFailure("bad token".into()));
/// let err: GuildMirrorError = remote.into();
/// assert!(err.is_authentication_failure());
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GuildMirrorErrorKind {
    /// Remote API error outside the pipeline (session, snapshot)
    #[from(RemoteError)]
    Remote(RemoteError),
    /// Fatal pipeline failure
    #[from(ReplicationError)]
    Replication(ReplicationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Invalid lifecycle transition
    #[from(LifecycleError)]
    Lifecycle(LifecycleError),
}

/// guildmirror error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("GuildMirror Error: {}", _0)]
pub struct GuildMirrorError(Box<GuildMirrorErrorKind>);

impl GuildMirrorError {
    /// Create a new error from a kind.
    pub fn new(kind: GuildMirrorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GuildMirrorErrorKind {
        &self.0
    }

    /// Whether the run ended because credentials were rejected.
    pub fn is_authentication_failure(&self) -> bool {
        match self.kind() {
            GuildMirrorErrorKind::Remote(err) => err.is_authentication_failure(),
            GuildMirrorErrorKind::Replication(err) => err.remote().is_authentication_failure(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to GuildMirrorErrorKind
impl<T> From<T> for GuildMirrorError
where
    T: Into<GuildMirrorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for guildmirror operations.
pub type GuildMirrorResult<T> = std::result::Result<T, GuildMirrorError>;
