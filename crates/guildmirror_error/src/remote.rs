//! Remote management API errors.
//!
//! Every call against the remote service resolves to one of these kinds.
//! Adapters classify transport-level failures into this taxonomy so that the
//! replication engine never has to look at HTTP status codes itself.

use std::time::Duration;

/// Remote API error conditions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RemoteErrorKind {
    /// Credentials were rejected before or during the session.
    #[display("Authentication failed: {_0}")]
    AuthenticationFailure(String),

    /// A guild, channel, role or emoji did not resolve.
    #[display("Not found: {_0}")]
    NotFound(String),

    /// The session lacks the rights for the operation.
    #[display("Permission denied: {_0}")]
    PermissionDenied(String),

    /// The service throttled the call. `retry_after` is the wait it asked for, if any.
    #[display("Rate limited (retry after {:?})", retry_after)]
    RateLimited {
        /// Required wait before the same call may be reissued
        retry_after: Option<Duration>,
    },

    /// The service rejected the payload (name collision, bad image, limits reached).
    #[display("Invalid payload: {_0}")]
    InvalidPayload(String),

    /// Gateway or transport failure.
    #[display("Connection failed: {_0}")]
    Connection(String),

    /// Anything the taxonomy does not name.
    #[display("Unexpected error: {_0}")]
    Unexpected(String),
}

impl RemoteErrorKind {
    /// Classify an HTTP status code returned by the remote service.
    ///
    /// # Examples
    ///
    /// ```
    /// use guildmirror_error::RemoteErrorKind;
    ///
    /// let kind = RemoteErrorKind::from_status(404, "Unknown Guild", None);
    /// assert_eq!(kind, RemoteErrorKind::NotFound("Unknown Guild".to_string()));
    /// ```
    pub fn from_status(
        status: u16,
        message: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        let message = message.into();
        match status {
            400 | 413 | 422 => Self::InvalidPayload(message),
            401 => Self::AuthenticationFailure(message),
            403 => Self::PermissionDenied(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited { retry_after },
            502..=504 => Self::Connection(message),
            _ => Self::Unexpected(format!("HTTP {status}: {message}")),
        }
    }

    /// Whether the call may be reissued unchanged.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Remote API error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Remote Error: {} at line {} in {}", kind, line, file)]
pub struct RemoteError {
    kind: RemoteErrorKind,
    line: u32,
    file: &'static str,
}

impl RemoteError {
    /// Create a new RemoteError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use guildmirror_error::{RemoteError, RemoteErrorKind};
    ///
    /// let err = RemoteError::new(RemoteErrorKind::PermissionDenied("Manage Roles".into()));
    /// assert!(err.to_string().contains("Manage Roles"));
    /// ```
    #[track_caller]
    pub fn new(kind: RemoteErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a throttling response.
    #[track_caller]
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::new(RemoteErrorKind::RateLimited { retry_after })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RemoteErrorKind {
        &self.kind
    }

    /// Line where the error was created.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Wait requested by a throttling response.
    pub fn retry_after(&self) -> Option<Duration> {
        match self.kind {
            RemoteErrorKind::RateLimited { retry_after } => retry_after,
            _ => None,
        }
    }

    /// Whether credentials were rejected.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self.kind, RemoteErrorKind::AuthenticationFailure(_))
    }
}

/// Result type for remote API operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(feature = "discord")]
impl From<serenity::Error> for RemoteError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        let kind = match &err {
            serenity::Error::Http(http_err) => classify_http(http_err),
            serenity::Error::Gateway(serenity::gateway::GatewayError::InvalidAuthentication) => {
                RemoteErrorKind::AuthenticationFailure(err.to_string())
            }
            serenity::Error::Gateway(_) => RemoteErrorKind::Connection(err.to_string()),
            _ => RemoteErrorKind::Unexpected(err.to_string()),
        };
        RemoteError::new(kind)
    }
}

/// serenity's own ratelimiter waits out and reissues 429s, so a throttling
/// response rarely gets this far. When one does, `ErrorResponse` keeps only
/// the code and message of the body and the wait is lost; the retry
/// controller then falls back to its configured wait.
#[cfg(feature = "discord")]
fn classify_http(err: &serenity::http::HttpError) -> RemoteErrorKind {
    match err {
        serenity::http::HttpError::UnsuccessfulRequest(response) => RemoteErrorKind::from_status(
            response.status_code.as_u16(),
            response.error.message.clone(),
            None,
        ),
        other => RemoteErrorKind::Connection(other.to_string()),
    }
}
