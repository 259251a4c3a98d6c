//! Credentials for one replication run.

use guildmirror_core::GuildId;
use guildmirror_error::{GuildMirrorError, GuildMirrorErrorKind};
use std::fmt;

/// Token plus the two guilds a run operates on.
///
/// `Debug` and [`Credentials::masked_token`] never reveal the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    source: GuildId,
    destination: GuildId,
}

impl Credentials {
    /// Bundle a token with the source and destination guilds.
    pub fn new(token: impl Into<String>, source: GuildId, destination: GuildId) -> Self {
        Self {
            token: token.into(),
            source,
            destination,
        }
    }

    /// Bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Guild read from.
    pub fn source(&self) -> GuildId {
        self.source
    }

    /// Guild written to.
    pub fn destination(&self) -> GuildId {
        self.destination
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.masked_token())
            .field("source", &self.source)
            .field("destination", &self.destination)
            .finish()
    }
}

/// Hide all but the last four characters of `token`.
///
/// # Examples
///
/// ```
/// use guildmirror::mask_token;
///
/// assert_eq!(mask_token("abcdefgh"), "****efgh");
/// assert_eq!(mask_token("abc"), "***");
/// ```
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let visible = if chars.len() > 4 { 4 } else { 0 };
    let hidden = chars.len() - visible;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}

/// Supplies credentials to the [`Supervisor`](crate::Supervisor).
///
/// Called before the first attempt with `previous = None`, and again after
/// every failed attempt with the error it ended with. Returning `None` ends
/// the supervision loop.
pub trait CredentialSource: Send {
    /// Credentials for the next attempt, if any.
    fn credentials(&mut self, previous: Option<&GuildMirrorError>) -> Option<Credentials>;
}

/// Credentials fixed at startup, from the command line or environment.
///
/// Offers the same credentials again after failures that happen before the
/// destination is touched (connection, snapshot read). A rejected token or a
/// pipeline failure ends the loop: rerunning a pipeline that already
/// mutated the destination would duplicate its roles.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Wrap fixed credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&mut self, previous: Option<&GuildMirrorError>) -> Option<Credentials> {
        let ends_run = previous.is_some_and(|err| {
            err.is_authentication_failure()
                || matches!(err.kind(), GuildMirrorErrorKind::Replication(_))
        });
        (!ends_run).then(|| self.credentials.clone())
    }
}
