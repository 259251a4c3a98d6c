//! Error types for the guildmirror workspace.
//!
//! This crate provides the foundation error types used throughout guildmirror.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The remote taxonomy (`RemoteErrorKind`) is the one the replication engine
//! reasons about: throttling is recoverable, malformed items are skipped,
//! everything else aborts the run.
//!
//! # Examples
//!
//! ```
//! use guildmirror_error::{GuildMirrorResult, RemoteError, RemoteErrorKind};
//!
//! fn fetch_guild() -> GuildMirrorResult<String> {
//!     Err(RemoteError::new(RemoteErrorKind::NotFound("guild 42".to_string())))?
//! }
//!
//! assert!(fetch_guild().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod lifecycle;
mod remote;
mod replication;

pub use config::ConfigError;
pub use error::{GuildMirrorError, GuildMirrorErrorKind, GuildMirrorResult};
pub use lifecycle::LifecycleError;
pub use remote::{RemoteError, RemoteErrorKind, RemoteResult};
pub use replication::ReplicationError;
