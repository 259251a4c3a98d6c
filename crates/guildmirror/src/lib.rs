//! guildmirror - Discord guild structure replication
//!
//! guildmirror copies the structure of one Discord guild into another: name
//! and icon, roles and their permissions, categories, channels with their
//! permission overwrites, and optionally custom emoji. Messages, members and
//! bans are never copied.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use guildmirror::{Credentials, MirrorConfig, StaticCredentials, Supervisor, run_once};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MirrorConfig::load()?;
//!     let credentials = Credentials::new(
//!         std::env::var("DISCORD_TOKEN")?,
//!         "123456789012345678".parse()?,
//!         "876543210987654321".parse()?,
//!     );
//!
//!     let report = Supervisor::new(&config.supervisor)
//!         .run(&mut StaticCredentials::new(credentials), |creds| {
//!             run_once(creds, config.preferences, &config.retry)
//!         })
//!         .await?;
//!     println!("Cloning completed in {:.2} seconds.", report.elapsed().as_secs_f64());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` (default) - serenity-backed session and guild API
//!
//! # Architecture
//!
//! guildmirror is organized as a workspace with focused crates:
//!
//! - `guildmirror_error` - Error types
//! - `guildmirror_core` - Ids, snapshot, preferences, lifecycle
//! - `guildmirror_interface` - `GuildReader` / `GuildWriter` capability traits
//! - `guildmirror_rate_limit` - Throttling-aware retry controller
//! - `guildmirror_social` - Discord adapter
//! - `guildmirror_replicator` - Snapshot reader and replication pipeline
//!
//! This crate (`guildmirror`) re-exports everything for convenience and adds
//! configuration, credentials and the restart supervisor.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod run;
mod supervisor;

pub use config::{MirrorConfig, SupervisorConfig};
pub use credentials::{CredentialSource, Credentials, StaticCredentials, mask_token};
pub use run::replicate;
#[cfg(feature = "discord")]
pub use run::run_once;
pub use supervisor::Supervisor;

// Re-export workspace crates
pub use guildmirror_core::*;
pub use guildmirror_error::*;
pub use guildmirror_interface::*;
pub use guildmirror_rate_limit::*;
pub use guildmirror_replicator::*;

#[cfg(feature = "discord")]
pub use guildmirror_social::*;
