//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the guildmirror binary.

mod clone;
mod commands;
mod snapshot;

pub use clone::clone_guild;
pub use commands::{Cli, Commands};
pub use snapshot::write_snapshot;

use guildmirror::ConfigError;

/// Token from `--token`, else from `DISCORD_TOKEN`.
fn resolve_token(flag: Option<String>) -> Result<String, ConfigError> {
    flag.or_else(|| std::env::var("DISCORD_TOKEN").ok())
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ConfigError::new("No bot token: pass --token or set DISCORD_TOKEN"))
}
