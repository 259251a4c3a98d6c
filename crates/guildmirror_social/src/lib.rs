//! Platform adapters for guildmirror.
//!
//! The replication engine only talks to the `GuildReader` and `GuildWriter`
//! traits from `guildmirror_interface`. This crate provides the Discord
//! implementation of those traits on top of Serenity, together with the
//! gateway session that must report ready before any call is made.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "discord")]
pub mod discord;

#[cfg(feature = "discord")]
pub use discord::{DiscordGuildApi, DiscordSession, ReadyHandler};
