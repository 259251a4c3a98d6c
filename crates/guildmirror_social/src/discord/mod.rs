//! Discord integration.
//!
//! # Architecture
//!
//! ## Session Layer
//! - **client**: gateway connection that resolves once the session is ready
//! - **handler**: event handler that reports the ready event
//!
//! ## Remote Access Layer
//! - **api**: `GuildReader` and `GuildWriter` over Serenity's HTTP client
//! - **conversions**: mapping between Serenity models and guildmirror values
//!
//! # Usage
//!
//! ```rust,ignore
//! use guildmirror_social::DiscordSession;
//!
//! let session = DiscordSession::connect(&token).await?;
//! let api = session.api();
//! let roles = api.roles(source).await?;
//! session.close().await;
//! ```

mod api;
mod client;
mod conversions;
mod handler;

pub use api::DiscordGuildApi;
pub use client::DiscordSession;
pub use conversions::{channel_kind, channel_type, overwrite_spec, serenity_overwrite};
pub use handler::ReadyHandler;
