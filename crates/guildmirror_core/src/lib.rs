//! Core data types for the guildmirror guild replication engine.
//!
//! This crate provides the values shared by every other crate: typed
//! snowflake identifiers, the immutable [`GuildSnapshot`] read from the
//! source guild, the per-run [`IdRemap`], the stage [`Preferences`] and the
//! run [`Lifecycle`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ids;
mod lifecycle;
mod preferences;
mod remap;
mod snapshot;

pub use ids::{ChannelId, EmojiId, GuildId, RoleId, UserId};
pub use lifecycle::{Lifecycle, SessionState};
pub use preferences::{Preferences, Stage};
pub use remap::IdRemap;
pub use snapshot::{
    CategorySpec, ChannelKind, ChannelSpec, EmojiSpec, GuildSnapshot, GuildSnapshotBuilder,
    GuildSnapshotBuilderError, ImageRef, OverwriteTarget, PermissionOverwriteSpec, RoleSpec,
};
