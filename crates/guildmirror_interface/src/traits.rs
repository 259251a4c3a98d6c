//! Capability traits for reading and mutating a remote guild.

use crate::{GuildEdit, GuildOverview, NewCategory, NewChannel, NewEmoji, NewRole};
use async_trait::async_trait;
use guildmirror_core::{ChannelId, ChannelSpec, EmojiId, EmojiSpec, GuildId, RoleId, RoleSpec};
use guildmirror_error::RemoteResult;

/// Read access to a guild's structure.
///
/// Results are raw: roles include the base role (whose id equals the guild
/// id), channels include categories, and nothing is sorted. Normalization is
/// the snapshot reader's job.
#[async_trait]
pub trait GuildReader: Send + Sync {
    /// Guild metadata. Fails with `NotFound` if the guild is not visible.
    async fn guild(&self, guild: GuildId) -> RemoteResult<GuildOverview>;

    /// Every role, base role included.
    async fn roles(&self, guild: GuildId) -> RemoteResult<Vec<RoleSpec>>;

    /// Every channel, categories included.
    async fn channels(&self, guild: GuildId) -> RemoteResult<Vec<ChannelSpec>>;

    /// Every custom emoji.
    async fn emojis(&self, guild: GuildId) -> RemoteResult<Vec<EmojiSpec>>;
}

/// Mutating access to a guild's structure.
///
/// Each call is a single remote mutation. Implementations report throttling
/// as `RemoteErrorKind::RateLimited` and leave retrying to the caller.
#[async_trait]
pub trait GuildWriter: Send + Sync {
    /// Set the guild's name and icon.
    async fn edit_guild(&self, guild: GuildId, edit: &GuildEdit) -> RemoteResult<()>;

    /// Delete a channel or category.
    async fn delete_channel(&self, channel: ChannelId) -> RemoteResult<()>;

    /// Apply attributes to the guild's base role.
    async fn edit_default_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<()>;

    /// Create a role, returning its destination id.
    async fn create_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<RoleId>;

    /// Create a category, returning its destination id.
    async fn create_category(
        &self,
        guild: GuildId,
        category: &NewCategory,
    ) -> RemoteResult<ChannelId>;

    /// Create a channel, returning its destination id.
    async fn create_channel(&self, guild: GuildId, channel: &NewChannel)
    -> RemoteResult<ChannelId>;

    /// Upload a custom emoji, returning its destination id.
    async fn create_emoji(&self, guild: GuildId, emoji: &NewEmoji) -> RemoteResult<EmojiId>;
}

/// Read and write access together, as needed by the replication engine.
///
/// Implemented automatically for anything that implements both halves.
pub trait GuildApi: GuildReader + GuildWriter {}

impl<T: GuildReader + GuildWriter + ?Sized> GuildApi for T {}
