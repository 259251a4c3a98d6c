//! Guild read and write access over Serenity's HTTP client.

use super::conversions::{channel_spec, channel_type, emoji_spec, role_spec, serenity_overwrite};
use async_trait::async_trait;
use guildmirror_core::{ChannelId, ChannelSpec, EmojiId, EmojiSpec, GuildId, ImageRef, RoleId, RoleSpec};
use guildmirror_error::RemoteResult;
use guildmirror_interface::{
    GuildEdit, GuildOverview, GuildReader, GuildWriter, NewCategory, NewChannel, NewEmoji, NewRole,
};
use serenity::all::{
    ChannelId as DiscordChannelId, ChannelType, CreateAttachment, CreateChannel, EditGuild,
    EditRole, GuildId as DiscordGuildId, Permissions, RoleId as DiscordRoleId,
};
use serenity::http::Http;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Discord implementation of [`GuildReader`] and [`GuildWriter`].
///
/// Each trait method is exactly one REST call, except image payloads which
/// are fetched from their URL first. Errors are classified through
/// `From<serenity::Error>` into `RemoteErrorKind`.
#[derive(Clone)]
pub struct DiscordGuildApi {
    http: Arc<Http>,
}

impl DiscordGuildApi {
    /// Create a standalone API client from a bot token.
    ///
    /// No gateway session is opened; use
    /// [`DiscordSession::api`](super::DiscordSession::api) when a ready
    /// session is required.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        info!("Creating standalone Discord guild API");
        Self {
            http: Arc::new(Http::new(token.as_ref())),
        }
    }

    /// Create an API client sharing an existing HTTP client.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    async fn attachment(&self, image: &ImageRef) -> RemoteResult<CreateAttachment> {
        debug!(url = image.url(), "Fetching image payload");
        Ok(CreateAttachment::url(&self.http, image.url()).await?)
    }
}

fn guild_id(id: GuildId) -> DiscordGuildId {
    DiscordGuildId::new(id.get())
}

fn edit_role(role: &NewRole) -> EditRole<'_> {
    EditRole::new()
        .name(role.name.as_str())
        .colour(role.color)
        .permissions(Permissions::from_bits_truncate(role.permissions))
        .hoist(role.hoist)
        .mentionable(role.mentionable)
}

#[async_trait]
impl GuildReader for DiscordGuildApi {
    #[instrument(skip(self), fields(guild = %guild))]
    async fn guild(&self, guild: GuildId) -> RemoteResult<GuildOverview> {
        let partial = self.http.get_guild(guild_id(guild)).await?;
        Ok(GuildOverview {
            id: GuildId::new(partial.id.get()),
            icon: partial.icon_url().map(ImageRef::new),
            name: partial.name,
        })
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn roles(&self, guild: GuildId) -> RemoteResult<Vec<RoleSpec>> {
        let roles = self.http.get_guild_roles(guild_id(guild)).await?;
        debug!(count = roles.len(), "Fetched roles");
        Ok(roles.iter().map(role_spec).collect())
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn channels(&self, guild: GuildId) -> RemoteResult<Vec<ChannelSpec>> {
        let channels = self.http.get_channels(guild_id(guild)).await?;
        debug!(count = channels.len(), "Fetched channels");
        Ok(channels.iter().map(channel_spec).collect())
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn emojis(&self, guild: GuildId) -> RemoteResult<Vec<EmojiSpec>> {
        let emojis = self.http.get_emojis(guild_id(guild)).await?;
        debug!(count = emojis.len(), "Fetched emojis");
        Ok(emojis.iter().map(emoji_spec).collect())
    }
}

#[async_trait]
impl GuildWriter for DiscordGuildApi {
    #[instrument(skip(self, edit), fields(guild = %guild, name = %edit.name))]
    async fn edit_guild(&self, guild: GuildId, edit: &GuildEdit) -> RemoteResult<()> {
        let icon = match &edit.icon {
            Some(image) => Some(self.attachment(image).await?),
            None => None,
        };

        let mut builder = EditGuild::new().name(edit.name.as_str());
        if let Some(icon) = &icon {
            builder = builder.icon(Some(icon));
        }

        guild_id(guild).edit(&self.http, builder).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn delete_channel(&self, channel: ChannelId) -> RemoteResult<()> {
        DiscordChannelId::new(channel.get())
            .delete(&self.http)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, role), fields(guild = %guild))]
    async fn edit_default_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<()> {
        let everyone = DiscordRoleId::new(guild.get());
        guild_id(guild)
            .edit_role(&self.http, everyone, edit_role(role))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, role), fields(guild = %guild, name = %role.name))]
    async fn create_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<RoleId> {
        let created = guild_id(guild)
            .create_role(&self.http, edit_role(role).position(role.position))
            .await?;
        Ok(RoleId::new(created.id.get()))
    }

    #[instrument(skip(self, category), fields(guild = %guild, name = %category.name))]
    async fn create_category(
        &self,
        guild: GuildId,
        category: &NewCategory,
    ) -> RemoteResult<ChannelId> {
        let builder = CreateChannel::new(category.name.as_str())
            .kind(ChannelType::Category)
            .position(category.position)
            .permissions(category.overwrites.iter().map(serenity_overwrite));

        let created = guild_id(guild).create_channel(&self.http, builder).await?;
        Ok(ChannelId::new(created.id.get()))
    }

    #[instrument(skip(self, channel), fields(guild = %guild, name = %channel.name, kind = %channel.kind))]
    async fn create_channel(
        &self,
        guild: GuildId,
        channel: &NewChannel,
    ) -> RemoteResult<ChannelId> {
        let mut builder = CreateChannel::new(channel.name.as_str())
            .kind(channel_type(channel.kind))
            .position(channel.position)
            .nsfw(channel.nsfw)
            .permissions(channel.overwrites.iter().map(serenity_overwrite));

        if let Some(parent) = channel.parent {
            builder = builder.category(DiscordChannelId::new(parent.get()));
        }
        if let Some(topic) = &channel.topic {
            builder = builder.topic(topic.as_str());
        }
        if let Some(bitrate) = channel.bitrate {
            builder = builder.bitrate(bitrate);
        }
        if let Some(user_limit) = channel.user_limit {
            builder = builder.user_limit(user_limit);
        }
        if let Some(delay) = channel.rate_limit_per_user {
            builder = builder.rate_limit_per_user(delay);
        }

        let created = guild_id(guild).create_channel(&self.http, builder).await?;
        Ok(ChannelId::new(created.id.get()))
    }

    #[instrument(skip(self, emoji), fields(guild = %guild, name = %emoji.name))]
    async fn create_emoji(&self, guild: GuildId, emoji: &NewEmoji) -> RemoteResult<EmojiId> {
        let image = self.attachment(&emoji.image).await?.to_base64();
        let created = guild_id(guild)
            .create_emoji(&self.http, &emoji.name, &image)
            .await?;
        Ok(EmojiId::new(created.id.get()))
    }
}
