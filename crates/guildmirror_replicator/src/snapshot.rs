//! Reading the source guild into a snapshot.

use guildmirror_core::{
    CategorySpec, ChannelKind, ChannelSpec, EmojiSpec, GuildId, GuildSnapshot,
    GuildSnapshotBuilder, OverwriteTarget, PermissionOverwriteSpec, RoleSpec,
};
use guildmirror_error::{RemoteError, RemoteErrorKind, RemoteResult};
use guildmirror_interface::{GuildOverview, GuildReader};
use tracing::{debug, info, instrument};

/// Reads a source guild once and normalizes it into a [`GuildSnapshot`].
pub struct SnapshotReader<'a, R: GuildReader + ?Sized> {
    reader: &'a R,
}

impl<'a, R: GuildReader + ?Sized> SnapshotReader<'a, R> {
    /// Create a reader over `reader`.
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Read guild metadata, roles, channels and emoji in a single pass.
    ///
    /// # Errors
    ///
    /// `NotFound` if the guild does not resolve, `PermissionDenied` if the
    /// session may not read it. Any other read failure is passed through.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn read(&self, source: GuildId) -> RemoteResult<GuildSnapshot> {
        let overview = self.reader.guild(source).await?;
        let roles = self.reader.roles(source).await?;
        let channels = self.reader.channels(source).await?;
        let emojis = self.reader.emojis(source).await?;

        let snapshot = normalize(overview, roles, channels, emojis)?;
        info!(
            name = %snapshot.name(),
            roles = snapshot.roles().len(),
            categories = snapshot.categories().len(),
            channels = snapshot.channels().len(),
            emojis = snapshot.emojis().len(),
            "Snapshot read"
        );
        Ok(snapshot)
    }
}

/// Build a snapshot from raw reads.
///
/// The base role is split out, categories are separated from channels, all
/// three are ordered by `(position, id)`, overwrites on the guild's own id
/// become [`OverwriteTarget::Everyone`] and emoji are ordered by name.
pub fn normalize(
    overview: GuildOverview,
    roles: Vec<RoleSpec>,
    channels: Vec<ChannelSpec>,
    mut emojis: Vec<EmojiSpec>,
) -> RemoteResult<GuildSnapshot> {
    let everyone = overview.id.everyone_role();

    let (base, mut roles): (Vec<_>, Vec<_>) = roles.into_iter().partition(|r| r.id == everyone);
    roles.sort_by_key(|r| (r.position, r.id));

    let mut categories = Vec::new();
    let mut others = Vec::new();
    for mut channel in channels {
        mark_everyone(&mut channel.overwrites, overview.id);
        if channel.kind == ChannelKind::Category {
            categories.push(CategorySpec {
                id: channel.id,
                name: channel.name,
                position: channel.position,
                overwrites: channel.overwrites,
            });
        } else {
            others.push(channel);
        }
    }
    categories.sort_by_key(|c| (c.position, c.id));
    others.sort_by_key(|c| (c.position, c.id));
    emojis.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    GuildSnapshotBuilder::default()
        .id(overview.id)
        .name(overview.name)
        .icon(overview.icon)
        .default_role(base.into_iter().next())
        .roles(roles)
        .categories(categories)
        .channels(others)
        .emojis(emojis)
        .build()
        .map_err(|e| RemoteError::new(RemoteErrorKind::Unexpected(e.to_string())))
}

fn mark_everyone(overwrites: &mut [PermissionOverwriteSpec], guild: GuildId) {
    let everyone = guild.everyone_role();
    for overwrite in overwrites {
        if overwrite.target == OverwriteTarget::Role(everyone) {
            debug!(%guild, "Overwrite targets base role");
            overwrite.target = OverwriteTarget::Everyone;
        }
    }
}
