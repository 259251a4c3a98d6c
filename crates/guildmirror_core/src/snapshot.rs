//! Immutable snapshot of a source guild's structure.

use crate::{ChannelId, EmojiId, GuildId, RoleId, UserId};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Reference to an image hosted by the remote service (icon or emoji).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an image URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// URL the image payload is downloaded from.
    pub fn url(&self) -> &str {
        &self.0
    }
}

/// What a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum OverwriteTarget {
    /// The guild's implicit base role.
    Everyone,
    /// A role of the guild the overwrite was read from.
    Role(RoleId),
    /// A single member.
    Member(UserId),
}

/// A permission overwrite on a category or channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionOverwriteSpec {
    /// Who the overwrite applies to
    pub target: OverwriteTarget,
    /// Explicitly allowed permission bits
    pub allow: u64,
    /// Explicitly denied permission bits
    pub deny: u64,
}

/// A role as read from the source guild.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{RoleId, RoleSpec};
///
/// let role = RoleSpec {
///     id: RoleId::new(10),
///     name: "Moderator".to_string(),
///     color: 0x3498db,
///     permissions: 0x2000,
///     hoist: true,
///     mentionable: false,
///     position: 2,
/// };
/// assert_eq!(role.name, "Moderator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Source-side identifier
    pub id: RoleId,
    /// Display name
    pub name: String,
    /// 24-bit RGB color (0 means no color)
    pub color: u32,
    /// Permission bit-set
    pub permissions: u64,
    /// Whether members are listed separately
    pub hoist: bool,
    /// Whether anyone may mention the role
    pub mentionable: bool,
    /// Rank among the guild's roles (0 is the base role)
    pub position: u16,
}

/// A category as read from the source guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Source-side identifier
    pub id: ChannelId,
    /// Display name
    pub name: String,
    /// Sort position
    pub position: u16,
    /// Permission overwrites, still referencing source roles
    pub overwrites: Vec<PermissionOverwriteSpec>,
}

/// Kind of a channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Text channel
    #[display("text")]
    Text,
    /// Voice channel
    #[display("voice")]
    Voice,
    /// Category container
    #[display("category")]
    Category,
    /// Announcement channel
    #[display("news")]
    News,
    /// Stage channel
    #[display("stage")]
    Stage,
    /// Forum channel
    #[display("forum")]
    Forum,
    /// Any other kind, by its raw type number
    #[display("other({_0})")]
    Other(u8),
}

/// A non-category channel as read from the source guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Source-side identifier
    pub id: ChannelId,
    /// Display name
    pub name: String,
    /// Channel kind
    pub kind: ChannelKind,
    /// Sort position
    pub position: u16,
    /// Source-side parent category
    pub parent: Option<ChannelId>,
    /// Permission overwrites, still referencing source roles
    pub overwrites: Vec<PermissionOverwriteSpec>,
    /// Channel topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Age-restricted flag
    #[serde(default)]
    pub nsfw: bool,
    /// Voice bitrate in bits per second
    #[serde(default)]
    pub bitrate: Option<u32>,
    /// Voice user limit (0 means unlimited)
    #[serde(default)]
    pub user_limit: Option<u32>,
    /// Slow-mode delay in seconds
    #[serde(default)]
    pub rate_limit_per_user: Option<u16>,
}

impl ChannelSpec {
    /// Minimal channel of the given kind with no overwrites or extras.
    pub fn new(id: ChannelId, name: impl Into<String>, kind: ChannelKind, position: u16) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            position,
            parent: None,
            overwrites: Vec::new(),
            topic: None,
            nsfw: false,
            bitrate: None,
            user_limit: None,
            rate_limit_per_user: None,
        }
    }

    /// Set the source-side parent category.
    pub fn with_parent(mut self, parent: ChannelId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Append a permission overwrite.
    pub fn with_overwrite(mut self, overwrite: PermissionOverwriteSpec) -> Self {
        self.overwrites.push(overwrite);
        self
    }
}

/// A custom emoji as read from the source guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiSpec {
    /// Source-side identifier
    pub id: EmojiId,
    /// Emoji name
    pub name: String,
    /// Image payload reference
    pub image: ImageRef,
    /// Whether the image is animated
    #[serde(default)]
    pub animated: bool,
}

/// Structure of the source guild, read once at the start of a run.
///
/// Fields are private: a snapshot is never mutated after it is built.
/// Roles are ordered lowest rank first and exclude the base role, which is
/// held separately in `default_role`.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{GuildId, GuildSnapshotBuilder};
///
/// let snapshot = GuildSnapshotBuilder::default()
///     .id(GuildId::new(1))
///     .name("Source")
///     .build()
///     .unwrap();
///
/// assert_eq!(snapshot.name(), "Source");
/// assert!(snapshot.roles().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct GuildSnapshot {
    /// Source guild identifier
    id: GuildId,
    /// Guild display name
    name: String,
    /// Guild icon
    #[builder(default)]
    icon: Option<ImageRef>,
    /// Attributes of the base role, applied by edit rather than creation
    #[builder(default)]
    default_role: Option<RoleSpec>,
    /// Roles, lowest rank first
    #[builder(default)]
    roles: Vec<RoleSpec>,
    /// Categories in position order
    #[builder(default)]
    categories: Vec<CategorySpec>,
    /// Channels in position order
    #[builder(default)]
    channels: Vec<ChannelSpec>,
    /// Custom emoji
    #[builder(default)]
    emojis: Vec<EmojiSpec>,
}

impl GuildSnapshot {
    /// Channels whose source parent is `category`.
    pub fn channels_in(&self, category: ChannelId) -> impl Iterator<Item = &ChannelSpec> {
        self.channels
            .iter()
            .filter(move |channel| channel.parent == Some(category))
    }

    /// Total number of items the creation stages would apply.
    pub fn item_count(&self) -> usize {
        self.roles.len() + self.categories.len() + self.channels.len() + self.emojis.len()
    }
}
