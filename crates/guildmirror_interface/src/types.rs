//! Payloads exchanged with the remote guild API.
//!
//! Read operations return the `*Spec` types from `guildmirror_core`, which
//! carry the identifiers of the guild they were read from. Write payloads
//! below only ever hold destination-side identifiers.

use guildmirror_core::{ChannelId, ChannelKind, GuildId, ImageRef, RoleId, RoleSpec};
use serde::{Deserialize, Serialize};

/// Top-level guild metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildOverview {
    /// Guild identifier
    pub id: GuildId,
    /// Display name
    pub name: String,
    /// Icon, if one is set
    pub icon: Option<ImageRef>,
}

/// Destination-side permission overwrite. Always targets a destination role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overwrite {
    /// Destination role
    pub role: RoleId,
    /// Allowed permission bits
    pub allow: u64,
    /// Denied permission bits
    pub deny: u64,
}

/// Edit applied to the destination guild's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildEdit {
    /// New display name
    pub name: String,
    /// New icon; `None` leaves the current icon in place
    pub icon: Option<ImageRef>,
}

/// Attributes of a role to create, or to apply to the base role.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{RoleId, RoleSpec};
/// use guildmirror_interface::NewRole;
///
/// let spec = RoleSpec {
///     id: RoleId::new(5),
///     name: "Admin".to_string(),
///     color: 0xff0000,
///     permissions: 8,
///     hoist: true,
///     mentionable: true,
///     position: 3,
/// };
/// let role = NewRole::from(&spec);
/// assert_eq!(role.name, "Admin");
/// assert_eq!(role.permissions, 8);
/// assert_eq!(role.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Display name
    pub name: String,
    /// 24-bit RGB color
    pub color: u32,
    /// Permission bit-set
    pub permissions: u64,
    /// Whether members are listed separately
    pub hoist: bool,
    /// Whether anyone may mention the role
    pub mentionable: bool,
    /// Requested rank; ignored when editing the base role
    pub position: u16,
}

impl From<&RoleSpec> for NewRole {
    fn from(spec: &RoleSpec) -> Self {
        Self {
            name: spec.name.clone(),
            color: spec.color,
            permissions: spec.permissions,
            hoist: spec.hoist,
            mentionable: spec.mentionable,
            position: spec.position,
        }
    }
}

/// A category to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display name
    pub name: String,
    /// Sort position
    pub position: u16,
    /// Overwrites, already translated to destination roles
    pub overwrites: Vec<Overwrite>,
}

/// A channel to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChannel {
    /// Display name
    pub name: String,
    /// Channel kind
    pub kind: ChannelKind,
    /// Sort position
    pub position: u16,
    /// Destination parent category
    pub parent: Option<ChannelId>,
    /// Overwrites, already translated to destination roles
    pub overwrites: Vec<Overwrite>,
    /// Channel topic
    pub topic: Option<String>,
    /// Age-restricted flag
    pub nsfw: bool,
    /// Voice bitrate
    pub bitrate: Option<u32>,
    /// Voice user limit
    pub user_limit: Option<u32>,
    /// Slow-mode delay in seconds
    pub rate_limit_per_user: Option<u16>,
}

/// A custom emoji to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmoji {
    /// Emoji name
    pub name: String,
    /// Image payload reference
    pub image: ImageRef,
}
