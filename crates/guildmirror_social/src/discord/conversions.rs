//! Conversions between Serenity models and guildmirror values.
//!
//! Read-side conversions keep source identifiers untouched; the base role
//! still appears as an ordinary role overwrite here and is recognized later
//! by the snapshot reader.

use guildmirror_core::{
    ChannelId, ChannelKind, ChannelSpec, EmojiId, EmojiSpec, ImageRef, OverwriteTarget,
    PermissionOverwriteSpec, RoleId, RoleSpec, UserId,
};
use guildmirror_interface::Overwrite;
use serenity::model::channel::{
    ChannelType, GuildChannel, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::guild::{Emoji, Role};
use serenity::model::id::RoleId as DiscordRoleId;
use serenity::model::permissions::Permissions;
use tracing::debug;

/// Map a Serenity channel type to a channel kind.
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::Text,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::News => ChannelKind::News,
        ChannelType::Stage => ChannelKind::Stage,
        ChannelType::Forum => ChannelKind::Forum,
        other => ChannelKind::Other(u8::from(other)),
    }
}

/// Map a channel kind back to a Serenity channel type.
pub fn channel_type(kind: ChannelKind) -> ChannelType {
    match kind {
        ChannelKind::Text => ChannelType::Text,
        ChannelKind::Voice => ChannelType::Voice,
        ChannelKind::Category => ChannelType::Category,
        ChannelKind::News => ChannelType::News,
        ChannelKind::Stage => ChannelType::Stage,
        ChannelKind::Forum => ChannelType::Forum,
        ChannelKind::Other(raw) => ChannelType::from(raw),
    }
}

/// Convert a Serenity overwrite. Returns `None` for target kinds this crate
/// does not know.
pub fn overwrite_spec(overwrite: &PermissionOverwrite) -> Option<PermissionOverwriteSpec> {
    let target = match overwrite.kind {
        PermissionOverwriteType::Role(id) => OverwriteTarget::Role(RoleId::new(id.get())),
        PermissionOverwriteType::Member(id) => OverwriteTarget::Member(UserId::new(id.get())),
        _ => {
            debug!(kind = ?overwrite.kind, "Skipping overwrite with unknown target kind");
            return None;
        }
    };
    Some(PermissionOverwriteSpec {
        target,
        allow: overwrite.allow.bits(),
        deny: overwrite.deny.bits(),
    })
}

/// Build a Serenity role overwrite from a translated overwrite.
pub fn serenity_overwrite(overwrite: &Overwrite) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::from_bits_truncate(overwrite.allow),
        deny: Permissions::from_bits_truncate(overwrite.deny),
        kind: PermissionOverwriteType::Role(DiscordRoleId::new(overwrite.role.get())),
    }
}

pub(crate) fn role_spec(role: &Role) -> RoleSpec {
    RoleSpec {
        id: RoleId::new(role.id.get()),
        name: role.name.clone(),
        color: role.colour.0,
        permissions: role.permissions.bits(),
        hoist: role.hoist,
        mentionable: role.mentionable,
        position: role.position,
    }
}

pub(crate) fn channel_spec(channel: &GuildChannel) -> ChannelSpec {
    ChannelSpec {
        id: ChannelId::new(channel.id.get()),
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
        position: channel.position,
        parent: channel.parent_id.map(|id| ChannelId::new(id.get())),
        overwrites: channel
            .permission_overwrites
            .iter()
            .filter_map(overwrite_spec)
            .collect(),
        topic: channel.topic.clone(),
        nsfw: channel.nsfw,
        bitrate: channel.bitrate,
        user_limit: channel.user_limit,
        rate_limit_per_user: channel.rate_limit_per_user,
    }
}

pub(crate) fn emoji_spec(emoji: &Emoji) -> EmojiSpec {
    EmojiSpec {
        id: EmojiId::new(emoji.id.get()),
        name: emoji.name.clone(),
        image: ImageRef::new(emoji.url()),
        animated: emoji.animated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::UserId as DiscordUserId;

    #[test]
    fn test_known_channel_types_map_both_ways() {
        for kind in [
            ChannelKind::Text,
            ChannelKind::Voice,
            ChannelKind::Category,
            ChannelKind::News,
            ChannelKind::Stage,
            ChannelKind::Forum,
        ] {
            assert_eq!(channel_kind(channel_type(kind)), kind);
        }
    }

    #[test]
    fn test_unknown_channel_type_keeps_raw_value() {
        // 14 is the directory channel type
        let kind = channel_kind(ChannelType::from(14u8));
        assert_eq!(kind, ChannelKind::Other(14));
        assert_eq!(u8::from(channel_type(kind)), 14);
    }

    #[test]
    fn test_member_overwrite_is_read() {
        let overwrite = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Member(DiscordUserId::new(42)),
        };
        let spec = overwrite_spec(&overwrite).unwrap();
        assert_eq!(spec.target, OverwriteTarget::Member(UserId::new(42)));
        assert_eq!(spec.allow, Permissions::VIEW_CHANNEL.bits());
        assert_eq!(spec.deny, Permissions::SEND_MESSAGES.bits());
    }

    #[test]
    fn test_translated_overwrite_targets_role() {
        let overwrite = Overwrite {
            role: RoleId::new(77),
            allow: 0x400,
            deny: 0x800,
        };
        let serenity = serenity_overwrite(&overwrite);
        assert_eq!(serenity.kind, PermissionOverwriteType::Role(DiscordRoleId::new(77)));
        assert_eq!(serenity.allow.bits(), 0x400);
        assert_eq!(serenity.deny.bits(), 0x800);
    }
}
