//! Test utilities for replication tests.
//!
//! This module provides the in-memory guild and source fixtures.

#![allow(dead_code)]

use guildmirror_core::{ChannelKind, GuildSnapshot, OverwriteTarget, PermissionOverwriteSpec, RoleId};
use guildmirror_replicator::SnapshotReader;

pub mod mock_guild;

#[allow(unused_imports)]
pub use mock_guild::{MockGuild, MockOp};

pub const SOURCE_GUILD: u64 = 1_000;
pub const DESTINATION_GUILD: u64 = 2_000;

pub const VIEW_CHANNEL: u64 = 0x400;
pub const SEND_MESSAGES: u64 = 0x800;
pub const MANAGE_MESSAGES: u64 = 0x2000;
pub const ADMINISTRATOR: u64 = 0x8;

/// Source with roles Admin (rank 3), Mod (rank 2), Member (rank 1), one
/// category "Text Channels" and two channels parented to it.
pub fn scenario_source() -> MockGuild {
    let source = MockGuild::new(SOURCE_GUILD, "Source Server");
    source.add_role("Member", 1, VIEW_CHANNEL);
    source.add_role("Mod", 2, MANAGE_MESSAGES);
    source.add_role("Admin", 3, ADMINISTRATOR);

    let category = source.add_category("Text Channels", 0, vec![]);
    source.add_channel("general", ChannelKind::Text, 0, Some(category), vec![]);
    source.add_channel("voice-chat", ChannelKind::Voice, 1, Some(category), vec![]);
    source
}

/// An empty destination.
pub fn empty_destination() -> MockGuild {
    MockGuild::new(DESTINATION_GUILD, "Destination Server")
}

/// Overwrite on a role of the guild it was read from.
pub fn role_overwrite(role: RoleId, allow: u64, deny: u64) -> PermissionOverwriteSpec {
    PermissionOverwriteSpec {
        target: OverwriteTarget::Role(role),
        allow,
        deny,
    }
}

/// Read `source` through the snapshot reader.
pub async fn snapshot_of(source: &MockGuild) -> GuildSnapshot {
    SnapshotReader::new(source)
        .read(source.id())
        .await
        .expect("Failed to read source snapshot")
}
