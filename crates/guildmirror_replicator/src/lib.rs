//! Guild structure replication engine.
//!
//! This crate reads a source guild into a [`GuildSnapshot`] and applies it to
//! a destination guild through the capability traits of
//! `guildmirror_interface`.
//!
//! # Pipeline
//!
//! | Stage | Effect |
//! |-------|--------|
//! | `guild_edit` | destination name and icon |
//! | `channels_delete` | every destination channel and category removed |
//! | `roles_create` | base role edited, roles created lowest rank first |
//! | `categories_create` | categories created, overwrites remapped |
//! | `channels_create` | channels created under remapped parents |
//! | `emojis_create` | custom emoji uploaded |
//!
//! Role and category ids created on the destination are tracked in an
//! [`IdRemap`](guildmirror_core::IdRemap) so that overwrites and parent
//! links only ever name destination objects.
//!
//! [`GuildSnapshot`]: guildmirror_core::GuildSnapshot

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod policy;
mod report;
mod snapshot;
mod stages;
mod translate;

pub use orchestrator::Replicator;
pub use policy::{Disposition, classify};
pub use report::{ItemFailure, ReplicationReport, StageReport, StageStatus};
pub use snapshot::{SnapshotReader, normalize};
pub use translate::translate_overwrites;
