//! The six replication stages.

use crate::Replicator;
use crate::report::StageReport;
use crate::translate::translate_overwrites;
use guildmirror_core::{GuildId, GuildSnapshot, IdRemap, Stage};
use guildmirror_error::ReplicationError;
use guildmirror_interface::{GuildApi, GuildEdit, NewCategory, NewChannel, NewEmoji, NewRole};
use tracing::{debug, info};

const BASE_ROLE: &str = "@everyone";

impl<A: GuildApi + ?Sized> Replicator<'_, A> {
    pub(crate) async fn edit_guild(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        let edit = GuildEdit {
            name: snapshot.name().clone(),
            icon: snapshot.icon().clone(),
        };
        self.apply(report, &edit.name, || self.api.edit_guild(destination, &edit))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_channels(
        &self,
        destination: GuildId,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        let existing = self
            .read(Stage::ChannelsDelete, || self.api.channels(destination))
            .await?;
        info!(count = existing.len(), "Deleting destination channels");

        for channel in &existing {
            self.apply(report, &channel.name, || self.api.delete_channel(channel.id))
                .await?;
        }
        Ok(())
    }

    pub(crate) async fn create_roles(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
        remap: &mut IdRemap,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        if let Some(base) = snapshot.default_role() {
            let role = NewRole::from(base);
            self.apply(report, BASE_ROLE, || {
                self.api.edit_default_role(destination, &role)
            })
            .await?;
        }

        // Lowest rank first, so each new role lands above the previous one.
        for spec in snapshot.roles() {
            let role = NewRole::from(spec);
            if let Some(created) = self
                .apply(report, &spec.name, || self.api.create_role(destination, &role))
                .await?
            {
                remap.record_role(spec.id, created);
            }
        }
        debug!(mapped = remap.role_count(), "Roles remapped");
        Ok(())
    }

    pub(crate) async fn create_categories(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
        remap: &mut IdRemap,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        for spec in snapshot.categories() {
            let category = NewCategory {
                name: spec.name.clone(),
                position: spec.position,
                overwrites: translate_overwrites(&spec.overwrites, remap, destination),
            };
            if let Some(created) = self
                .apply(report, &spec.name, || {
                    self.api.create_category(destination, &category)
                })
                .await?
            {
                remap.record_category(spec.id, created);
            }
        }
        Ok(())
    }

    pub(crate) async fn create_channels(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
        remap: &IdRemap,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        for spec in snapshot.channels() {
            let parent = spec.parent.and_then(|source| {
                let mapped = remap.category(source);
                if mapped.is_none() {
                    debug!(channel = %spec.name, %source, "Parent not remapped, creating at top level");
                }
                mapped
            });

            let channel = NewChannel {
                name: spec.name.clone(),
                kind: spec.kind,
                position: spec.position,
                parent,
                overwrites: translate_overwrites(&spec.overwrites, remap, destination),
                topic: spec.topic.clone(),
                nsfw: spec.nsfw,
                bitrate: spec.bitrate,
                user_limit: spec.user_limit,
                rate_limit_per_user: spec.rate_limit_per_user,
            };

            self.apply(report, &spec.name, || {
                self.api.create_channel(destination, &channel)
            })
            .await?;
        }
        Ok(())
    }

    pub(crate) async fn create_emojis(
        &self,
        snapshot: &GuildSnapshot,
        destination: GuildId,
        report: &mut StageReport,
    ) -> Result<(), ReplicationError> {
        for spec in snapshot.emojis() {
            let emoji = NewEmoji {
                name: spec.name.clone(),
                image: spec.image.clone(),
            };
            self.apply(report, &spec.name, || self.api.create_emoji(destination, &emoji))
                .await?;
        }
        Ok(())
    }
}
