//! Translation of source overwrites into destination overwrites.

use guildmirror_core::{GuildId, IdRemap, PermissionOverwriteSpec};
use guildmirror_interface::Overwrite;
use tracing::debug;

/// Rewrite `overwrites` so that every target is a destination role.
///
/// Targets that do not resolve through `remap` (roles that were never
/// created, and member overwrites) are dropped.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{GuildId, IdRemap, OverwriteTarget, PermissionOverwriteSpec, RoleId};
/// use guildmirror_replicator::translate_overwrites;
///
/// let mut remap = IdRemap::new();
/// remap.record_role(RoleId::new(5), RoleId::new(905));
///
/// let source = [
///     PermissionOverwriteSpec { target: OverwriteTarget::Role(RoleId::new(5)), allow: 1, deny: 0 },
///     PermissionOverwriteSpec { target: OverwriteTarget::Role(RoleId::new(6)), allow: 1, deny: 0 },
/// ];
/// let translated = translate_overwrites(&source, &remap, GuildId::new(900));
/// assert_eq!(translated.len(), 1);
/// assert_eq!(translated[0].role, RoleId::new(905));
/// ```
pub fn translate_overwrites(
    overwrites: &[PermissionOverwriteSpec],
    remap: &IdRemap,
    destination: GuildId,
) -> Vec<Overwrite> {
    overwrites
        .iter()
        .filter_map(|overwrite| {
            let Some(role) = remap.resolve_target(overwrite.target, destination) else {
                debug!(target = ?overwrite.target, "Omitting unmapped overwrite");
                return None;
            };
            Some(Overwrite {
                role,
                allow: overwrite.allow,
                deny: overwrite.deny,
            })
        })
        .collect()
}
