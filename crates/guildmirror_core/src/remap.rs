//! Source-to-destination identifier translation for one run.

use crate::{ChannelId, GuildId, OverwriteTarget, RoleId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Translation table from source-side to destination-side identifiers.
///
/// Populated by the role and category stages as items are created and
/// consulted by the category and channel stages. Append-only: the first
/// mapping recorded for a source id wins. A lookup with no mapping returns
/// `None`, which callers treat as "omit the reference".
///
/// # Examples
///
/// ```
/// use guildmirror_core::{IdRemap, RoleId};
///
/// let mut remap = IdRemap::new();
/// assert!(remap.record_role(RoleId::new(1), RoleId::new(901)));
/// assert_eq!(remap.role(RoleId::new(1)), Some(RoleId::new(901)));
/// assert_eq!(remap.role(RoleId::new(2)), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdRemap {
    roles: HashMap<RoleId, RoleId>,
    categories: HashMap<ChannelId, ChannelId>,
}

impl IdRemap {
    /// Create an empty remap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created role. Returns `false` if `source` was already mapped.
    pub fn record_role(&mut self, source: RoleId, destination: RoleId) -> bool {
        if let Some(existing) = self.roles.get(&source) {
            warn!(%source, %existing, rejected = %destination, "Role already remapped");
            return false;
        }
        debug!(%source, %destination, "Recorded role mapping");
        self.roles.insert(source, destination);
        true
    }

    /// Record a created category. Returns `false` if `source` was already mapped.
    pub fn record_category(&mut self, source: ChannelId, destination: ChannelId) -> bool {
        if let Some(existing) = self.categories.get(&source) {
            warn!(%source, %existing, rejected = %destination, "Category already remapped");
            return false;
        }
        debug!(%source, %destination, "Recorded category mapping");
        self.categories.insert(source, destination);
        true
    }

    /// Destination role created for `source`.
    pub fn role(&self, source: RoleId) -> Option<RoleId> {
        self.roles.get(&source).copied()
    }

    /// Destination category created for `source`.
    pub fn category(&self, source: ChannelId) -> Option<ChannelId> {
        self.categories.get(&source).copied()
    }

    /// Destination role an overwrite should reference, if it can be resolved.
    ///
    /// `Everyone` resolves to the destination's own base role. Member
    /// overwrites never resolve: members are not replicated.
    pub fn resolve_target(&self, target: OverwriteTarget, destination: GuildId) -> Option<RoleId> {
        match target {
            OverwriteTarget::Everyone => Some(destination.everyone_role()),
            OverwriteTarget::Role(source) => self.role(source),
            OverwriteTarget::Member(_) => None,
        }
    }

    /// Number of role mappings.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Number of category mappings.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
