//! Stage selection.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// One stage of the replication pipeline.
///
/// Variants are declared in execution order; [`Stage::ALL`] is the order the
/// orchestrator always follows, whichever subset is enabled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Set destination name and icon
    GuildEdit,
    /// Delete every destination channel
    ChannelsDelete,
    /// Create roles and edit the base role
    RolesCreate,
    /// Create categories
    CategoriesCreate,
    /// Create channels
    ChannelsCreate,
    /// Upload custom emoji
    EmojisCreate,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::GuildEdit,
        Stage::ChannelsDelete,
        Stage::RolesCreate,
        Stage::CategoriesCreate,
        Stage::ChannelsCreate,
        Stage::EmojisCreate,
    ];

    /// Human-readable description used in listings.
    pub fn description(self) -> &'static str {
        match self {
            Stage::GuildEdit => "Change server name and icon",
            Stage::ChannelsDelete => "Delete destination server channels",
            Stage::RolesCreate => "Clone roles",
            Stage::CategoriesCreate => "Clone categories",
            Stage::ChannelsCreate => "Clone channels",
            Stage::EmojisCreate => "Clone emojis",
        }
    }

    /// Whether a denied item can be skipped without invalidating later stages.
    ///
    /// Later stages never read what the guild edit or emoji stages produce.
    pub fn tolerates_permission_denied(self) -> bool {
        matches!(self, Stage::GuildEdit | Stage::EmojisCreate)
    }
}

/// Which stages run. Supplied fully resolved before a run starts.
///
/// # Examples
///
/// ```
/// use guildmirror_core::{Preferences, Stage};
///
/// let prefs = Preferences::default();
/// assert!(prefs.is_enabled(Stage::RolesCreate));
/// assert!(!prefs.is_enabled(Stage::EmojisCreate));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    /// Change server name and icon
    pub guild_edit: bool,
    /// Delete destination server channels
    pub channels_delete: bool,
    /// Clone roles
    pub roles_create: bool,
    /// Clone categories
    pub categories_create: bool,
    /// Clone channels
    pub channels_create: bool,
    /// Clone emojis
    pub emojis_create: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            guild_edit: true,
            channels_delete: true,
            roles_create: true,
            categories_create: true,
            channels_create: true,
            emojis_create: false,
        }
    }
}

impl Preferences {
    /// Every stage enabled.
    pub fn all() -> Self {
        Self {
            emojis_create: true,
            ..Self::default()
        }
    }

    /// Every stage disabled.
    pub fn none() -> Self {
        Self {
            guild_edit: false,
            channels_delete: false,
            roles_create: false,
            categories_create: false,
            channels_create: false,
            emojis_create: false,
        }
    }

    /// Whether `stage` runs.
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::GuildEdit => self.guild_edit,
            Stage::ChannelsDelete => self.channels_delete,
            Stage::RolesCreate => self.roles_create,
            Stage::CategoriesCreate => self.categories_create,
            Stage::ChannelsCreate => self.channels_create,
            Stage::EmojisCreate => self.emojis_create,
        }
    }

    /// Enable or disable `stage`.
    pub fn set(&mut self, stage: Stage, enabled: bool) {
        let flag = match stage {
            Stage::GuildEdit => &mut self.guild_edit,
            Stage::ChannelsDelete => &mut self.channels_delete,
            Stage::RolesCreate => &mut self.roles_create,
            Stage::CategoriesCreate => &mut self.categories_create,
            Stage::ChannelsCreate => &mut self.channels_create,
            Stage::EmojisCreate => &mut self.emojis_create,
        };
        *flag = enabled;
    }

    /// Builder-style variant of [`Preferences::set`].
    pub fn with(mut self, stage: Stage, enabled: bool) -> Self {
        self.set(stage, enabled);
        self
    }

    /// Enabled stages in execution order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }
}
