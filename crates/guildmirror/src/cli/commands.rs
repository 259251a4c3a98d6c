//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use guildmirror::{GuildId, Preferences};
use std::path::PathBuf;

/// guildmirror - Replicate the structure of one Discord guild into another
#[derive(Parser, Debug)]
#[command(name = "guildmirror")]
#[command(about = "Replicate the structure of one Discord guild into another", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy roles, categories, channels and emoji from one guild to another
    Clone(CloneArgs),

    /// Read a guild's structure and print it as JSON
    Snapshot {
        /// Guild to read
        #[arg(long)]
        source: GuildId,

        /// Bot token (falls back to DISCORD_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Arguments for `guildmirror clone`
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Guild to copy from
    #[arg(long)]
    pub source: GuildId,

    /// Guild to copy into
    #[arg(long)]
    pub destination: GuildId,

    /// Bot token (falls back to DISCORD_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Configuration file to use instead of the default locations
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Stage selection overrides
    #[command(flatten)]
    pub stages: StageFlags,
}

/// Command-line overrides for the configured stages.
#[derive(Args, Debug, Default)]
pub struct StageFlags {
    /// Keep the destination's name and icon
    #[arg(long)]
    pub no_guild_edit: bool,

    /// Keep the destination's existing channels
    #[arg(long)]
    pub no_channels_delete: bool,

    /// Do not clone roles
    #[arg(long)]
    pub no_roles: bool,

    /// Do not clone categories
    #[arg(long)]
    pub no_categories: bool,

    /// Do not clone channels
    #[arg(long)]
    pub no_channels: bool,

    /// Clone custom emoji
    #[arg(long, overrides_with = "no_emojis")]
    pub emojis: bool,

    /// Do not clone custom emoji
    #[arg(long, overrides_with = "emojis")]
    pub no_emojis: bool,
}

impl StageFlags {
    /// Apply the flags on top of `configured`.
    pub fn apply(&self, configured: Preferences) -> Preferences {
        let mut prefs = configured;
        prefs.guild_edit &= !self.no_guild_edit;
        prefs.channels_delete &= !self.no_channels_delete;
        prefs.roles_create &= !self.no_roles;
        prefs.categories_create &= !self.no_categories;
        prefs.channels_create &= !self.no_channels;
        if self.emojis {
            prefs.emojis_create = true;
        }
        if self.no_emojis {
            prefs.emojis_create = false;
        }
        prefs
    }
}
