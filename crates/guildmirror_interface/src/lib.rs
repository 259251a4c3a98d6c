//! Capability traits for the remote guild management API.
//!
//! The replication engine only talks to the remote service through
//! [`GuildReader`] and [`GuildWriter`]. The serenity adapter implements both
//! against Discord; tests implement them with an in-memory guild.

mod traits;
mod types;

pub use traits::{GuildApi, GuildReader, GuildWriter};
pub use types::{
    GuildEdit, GuildOverview, NewCategory, NewChannel, NewEmoji, NewRole, Overwrite,
};
