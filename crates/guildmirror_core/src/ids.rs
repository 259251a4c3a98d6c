//! Typed snowflake identifiers.
//!
//! The remote service identifies everything with 64-bit snowflakes. Wrapping
//! them per entity keeps a role id from being passed where a channel id is
//! expected.

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
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
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw snowflake.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw snowflake.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

snowflake!(
    /// Identifier of a guild (community server).
    GuildId
);
snowflake!(
    /// Identifier of a role.
    RoleId
);
snowflake!(
    /// Identifier of a channel. Categories are channels too.
    ChannelId
);
snowflake!(
    /// Identifier of a custom emoji.
    EmojiId
);
snowflake!(
    /// Identifier of a user.
    UserId
);

impl GuildId {
    /// The guild's implicit base role ("@everyone") shares the guild's id.
    ///
    /// # Examples
    ///
    /// ```
    /// use guildmirror_core::{GuildId, RoleId};
    ///
    /// assert_eq!(GuildId::new(42).everyone_role(), RoleId::new(42));
    /// ```
    pub const fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}
