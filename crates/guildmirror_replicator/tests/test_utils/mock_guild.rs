//! In-memory guild for testing.

use async_trait::async_trait;
use guildmirror_core::{
    ChannelId, ChannelKind, ChannelSpec, EmojiId, EmojiSpec, GuildId, ImageRef, OverwriteTarget,
    PermissionOverwriteSpec, RoleId, RoleSpec,
};
use guildmirror_error::{RemoteError, RemoteErrorKind, RemoteResult};
use guildmirror_interface::{
    GuildEdit, GuildOverview, GuildReader, GuildWriter, NewCategory, NewChannel, NewEmoji, NewRole,
    Overwrite,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Operations the mock understands, for counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Guild,
    Roles,
    Channels,
    Emojis,
    EditGuild,
    DeleteChannel,
    EditDefaultRole,
    CreateRole,
    CreateCategory,
    CreateChannel,
    CreateEmoji,
}

/// A failure returned whenever `op` is called on an item named `item`
/// (or on any item, if `item` is `None`).
#[derive(Debug, Clone)]
struct FailureRule {
    op: MockOp,
    item: Option<String>,
    kind: RemoteErrorKind,
}

#[derive(Debug)]
struct GuildState {
    id: GuildId,
    name: String,
    icon: Option<ImageRef>,
    roles: Vec<RoleSpec>,
    channels: Vec<ChannelSpec>,
    emojis: Vec<EmojiSpec>,
    next_id: u64,
    calls: Vec<MockOp>,
    requested_positions: Vec<(String, u16)>,
    failures: Vec<FailureRule>,
    throttles: HashMap<MockOp, (usize, Option<Duration>)>,
}

impl GuildState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Log the call and return the injected outcome, if any.
    fn intercept(&mut self, op: MockOp, item: &str) -> RemoteResult<()> {
        self.calls.push(op);

        if let Some((remaining, retry_after)) = self.throttles.get_mut(&op) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(RemoteError::rate_limited(*retry_after));
            }
        }

        let rule = self
            .failures
            .iter()
            .find(|rule| rule.op == op && rule.item.as_deref().is_none_or(|name| name == item));
        match rule {
            Some(rule) => Err(RemoteError::new(rule.kind.clone())),
            None => Ok(()),
        }
    }

    fn top_role_position(&self) -> u16 {
        self.roles.iter().map(|r| r.position).max().unwrap_or(0)
    }
}

/// In-memory guild implementing both capability traits.
///
/// Clones share state, so a test can hand one clone to the engine and
/// inspect another afterwards. Identifiers are allocated from
/// `guild_id * 1000` upward, which keeps ids of two mocks disjoint.
///
/// New roles are placed above every existing role; the requested position
/// is only recorded. Emoji names must be unique; a duplicate upload fails
/// with `InvalidPayload`.
#[derive(Debug, Clone)]
pub struct MockGuild {
    state: Arc<Mutex<GuildState>>,
}

impl MockGuild {
    /// An empty guild holding only its base role.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let guild = GuildId::new(id);
        let base = RoleSpec {
            id: guild.everyone_role(),
            name: "@everyone".to_string(),
            color: 0,
            permissions: 0x6_4400,
            hoist: false,
            mentionable: false,
            position: 0,
        };
        Self {
            state: Arc::new(Mutex::new(GuildState {
                id: guild,
                name: name.into(),
                icon: None,
                roles: vec![base],
                channels: Vec::new(),
                emojis: Vec::new(),
                next_id: id * 1000,
                calls: Vec::new(),
                requested_positions: Vec::new(),
                failures: Vec::new(),
                throttles: HashMap::new(),
            })),
        }
    }

    pub fn id(&self) -> GuildId {
        self.state.lock().id
    }

    // ----- seeding -----

    pub fn set_icon(&self, url: &str) {
        self.state.lock().icon = Some(ImageRef::new(url));
    }

    pub fn set_base_permissions(&self, permissions: u64) {
        let mut state = self.state.lock();
        let everyone = state.id.everyone_role();
        if let Some(base) = state.roles.iter_mut().find(|r| r.id == everyone) {
            base.permissions = permissions;
        }
    }

    pub fn add_role(&self, name: &str, position: u16, permissions: u64) -> RoleId {
        let mut state = self.state.lock();
        let id = RoleId::new(state.allocate());
        state.roles.push(RoleSpec {
            id,
            name: name.to_string(),
            color: 0x99aab5,
            permissions,
            hoist: false,
            mentionable: false,
            position,
        });
        id
    }

    pub fn add_category(
        &self,
        name: &str,
        position: u16,
        overwrites: Vec<PermissionOverwriteSpec>,
    ) -> ChannelId {
        let mut state = self.state.lock();
        let id = ChannelId::new(state.allocate());
        let mut spec = ChannelSpec::new(id, name, ChannelKind::Category, position);
        spec.overwrites = overwrites;
        state.channels.push(spec);
        id
    }

    pub fn add_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        position: u16,
        parent: Option<ChannelId>,
        overwrites: Vec<PermissionOverwriteSpec>,
    ) -> ChannelId {
        let mut state = self.state.lock();
        let id = ChannelId::new(state.allocate());
        let mut spec = ChannelSpec::new(id, name, kind, position);
        spec.parent = parent;
        spec.overwrites = overwrites;
        state.channels.push(spec);
        id
    }

    pub fn add_emoji(&self, name: &str) -> EmojiId {
        let mut state = self.state.lock();
        let id = EmojiId::new(state.allocate());
        state.emojis.push(EmojiSpec {
            id,
            name: name.to_string(),
            image: ImageRef::new(format!("https://cdn.example/emojis/{id}.png")),
            animated: false,
        });
        id
    }

    // ----- behavior -----

    /// Fail every `op` call (on `item`, or on any item) with `kind`.
    pub fn fail_on(&self, op: MockOp, item: Option<&str>, kind: RemoteErrorKind) {
        self.state.lock().failures.push(FailureRule {
            op,
            item: item.map(str::to_string),
            kind,
        });
    }

    /// Throttle the next `times` calls of `op`.
    pub fn throttle(&self, op: MockOp, times: usize, retry_after: Option<Duration>) {
        self.state.lock().throttles.insert(op, (times, retry_after));
    }

    // ----- inspection -----

    pub fn call_count(&self, op: MockOp) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == op).count()
    }

    /// Every mutating call, in order.
    pub fn mutations(&self) -> Vec<MockOp> {
        self.state
            .lock()
            .calls
            .iter()
            .copied()
            .filter(|op| {
                !matches!(
                    op,
                    MockOp::Guild | MockOp::Roles | MockOp::Channels | MockOp::Emojis
                )
            })
            .collect()
    }

    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    pub fn icon(&self) -> Option<ImageRef> {
        self.state.lock().icon.clone()
    }

    pub fn base_role(&self) -> RoleSpec {
        let state = self.state.lock();
        let everyone = state.id.everyone_role();
        state
            .roles
            .iter()
            .find(|r| r.id == everyone)
            .cloned()
            .expect("mock guild always holds its base role")
    }

    /// Roles other than the base role, lowest rank first.
    pub fn created_roles(&self) -> Vec<RoleSpec> {
        let state = self.state.lock();
        let everyone = state.id.everyone_role();
        let mut roles: Vec<_> = state
            .roles
            .iter()
            .filter(|r| r.id != everyone)
            .cloned()
            .collect();
        roles.sort_by_key(|r| r.position);
        roles
    }

    /// `(name, position)` of every role creation request, in call order.
    pub fn requested_role_positions(&self) -> Vec<(String, u16)> {
        self.state.lock().requested_positions.clone()
    }

    pub fn role_id(&self, name: &str) -> Option<RoleId> {
        self.state
            .lock()
            .roles
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.id)
    }

    pub fn categories(&self) -> Vec<ChannelSpec> {
        self.state
            .lock()
            .channels
            .iter()
            .filter(|c| c.kind == ChannelKind::Category)
            .cloned()
            .collect()
    }

    pub fn text_and_voice(&self) -> Vec<ChannelSpec> {
        self.state
            .lock()
            .channels
            .iter()
            .filter(|c| c.kind != ChannelKind::Category)
            .cloned()
            .collect()
    }

    pub fn channel(&self, name: &str) -> Option<ChannelSpec> {
        self.state
            .lock()
            .channels
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    pub fn emoji_names(&self) -> Vec<String> {
        self.state
            .lock()
            .emojis
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    fn stored_overwrites(overwrites: &[Overwrite]) -> Vec<PermissionOverwriteSpec> {
        overwrites
            .iter()
            .map(|o| PermissionOverwriteSpec {
                target: OverwriteTarget::Role(o.role),
                allow: o.allow,
                deny: o.deny,
            })
            .collect()
    }

    fn check_guild(state: &GuildState, guild: GuildId) -> RemoteResult<()> {
        if state.id == guild {
            Ok(())
        } else {
            Err(RemoteError::new(RemoteErrorKind::NotFound(format!(
                "Unknown Guild {guild}"
            ))))
        }
    }
}

#[async_trait]
impl GuildReader for MockGuild {
    async fn guild(&self, guild: GuildId) -> RemoteResult<GuildOverview> {
        let mut state = self.state.lock();
        state.intercept(MockOp::Guild, "")?;
        Self::check_guild(&state, guild)?;
        Ok(GuildOverview {
            id: state.id,
            name: state.name.clone(),
            icon: state.icon.clone(),
        })
    }

    async fn roles(&self, guild: GuildId) -> RemoteResult<Vec<RoleSpec>> {
        let mut state = self.state.lock();
        state.intercept(MockOp::Roles, "")?;
        Self::check_guild(&state, guild)?;
        // Reverse insertion order so callers cannot rely on it.
        Ok(state.roles.iter().rev().cloned().collect())
    }

    async fn channels(&self, guild: GuildId) -> RemoteResult<Vec<ChannelSpec>> {
        let mut state = self.state.lock();
        state.intercept(MockOp::Channels, "")?;
        Self::check_guild(&state, guild)?;
        Ok(state.channels.iter().rev().cloned().collect())
    }

    async fn emojis(&self, guild: GuildId) -> RemoteResult<Vec<EmojiSpec>> {
        let mut state = self.state.lock();
        state.intercept(MockOp::Emojis, "")?;
        Self::check_guild(&state, guild)?;
        Ok(state.emojis.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl GuildWriter for MockGuild {
    async fn edit_guild(&self, guild: GuildId, edit: &GuildEdit) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.intercept(MockOp::EditGuild, &edit.name)?;
        Self::check_guild(&state, guild)?;
        state.name = edit.name.clone();
        if let Some(icon) = &edit.icon {
            state.icon = Some(icon.clone());
        }
        Ok(())
    }

    async fn delete_channel(&self, channel: ChannelId) -> RemoteResult<()> {
        let mut state = self.state.lock();
        let name = state
            .channels
            .iter()
            .find(|c| c.id == channel)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        state.intercept(MockOp::DeleteChannel, &name)?;

        let before = state.channels.len();
        state.channels.retain(|c| c.id != channel);
        if state.channels.len() == before {
            return Err(RemoteError::new(RemoteErrorKind::NotFound(format!(
                "Unknown Channel {channel}"
            ))));
        }
        // Children of a deleted category fall back to the top level.
        for child in state.channels.iter_mut() {
            if child.parent == Some(channel) {
                child.parent = None;
            }
        }
        Ok(())
    }

    async fn edit_default_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<()> {
        let mut state = self.state.lock();
        state.intercept(MockOp::EditDefaultRole, &role.name)?;
        Self::check_guild(&state, guild)?;
        let everyone = state.id.everyone_role();
        if let Some(base) = state.roles.iter_mut().find(|r| r.id == everyone) {
            base.color = role.color;
            base.permissions = role.permissions;
            base.hoist = role.hoist;
            base.mentionable = role.mentionable;
        }
        Ok(())
    }

    async fn create_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<RoleId> {
        let mut state = self.state.lock();
        state.intercept(MockOp::CreateRole, &role.name)?;
        Self::check_guild(&state, guild)?;
        state
            .requested_positions
            .push((role.name.clone(), role.position));
        let id = RoleId::new(state.allocate());
        let position = state.top_role_position() + 1;
        state.roles.push(RoleSpec {
            id,
            name: role.name.clone(),
            color: role.color,
            permissions: role.permissions,
            hoist: role.hoist,
            mentionable: role.mentionable,
            position,
        });
        Ok(id)
    }

    async fn create_category(
        &self,
        guild: GuildId,
        category: &NewCategory,
    ) -> RemoteResult<ChannelId> {
        let mut state = self.state.lock();
        state.intercept(MockOp::CreateCategory, &category.name)?;
        Self::check_guild(&state, guild)?;
        let id = ChannelId::new(state.allocate());
        let mut spec = ChannelSpec::new(id, &category.name, ChannelKind::Category, category.position);
        spec.overwrites = Self::stored_overwrites(&category.overwrites);
        state.channels.push(spec);
        Ok(id)
    }

    async fn create_channel(&self, guild: GuildId, channel: &NewChannel) -> RemoteResult<ChannelId> {
        let mut state = self.state.lock();
        state.intercept(MockOp::CreateChannel, &channel.name)?;
        Self::check_guild(&state, guild)?;
        if let Some(parent) = channel.parent {
            let known = state
                .channels
                .iter()
                .any(|c| c.id == parent && c.kind == ChannelKind::Category);
            if !known {
                return Err(RemoteError::new(RemoteErrorKind::InvalidPayload(format!(
                    "parent_id {parent} is not a category of this guild"
                ))));
            }
        }
        let id = ChannelId::new(state.allocate());
        let mut spec = ChannelSpec::new(id, &channel.name, channel.kind, channel.position);
        spec.parent = channel.parent;
        spec.overwrites = Self::stored_overwrites(&channel.overwrites);
        spec.topic = channel.topic.clone();
        spec.nsfw = channel.nsfw;
        spec.bitrate = channel.bitrate;
        spec.user_limit = channel.user_limit;
        spec.rate_limit_per_user = channel.rate_limit_per_user;
        state.channels.push(spec);
        Ok(id)
    }

    async fn create_emoji(&self, guild: GuildId, emoji: &NewEmoji) -> RemoteResult<EmojiId> {
        let mut state = self.state.lock();
        state.intercept(MockOp::CreateEmoji, &emoji.name)?;
        Self::check_guild(&state, guild)?;
        if state.emojis.iter().any(|e| e.name == emoji.name) {
            return Err(RemoteError::new(RemoteErrorKind::InvalidPayload(format!(
                "emoji name '{}' already in use",
                emoji.name
            ))));
        }
        let id = EmojiId::new(state.allocate());
        state.emojis.push(EmojiSpec {
            id,
            name: emoji.name.clone(),
            image: emoji.image.clone(),
            animated: false,
        });
        Ok(id)
    }
}
