//! Tests for a single run driven through the lifecycle.

#[path = "../../guildmirror_replicator/tests/test_utils/mod.rs"]
mod test_utils;

use async_trait::async_trait;
use guildmirror::{
    ChannelId, ChannelSpec, Credentials, EmojiId, EmojiSpec, GuildEdit, GuildId,
    GuildMirrorErrorKind, GuildOverview, GuildReader, GuildWriter, Lifecycle, MirrorConfig,
    NewCategory, NewChannel, NewEmoji, NewRole, Preferences, RemoteError, RemoteErrorKind,
    RemoteResult, RetryController, RoleId, RoleSpec, SessionState, StaticCredentials, Supervisor,
    replicate,
};
use test_utils::{DESTINATION_GUILD, MockGuild, MockOp, empty_destination, scenario_source};

/// One session that can see both guilds, as a bot invited to both would.
struct BothGuilds {
    source: MockGuild,
    destination: MockGuild,
}

impl BothGuilds {
    fn new(source: MockGuild, destination: MockGuild) -> Self {
        Self {
            source,
            destination,
        }
    }

    fn visible(&self, guild: GuildId) -> RemoteResult<&MockGuild> {
        [&self.source, &self.destination]
            .into_iter()
            .find(|mock| mock.id() == guild)
            .ok_or_else(|| {
                RemoteError::new(RemoteErrorKind::NotFound(format!("Unknown Guild {guild}")))
            })
    }
}

#[async_trait]
impl GuildReader for BothGuilds {
    async fn guild(&self, guild: GuildId) -> RemoteResult<GuildOverview> {
        self.visible(guild)?.guild(guild).await
    }

    async fn roles(&self, guild: GuildId) -> RemoteResult<Vec<RoleSpec>> {
        self.visible(guild)?.roles(guild).await
    }

    async fn channels(&self, guild: GuildId) -> RemoteResult<Vec<ChannelSpec>> {
        self.visible(guild)?.channels(guild).await
    }

    async fn emojis(&self, guild: GuildId) -> RemoteResult<Vec<EmojiSpec>> {
        self.visible(guild)?.emojis(guild).await
    }
}

#[async_trait]
impl GuildWriter for BothGuilds {
    async fn edit_guild(&self, guild: GuildId, edit: &GuildEdit) -> RemoteResult<()> {
        self.destination.edit_guild(guild, edit).await
    }

    async fn delete_channel(&self, channel: ChannelId) -> RemoteResult<()> {
        self.destination.delete_channel(channel).await
    }

    async fn edit_default_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<()> {
        self.destination.edit_default_role(guild, role).await
    }

    async fn create_role(&self, guild: GuildId, role: &NewRole) -> RemoteResult<RoleId> {
        self.destination.create_role(guild, role).await
    }

    async fn create_category(
        &self,
        guild: GuildId,
        category: &NewCategory,
    ) -> RemoteResult<ChannelId> {
        self.destination.create_category(guild, category).await
    }

    async fn create_channel(
        &self,
        guild: GuildId,
        channel: &NewChannel,
    ) -> RemoteResult<ChannelId> {
        self.destination.create_channel(guild, channel).await
    }

    async fn create_emoji(&self, guild: GuildId, emoji: &NewEmoji) -> RemoteResult<EmojiId> {
        self.destination.create_emoji(guild, emoji).await
    }
}

fn ready() -> Lifecycle {
    let mut lifecycle = Lifecycle::new();
    lifecycle
        .advance(SessionState::Ready)
        .expect("Connecting -> Ready");
    lifecycle
}

#[tokio::test]
async fn test_run_ends_completed() -> anyhow::Result<()> {
    let guilds = BothGuilds::new(scenario_source(), empty_destination());
    let mut lifecycle = ready();

    let report = replicate(
        &guilds,
        &mut lifecycle,
        guilds.source.id(),
        guilds.destination.id(),
        Preferences::default(),
        RetryController::default(),
    )
    .await?;

    assert_eq!(lifecycle.state(), SessionState::Completed);
    assert!(report.is_clean());
    assert_eq!(guilds.destination.name(), "Source Server");
    assert_eq!(guilds.destination.created_roles().len(), 3);
    assert_eq!(guilds.destination.text_and_voice().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unknown_destination_fails_before_mutating() {
    let guilds = BothGuilds::new(scenario_source(), empty_destination());
    let mut lifecycle = ready();

    let err = replicate(
        &guilds,
        &mut lifecycle,
        guilds.source.id(),
        GuildId::new(DESTINATION_GUILD + 1),
        Preferences::all(),
        RetryController::default(),
    )
    .await
    .unwrap_err();

    match err.kind() {
        GuildMirrorErrorKind::Remote(remote) => {
            assert!(matches!(remote.kind(), RemoteErrorKind::NotFound(_)))
        }
        other => panic!("Expected remote error, got {other:?}"),
    }
    assert_eq!(lifecycle.state(), SessionState::Failed);
    assert!(guilds.destination.mutations().is_empty());
}

#[tokio::test]
async fn test_fatal_pipeline_failure_ends_failed() {
    let guilds = BothGuilds::new(scenario_source(), empty_destination());
    guilds.destination.fail_on(
        MockOp::CreateRole,
        Some("Mod"),
        RemoteErrorKind::PermissionDenied("Missing Permissions".to_string()),
    );
    let mut lifecycle = ready();

    let err = replicate(
        &guilds,
        &mut lifecycle,
        guilds.source.id(),
        guilds.destination.id(),
        Preferences::default(),
        RetryController::default(),
    )
    .await
    .unwrap_err();

    match err.kind() {
        GuildMirrorErrorKind::Replication(failure) => {
            assert_eq!(failure.stage(), "roles_create");
            assert_eq!(failure.item(), Some("Mod"));
        }
        other => panic!("Expected replication error, got {other:?}"),
    }
    assert_eq!(lifecycle.state(), SessionState::Failed);
}

#[tokio::test]
async fn test_replication_needs_a_ready_session() {
    let guilds = BothGuilds::new(scenario_source(), empty_destination());
    let mut lifecycle = Lifecycle::new();

    let err = replicate(
        &guilds,
        &mut lifecycle,
        guilds.source.id(),
        guilds.destination.id(),
        Preferences::default(),
        RetryController::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.kind(), GuildMirrorErrorKind::Lifecycle(_)));
    assert_eq!(lifecycle.state(), SessionState::Failed);
    assert!(guilds.destination.mutations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_pipeline_is_not_rerun_by_default() {
    let guilds = BothGuilds::new(scenario_source(), empty_destination());
    guilds.destination.fail_on(
        MockOp::CreateCategory,
        None,
        RemoteErrorKind::Unexpected("HTTP 500: Internal Server Error".to_string()),
    );
    let credentials = Credentials::new("token", guilds.source.id(), guilds.destination.id());
    let config = MirrorConfig::default();
    let (preferences, retry) = (config.preferences, &config.retry);

    let result = Supervisor::new(&config.supervisor)
        .run(&mut StaticCredentials::new(credentials), |creds| {
            let guilds = &guilds;
            async move {
                let mut lifecycle = ready();
                replicate(
                    guilds,
                    &mut lifecycle,
                    creds.source(),
                    creds.destination(),
                    preferences,
                    RetryController::new(retry),
                )
                .await
            }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(guilds.destination.call_count(MockOp::CreateCategory), 1);
    assert_eq!(guilds.destination.created_roles().len(), 3);
}
