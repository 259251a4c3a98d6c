//! One replication attempt, from connection to completion.

use guildmirror_core::{GuildId, Lifecycle, Preferences, SessionState};
use guildmirror_error::{GuildMirrorError, GuildMirrorResult};
use guildmirror_interface::GuildApi;
use guildmirror_rate_limit::RetryController;
use guildmirror_replicator::{ReplicationReport, Replicator, SnapshotReader};
use tracing::{info, instrument};

/// Drive a ready session through one run.
///
/// Reads the source snapshot and confirms the destination exists while the
/// lifecycle is `Ready`, then moves to `Replicating` and runs the pipeline.
/// The lifecycle ends in `Completed` or `Failed`.
///
/// # Errors
///
/// Returns the first read failure or fatal pipeline failure.
#[instrument(skip(api, lifecycle, preferences, controller))]
pub async fn replicate<A: GuildApi + ?Sized>(
    api: &A,
    lifecycle: &mut Lifecycle,
    source: GuildId,
    destination: GuildId,
    preferences: Preferences,
    controller: RetryController,
) -> GuildMirrorResult<ReplicationReport> {
    let outcome = async {
        let snapshot = SnapshotReader::new(api).read(source).await?;
        let target = api.guild(destination).await?;
        info!(
            source = %snapshot.name(),
            destination = %target.name,
            "Guilds resolved"
        );

        lifecycle.advance(SessionState::Replicating)?;
        let report = Replicator::new(api, preferences)
            .with_controller(controller)
            .run(&snapshot, destination)
            .await?;
        lifecycle.advance(SessionState::Completed)?;
        Ok::<_, GuildMirrorError>(report)
    }
    .await;

    if outcome.is_err() {
        lifecycle.fail();
    }
    outcome
}

/// Connect with `credentials`, replicate, and close the session.
///
/// # Errors
///
/// Returns `AuthenticationFailure` if the token is rejected, otherwise the
/// error [`replicate`] ended with.
#[cfg(feature = "discord")]
#[instrument(skip_all, fields(source = %credentials.source(), destination = %credentials.destination()))]
pub async fn run_once(
    credentials: crate::Credentials,
    preferences: Preferences,
    retry: &guildmirror_rate_limit::RetryConfig,
) -> GuildMirrorResult<ReplicationReport> {
    use guildmirror_social::DiscordSession;

    let mut lifecycle = Lifecycle::new();
    let session = match DiscordSession::connect(credentials.token()).await {
        Ok(session) => session,
        Err(err) => {
            lifecycle.fail();
            return Err(err.into());
        }
    };
    lifecycle.advance(SessionState::Ready)?;
    info!(user = %session.user_name(), "Logged in");

    let api = session.api();
    let outcome = replicate(
        &api,
        &mut lifecycle,
        credentials.source(),
        credentials.destination(),
        preferences,
        RetryController::new(retry),
    )
    .await;

    session.close().await;
    outcome
}
