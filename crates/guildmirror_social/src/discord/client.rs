//! Gateway session setup and teardown.

use super::{DiscordGuildApi, ReadyHandler};
use guildmirror_error::{RemoteError, RemoteErrorKind, RemoteResult};
use serenity::Client;
use serenity::gateway::ShardManager;
use serenity::http::Http;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// An authenticated session that has reported ready.
///
/// Holding a `DiscordSession` means the gateway handshake completed. Remote
/// calls go through [`DiscordSession::api`]; [`DiscordSession::close`] stops
/// the gateway task.
///
/// # Example
/// ```no_run
/// use guildmirror_social::DiscordSession;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let session = DiscordSession::connect(&token).await?;
///     println!("Logged in as {}", session.user_name());
///     session.close().await;
///     Ok(())
/// }
/// ```
pub struct DiscordSession {
    http: Arc<Http>,
    shard_manager: Arc<ShardManager>,
    gateway: JoinHandle<Result<(), serenity::Error>>,
    user_name: String,
}

impl DiscordSession {
    /// Authenticate and wait for the ready event.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailure` if the token is rejected, or
    /// `Connection` if the gateway closes before the session is ready.
    #[instrument(skip(token), fields(token_len = token.len()))]
    pub async fn connect(token: &str) -> RemoteResult<Self> {
        info!("Connecting to Discord gateway");

        let (tx, rx) = oneshot::channel();
        let mut client = Client::builder(token, ReadyHandler::intents())
            .event_handler(ReadyHandler::new(tx))
            .await?;

        let http = client.http.clone();
        let shard_manager = client.shard_manager.clone();
        let mut gateway = tokio::spawn(async move { client.start().await });

        tokio::select! {
            ready = rx => match ready {
                Ok(user_name) => {
                    info!(user = %user_name, "Session ready");
                    Ok(Self { http, shard_manager, gateway, user_name })
                }
                // Sender dropped with the client; the gateway task holds the cause.
                Err(_) => Err(gateway_outcome(gateway.await)),
            },
            outcome = &mut gateway => Err(gateway_outcome(outcome)),
        }
    }

    /// Name of the authenticated bot user.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Shared HTTP client.
    pub fn http(&self) -> Arc<Http> {
        self.http.clone()
    }

    /// Guild API bound to this session.
    pub fn api(&self) -> DiscordGuildApi {
        DiscordGuildApi::with_http_client(self.http.clone())
    }

    /// Shut the gateway down and wait for the task to exit.
    #[instrument(skip(self), fields(user = %self.user_name))]
    pub async fn close(self) {
        debug!("Shutting down shards");
        self.shard_manager.shutdown_all().await;
        match self.gateway.await {
            Ok(Ok(())) => info!("Session closed"),
            Ok(Err(e)) => warn!(error = %e, "Gateway exited with error during shutdown"),
            Err(e) => warn!(error = %e, "Gateway task did not exit cleanly"),
        }
    }
}

/// Turn the result of a gateway task that ended before ready into an error.
fn gateway_outcome(
    outcome: Result<Result<(), serenity::Error>, tokio::task::JoinError>,
) -> RemoteError {
    match outcome {
        Ok(Err(e)) => e.into(),
        Ok(Ok(())) => RemoteError::new(RemoteErrorKind::Connection(
            "gateway closed before the session was ready".to_string(),
        )),
        Err(e) => RemoteError::new(RemoteErrorKind::Unexpected(format!(
            "gateway task failed: {e}"
        ))),
    }
}
