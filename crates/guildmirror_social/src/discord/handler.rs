//! Serenity event handler that reports session readiness.

use parking_lot::Mutex;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::{GatewayIntents, Ready};
use tokio::sync::oneshot;
use tracing::info;

/// Forwards the first `ready` event to whoever is waiting on the session.
///
/// Later `ready` events (after a reconnect) are ignored.
pub struct ReadyHandler {
    ready: Mutex<Option<oneshot::Sender<String>>>,
}

impl ReadyHandler {
    /// Create a handler that sends the bot's user name on `tx` when ready.
    pub fn new(tx: oneshot::Sender<String>) -> Self {
        Self {
            ready: Mutex::new(Some(tx)),
        }
    }

    /// Gateway intents needed to read guild structure.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
    }
}

#[async_trait]
impl EventHandler for ReadyHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Logged in"
        );
        if let Some(tx) = self.ready.lock().take() {
            // Receiver gone means connect() was abandoned.
            let _ = tx.send(ready.user.name.clone());
        }
    }
}
