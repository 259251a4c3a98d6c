//! Snapshot command handler.

use super::resolve_token;
use guildmirror::{DiscordSession, GuildId, SnapshotReader};
use std::path::Path;
use tracing::info;

/// Read `source` and write its snapshot as pretty JSON.
pub async fn write_snapshot(
    source: GuildId,
    token: Option<String>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = DiscordSession::connect(&resolve_token(token)?).await?;
    let api = session.api();
    let snapshot = SnapshotReader::new(&api).read(source).await;
    session.close().await;
    let snapshot = snapshot?;

    let json = serde_json::to_string_pretty(&snapshot)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), items = snapshot.item_count(), "Snapshot written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
