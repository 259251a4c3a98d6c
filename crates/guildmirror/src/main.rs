//! guildmirror CLI binary.
//!
//! This binary provides command-line access to guildmirror:
//! - Clone one guild's structure into another
//! - Dump a guild's structure as JSON

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, clone_guild, write_snapshot};

    // Load .env before reading DISCORD_TOKEN or GUILDMIRROR__*
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Clone(args) => {
            clone_guild(args).await?;
        }

        Commands::Snapshot {
            source,
            token,
            output,
        } => {
            write_snapshot(source, token, output.as_deref()).await?;
        }
    }

    Ok(())
}
