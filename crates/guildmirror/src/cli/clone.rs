//! Clone command handler.

use super::commands::CloneArgs;
use super::resolve_token;
use guildmirror::{
    Credentials, MirrorConfig, Preferences, Stage, StaticCredentials, Supervisor, run_once,
};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Run a supervised replication from `args.source` into `args.destination`.
pub async fn clone_guild(args: CloneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => MirrorConfig::from_file(path)?,
        None => MirrorConfig::load()?,
    };
    let preferences = args.stages.apply(config.preferences);
    let credentials = Credentials::new(resolve_token(args.token)?, args.source, args.destination);

    if preferences.channels_delete && !args.yes && !confirm(&credentials, &preferences)? {
        println!("Aborted.");
        return Ok(());
    }

    info!(stages = ?preferences.enabled_stages(), "Preferences resolved");
    let report = Supervisor::new(&config.supervisor)
        .run(&mut StaticCredentials::new(credentials), |creds| {
            run_once(creds, preferences, &config.retry)
        })
        .await?;

    if !report.is_clean() {
        println!("Some items were skipped:");
        for (stage, failure) in report.failures() {
            println!("  {} {}: {}", stage, failure.item(), failure.error());
        }
    }
    println!(
        "Cloning completed in {:.2} seconds.",
        report.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Show the resolved run and ask before anything is deleted.
fn confirm(credentials: &Credentials, preferences: &Preferences) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", summary(credentials, preferences))?;
    write!(
        stdout,
        "Every channel in the destination server will be deleted. Continue? [y/N] "
    )?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn summary(credentials: &Credentials, preferences: &Preferences) -> String {
    let mut lines = vec![
        format!("Token:              {}", credentials.masked_token()),
        format!("Source server:      {}", credentials.source()),
        format!("Destination server: {}", credentials.destination()),
        "Stages:".to_string(),
    ];
    for stage in Stage::ALL {
        let mark = if preferences.is_enabled(stage) { 'x' } else { ' ' };
        lines.push(format!("  [{}] {}", mark, stage.description()));
    }
    lines.join("\n")
}
