//! Dungeon game client binary.
//!
//! Reads one command per line from stdin (`w`/`a`/`s`/`d`, `r` to reset,
//! `q` to quit) and prints what each command did. See
//! [`ClientConfig::from_env`](dungeon_client::ClientConfig::from_env) for the
//! environment variables it honours.
//!
//! # Examples
//!
//! ```bash
//! printf 'd\nd\ns\nq\n' | DUNGEON_SEED=7 cargo run -p dungeon-client
//! ```

use std::io;

use anyhow::{Context, Result};
use dungeon_client::{ClientConfig, logging};
use game_core::Session;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();
    let seed = config.seed_or_clock();

    // 2. Install logging; the guard flushes the log file on drop
    let _log_guard = logging::setup_logging(config.log_dir.as_deref(), seed)?;
    tracing::info!(
        seed,
        width = config.game.map.width,
        height = config.game.map.height,
        layout = %config.game.map.layout,
        "starting session"
    );

    // 3. Generate the world
    let mut session = Session::generate(config.game.clone(), seed)
        .with_context(|| format!("failed to generate a world for seed {seed}"))?;

    // 4. Play until quit or end of input
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = dungeon_client::run(&mut session, stdin.lock(), &mut stdout.lock())?;

    if config.report_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to encode summary")?
        );
    } else {
        println!("{summary}");
    }

    tracing::info!(turns = summary.turns, "session finished");
    Ok(())
}
