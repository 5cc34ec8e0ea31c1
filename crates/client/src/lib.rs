//! Line-driven terminal client for the grid exploration game.
//!
//! # Architecture
//!
//! ```text
//! stdin lines ─→ input::parse_command ─→ Session::handle ─→ report::status_line ─→ stdout
//!                                                        └─→ SessionSummary (on exit)
//! ```
//!
//! The binary is the composition root: it loads [`ClientConfig`] from the
//! environment, installs logging, generates a [`Session`] and hands the
//! standard streams to [`run`]. Everything here is synchronous; a turn is
//! resolved in full before the next line is read.

pub mod config;
pub mod input;
pub mod logging;
pub mod report;

pub use config::ClientConfig;
pub use input::parse_command;
pub use report::{SessionSummary, Tally, status_line};

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use game_core::{CommandOutcome, Session};

/// Feeds every input line to `session` until `Quit` or end of input.
///
/// Writes one status line per command and returns the final summary.
///
/// # Errors
///
/// Fails on I/O errors and on turns aborted by a broken simulation invariant.
/// Rejected moves are not errors.
pub fn run<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut tally = Tally::default();

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = parse_command(&line);
        let outcome = session
            .handle(command)
            .with_context(|| format!("turn {} aborted", session.turn()))?;
        tally.record(&outcome);

        writeln!(output, "{}", status_line(&outcome, session)).context("failed to write output")?;
        if outcome == CommandOutcome::Quit {
            break;
        }
    }

    output.flush().context("failed to flush output")?;
    Ok(SessionSummary::collect(session, tally))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, Grid, LifeState, Position};

    // Hostile sealed off behind the wall column, so it never moves.
    const LAYOUT: &str = "
        .....#...
        .....#...
        .....#...
    ";

    fn walled_session() -> Session {
        Session::builder(GameConfig::default())
            .grid(Grid::from_ascii(LAYOUT).expect("layout parses"))
            .player_at(Position::new(0, 0))
            .hostile_at(Position::new(7, 1))
            .build()
            .expect("session should build")
    }

    #[test]
    fn scripted_input_drives_the_session() {
        let mut session = walled_session();
        let mut output = Vec::new();

        let summary = run(&mut session, "d\nd\nx\ns\nq\nd\n".as_bytes(), &mut output)
            .expect("script should run");

        assert_eq!(summary.turns, 3);
        assert_eq!(summary.commands, 5);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.player_position, Position::new(2, 1));
        assert!(summary.player_alive);
        assert_eq!(summary.hostiles_alive, 1);
        assert_eq!(session.state().entities.hostiles[0].position, Position::new(7, 1));

        let text = String::from_utf8(output).expect("output is utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("turn 1: moved to (1, 0)"));
        assert_eq!(lines[2], "?");
        assert_eq!(lines[4], "bye");
    }

    #[test]
    fn rejected_moves_are_counted_not_fatal() {
        let mut session = walled_session();
        let mut output = Vec::new();

        let summary = run(&mut session, "w\na\nreset\n".as_bytes(), &mut output)
            .expect("script should run");

        assert_eq!(summary.turns, 0);
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.resets, 1);
        assert_eq!(session.player().life, LifeState::Alive);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("out of bounds"), "{text}");
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let mut session = walled_session();
        let summary = run(&mut session, "".as_bytes(), &mut Vec::new()).unwrap();

        assert_eq!(summary.commands, 0);
        assert_eq!(summary.player_position, Position::new(0, 0));
    }

    #[test]
    fn summary_serializes_for_reports() {
        let session = walled_session();
        let summary = SessionSummary::collect(&session, Tally::default());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["turns"], 0);
        assert_eq!(json["layout"], "rooms");
        assert_eq!(json["player_position"]["x"], 0);
        assert_eq!(json["hostiles_alive"], 1);
    }
}
