//! Human-readable status lines and the end-of-session summary.
use std::fmt;

use game_core::{CommandOutcome, LayoutKind, MoveOutcome, Position, Session};
use serde::Serialize;

/// Running counters kept while commands are fed to the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub commands: u64,
    pub rejected: u64,
    pub resets: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: &CommandOutcome) {
        self.commands += 1;
        match outcome {
            CommandOutcome::Rejected(_) => self.rejected += 1,
            CommandOutcome::Reset => self.resets += 1,
            _ => {}
        }
    }
}

/// Final state of a session, printed when input ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub layout: LayoutKind,
    pub turns: u64,
    pub commands: u64,
    pub rejected: u64,
    pub resets: u64,
    pub player_position: Position,
    pub player_health: u32,
    pub player_alive: bool,
    pub hostiles_alive: usize,
    pub hostiles_dead: usize,
}

impl SessionSummary {
    pub fn collect(session: &Session, tally: Tally) -> Self {
        let player = session.player();
        let hostiles = &session.state().entities.hostiles;
        let hostiles_alive = hostiles.iter().filter(|actor| actor.is_alive()).count();

        Self {
            seed: session.seed(),
            layout: session.config().map.layout,
            turns: session.turn(),
            commands: tally.commands,
            rejected: tally.rejected,
            resets: tally.resets,
            player_position: player.position,
            player_health: player.health.current,
            player_alive: player.is_alive(),
            hostiles_alive,
            hostiles_dead: hostiles.len() - hostiles_alive,
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed {} ({} layout)", self.seed, self.layout)?;
        writeln!(
            f,
            "{} turns over {} commands, {} rejected, {} resets",
            self.turns, self.commands, self.rejected, self.resets
        )?;
        let state = if self.player_alive { "alive" } else { "dead" };
        writeln!(
            f,
            "player {} at {} with {} hp",
            state, self.player_position, self.player_health
        )?;
        write!(
            f,
            "hostiles: {} alive, {} dead",
            self.hostiles_alive, self.hostiles_dead
        )
    }
}

/// One-line description of what a command did.
pub fn status_line(outcome: &CommandOutcome, session: &Session) -> String {
    match outcome {
        CommandOutcome::Turn(report) => {
            let player = match report.player {
                MoveOutcome::Moved { to, .. } => format!("moved to {to}"),
                MoveOutcome::Bumped { occupant } => format!("bumped into {occupant}"),
                MoveOutcome::Attacked(hit) if hit.killed => {
                    format!("struck {} for {}, it falls", hit.target, hit.damage)
                }
                MoveOutcome::Attacked(hit) => format!(
                    "struck {} for {} ({} hp left)",
                    hit.target, hit.damage, hit.remaining
                ),
            };
            let hits_taken: u32 = report
                .hostiles
                .iter()
                .filter_map(|step| match step.outcome {
                    Some(MoveOutcome::Attacked(hit)) => Some(hit.damage),
                    _ => None,
                })
                .sum();
            let frame = session.frame();
            let mut line = format!(
                "turn {}: {player}; {} tiles visible; view origin {}",
                report.turn,
                frame.visibility.len(),
                frame.viewport_origin
            );
            if hits_taken > 0 {
                line.push_str(&format!(
                    "; took {hits_taken} damage ({} hp)",
                    session.player().health.current
                ));
            }
            line
        }
        CommandOutcome::Rejected(error) => format!("turn {}: {error}", session.turn()),
        CommandOutcome::Reset => format!(
            "actors reset; player back at {}",
            session.player().position
        ),
        CommandOutcome::Quit => "bye".to_owned(),
        CommandOutcome::Ignored => "?".to_owned(),
    }
}
