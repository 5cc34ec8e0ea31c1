//! Turn resolution and session lifecycle.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]: one call
//! to [`GameEngine::play_turn`] is one atomic turn (player step, hostile
//! pursuit, visibility refresh). Every movement, player or hostile, flows
//! through the same three-phase transition pipeline:
//! pre_validate → apply → post_validate
//!
//! [`Session`] owns the state together with the random source and the reset
//! snapshot, and is the entry point for the input collaborator.

mod errors;
mod session;
mod transition;

pub use errors::{TransitionPhase, TransitionPhaseError, TurnError};
pub use session::{ActorView, CommandOutcome, Frame, Session, SessionBuilder, SessionSnapshot};
pub use transition::drive_transition;

use std::sync::Arc;

use crate::action::{Direction, MoveOutcome, attempt_move};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::navigation::CostField;
use crate::state::{EntityId, GameState};
use crate::vision::VisibilityResult;

/// What one hostile did during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileStep {
    pub actor: EntityId,
    /// `None` when the hostile had no path or its step was rejected.
    pub outcome: Option<MoveOutcome>,
}

/// Summary of one resolved turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Turn number after advancing.
    pub turn: u64,
    pub player: MoveOutcome,
    /// Living hostiles in roster order.
    pub hostiles: Vec<HostileStep>,
    /// Player's field of view with the final positions of this turn.
    pub visibility: VisibilityResult,
}

/// Game engine resolving turns against a borrowed state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Resolves one turn for a directional command.
    ///
    /// The player's step is checked first. When it fails the bounds or
    /// terrain check, or the player is dead, nothing changes: the turn
    /// counter stays put and hostiles do not act. Otherwise the turn
    /// advances, every living hostile takes one step along a shared cost
    /// field rooted at the player, and the player's field of view is
    /// recomputed.
    ///
    /// The turn is resolved on a working copy and committed only when every
    /// step succeeded, so an error leaves the state exactly as it was.
    pub fn play_turn(&mut self, direction: Direction) -> Result<TurnReport, TurnError> {
        let mut draft = self.state.clone();

        let (dx, dy) = direction.delta();
        let destination = draft.player().position.offset(dx, dy);

        let player =
            attempt_move(&mut draft, EntityId::PLAYER, destination).map_err(TurnError::Player)?;
        let turn = draft.turn.advance();

        let hostiles = pursue(&mut draft, self.config)?;
        let visibility = observe(&draft, self.config.vision_radius);

        tracing::debug!(
            turn,
            %direction,
            player = %draft.player().position,
            visible = visibility.len(),
            "turn resolved"
        );

        *self.state = draft;
        Ok(TurnReport {
            turn,
            player,
            hostiles,
            visibility,
        })
    }
}

/// Moves every living hostile one step towards the player.
///
/// The field depends only on the player's position and the frozen terrain, so
/// one flood serves the whole roster.
fn pursue(state: &mut GameState, config: &GameConfig) -> Result<Vec<HostileStep>, TurnError> {
    let grid = Arc::clone(&state.grid);
    let field = CostField::for_grid(&grid, state.player().position, config.pursuit);
    let roster: Vec<EntityId> = state.entities.living_hostiles().collect();

    let mut steps = Vec::with_capacity(roster.len());
    for actor in roster {
        let Some(position) = state.entities.actor(actor).map(|a| a.position) else {
            continue;
        };

        let outcome = match field.next_step(position) {
            None => None,
            Some(next) => match attempt_move(state, actor, next) {
                Ok(outcome) => Some(outcome),
                Err(failure) if failure.severity().is_recoverable() => {
                    tracing::debug!(
                        %actor,
                        code = failure.error_code(),
                        phase = failure.phase.as_str(),
                        "hostile step rejected"
                    );
                    None
                }
                Err(failure) => return Err(TurnError::Hostile { actor, failure }),
            },
        };
        steps.push(HostileStep { actor, outcome });
    }

    Ok(steps)
}

/// Player's field of view in the current state.
pub fn observe(state: &GameState, radius: u32) -> VisibilityResult {
    VisibilityResult::compute(state.grid(), state.player().position, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActorTemplate;
    use crate::env::Grid;
    use crate::state::{Actor, EntitiesState, HostileRoster, Position, Role};

    fn state(layout: &str, player: Position, hostiles: &[Position]) -> GameState {
        let grid = Grid::from_ascii(layout).unwrap();
        let player = Actor::from_template(
            EntityId::PLAYER,
            Role::Player,
            player,
            &ActorTemplate::player_default(),
        )
        .unwrap();
        let mut roster = HostileRoster::new();
        for (index, position) in hostiles.iter().enumerate() {
            roster.push(
                Actor::from_template(
                    EntityId(index as u32 + 1),
                    Role::Hostile,
                    *position,
                    &ActorTemplate::hostile_default(),
                )
                .unwrap(),
            );
        }
        GameState::new(Arc::new(grid), EntitiesState::new(player, roster))
    }

    const HALL: &str = "\
        ........\n\
        .######.\n\
        ........\n";

    #[test]
    fn successful_step_lets_hostiles_pursue() {
        let config = GameConfig::default();
        let mut state = state(HALL, Position::new(0, 0), &[Position::new(7, 2)]);
        let mut engine = GameEngine::new(&mut state, &config);

        let report = engine.play_turn(Direction::Right).unwrap();

        assert_eq!(report.turn, 1);
        assert!(report.player.relocated());
        assert_eq!(report.hostiles.len(), 1);
        assert!(matches!(
            report.hostiles[0].outcome,
            Some(MoveOutcome::Moved { .. })
        ));
        assert!(report.visibility.contains(Position::new(1, 0)));
        assert_eq!(
            state.entities.actor(EntityId(1)).unwrap().position.manhattan(Position::new(1, 0)),
            7
        );
    }

    #[test]
    fn rejected_step_gives_hostiles_no_turn() {
        let config = GameConfig::default();
        let mut state = state(HALL, Position::new(1, 0), &[Position::new(7, 2)]);
        let before = state.clone();
        let mut engine = GameEngine::new(&mut state, &config);

        let err = engine.play_turn(Direction::Down).unwrap_err();

        assert!(matches!(err, TurnError::Player(_)));
        assert!(err.severity().is_recoverable());
        assert_eq!(state, before);
    }

    #[test]
    fn adjacent_hostile_attacks_the_player() {
        let config = GameConfig::default();
        let mut state = state(HALL, Position::new(0, 0), &[Position::new(2, 0)]);
        let max = state.player().health.maximum;
        let mut engine = GameEngine::new(&mut state, &config);

        let report = engine.play_turn(Direction::Right).unwrap();

        let Some(MoveOutcome::Attacked(hit)) = report.hostiles[0].outcome else {
            panic!("expected an attack, got {:?}", report.hostiles[0]);
        };
        assert_eq!(hit.target, EntityId::PLAYER);
        assert_eq!(state.player().health.current, max - hit.damage);
        assert_eq!(state.player().position, Position::new(1, 0));
    }

    #[test]
    fn broken_invariant_aborts_the_whole_turn() {
        // Hostiles #1 and #2 share a cell; #1 bumps into #3 and stays stacked.
        let config = GameConfig::default();
        let mut state = state(
            "........\n",
            Position::new(0, 0),
            &[Position::new(5, 0), Position::new(5, 0), Position::new(4, 0)],
        );
        let before = state.clone();
        let mut engine = GameEngine::new(&mut state, &config);

        let err = engine.play_turn(Direction::Right).unwrap_err();

        assert!(err.severity().is_internal());
        let TurnError::Hostile { actor, failure } = err else {
            panic!("expected a hostile failure, got {err:?}");
        };
        assert_eq!(actor, EntityId(1));
        assert_eq!(failure.phase, TransitionPhase::PostValidate);
        assert_eq!(state, before);
        assert_eq!(state.turn.turn, 0);
    }

    #[test]
    fn unreachable_hostile_stays_put() {
        let walled = "\
            ...#..\n\
            ...#..\n";
        let config = GameConfig::default();
        let mut state = state(walled, Position::new(0, 0), &[Position::new(5, 1)]);
        let mut engine = GameEngine::new(&mut state, &config);

        let report = engine.play_turn(Direction::Down).unwrap();

        assert_eq!(report.hostiles[0].outcome, None);
        assert_eq!(
            state.entities.actor(EntityId(1)).unwrap().position,
            Position::new(5, 1)
        );
    }
}
