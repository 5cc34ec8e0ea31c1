use super::ActionTransition;
use super::combat::{HitResult, strike};
use crate::engine::{TransitionPhaseError, drive_transition};
use crate::env::TerrainKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position, Stance};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {actor} is dead and cannot act")]
    ActorInactive { actor: EntityId },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked by {terrain}")]
    Blocked {
        destination: Position,
        terrain: TerrainKind,
    },

    #[error("destination {to} is not a single step from {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("actors {actor} and {other} both occupy {position}")]
    OccupancyDesync {
        actor: EntityId,
        other: EntityId,
        position: Position,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::ActorInactive { .. }
            | MoveError::OutOfBounds { .. }
            | MoveError::Blocked { .. } => ErrorSeverity::Recoverable,
            MoveError::NotAdjacent { .. } => ErrorSeverity::Validation,
            MoveError::ActorNotFound(_) | MoveError::OccupancyDesync { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            MoveError::ActorInactive { .. } => "MOVE_ACTOR_INACTIVE",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            MoveError::OccupancyDesync { .. } => "MOVE_OCCUPANCY_DESYNC",
        }
    }
}

/// What a movement attempt did once it passed the terrain check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Moved { from: Position, to: Position },
    /// Destination occupied by a non-hostile or dead actor; nobody moved.
    Bumped { occupant: EntityId },
    /// Destination occupied by a hostile actor; the mover stays put and hits.
    Attacked(HitResult),
}

impl MoveOutcome {
    pub fn relocated(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// One step of one actor towards an adjacent cell.
///
/// Resolution order is a strict chain, each stage short-circuiting the next:
/// bounds and terrain (`pre_validate`), then occupancy and combat, then
/// relocation (`apply`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub destination: Position,
}

impl MoveAction {
    pub fn new(actor: EntityId, destination: Position) -> Self {
        Self { actor, destination }
    }

    /// Bounds and terrain check alone, independent of who stands there.
    pub fn check_terrain(state: &GameState, destination: Position) -> Result<(), MoveError> {
        let terrain = state
            .grid()
            .tile(destination)
            .ok_or(MoveError::OutOfBounds { destination })?;

        if !terrain.is_passable() {
            return Err(MoveError::Blocked {
                destination,
                terrain,
            });
        }
        Ok(())
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Outcome = MoveOutcome;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;

        if !actor.is_alive() {
            return Err(MoveError::ActorInactive { actor: self.actor });
        }

        Self::check_terrain(state, self.destination)?;

        let (dx, dy) = (
            self.destination.x - actor.position.x,
            self.destination.y - actor.position.y,
        );
        if dx.abs() > 1 || dy.abs() > 1 || (dx == 0 && dy == 0) {
            return Err(MoveError::NotAdjacent {
                from: actor.position,
                to: self.destination,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Outcome, Self::Error> {
        let mover = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        let origin = mover.position;
        let power = mover.power;

        let contact = state
            .entities
            .occupant_at(self.destination)
            .filter(|occupant| occupant.id != self.actor)
            .map(|occupant| {
                let hostile =
                    occupant.is_alive() && mover.stance_toward(occupant) == Stance::Hostile;
                (occupant.id, hostile)
            });

        match contact {
            Some((occupant, true)) => {
                let target = state
                    .entities
                    .actor_mut(occupant)
                    .ok_or(MoveError::ActorNotFound(occupant))?;
                let hit = strike(self.actor, power, target);
                tracing::debug!(
                    attacker = %hit.attacker,
                    target = %hit.target,
                    damage = hit.damage,
                    remaining = hit.remaining,
                    killed = hit.killed,
                    "hostile contact"
                );
                Ok(MoveOutcome::Attacked(hit))
            }
            Some((occupant, false)) => Ok(MoveOutcome::Bumped { occupant }),
            None => {
                let actor = state
                    .entities
                    .actor_mut(self.actor)
                    .ok_or(MoveError::ActorNotFound(self.actor))?;
                actor.position = self.destination;
                Ok(MoveOutcome::Moved {
                    from: origin,
                    to: self.destination,
                })
            }
        }
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;

        if let Some(other) = state
            .entities
            .all_actors()
            .find(|other| other.id != actor.id && other.position == actor.position)
        {
            return Err(MoveError::OccupancyDesync {
                actor: actor.id,
                other: other.id,
                position: actor.position,
            });
        }
        Ok(())
    }
}

/// Attempts to move `actor` onto `destination`, driving the full transition.
pub fn attempt_move(
    state: &mut GameState,
    actor: EntityId,
    destination: Position,
) -> Result<MoveOutcome, TransitionPhaseError<MoveError>> {
    drive_transition(&MoveAction::new(actor, destination), state)
}
