//! Action domain: the command set and the transitions it drives.
//!
//! # Module Structure
//!
//! - `movement`: `MoveAction` and its precondition chain (bounds/terrain,
//!   then occupancy/combat, then relocation)
//! - `combat`: damage resolution on hostile contact

pub mod combat;
pub mod movement;

pub use combat::{HitResult, strike};
pub use movement::{MoveAction, MoveError, MoveOutcome, attempt_move};

use crate::state::{EntityId, GameState};

/// Cardinal step directions, in clockwise order starting from up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Grid delta; `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}

/// Closed set of commands the input collaborator can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(Direction),
    /// Restore the session to its starting snapshot.
    Reset,
    Quit,
    /// Unrecognised input; never changes state.
    Noop,
}

/// Defines how a concrete action validates and mutates game state.
///
/// The engine drives every transition through the same three phases:
/// pre_validate → apply → post_validate
pub trait ActionTransition {
    type Error;
    type Outcome;

    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Checks that must hold before anything is mutated.
    fn pre_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Mutates the state.
    fn apply(&self, state: &mut GameState) -> Result<Self::Outcome, Self::Error>;

    /// Invariants that must hold afterwards.
    fn post_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }
}
