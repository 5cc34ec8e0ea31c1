//! Error types for the turn pipeline.

use crate::action::{ActionTransition, MoveAction};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

type MoveFailure = TransitionPhaseError<<MoveAction as ActionTransition>::Error>;

/// Errors surfaced while resolving a turn.
///
/// Recoverable rejections of hostile steps never reach this type; they are
/// absorbed by the engine. A player rejection is reported here so the caller
/// can tell that the turn did not advance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("player move failed: {0}")]
    Player(MoveFailure),

    #[error("hostile {actor} move failed: {failure}")]
    Hostile { actor: EntityId, failure: MoveFailure },
}

impl TurnError {
    /// Underlying movement failure regardless of who moved.
    pub fn failure(&self) -> &MoveFailure {
        match self {
            TurnError::Player(failure) => failure,
            TurnError::Hostile { failure, .. } => failure,
        }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        self.failure().severity()
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::Player(_) => "TURN_PLAYER_MOVE",
            TurnError::Hostile { .. } => "TURN_HOSTILE_MOVE",
        }
    }
}
