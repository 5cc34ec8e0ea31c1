//! Authoritative game state representation.
//!
//! This module owns the data structures that describe actors and turn
//! bookkeeping. The terrain grid is shared by reference: it is frozen once map
//! generation hands it over, so every clone of the state points at the same
//! terrain.
pub mod types;

use std::sync::Arc;

pub use types::{
    Actor, EntitiesState, EntityId, Faction, HostileRoster, LifeState, Position, Relations,
    ResourceMeter, Role, Stance, TurnState,
};

use crate::env::Grid;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Immutable terrain for the whole session.
    pub grid: Arc<Grid>,
    /// Turn bookkeeping.
    pub turn: TurnState,
    /// Player and hostiles.
    pub entities: EntitiesState,
}

impl GameState {
    pub fn new(grid: Arc<Grid>, entities: EntitiesState) -> Self {
        Self {
            grid,
            turn: TurnState::new(),
            entities,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Actor {
        &self.entities.player
    }
}
