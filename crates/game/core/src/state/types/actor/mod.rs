//! Actor-related state types.
//!
//! This module contains the single actor record shared by the player and every
//! hostile:
//! - Actor: position, allegiance, and combat stats
//! - Role / LifeState: closed tags dispatched over by the engine
//! - Faction / Relations: interaction policy on contact

pub mod faction;

pub use faction::{Faction, Relations, Stance};

use super::{EntityId, Position, ResourceMeter};
use crate::config::{ActorTemplate, ConfigError};

/// Which side of the simulation controls the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Player,
    Hostile,
}

/// Life cycle of an actor. `Dead` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifeState {
    Alive,
    Dead,
}

/// Complete actor state.
///
/// # Invariants
///
/// - `faction` is never blank (checked at construction)
/// - `life` is `Dead` exactly when `health.current` reached zero through damage,
///   and never returns to `Alive` during play
/// - dead actors keep their position and still occupy their cell
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub role: Role,
    pub position: Position,
    pub faction: Faction,
    pub relations: Relations,
    pub health: ResourceMeter,
    /// Damage dealt per hostile contact.
    pub power: u32,
    pub life: LifeState,
}

impl Actor {
    /// Instantiates an actor from its template.
    ///
    /// Fails when the template carries no faction or no health.
    pub fn from_template(
        id: EntityId,
        role: Role,
        position: Position,
        template: &ActorTemplate,
    ) -> Result<Self, ConfigError> {
        if template.faction.is_unassigned() {
            return Err(ConfigError::MissingFaction { actor: id });
        }
        if template.max_health == 0 {
            return Err(ConfigError::ZeroHealth { actor: id });
        }

        Ok(Self {
            id,
            role,
            position,
            faction: template.faction.clone(),
            relations: Relations::new(
                template.friendlies.iter().cloned(),
                template.hostiles.iter().cloned(),
            ),
            health: ResourceMeter::full(template.max_health),
            power: template.power,
            life: LifeState::Alive,
        })
    }

    /// Quick check if actor is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_player(&self) -> bool {
        self.role == Role::Player
    }

    /// How this actor treats `other` on contact.
    pub fn stance_toward(&self, other: &Actor) -> Stance {
        self.relations.stance_toward(&other.faction)
    }

    /// Removes health, flipping the actor to `Dead` once it reaches zero.
    ///
    /// Returns the damage actually absorbed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let absorbed = self.health.deplete(amount);
        if self.health.is_empty() {
            self.life = LifeState::Dead;
        }
        absorbed
    }
}
