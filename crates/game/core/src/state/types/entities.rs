use arrayvec::ArrayVec;

use super::{Actor, EntityId, Position};
use crate::config::GameConfig;

/// Fixed-capacity roster of hostile actors.
pub type HostileRoster = ArrayVec<Actor, { GameConfig::MAX_HOSTILES }>;

/// Aggregate state for every actor on the map.
///
/// The roster is fixed for the lifetime of a session: actors are never added or
/// removed after placement, dead actors included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: Actor,
    pub hostiles: HostileRoster,
}

impl EntitiesState {
    pub fn new(player: Actor, hostiles: HostileRoster) -> Self {
        Self { player, hostiles }
    }

    /// Returns a reference to an actor by ID (player or hostile).
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.hostiles.iter().find(|actor| actor.id == id)
    }

    /// Returns a mutable reference to an actor by ID (player or hostile).
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.hostiles.iter_mut().find(|actor| actor.id == id)
    }

    /// Returns an iterator over all actors (player first, then hostiles in
    /// roster order).
    pub fn all_actors(&self) -> impl Iterator<Item = &Actor> {
        std::iter::once(&self.player).chain(self.hostiles.iter())
    }

    /// The actor standing on `position`, living or dead.
    pub fn occupant_at(&self, position: Position) -> Option<&Actor> {
        self.all_actors().find(|actor| actor.position == position)
    }

    /// Identifiers of hostiles that can still act, in roster order.
    pub fn living_hostiles(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.hostiles
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActorTemplate;
    use crate::state::Role;

    fn roster() -> EntitiesState {
        let player = Actor::from_template(
            EntityId::PLAYER,
            Role::Player,
            Position::new(1, 1),
            &ActorTemplate::player_default(),
        )
        .unwrap();
        let mut hostiles = HostileRoster::new();
        for (index, x) in [3, 5].into_iter().enumerate() {
            hostiles.push(
                Actor::from_template(
                    EntityId(index as u32 + 1),
                    Role::Hostile,
                    Position::new(x, 1),
                    &ActorTemplate::hostile_default(),
                )
                .unwrap(),
            );
        }
        EntitiesState::new(player, hostiles)
    }

    #[test]
    fn occupant_lookup_includes_dead_actors() {
        let mut entities = roster();
        let hostile = entities.actor_mut(EntityId(2)).unwrap();
        let max = hostile.health.maximum;
        hostile.take_damage(max);

        assert_eq!(
            entities.occupant_at(Position::new(5, 1)).map(|a| a.id),
            Some(EntityId(2))
        );
        assert_eq!(entities.living_hostiles().collect::<Vec<_>>(), vec![EntityId(1)]);
    }

    #[test]
    fn actor_lookup_covers_player_and_hostiles() {
        let entities = roster();
        assert!(entities.actor(EntityId::PLAYER).unwrap().is_player());
        assert_eq!(entities.actor(EntityId(1)).unwrap().position, Position::new(3, 1));
        assert!(entities.actor(EntityId(9)).is_none());
        assert_eq!(entities.all_actors().count(), 3);
    }
}
