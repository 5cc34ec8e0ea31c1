use crate::state::{Actor, EntityId};

/// Result of one hostile contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResult {
    pub attacker: EntityId,
    pub target: EntityId,
    /// Health actually removed (never more than the target had).
    pub damage: u32,
    pub remaining: u32,
    pub killed: bool,
}

/// Applies `attacker_power` to `target`, clamping health at zero.
pub fn strike(attacker: EntityId, attacker_power: u32, target: &mut Actor) -> HitResult {
    let was_alive = target.is_alive();
    let damage = target.take_damage(attacker_power);

    HitResult {
        attacker,
        target: target.id,
        damage,
        remaining: target.health.current,
        killed: was_alive && !target.is_alive(),
    }
}
