pub mod actor;
pub mod common;
pub mod entities;
pub mod turn;

// Re-export all actor-related types
pub use actor::{Actor, Faction, LifeState, Relations, Role, Stance};

// Re-export common types
pub use common::{EntityId, Position, ResourceMeter};

// Re-export entity collection
pub use entities::{EntitiesState, HostileRoster};

// Re-export turn state
pub use turn::TurnState;
