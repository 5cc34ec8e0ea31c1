//! Deterministic simulation core for a turn-based grid exploration game.
//!
//! `game-core` synthesizes terrain, tracks the player and hostile actors,
//! computes fields of view, drives hostile pursuit over shortest-path cost
//! fields, and resolves movement and combat one turn at a time. Rendering and
//! raw input handling live outside this crate: they consume [`engine::Frame`]
//! and feed [`action::Command`]s into an [`engine::Session`].
//!
//! All randomness comes from an explicit [`env::RandomSource`] and is only
//! drawn during generation and placement, so turn resolution is fully
//! deterministic given positions and terrain.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod mapgen;
pub mod navigation;
pub mod state;
pub mod viewport;
pub mod vision;

pub use action::{
    ActionTransition, Command, Direction, HitResult, MoveAction, MoveError, MoveOutcome,
    attempt_move,
};
pub use config::{
    ActorTemplate, CellularConfig, ConfigError, DiggerConfig, GameConfig, LayoutKind, MapConfig,
};
pub use engine::{
    ActorView, CommandOutcome, Frame, GameEngine, HostileStep, Session, SessionBuilder,
    SessionSnapshot, TransitionPhase, TransitionPhaseError, TurnError, TurnReport,
};
pub use env::{Grid, MapDimensions, PcgRng, RandomSource, RngState, TerrainKind};
pub use error::{ErrorSeverity, GameError};
pub use navigation::{CostField, Topology};
pub use state::{
    Actor, EntitiesState, EntityId, Faction, GameState, LifeState, Position, Relations,
    ResourceMeter, Role, Stance,
};
pub use viewport::ViewportSize;
pub use vision::{Sight, VisibilityResult};
