//! Game configuration constants and tunable parameters.
use crate::error::{ErrorSeverity, GameError};
use crate::navigation::Topology;
use crate::state::{EntityId, Faction, Position};
use crate::viewport::ViewportSize;

/// Fatal configuration problems, surfaced before a session starts.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("map {width}x{height} is smaller than the {minimum}x{minimum} minimum")]
    MapTooSmall {
        width: u32,
        height: u32,
        minimum: u32,
    },

    #[error("{parameter} must lie in [0, 1], got {value}")]
    InvalidProbability { parameter: &'static str, value: f64 },

    #[error("{parameter} range {min}..={max} is invalid")]
    InvalidRange {
        parameter: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{requested} hostiles requested, at most {maximum} supported")]
    TooManyHostiles { requested: usize, maximum: usize },

    #[error("viewport {width}x{height} must be non-empty")]
    EmptyViewport { width: u32, height: u32 },

    #[error("map holds {floor_cells} floor cells but {required} actors need placing")]
    NotEnoughFloor { floor_cells: usize, required: usize },

    #[error("placement gave up after {attempts} attempts ({placed} of {required} actors placed)")]
    PlacementExhausted {
        attempts: u32,
        placed: usize,
        required: usize,
    },

    #[error("cannot place actor at {position}: {reason}")]
    InvalidPlacement {
        position: Position,
        reason: &'static str,
    },

    #[error("actor {actor} has no faction assigned")]
    MissingFaction { actor: EntityId },

    #[error("actor {actor} would start with zero health")]
    ZeroHealth { actor: EntityId },

    #[error("layout row {row} is malformed: {reason}")]
    MalformedLayout { row: usize, reason: &'static str },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingFaction { .. } => ErrorSeverity::Internal,
            Self::InvalidPlacement { .. } | Self::MalformedLayout { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapTooSmall { .. } => "CONFIG_MAP_TOO_SMALL",
            Self::InvalidProbability { .. } => "CONFIG_INVALID_PROBABILITY",
            Self::InvalidRange { .. } => "CONFIG_INVALID_RANGE",
            Self::TooManyHostiles { .. } => "CONFIG_TOO_MANY_HOSTILES",
            Self::EmptyViewport { .. } => "CONFIG_EMPTY_VIEWPORT",
            Self::NotEnoughFloor { .. } => "CONFIG_NOT_ENOUGH_FLOOR",
            Self::PlacementExhausted { .. } => "CONFIG_PLACEMENT_EXHAUSTED",
            Self::InvalidPlacement { .. } => "CONFIG_INVALID_PLACEMENT",
            Self::MissingFaction { .. } => "CONFIG_MISSING_FACTION",
            Self::ZeroHealth { .. } => "CONFIG_ZERO_HEALTH",
            Self::MalformedLayout { .. } => "CONFIG_MALFORMED_LAYOUT",
        }
    }
}

/// Top-level session configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub map: MapConfig,
    /// Sight radius used for the player's visibility.
    pub vision_radius: u32,
    /// Hostiles placed at session start.
    pub hostile_count: usize,
    /// Neighbourhood used by hostile pursuit.
    pub pursuit: Topology,
    /// Camera window handed to the rendering collaborator.
    pub viewport: ViewportSize,
    pub player: ActorTemplate,
    pub hostile: ActorTemplate,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of hostiles in a session.
    pub const MAX_HOSTILES: usize = 32;
    /// Smallest generated map edge.
    pub const MIN_MAP_DIMENSION: u32 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_RADIUS: u32 = 10;
    pub const DEFAULT_HOSTILE_COUNT: usize = 3;

    pub fn new() -> Self {
        Self {
            map: MapConfig::default(),
            vision_radius: Self::DEFAULT_VISION_RADIUS,
            hostile_count: Self::DEFAULT_HOSTILE_COUNT,
            pursuit: Topology::Four,
            viewport: ViewportSize::default(),
            player: ActorTemplate::player_default(),
            hostile: ActorTemplate::hostile_default(),
        }
    }

    pub fn with_map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }

    pub fn with_hostile_count(mut self, hostile_count: usize) -> Self {
        self.hostile_count = hostile_count;
        self
    }

    pub fn with_vision_radius(mut self, vision_radius: u32) -> Self {
        self.vision_radius = vision_radius;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportSize) -> Self {
        self.viewport = viewport;
        self
    }

    /// Checks everything except the map dimensions, which only matter when
    /// the grid is generated (see [`MapConfig::validate`]).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostile_count > Self::MAX_HOSTILES {
            return Err(ConfigError::TooManyHostiles {
                requested: self.hostile_count,
                maximum: Self::MAX_HOSTILES,
            });
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.player.faction.is_unassigned() {
            return Err(ConfigError::MissingFaction {
                actor: EntityId::PLAYER,
            });
        }
        if self.hostile.faction.is_unassigned() {
            return Err(ConfigError::MissingFaction { actor: EntityId(1) });
        }
        if self.player.max_health == 0 {
            return Err(ConfigError::ZeroHealth {
                actor: EntityId::PLAYER,
            });
        }
        if self.hostile.max_health == 0 {
            return Err(ConfigError::ZeroHealth { actor: EntityId(1) });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural algorithm used for the base terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayoutKind {
    /// Room-and-corridor digger.
    #[default]
    Rooms,
    /// Recursive-division maze.
    Maze,
}

/// Map generation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutKind,
    pub digger: DiggerConfig,
    pub cellular: CellularConfig,
    /// Chance that an overlay-flagged tree becomes a wall.
    pub wall_chance: f64,
    /// Rejection-sampling budget for actor placement; derived from the map
    /// area when unset.
    pub placement_attempts: Option<u32>,
}

impl MapConfig {
    pub const DEFAULT_WIDTH: u32 = 100;
    pub const DEFAULT_HEIGHT: u32 = 100;
    pub const DEFAULT_WALL_CHANCE: f64 = 0.67;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout: LayoutKind::default(),
            digger: DiggerConfig::default(),
            cellular: CellularConfig::default(),
            wall_chance: Self::DEFAULT_WALL_CHANCE,
            placement_attempts: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn placement_budget(&self) -> u32 {
        self.placement_attempts
            .unwrap_or_else(|| self.width.saturating_mul(self.height).saturating_mul(4))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let minimum = GameConfig::MIN_MAP_DIMENSION;
        if self.width < minimum || self.height < minimum {
            return Err(ConfigError::MapTooSmall {
                width: self.width,
                height: self.height,
                minimum,
            });
        }
        check_probability("wall_chance", self.wall_chance)?;
        check_probability("digger.dug_fraction", self.digger.dug_fraction)?;
        check_probability("cellular.fill_probability", self.cellular.fill_probability)?;
        check_range("digger.room_width", self.digger.room_width)?;
        check_range("digger.room_height", self.digger.room_height)?;
        check_range("digger.corridor_length", self.digger.corridor_length)?;
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Room-and-corridor digger tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiggerConfig {
    /// Inclusive room width range.
    pub room_width: (u32, u32),
    /// Inclusive room height range.
    pub room_height: (u32, u32),
    /// Inclusive corridor length range.
    pub corridor_length: (u32, u32),
    /// Stop once this fraction of the interior has been dug out.
    pub dug_fraction: f64,
    /// Feature placement attempts before giving up.
    pub max_attempts: u32,
}

impl Default for DiggerConfig {
    fn default() -> Self {
        Self {
            room_width: (3, 9),
            room_height: (3, 5),
            corridor_length: (3, 10),
            dug_fraction: 0.2,
            max_attempts: 1_000,
        }
    }
}

/// Cellular automaton tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellularConfig {
    /// Initial alive probability per cell.
    pub fill_probability: f64,
    /// Smoothing generations.
    pub iterations: u32,
    /// Blend the automaton into the terrain. When off, the automaton is not run.
    pub overgrowth: bool,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            fill_probability: 0.5,
            iterations: 4,
            overgrowth: true,
        }
    }
}

/// Stats and allegiance used to instantiate an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub faction: Faction,
    pub friendlies: Vec<Faction>,
    pub hostiles: Vec<Faction>,
    pub max_health: u32,
    pub power: u32,
}

impl ActorTemplate {
    pub fn player_default() -> Self {
        Self {
            faction: Faction::PLAYER,
            friendlies: vec![Faction::PLAYER],
            hostiles: vec![Faction::MONSTERS],
            max_health: 30,
            power: 5,
        }
    }

    pub fn hostile_default() -> Self {
        Self {
            faction: Faction::MONSTERS,
            friendlies: vec![Faction::MONSTERS],
            hostiles: vec![Faction::PLAYER],
            max_health: 10,
            power: 2,
        }
    }

    pub fn with_stats(mut self, max_health: u32, power: u32) -> Self {
        self.max_health = max_health;
        self.power = power;
        self
    }
}

fn check_probability(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { parameter, value })
    }
}

fn check_range(parameter: &'static str, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    if min == 0 || min > max {
        return Err(ConfigError::InvalidRange {
            parameter,
            min,
            max,
        });
    }
    Ok(())
}
