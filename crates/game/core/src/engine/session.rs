use std::sync::Arc;

use crate::action::{Command, MoveError};
use crate::config::{ConfigError, GameConfig};
use crate::env::{Grid, PcgRng, RngState};
use crate::error::GameError;
use crate::mapgen;
use crate::state::{
    Actor, EntitiesState, EntityId, GameState, HostileRoster, LifeState, Position, ResourceMeter,
    Role,
};
use crate::viewport::ViewportSize;
use crate::vision::VisibilityResult;

use super::{GameEngine, TurnError, TurnReport, observe};

/// Starting condition captured right after placement and restored by reset.
///
/// The grid is shared, not copied: terrain is frozen once generated, so the
/// reference always points at the terrain the session started with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub rng: RngState,
    /// Every actor as placed, including health and life state.
    pub entities: EntitiesState,
    pub grid: Arc<Grid>,
}

/// Result of handing one command to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The turn advanced.
    Turn(TurnReport),
    /// The move was refused; state is unchanged and hostiles did not act.
    Rejected(MoveError),
    Reset,
    Quit,
    /// Unrecognised input.
    Ignored,
}

/// Render-facing view of one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorView {
    pub id: EntityId,
    pub role: Role,
    pub position: Position,
    pub life: LifeState,
    pub health: ResourceMeter,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            role: actor.role,
            position: actor.position,
            life: actor.life,
            health: actor.health,
        }
    }
}

/// Everything a rendering collaborator needs for one frame.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    /// Player first, then hostiles in roster order.
    pub actors: Vec<ActorView>,
    pub visibility: &'a VisibilityResult,
    pub viewport: ViewportSize,
    /// Top-left map cell of the camera window, clamped to the map.
    pub viewport_origin: Position,
}

/// One play session: terrain, actors, random source and reset snapshot.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    rng: PcgRng,
    state: GameState,
    visibility: VisibilityResult,
    snapshot: SessionSnapshot,
}

impl Session {
    pub fn builder(config: GameConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Generates terrain and places actors from `seed`.
    pub fn generate(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::builder(config).seed(seed).build()
    }

    /// Feeds one command from the input collaborator.
    ///
    /// Rejected moves are reported as [`CommandOutcome::Rejected`]; only
    /// invariant violations surface as errors.
    pub fn handle(&mut self, command: Command) -> Result<CommandOutcome, TurnError> {
        match command {
            Command::Move(direction) => {
                let mut engine = GameEngine::new(&mut self.state, &self.config);
                match engine.play_turn(direction) {
                    Ok(report) => {
                        self.visibility = report.visibility.clone();
                        Ok(CommandOutcome::Turn(report))
                    }
                    Err(TurnError::Player(failure)) if failure.severity().is_recoverable() => {
                        tracing::debug!(
                            %direction,
                            code = failure.error_code(),
                            "player move rejected"
                        );
                        Ok(CommandOutcome::Rejected(failure.error))
                    }
                    Err(err) => {
                        tracing::error!(code = err.error_code(), error = %err, "turn aborted");
                        Err(err)
                    }
                }
            }
            Command::Reset => {
                self.reset();
                Ok(CommandOutcome::Reset)
            }
            Command::Quit => Ok(CommandOutcome::Quit),
            Command::Noop => Ok(CommandOutcome::Ignored),
        }
    }

    /// Restores the random source and every actor to the starting snapshot.
    ///
    /// Terrain is reused, not regenerated. The turn counter is left as is.
    pub fn reset(&mut self) {
        self.rng.restore(self.snapshot.rng);
        self.state.entities = self.snapshot.entities.clone();
        self.state.grid = Arc::clone(&self.snapshot.grid);
        self.visibility = observe(&self.state, self.config.vision_radius);

        tracing::info!(
            seed = self.rng.seed(),
            turn = self.state.turn.turn,
            player = %self.state.player().position,
            "session reset"
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    pub fn player(&self) -> &Actor {
        self.state.player()
    }

    pub fn turn(&self) -> u64 {
        self.state.turn.turn
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn rng_state(&self) -> RngState {
        self.rng.snapshot()
    }

    pub fn visibility(&self) -> &VisibilityResult {
        &self.visibility
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn frame(&self) -> Frame<'_> {
        let grid = self.state.grid();
        let viewport = self.config.viewport;
        Frame {
            grid,
            actors: self.state.entities.all_actors().map(ActorView::from).collect(),
            visibility: &self.visibility,
            viewport,
            viewport_origin: viewport.top_left(self.state.player().position, grid.dimensions()),
        }
    }
}

/// Assembles a [`Session`], generating whatever was not supplied.
#[derive(Debug)]
pub struct SessionBuilder {
    config: GameConfig,
    seed: u64,
    grid: Option<Grid>,
    player: Option<Position>,
    hostiles: Option<Vec<Position>>,
}

impl SessionBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            seed: 0,
            grid: None,
            player: None,
            hostiles: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Uses `grid` instead of running the map generator.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn player_at(mut self, position: Position) -> Self {
        self.player = Some(position);
        self
    }

    /// Adds a hostile at `position`. Once any hostile is given explicitly,
    /// no others are placed at random.
    pub fn hostile_at(mut self, position: Position) -> Self {
        self.hostiles.get_or_insert_with(Vec::new).push(position);
        self
    }

    pub fn build(self) -> Result<Session, ConfigError> {
        let Self {
            config,
            seed,
            grid,
            player,
            hostiles,
        } = self;
        config.validate()?;

        let mut rng = PcgRng::new(seed);
        let grid = match grid {
            Some(grid) => grid,
            None => mapgen::generate(&config.map, &mut rng)?,
        };

        let hostile_count = hostiles
            .as_ref()
            .map_or(config.hostile_count, |explicit| explicit.len());
        if hostile_count > GameConfig::MAX_HOSTILES {
            return Err(ConfigError::TooManyHostiles {
                requested: hostile_count,
                maximum: GameConfig::MAX_HOSTILES,
            });
        }

        let mut reserved = Vec::with_capacity(hostile_count + 1);
        for position in player.iter().chain(hostiles.iter().flatten()) {
            check_explicit(&grid, &reserved, *position)?;
            reserved.push(*position);
        }

        let required = usize::from(player.is_none())
            + if hostiles.is_none() { hostile_count } else { 0 };
        let budget = config.map.placement_budget();
        let mut placed =
            mapgen::place_actors(&grid, required, budget, &reserved, &mut rng)?.into_iter();

        let player_position = match player {
            Some(position) => position,
            None => placed.next().ok_or(ConfigError::PlacementExhausted {
                attempts: budget,
                placed: 0,
                required,
            })?,
        };
        let hostile_positions: Vec<Position> = match hostiles {
            Some(explicit) => explicit,
            None => placed.collect(),
        };

        let player = Actor::from_template(
            EntityId::PLAYER,
            Role::Player,
            player_position,
            &config.player,
        )?;
        let mut roster = HostileRoster::new();
        for (index, position) in hostile_positions.into_iter().enumerate() {
            let id = EntityId(index as u32 + 1);
            roster.push(Actor::from_template(
                id,
                Role::Hostile,
                position,
                &config.hostile,
            )?);
        }

        let state = GameState::new(Arc::new(grid), EntitiesState::new(player, roster));
        let snapshot = SessionSnapshot {
            rng: rng.snapshot(),
            entities: state.entities.clone(),
            grid: Arc::clone(&state.grid),
        };
        let visibility = observe(&state, config.vision_radius);

        tracing::info!(
            seed,
            width = state.grid().width(),
            height = state.grid().height(),
            player = %state.player().position,
            hostiles = state.entities.hostiles.len(),
            "session ready"
        );

        Ok(Session {
            config,
            rng,
            state,
            visibility,
            snapshot,
        })
    }
}

fn check_explicit(
    grid: &Grid,
    reserved: &[Position],
    position: Position,
) -> Result<(), ConfigError> {
    let reason = match grid.tile(position) {
        None => "outside the map",
        Some(terrain) if !terrain.is_passable() => "not a floor cell",
        Some(_) if reserved.contains(&position) => "already occupied",
        Some(_) => return Ok(()),
    };
    Err(ConfigError::InvalidPlacement { position, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Direction, MoveOutcome};
    use crate::config::ActorTemplate;
    use crate::env::{MapDimensions, TerrainKind};

    fn open_floor(width: u32, height: u32) -> Grid {
        Grid::filled(MapDimensions::new(width, height), TerrainKind::Floor)
    }

    fn scripted() -> Session {
        Session::builder(GameConfig::default())
            .seed(7)
            .grid(open_floor(12, 12))
            .player_at(Position::new(1, 1))
            .hostile_at(Position::new(10, 10))
            .build()
            .unwrap()
    }

    #[test]
    fn explicit_positions_are_validated() {
        let walled = Grid::from_ascii("..#\n...\n").unwrap();
        let err = Session::builder(GameConfig::default())
            .grid(walled.clone())
            .player_at(Position::new(2, 0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPlacement {
                position: Position::new(2, 0),
                reason: "not a floor cell"
            }
        );

        let err = Session::builder(GameConfig::default())
            .grid(walled)
            .player_at(Position::new(0, 0))
            .hostile_at(Position::new(0, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlacement { .. }));
    }

    #[test]
    fn zero_health_player_is_refused_before_play() {
        let mut config = GameConfig::default();
        config.player = ActorTemplate::player_default().with_stats(0, 5);

        let err = Session::builder(config)
            .grid(open_floor(6, 6))
            .player_at(Position::new(1, 1))
            .hostile_at(Position::new(4, 4))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::ZeroHealth {
                actor: EntityId::PLAYER
            }
        );
    }

    #[test]
    fn random_hostiles_avoid_the_explicit_player() {
        let session = Session::builder(GameConfig::default().with_hostile_count(5))
            .seed(11)
            .grid(open_floor(3, 3))
            .player_at(Position::new(1, 1))
            .build()
            .unwrap();

        assert_eq!(session.state().entities.hostiles.len(), 5);
        assert!(
            session
                .state()
                .entities
                .hostiles
                .iter()
                .all(|hostile| hostile.position != Position::new(1, 1))
        );
    }

    #[test]
    fn reset_restores_actors_but_not_turn() {
        let mut session = scripted();
        let start = session.snapshot().clone();

        for _ in 0..3 {
            session.handle(Command::Move(Direction::Right)).unwrap();
        }
        assert_eq!(session.turn(), 3);
        assert_ne!(session.state().entities, start.entities);

        assert_eq!(session.handle(Command::Reset).unwrap(), CommandOutcome::Reset);
        assert_eq!(session.state().entities, start.entities);
        assert_eq!(session.rng_state(), start.rng);
        assert_eq!(session.turn(), 3);
        assert!(Arc::ptr_eq(&session.state().grid, &start.grid));
    }

    #[test]
    fn blocked_and_unknown_commands_change_nothing() {
        let mut session = Session::builder(GameConfig::default())
            .grid(Grid::from_ascii("...\n.#.\n...\n").unwrap())
            .player_at(Position::new(1, 0))
            .hostile_at(Position::new(2, 2))
            .build()
            .unwrap();
        let before = session.state().clone();

        let outcome = session.handle(Command::Move(Direction::Down)).unwrap();
        assert!(matches!(
            outcome,
            CommandOutcome::Rejected(MoveError::Blocked { .. })
        ));
        assert_eq!(session.handle(Command::Noop).unwrap(), CommandOutcome::Ignored);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn dead_player_cannot_move() {
        let mut session = scripted();
        session.state.entities.player.take_damage(u32::MAX);

        let outcome = session.handle(Command::Move(Direction::Right)).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Rejected(MoveError::ActorInactive {
                actor: EntityId::PLAYER
            })
        );
        assert_eq!(session.turn(), 0);

        session.reset();
        assert!(session.player().is_alive());
    }

    #[test]
    fn frame_lists_actors_and_clamps_viewport() {
        let mut session = scripted();
        let outcome = session.handle(Command::Move(Direction::Down)).unwrap();
        let CommandOutcome::Turn(report) = outcome else {
            panic!("expected a turn, got {outcome:?}");
        };
        assert!(matches!(report.player, MoveOutcome::Moved { .. }));

        let frame = session.frame();
        assert_eq!(frame.actors.len(), 2);
        assert_eq!(frame.actors[0].role, Role::Player);
        assert_eq!(frame.viewport_origin, Position::ORIGIN);
        assert!(frame.visibility.contains(Position::new(1, 2)));
    }
}
