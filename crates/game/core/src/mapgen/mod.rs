//! Procedural terrain generation.
//!
//! The final grid blends independent layers, all drawn from one random source
//! in a fixed order so a seed always reproduces the same terrain:
//!
//! 1. two digger passes, inverted into "open" overlays A and B
//! 2. the structural base: a third digger pass, or a divided maze
//! 3. the cellular overgrowth field (skipped when overgrowth is off)
//!
//! Base walls become trees and base openings become floor. A tree flagged open
//! by either overlay turns into a wall with `wall_chance`; when overgrowth is
//! on, such a wall reverts to a tree wherever the automaton cell is dead.
//! Only obstacle kinds are swapped after the base step, so walkability is
//! decided by the base alone.

mod cellular;
mod digger;
mod mask;
mod maze;
mod placement;

pub use cellular::grow;
pub use digger::dig;
pub use mask::CellMask;
pub use maze::divide;
pub use placement::place_actors;

use crate::config::{ConfigError, LayoutKind, MapConfig};
use crate::env::{Grid, MapDimensions, RandomSource, TerrainKind};

/// Builds the session terrain from `config`.
pub fn generate<R: RandomSource + ?Sized>(
    config: &MapConfig,
    rng: &mut R,
) -> Result<Grid, ConfigError> {
    config.validate()?;
    let dimensions = MapDimensions::new(config.width, config.height);

    let overlay_a = dig(dimensions, &config.digger, rng).inverted();
    let overlay_b = dig(dimensions, &config.digger, rng).inverted();
    let base = match config.layout {
        LayoutKind::Rooms => dig(dimensions, &config.digger, rng),
        LayoutKind::Maze => divide(dimensions, rng),
    };
    let growth = config
        .cellular
        .overgrowth
        .then(|| grow(dimensions, &config.cellular, rng));

    let mut grid = Grid::filled(dimensions, TerrainKind::Floor);
    for position in dimensions.positions() {
        if !base.get(position) {
            continue;
        }

        let open_overlay = overlay_a.get(position) || overlay_b.get(position);
        let mut terrain = TerrainKind::Tree;
        if open_overlay && rng.chance(config.wall_chance) {
            terrain = TerrainKind::Wall;
            if growth.as_ref().is_some_and(|field| !field.get(position)) {
                terrain = TerrainKind::Tree;
            }
        }
        grid.set(position, terrain);
    }

    tracing::info!(
        width = config.width,
        height = config.height,
        layout = %config.layout,
        floor = grid.count(TerrainKind::Floor),
        wall = grid.count(TerrainKind::Wall),
        tree = grid.count(TerrainKind::Tree),
        "terrain generated"
    );

    Ok(grid)
}
