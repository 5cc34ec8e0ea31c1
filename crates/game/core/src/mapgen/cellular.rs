//! Birth/survival cellular automaton over an 8-neighbourhood.

use crate::config::CellularConfig;
use crate::env::{MapDimensions, RandomSource};
use crate::state::Position;

use super::CellMask;

const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Live-neighbour counts that bring a dead cell to life.
const BORN: [u8; 4] = [5, 6, 7, 8];
/// Live-neighbour counts that keep a live cell alive.
const SURVIVE: [u8; 5] = [4, 5, 6, 7, 8];

/// Seeds a random field and runs `config.iterations` generations. Set cells
/// are alive.
pub fn grow<R: RandomSource + ?Sized>(
    dimensions: MapDimensions,
    config: &CellularConfig,
    rng: &mut R,
) -> CellMask {
    let mut cells = randomize(dimensions, config.fill_probability, rng);
    for _ in 0..config.iterations {
        cells = generation(&cells);
    }
    tracing::debug!(
        iterations = config.iterations,
        alive = cells.count_set(),
        "cellular field grown"
    );
    cells
}

/// Each cell alive with `probability`, drawn column by column.
fn randomize<R: RandomSource + ?Sized>(
    dimensions: MapDimensions,
    probability: f64,
    rng: &mut R,
) -> CellMask {
    let mut cells = CellMask::new(dimensions, false);
    for x in 0..dimensions.width as i32 {
        for y in 0..dimensions.height as i32 {
            cells.set(Position::new(x, y), rng.chance(probability));
        }
    }
    cells
}

/// One synchronous step. Cells outside the field count as dead.
fn generation(current: &CellMask) -> CellMask {
    let dimensions = current.dimensions();
    let mut next = CellMask::new(dimensions, false);

    for position in dimensions.positions() {
        let live = NEIGHBOURS
            .iter()
            .filter(|(dx, dy)| current.get(position.offset(*dx, *dy)))
            .count() as u8;
        let alive = if current.get(position) {
            SURVIVE.contains(&live)
        } else {
            BORN.contains(&live)
        };
        next.set(position, alive);
    }

    next
}
