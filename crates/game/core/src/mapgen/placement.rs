//! Random actor placement by rejection sampling.

use crate::config::ConfigError;
use crate::env::{Grid, RandomSource, TerrainKind};
use crate::state::Position;

/// Picks `count` distinct floor cells not listed in `reserved`.
///
/// Each attempt draws `x` then `y` uniformly over the whole map and keeps the
/// cell when it is free floor. `budget` bounds the total number of draws
/// across all actors so a map without room fails instead of spinning.
pub fn place_actors<R: RandomSource + ?Sized>(
    grid: &Grid,
    count: usize,
    budget: u32,
    reserved: &[Position],
    rng: &mut R,
) -> Result<Vec<Position>, ConfigError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let free_floor = grid
        .cells()
        .filter(|(position, terrain)| {
            *terrain == TerrainKind::Floor && !reserved.contains(position)
        })
        .count();
    if free_floor < count {
        return Err(ConfigError::NotEnoughFloor {
            floor_cells: free_floor,
            required: count,
        });
    }

    let max_x = grid.width() as i32 - 1;
    let max_y = grid.height() as i32 - 1;
    let mut placed: Vec<Position> = Vec::with_capacity(count);
    let mut attempts = 0;

    while placed.len() < count {
        if attempts >= budget {
            tracing::warn!(attempts, placed = placed.len(), count, "placement exhausted");
            return Err(ConfigError::PlacementExhausted {
                attempts,
                placed: placed.len(),
                required: count,
            });
        }
        attempts += 1;

        let x = rng.uniform_int(0, max_x);
        let y = rng.uniform_int(0, max_y);
        let candidate = Position::new(x, y);
        if grid.is_walkable(candidate)
            && !reserved.contains(&candidate)
            && !placed.contains(&candidate)
        {
            placed.push(candidate);
        }
    }

    tracing::debug!(attempts, count, "actors placed");
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, PcgRng};

    #[test]
    fn placements_are_distinct_free_floor() {
        let grid = Grid::from_ascii(
            "\
            #....#\n\
            #.TT.#\n\
            #....#\n",
        )
        .unwrap();
        let reserved = [Position::new(1, 0)];
        let placed = place_actors(&grid, 6, 10_000, &reserved, &mut PcgRng::new(17)).unwrap();

        assert_eq!(placed.len(), 6);
        for (index, position) in placed.iter().enumerate() {
            assert!(grid.is_walkable(*position));
            assert!(!reserved.contains(position));
            assert!(!placed[..index].contains(position));
        }
    }

    #[test]
    fn too_little_floor_fails_fast() {
        let grid = Grid::filled(MapDimensions::new(8, 8), TerrainKind::Tree);
        let err = place_actors(&grid, 1, 10, &[], &mut PcgRng::new(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotEnoughFloor {
                floor_cells: 0,
                required: 1
            }
        );
    }

    /// Always lands on the top-left cell.
    struct Pinned;

    impl RandomSource for Pinned {
        fn next_u32(&mut self) -> u32 {
            0
        }
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let grid = Grid::from_ascii("#.\n..\n").unwrap();

        let err = place_actors(&grid, 1, 3, &[], &mut Pinned).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PlacementExhausted {
                attempts: 3,
                placed: 0,
                required: 1
            }
        );
    }
}
