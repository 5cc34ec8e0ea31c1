//! Shortest-path cost fields used by hostile pursuit.

use std::collections::VecDeque;

use crate::env::{Grid, MapDimensions};
use crate::state::Position;

/// Neighbourhood used when expanding a cost field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Topology {
    /// Edge-sharing neighbours only.
    #[default]
    Four,
    /// Edge and corner neighbours.
    Eight,
}

impl Topology {
    const FOUR: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
    const EIGHT: [(i32, i32); 8] = [
        (0, -1),
        (1, -1),
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];

    /// Neighbour offsets, clockwise starting from up.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Four => &Self::FOUR,
            Topology::Eight => &Self::EIGHT,
        }
    }
}

/// Dense distance-to-target grid.
///
/// The field is a breadth-first flood from the target: every step costs one,
/// so it equals a Dijkstra field. Cells that are out of bounds or rejected by
/// the walkability predicate are never expanded and stay unreachable. The
/// target itself is seeded without consulting the predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostField {
    dimensions: MapDimensions,
    target: Position,
    topology: Topology,
    distances: Vec<u32>,
}

impl CostField {
    /// Distance stored for cells the flood never reached.
    pub const UNREACHABLE: u32 = u32::MAX;

    /// Floods the field outwards from `target`.
    pub fn compute<F>(
        dimensions: MapDimensions,
        target: Position,
        topology: Topology,
        mut is_walkable: F,
    ) -> Self
    where
        F: FnMut(Position) -> bool,
    {
        let mut distances = vec![Self::UNREACHABLE; dimensions.cell_count()];
        let mut queue = VecDeque::new();

        if let Some(index) = dimensions.index(target) {
            distances[index] = 0;
            queue.push_back(target);
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = dimensions.index(cell) else {
                continue;
            };
            let next_distance = distances[current_index].saturating_add(1);

            for &(dx, dy) in topology.offsets() {
                let neighbor = cell.offset(dx, dy);
                let Some(neighbor_index) = dimensions.index(neighbor) else {
                    continue;
                };
                if distances[neighbor_index] <= next_distance {
                    continue;
                }
                if !is_walkable(neighbor) {
                    continue;
                }

                distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        Self {
            dimensions,
            target,
            topology,
            distances,
        }
    }

    /// Field over the grid's floor cells.
    pub fn for_grid(grid: &Grid, target: Position, topology: Topology) -> Self {
        Self::compute(grid.dimensions(), target, topology, |position| {
            grid.is_walkable(position)
        })
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Steps from `position` to the target, `None` when unreachable or out of
    /// bounds.
    pub fn distance(&self, position: Position) -> Option<u32> {
        self.dimensions
            .index(position)
            .map(|index| self.distances[index])
            .filter(|distance| *distance != Self::UNREACHABLE)
    }

    /// Cells an agent at `from` walks through to reach the target.
    ///
    /// Element 0 is `from` itself and the last element is the target. The
    /// result is empty when `from` cannot reach the target, and has a single
    /// element when `from` is the target.
    pub fn path(&self, from: Position) -> Vec<Position> {
        let Some(mut remaining) = self.distance(from) else {
            return Vec::new();
        };

        let mut path = Vec::with_capacity(remaining as usize + 1);
        let mut current = from;
        path.push(current);

        while remaining > 0 {
            let Some(next) = self.descend(current, remaining) else {
                break;
            };
            current = next;
            remaining -= 1;
            path.push(current);
        }

        path
    }

    /// The cell after `from` on its path, if it has to move at all.
    pub fn next_step(&self, from: Position) -> Option<Position> {
        let remaining = self.distance(from)?;
        if remaining == 0 {
            return None;
        }
        self.descend(from, remaining)
    }

    /// First neighbour (in topology order) one step closer to the target.
    fn descend(&self, from: Position, remaining: u32) -> Option<Position> {
        self.topology
            .offsets()
            .iter()
            .map(|&(dx, dy)| from.offset(dx, dy))
            .find(|neighbor| self.distance(*neighbor) == Some(remaining - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_ascii(
            "\
            #######\n\
            #.....#\n\
            #####.#\n\
            #.....#\n\
            #######\n",
        )
        .unwrap()
    }

    #[test]
    fn path_follows_the_corridor() {
        let grid = corridor();
        let field = CostField::for_grid(&grid, Position::new(1, 3), Topology::Four);
        let path = field.path(Position::new(1, 1));

        assert_eq!(path.first(), Some(&Position::new(1, 1)));
        assert_eq!(path.last(), Some(&Position::new(1, 3)));
        assert_eq!(path.len(), 11);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent4(pair[1]));
        }
        assert!(path.iter().all(|cell| grid.is_walkable(*cell)));
    }

    #[test]
    fn walls_stay_unreachable() {
        let grid = corridor();
        let field = CostField::for_grid(&grid, Position::new(1, 1), Topology::Four);

        assert_eq!(field.distance(Position::new(0, 0)), None);
        assert_eq!(field.distance(Position::new(-1, 1)), None);
        assert!(field.path(Position::new(3, 2)).is_empty());
    }

    #[test]
    fn target_path_is_single_cell() {
        let grid = corridor();
        let target = Position::new(5, 2);
        let field = CostField::for_grid(&grid, target, Topology::Four);

        assert_eq!(field.path(target), vec![target]);
        assert_eq!(field.next_step(target), None);
        assert_eq!(field.next_step(Position::new(5, 1)), Some(target));
    }

    #[test]
    fn disconnected_region_has_no_path() {
        let grid = Grid::from_ascii(
            "\
            .#.\n\
            .#.\n",
        )
        .unwrap();
        let field = CostField::for_grid(&grid, Position::new(0, 0), Topology::Four);

        assert!(field.path(Position::new(2, 1)).is_empty());
        assert_eq!(field.next_step(Position::new(2, 1)), None);
    }

    #[test]
    fn eight_topology_cuts_corners() {
        let grid = Grid::filled(MapDimensions::new(5, 5), crate::env::TerrainKind::Floor);
        let four = CostField::for_grid(&grid, Position::new(4, 4), Topology::Four);
        let eight = CostField::for_grid(&grid, Position::new(4, 4), Topology::Eight);

        assert_eq!(four.distance(Position::ORIGIN), Some(8));
        assert_eq!(eight.distance(Position::ORIGIN), Some(4));
        assert_eq!(eight.path(Position::ORIGIN).len(), 5);
    }
}
