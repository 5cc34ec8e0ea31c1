//! Recursive-division maze.
//!
//! Each open chamber is split by one horizontal and one vertical wall at even
//! coordinates; three of the four resulting wall segments get a single hole,
//! the fourth stays solid. The four sub-chambers are queued and split in turn
//! until no chamber has room for another cross.

use std::collections::VecDeque;

use crate::env::{MapDimensions, RandomSource};
use crate::state::Position;

use super::CellMask;

/// Inclusive chamber bounds.
#[derive(Clone, Copy, Debug)]
struct Chamber {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

/// Builds a divided maze. Set cells are walls; the border is always wall.
pub fn divide<R: RandomSource + ?Sized>(dimensions: MapDimensions, rng: &mut R) -> CellMask {
    let mut walls = CellMask::new(dimensions, false);
    let width = dimensions.width as i32;
    let height = dimensions.height as i32;

    for position in dimensions.positions() {
        if position.x == 0 || position.y == 0 || position.x == width - 1 || position.y == height - 1
        {
            walls.set(position, true);
        }
    }

    let mut chambers = VecDeque::from([Chamber {
        left: 1,
        top: 1,
        right: width - 2,
        bottom: height - 2,
    }]);
    let mut splits = 0usize;
    while let Some(chamber) = chambers.pop_front() {
        if let Some(children) = split(&mut walls, chamber, rng) {
            splits += 1;
            chambers.extend(children);
        }
    }

    tracing::debug!(splits, walls = walls.count_set(), "maze divided");
    walls
}

fn split<R: RandomSource + ?Sized>(
    walls: &mut CellMask,
    chamber: Chamber,
    rng: &mut R,
) -> Option<[Chamber; 4]> {
    let columns: Vec<i32> = (chamber.left + 1..chamber.right)
        .filter(|x| x % 2 == 0)
        .filter(|x| {
            walls.get(Position::new(*x, chamber.top - 1))
                && walls.get(Position::new(*x, chamber.bottom + 1))
        })
        .collect();
    let rows: Vec<i32> = (chamber.top + 1..chamber.bottom)
        .filter(|y| y % 2 == 0)
        .filter(|y| {
            walls.get(Position::new(chamber.left - 1, *y))
                && walls.get(Position::new(chamber.right + 1, *y))
        })
        .collect();

    let x = columns[rng.index(columns.len())?];
    let y = rows[rng.index(rows.len())?];
    walls.set(Position::new(x, y), true);

    let segments: [Vec<Position>; 4] = [
        (chamber.left..x).map(|i| Position::new(i, y)).collect(),
        (x + 1..=chamber.right).map(|i| Position::new(i, y)).collect(),
        (chamber.top..y).map(|j| Position::new(x, j)).collect(),
        (y + 1..=chamber.bottom).map(|j| Position::new(x, j)).collect(),
    ];
    for cell in segments.iter().flatten() {
        walls.set(*cell, true);
    }

    let solid = rng.index(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        if Some(index) == solid {
            continue;
        }
        if let Some(hole) = rng.index(segment.len()) {
            walls.set(segment[hole], false);
        }
    }

    Some([
        Chamber {
            left: chamber.left,
            top: chamber.top,
            right: x - 1,
            bottom: y - 1,
        },
        Chamber {
            left: x + 1,
            top: chamber.top,
            right: chamber.right,
            bottom: y - 1,
        },
        Chamber {
            left: chamber.left,
            top: y + 1,
            right: x - 1,
            bottom: chamber.bottom,
        },
        Chamber {
            left: x + 1,
            top: y + 1,
            right: chamber.right,
            bottom: chamber.bottom,
        },
    ])
}
