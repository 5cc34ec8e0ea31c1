//! Field of view via recursive shadowcasting.
//!
//! Each of the eight octants is scanned row by row outwards from the observer;
//! an opaque cell splits the visible slope interval and the part behind it is
//! skipped. Opaque cells themselves are visible, cells behind them are not.

use std::collections::BTreeMap;

use crate::env::Grid;
use crate::state::Position;

/// Octant transforms `(xx, xy, yx, yy)` mapping octant-local `(dx, dy)` onto
/// the grid.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// What the observer perceives of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sight {
    /// Straight-line distance from the observer.
    pub distance: f64,
    /// Light falloff in `[0, 1]`, 1 at the observer.
    pub intensity: f64,
}

/// Cells visible from one observer, recomputed every turn.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityResult {
    observer: Position,
    radius: u32,
    #[cfg_attr(feature = "serde", serde(with = "cells_as_pairs"))]
    cells: BTreeMap<Position, Sight>,
}

/// JSON object keys must be strings, so the cell map travels as a list of
/// `(position, sight)` pairs.
#[cfg(feature = "serde")]
mod cells_as_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::Sight;
    use crate::state::Position;

    pub fn serialize<S>(
        cells: &BTreeMap<Position, Sight>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(cells.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Position, Sight>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(Position, Sight)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl VisibilityResult {
    /// Computes what `observer` sees within `radius` over `grid`.
    ///
    /// Out-of-bounds cells are opaque and never reported. The observer's own
    /// cell is always included at distance zero.
    pub fn compute(grid: &Grid, observer: Position, radius: u32) -> Self {
        let mut result = Self {
            observer,
            radius,
            cells: BTreeMap::new(),
        };

        if !grid.contains(observer) {
            return result;
        }
        result.cells.insert(
            observer,
            Sight {
                distance: 0.0,
                intensity: 1.0,
            },
        );

        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        for transform in OCTANTS {
            let mut scan = OctantScan {
                grid,
                observer,
                radius,
                transform,
                result: &mut result,
            };
            scan.cast(1, 1.0, 0.0);
        }

        result
    }

    pub fn observer(&self) -> Position {
        self.observer
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    pub fn get(&self, position: Position) -> Option<Sight> {
        self.cells.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every visible cell in row-major-insensitive but stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Sight)> + '_ {
        self.cells.iter().map(|(position, sight)| (*position, *sight))
    }

    /// Visible cells except the observer's own, which the renderer draws as
    /// the actor sprite.
    pub fn remote(&self) -> impl Iterator<Item = (Position, Sight)> + '_ {
        let observer = self.observer;
        self.iter().filter(move |(position, _)| *position != observer)
    }

    /// Number of dark layers a renderer stacks over a cell at `distance`:
    /// `round(distance / band)`. Cosmetic only.
    pub fn darkness_layers(distance: f64, band: u32) -> u32 {
        if band == 0 {
            return 0;
        }
        (distance / f64::from(band)).round().max(0.0) as u32
    }

    fn reveal(&mut self, position: Position, dx: i32, dy: i32) {
        let distance = f64::from(dx * dx + dy * dy).sqrt();
        let intensity = (1.0 - distance / (f64::from(self.radius) + 1.0)).clamp(0.0, 1.0);
        self.cells
            .entry(position)
            .or_insert(Sight {
                distance,
                intensity,
            });
    }
}

struct OctantScan<'a> {
    grid: &'a Grid,
    observer: Position,
    radius: i32,
    transform: (i32, i32, i32, i32),
    result: &'a mut VisibilityResult,
}

impl OctantScan<'_> {
    fn cast(&mut self, row: i32, mut start_slope: f64, end_slope: f64) {
        if start_slope < end_slope {
            return;
        }

        let (xx, xy, yx, yy) = self.transform;
        let radius_sq = i64::from(self.radius) * i64::from(self.radius);
        let mut next_start_slope = start_slope;

        for distance in row..=self.radius {
            let dy = -distance;
            let mut blocked = false;

            for dx in -distance..=0 {
                let left_slope = (f64::from(dx) - 0.5) / (f64::from(dy) + 0.5);
                let right_slope = (f64::from(dx) + 0.5) / (f64::from(dy) - 0.5);

                if start_slope < right_slope {
                    continue;
                }
                if end_slope > left_slope {
                    break;
                }

                let cell = self
                    .observer
                    .offset(dx * xx + dy * xy, dx * yx + dy * yy);
                let in_bounds = self.grid.contains(cell);
                let dist_sq = i64::from(dx * dx) + i64::from(dy * dy);
                if in_bounds && dist_sq <= radius_sq {
                    self.result.reveal(cell, dx, dy);
                }

                let opaque = self.grid.is_opaque(cell);
                if blocked {
                    if opaque {
                        next_start_slope = right_slope;
                        continue;
                    }
                    blocked = false;
                    start_slope = next_start_slope;
                } else if opaque && distance < self.radius {
                    blocked = true;
                    self.cast(distance + 1, start_slope, left_slope);
                    next_start_slope = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
