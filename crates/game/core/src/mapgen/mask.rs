use crate::env::MapDimensions;
use crate::state::Position;

/// One boolean per cell, row-major.
///
/// Generators use it as a raw "wall or not" layer; after [`CellMask::inverted`]
/// the same type serves as an "open" overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMask {
    dimensions: MapDimensions,
    cells: Vec<bool>,
}

impl CellMask {
    pub fn new(dimensions: MapDimensions, fill: bool) -> Self {
        Self {
            dimensions,
            cells: vec![fill; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Flag at `position`; cells outside the mask read as unset.
    pub fn get(&self, position: Position) -> bool {
        self.dimensions
            .index(position)
            .is_some_and(|index| self.cells[index])
    }

    /// Returns `false` when `position` lies outside the mask.
    pub fn set(&mut self, position: Position, value: bool) -> bool {
        match self.dimensions.index(position) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Every bit flipped.
    pub fn inverted(&self) -> Self {
        Self {
            dimensions: self.dimensions,
            cells: self.cells.iter().map(|cell| !cell).collect(),
        }
    }

    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }
}
