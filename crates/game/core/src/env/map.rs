use crate::config::ConfigError;
use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major offset of `position`, or `None` when it lies outside.
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Canonical terrain classes for grid cells. Floor is the only walkable tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Floor,
    Wall,
    Tree,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    /// Anything that is not floor blocks line of sight.
    pub fn is_opaque(self) -> bool {
        !self.is_passable()
    }

    /// Single-character glyph used by [`Grid::from_ascii`] and debug dumps.
    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
            TerrainKind::Tree => 'T',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            'T' => Some(TerrainKind::Tree),
            _ => None,
        }
    }
}

/// Rectangular terrain map.
///
/// A grid is produced once by the map generator (or a scripted scenario) and
/// is read-only afterwards: there is no public way to edit a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl Grid {
    /// A grid with every cell set to `terrain`.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Self {
        Self {
            dimensions,
            tiles: vec![terrain; dimensions.cell_count()],
        }
    }

    /// Parses a grid from rows of glyphs (`.` floor, `#` wall, `T` tree).
    ///
    /// Blank lines and surrounding whitespace are ignored; all rows must have
    /// the same length.
    pub fn from_ascii(layout: &str) -> Result<Self, ConfigError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ConfigError::MalformedLayout {
                row: 0,
                reason: "layout is empty",
            });
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ConfigError::MalformedLayout {
                    row: row_index,
                    reason: "ragged row",
                });
            }
            for glyph in row.chars() {
                let terrain =
                    TerrainKind::from_glyph(glyph).ok_or(ConfigError::MalformedLayout {
                        row: row_index,
                        reason: "unknown glyph",
                    })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles,
        })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Terrain at `position`, `None` outside the grid.
    pub fn tile(&self, position: Position) -> Option<TerrainKind> {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Bounds-checked walkability: out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(TerrainKind::is_passable)
    }

    /// Out-of-bounds cells are treated as opaque.
    pub fn is_opaque(&self, position: Position) -> bool {
        self.tile(position).is_none_or(TerrainKind::is_opaque)
    }

    /// Iterates `(position, terrain)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, TerrainKind)> + '_ {
        self.dimensions.positions().zip(self.tiles.iter().copied())
    }

    pub fn count(&self, terrain: TerrainKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == terrain).count()
    }

    /// Renders the grid back into glyph rows.
    pub fn to_ascii(&self) -> String {
        let width = self.dimensions.width as usize;
        let mut out = String::with_capacity(self.tiles.len() + self.dimensions.height as usize);
        for row in self.tiles.chunks(width.max(1)) {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        out
    }

    /// Generation-time write access; the map generator is the only writer.
    pub(crate) fn set(&mut self, position: Position, terrain: TerrainKind) -> bool {
        match self.dimensions.index(position) {
            Some(index) => {
                self.tiles[index] = terrain;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_layout_round_trips() {
        let layout = "\
            ..#\n\
            T..\n";
        let grid = Grid::from_ascii(layout).unwrap();

        assert_eq!(grid.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(grid.tile(Position::new(2, 0)), Some(TerrainKind::Wall));
        assert_eq!(grid.tile(Position::new(0, 1)), Some(TerrainKind::Tree));
        assert_eq!(grid.to_ascii(), "..#\nT..\n");
    }

    #[test]
    fn ragged_layout_is_rejected() {
        let result = Grid::from_ascii("...\n..\n");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedLayout { row: 1, .. })
        ));
    }

    #[test]
    fn out_of_bounds_is_blocked_and_opaque() {
        let grid = Grid::filled(MapDimensions::new(4, 4), TerrainKind::Floor);

        for position in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(4, 0),
            Position::new(0, 4),
        ] {
            assert_eq!(grid.tile(position), None);
            assert!(!grid.is_walkable(position));
            assert!(grid.is_opaque(position));
        }
        assert!(grid.is_walkable(Position::new(3, 3)));
    }

    #[test]
    fn only_floor_is_passable() {
        use strum::IntoEnumIterator;

        let passable: Vec<_> = TerrainKind::iter().filter(|t| t.is_passable()).collect();
        assert_eq!(passable, vec![TerrainKind::Floor]);
    }
}
