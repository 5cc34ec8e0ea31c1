//! Room-and-corridor digger.
//!
//! Starts from solid rock with one room in the middle, then repeatedly picks a
//! wall cell on the edge of dug space and tries to attach a room or a corridor
//! beyond it. Stops once the dug share of the interior reaches the configured
//! fraction or the attempt budget runs out.

use crate::action::Direction;
use crate::config::DiggerConfig;
use crate::env::{MapDimensions, RandomSource};
use crate::state::Position;

use super::CellMask;

/// Inclusive cell rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Rect {
    fn cells(self) -> impl Iterator<Item = Position> {
        (self.top..=self.bottom)
            .flat_map(move |y| (self.left..=self.right).map(move |x| Position::new(x, y)))
    }

    fn grown(self, by: i32) -> Self {
        Self {
            left: self.left - by,
            top: self.top - by,
            right: self.right + by,
            bottom: self.bottom + by,
        }
    }
}

/// Runs one digger pass. Set cells are walls.
pub fn dig<R: RandomSource + ?Sized>(
    dimensions: MapDimensions,
    config: &DiggerConfig,
    rng: &mut R,
) -> CellMask {
    let mut digger = Digger {
        config,
        dimensions,
        rock: CellMask::new(dimensions, true),
        candidates: Vec::new(),
        dug: 0,
    };
    digger.run(rng);
    digger.rock
}

struct Digger<'a> {
    config: &'a DiggerConfig,
    dimensions: MapDimensions,
    rock: CellMask,
    /// Wall cells bordering dug space and the direction pointing away from it.
    candidates: Vec<(Position, Direction)>,
    dug: usize,
}

impl Digger<'_> {
    fn run<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let interior = (self.dimensions.width.saturating_sub(2) as usize)
            * (self.dimensions.height.saturating_sub(2) as usize);
        if interior == 0 {
            return;
        }

        self.first_room(rng);

        let target = self.config.dug_fraction;
        let mut attempts = 0;
        while (self.dug as f64) / (interior as f64) < target {
            if attempts >= self.config.max_attempts {
                tracing::warn!(
                    attempts,
                    dug = self.dug,
                    interior,
                    "digger ran out of attempts"
                );
                break;
            }
            attempts += 1;

            let Some(index) = rng.index(self.candidates.len()) else {
                tracing::warn!(dug = self.dug, interior, "digger ran out of walls");
                break;
            };
            let (anchor, direction) = self.candidates[index];
            if !self.is_candidate(anchor, direction) {
                self.candidates.swap_remove(index);
                continue;
            }

            let built = if rng.chance(0.5) {
                self.try_room(anchor, direction, rng)
            } else {
                self.try_corridor(anchor, direction, rng)
            };
            if !built {
                self.candidates.swap_remove(index);
            }
        }

        tracing::debug!(attempts, dug = self.dug, interior, "digger pass finished");
    }

    fn first_room<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let max_width = self.dimensions.width as i32 - 2;
        let max_height = self.dimensions.height as i32 - 2;
        let width = random_span(rng, self.config.room_width).min(max_width);
        let height = random_span(rng, self.config.room_height).min(max_height);

        let left = self.dimensions.width as i32 / 2 - width / 2;
        let top = self.dimensions.height as i32 / 2 - height / 2;
        let room = Rect {
            left: left.max(1),
            top: top.max(1),
            right: (left + width - 1).min(max_width),
            bottom: (top + height - 1).min(max_height),
        };
        self.carve_room(room);
    }

    fn is_interior(&self, position: Position) -> bool {
        position.x >= 1
            && position.y >= 1
            && position.x <= self.dimensions.width as i32 - 2
            && position.y <= self.dimensions.height as i32 - 2
    }

    fn is_rock(&self, position: Position) -> bool {
        self.rock.get(position)
    }

    fn is_candidate(&self, anchor: Position, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        let behind = anchor.offset(-dx, -dy);
        self.is_interior(anchor)
            && self.is_rock(anchor)
            && self.dimensions.contains(behind)
            && !self.is_rock(behind)
    }

    fn carve(&mut self, position: Position) {
        if self.rock.get(position) && self.rock.set(position, false) {
            self.dug += 1;
        }
    }

    fn carve_room(&mut self, room: Rect) {
        for cell in room.cells() {
            self.carve(cell);
        }
        for x in room.left..=room.right {
            self.candidates.push((Position::new(x, room.top - 1), Direction::Up));
            self.candidates.push((Position::new(x, room.bottom + 1), Direction::Down));
        }
        for y in room.top..=room.bottom {
            self.candidates.push((Position::new(room.left - 1, y), Direction::Left));
            self.candidates.push((Position::new(room.right + 1, y), Direction::Right));
        }
    }

    /// Room beyond `anchor`, which becomes its door.
    fn try_room<R: RandomSource + ?Sized>(
        &mut self,
        anchor: Position,
        direction: Direction,
        rng: &mut R,
    ) -> bool {
        let width = random_span(rng, self.config.room_width);
        let height = random_span(rng, self.config.room_height);

        let (left, top) = match direction {
            Direction::Right => (anchor.x + 1, anchor.y - rng.uniform_int(0, height - 1)),
            Direction::Left => (anchor.x - width, anchor.y - rng.uniform_int(0, height - 1)),
            Direction::Down => (anchor.x - rng.uniform_int(0, width - 1), anchor.y + 1),
            Direction::Up => (anchor.x - rng.uniform_int(0, width - 1), anchor.y - height),
        };
        let room = Rect {
            left,
            top,
            right: left + width - 1,
            bottom: top + height - 1,
        };

        let fits = self.is_interior(Position::new(room.left, room.top))
            && self.is_interior(Position::new(room.right, room.bottom));
        if !fits || !room.grown(1).cells().all(|cell| self.is_rock(cell)) {
            return false;
        }

        self.carve(anchor);
        self.carve_room(room);
        true
    }

    /// Straight corridor starting at `anchor` and heading `direction`.
    fn try_corridor<R: RandomSource + ?Sized>(
        &mut self,
        anchor: Position,
        direction: Direction,
        rng: &mut R,
    ) -> bool {
        let length = random_span(rng, self.config.corridor_length);
        let (dx, dy) = direction.delta();
        let sides = direction.perpendicular();

        let cells: Vec<Position> = (0..length)
            .map(|step| anchor.offset(dx * step, dy * step))
            .collect();
        let Some(&end) = cells.last() else {
            return false;
        };

        let clear = cells.iter().all(|cell| {
            self.is_interior(*cell)
                && self.is_rock(*cell)
                && sides.iter().all(|side| {
                    let (sx, sy) = side.delta();
                    self.is_rock(cell.offset(sx, sy))
                })
        });
        if !clear || !self.is_rock(end.offset(dx, dy)) {
            return false;
        }

        for cell in &cells {
            self.carve(*cell);
        }
        self.candidates.push((end.offset(dx, dy), direction));
        for side in sides {
            let (sx, sy) = side.delta();
            self.candidates.push((end.offset(sx, sy), side));
        }
        true
    }
}

fn random_span<R: RandomSource + ?Sized>(rng: &mut R, (min, max): (u32, u32)) -> i32 {
    let min = i32::try_from(min.max(1)).unwrap_or(i32::MAX);
    let max = i32::try_from(max).unwrap_or(i32::MAX).max(min);
    rng.uniform_int(min, max)
}
