//! Camera window clamping for the rendering collaborator.
//!
//! Pure functions of (focus position, viewport size, map size); nothing here
//! affects gameplay.
use crate::env::MapDimensions;
use crate::state::Position;

/// Size of the camera window in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const DEFAULT_WIDTH: u32 = 50;
    pub const DEFAULT_HEIGHT: u32 = 50;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Top-left map cell of a window centred on `focus`, clamped per axis to
    /// `[0, map - viewport]`. Maps smaller than the window pin it at zero.
    pub fn top_left(&self, focus: Position, map: MapDimensions) -> Position {
        Position::new(
            clamp_axis(focus.x, self.width, map.width),
            clamp_axis(focus.y, self.height, map.height),
        )
    }

    /// Window-relative coordinates of `position`, or `None` when it falls
    /// outside the window starting at `origin`.
    pub fn to_screen(&self, origin: Position, position: Position) -> Option<(u32, u32)> {
        let dx = position.x - origin.x;
        let dy = position.y - origin.y;
        if dx < 0 || dy < 0 || dx as u32 >= self.width || dy as u32 >= self.height {
            return None;
        }
        Some((dx as u32, dy as u32))
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

fn clamp_axis(focus: i32, window: u32, map: u32) -> i32 {
    let desired = i64::from(focus) - i64::from(window / 2);
    let upper = i64::from(map.saturating_sub(window));
    desired.clamp(0, upper) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: MapDimensions = MapDimensions::new(100, 100);

    #[test]
    fn centred_when_room_allows() {
        let viewport = ViewportSize::new(50, 50);
        assert_eq!(
            viewport.top_left(Position::new(60, 40), MAP),
            Position::new(35, 15)
        );
    }

    #[test]
    fn clamped_at_both_edges() {
        let viewport = ViewportSize::new(50, 50);
        assert_eq!(viewport.top_left(Position::new(3, 2), MAP), Position::ORIGIN);
        assert_eq!(
            viewport.top_left(Position::new(99, 98), MAP),
            Position::new(50, 50)
        );
    }

    #[test]
    fn window_larger_than_map_pins_to_origin() {
        let viewport = ViewportSize::new(80, 80);
        let small = MapDimensions::new(20, 30);
        assert_eq!(
            viewport.top_left(Position::new(19, 29), small),
            Position::ORIGIN
        );
    }

    #[test]
    fn screen_mapping_respects_window() {
        let viewport = ViewportSize::new(10, 5);
        let origin = Position::new(4, 4);
        assert_eq!(viewport.to_screen(origin, Position::new(4, 4)), Some((0, 0)));
        assert_eq!(viewport.to_screen(origin, Position::new(13, 8)), Some((9, 4)));
        assert_eq!(viewport.to_screen(origin, Position::new(14, 8)), None);
        assert_eq!(viewport.to_screen(origin, Position::new(3, 5)), None);
    }
}
