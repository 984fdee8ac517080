use serde::{Deserialize, Serialize};

use crate::constants::SNAKE_BODY_WIDTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// `max(|dx|, |dy|)`
    #[inline]
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Snap `value` up onto the `multiple` grid. Values already on the grid are
/// returned unchanged.
#[inline]
pub fn round_to_nearest_multiple(value: i32, multiple: i32) -> i32 {
    debug_assert!(multiple > 0);
    let rem = value.rem_euclid(multiple);
    if rem == 0 {
        value
    } else {
        value + (multiple - rem)
    }
}

/// Playing field below the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: Position) -> bool {
        (0..=self.width).contains(&p.x) && (0..=self.height).contains(&p.y)
    }

    /// Re-enter a position that left the board on the opposite edge.
    ///
    /// Leaving past the far edge re-enters half a body width before the near
    /// edge, so the next step lands back on the same column/row.
    pub fn wrap(&self, p: Position) -> Position {
        let x = if p.x > self.width {
            -SNAKE_BODY_WIDTH
        } else if p.x < 0 {
            self.width
        } else {
            p.x
        };
        let y = if p.y > self.height {
            -SNAKE_BODY_WIDTH
        } else if p.y < 0 {
            self.height
        } else {
            p.y
        };
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiples_are_returned_unchanged() {
        for value in [0, 5, 10, 135, -5] {
            assert_eq!(round_to_nearest_multiple(value, 5), value);
        }
    }

    #[test]
    fn other_values_round_up_to_next_multiple() {
        assert_eq!(round_to_nearest_multiple(1, 5), 5);
        assert_eq!(round_to_nearest_multiple(4, 5), 5);
        assert_eq!(round_to_nearest_multiple(6, 5), 10);
        assert_eq!(round_to_nearest_multiple(134, 5), 135);
        assert_eq!(round_to_nearest_multiple(-3, 5), 0);
        for value in 0..500 {
            let snapped = round_to_nearest_multiple(value, 7);
            assert!(snapped >= value && snapped - value < 7);
            assert_eq!(snapped % 7, 0);
        }
    }

    #[test]
    fn chebyshev_is_max_axis_distance() {
        let a = Position::new(5, 5);
        assert_eq!(a.chebyshev(Position::new(15, 8)), 10);
        assert_eq!(a.chebyshev(Position::new(2, -20)), 25);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn wrap_moves_to_opposite_edge() {
        let board = Board::new(144, 152);
        assert_eq!(board.wrap(Position::new(145, 5)), Position::new(-5, 5));
        assert_eq!(board.wrap(Position::new(-5, 5)), Position::new(144, 5));
        assert_eq!(board.wrap(Position::new(25, 155)), Position::new(25, -5));
        assert_eq!(board.wrap(Position::new(25, -1)), Position::new(25, 152));
        assert_eq!(board.wrap(Position::new(144, 152)), Position::new(144, 152));
    }
}
