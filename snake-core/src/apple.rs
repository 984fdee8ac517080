use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::constants::{APPLE_EXCLUSION, APPLE_PLACEMENT_ATTEMPTS, APPLE_SIZE, SNAKE_BODY_WIDTH};
use crate::error::PlacementError;
use crate::geometry::{round_to_nearest_multiple, Board, Position};
use crate::rng::SeededRng;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Head within 1.5 apple sizes on both axes. Compared doubled to stay in
    /// integers.
    pub fn is_eaten_by(&self, head: Position) -> bool {
        let dx = (head.x - self.position.x).abs();
        let dy = (head.y - self.position.y).abs();
        2 * dx < 3 * APPLE_SIZE && 2 * dy < 3 * APPLE_SIZE
    }
}

/// Largest raw coordinate an apple may be drawn at on an axis of `extent`.
#[inline]
fn max_raw(extent: i32) -> i32 {
    extent - 2 * SNAKE_BODY_WIDTH
}

#[inline]
fn is_clear(candidate: Position, snake: &Snake) -> bool {
    snake
        .segments()
        .all(|segment| candidate.chebyshev(*segment) >= APPLE_EXCLUSION)
}

fn random_candidate(board: &Board, rng: &mut SeededRng) -> Position {
    let x = rng.next_range(1, max_raw(board.width) + 1);
    let y = rng.next_range(1, max_raw(board.height) + 1);
    Position::new(
        round_to_nearest_multiple(x, APPLE_SIZE),
        round_to_nearest_multiple(y, APPLE_SIZE),
    )
}

/// Every grid cell a random draw could snap to.
fn grid_cells(board: &Board) -> impl Iterator<Item = Position> {
    let first = round_to_nearest_multiple(1, APPLE_SIZE);
    let last_x = round_to_nearest_multiple(max_raw(board.width), APPLE_SIZE);
    let last_y = round_to_nearest_multiple(max_raw(board.height), APPLE_SIZE);
    (first..=last_y)
        .step_by(APPLE_SIZE as usize)
        .flat_map(move |y| {
            (first..=last_x)
                .step_by(APPLE_SIZE as usize)
                .map(move |x| Position::new(x, y))
        })
}

/// Pick an apple cell clear of every snake segment.
///
/// Random draws first; once `APPLE_PLACEMENT_ATTEMPTS` are rejected, every
/// grid cell is scanned and one of the free ones is chosen.
pub fn place_apple(
    board: &Board,
    snake: &Snake,
    rng: &mut SeededRng,
) -> Result<Position, PlacementError> {
    for _ in 0..APPLE_PLACEMENT_ATTEMPTS {
        let candidate = random_candidate(board, rng);
        if is_clear(candidate, snake) {
            return Ok(candidate);
        }
    }

    let mut scanned = 0usize;
    let free: Vec<Position> = grid_cells(board)
        .inspect(|_| scanned += 1)
        .filter(|cell| is_clear(*cell, snake))
        .collect();

    tracing::warn!(
        attempts = APPLE_PLACEMENT_ATTEMPTS,
        free = free.len(),
        "random apple placement exhausted, scanned grid"
    );

    if free.is_empty() {
        return Err(PlacementError::BoardFull {
            cells_scanned: scanned,
        });
    }
    Ok(free[rng.next_index(free.len())])
}
