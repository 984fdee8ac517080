use alloc::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::SNAKE_STEP;
use crate::geometry::{Board, Position};

/// Heading, in clockwise order. The discriminant is the turn index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    #[default]
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 3) as usize]
    }

    #[inline]
    pub fn turned_ccw(self) -> Self {
        Self::from_index(self.index().wrapping_add(3))
    }

    #[inline]
    pub fn turned_cw(self) -> Self {
        Self::from_index(self.index().wrapping_add(1))
    }

    /// One full step (body diameter plus spacing) in this direction.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Right => (SNAKE_STEP, 0),
            Direction::Down => (0, SNAKE_STEP),
            Direction::Left => (-SNAKE_STEP, 0),
            Direction::Up => (0, -SNAKE_STEP),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Clear,
    Collided,
}

/// Segment chain, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        let mut segments = VecDeque::with_capacity(32);
        segments.push_back(head);
        Self {
            segments,
            direction: Direction::Right,
        }
    }

    /// Build a snake from explicit segments, head first. `None` when empty.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments,
            direction,
        })
    }

    /// Drop everything but the head and move it back to `head`.
    pub fn reset(&mut self, head: Position) {
        self.segments.truncate(1);
        if let Some(first) = self.segments.front_mut() {
            *first = head;
        } else {
            self.segments.push_back(head);
        }
        self.direction = Direction::Right;
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[inline]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn turn_ccw(&mut self) {
        self.direction = self.direction.turned_ccw();
    }

    pub fn turn_cw(&mut self) {
        self.direction = self.direction.turned_cw();
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.segments.iter()
    }

    /// Prepend a new head one step ahead of the current one.
    pub fn grow_head(&mut self) {
        let (dx, dy) = self.direction.step();
        let next = self.head().offset(dx, dy);
        self.segments.push_front(next);
    }

    /// Wrap the head if the previous move left the board, step forward and
    /// drop the tail. Collision compares the new head against every segment
    /// except itself and the tail that is about to leave.
    pub fn advance(&mut self, board: &Board) -> MoveOutcome {
        let wrapped = board.wrap(self.head());
        self.segments[0] = wrapped;

        self.grow_head();
        let head = self.head();
        let last = self.segments.len() - 1;
        let collided = self
            .segments
            .range(1..last)
            .any(|segment| *segment == head);

        self.segments.pop_back();

        if collided {
            MoveOutcome::Collided
        } else {
            MoveOutcome::Clear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SNAKE_BODY_WIDTH, SNAKE_START_X, SNAKE_START_Y};

    fn board() -> Board {
        Board::new(144, 152)
    }

    fn straight(head: Position, len: usize, direction: Direction) -> Snake {
        let (dx, dy) = direction.step();
        Snake::from_segments(
            (0..len as i32).map(|i| head.offset(-dx * i, -dy * i)),
            direction,
        )
        .expect("non-empty")
    }

    #[test]
    fn ccw_from_right_is_up_and_cw_from_up_is_right() {
        assert_eq!(Direction::Right.turned_ccw(), Direction::Up);
        assert_eq!(Direction::Up.turned_cw(), Direction::Right);
        assert_eq!(Direction::Down.turned_ccw(), Direction::Right);
        assert_eq!(Direction::Left.turned_cw(), Direction::Up);
        for d in Direction::ALL {
            assert_eq!(d.turned_ccw().turned_cw(), d);
        }
    }

    #[test]
    fn grow_head_prepends_one_step_ahead() {
        let mut snake = Snake::new(Position::new(SNAKE_START_X, SNAKE_START_Y));
        snake.grow_head();
        snake.grow_head();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(25, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));
    }

    #[test]
    fn advance_moves_head_one_step_and_keeps_length() {
        let mut snake = straight(Position::new(5, 5), 3, Direction::Right);
        assert_eq!(snake.advance(&board()), MoveOutcome::Clear);
        assert_eq!(snake.head(), Position::new(15, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(-5, 5));
    }

    #[test]
    fn advance_wraps_head_that_left_the_board() {
        let mut snake = straight(Position::new(145, 25), 2, Direction::Right);
        snake.advance(&board());
        assert_eq!(snake.head(), Position::new(-SNAKE_BODY_WIDTH + 10, 25));
        assert_eq!(snake.len(), 2);

        let mut snake = straight(Position::new(25, -5), 2, Direction::Up);
        snake.advance(&board());
        assert_eq!(snake.head(), Position::new(25, 142));
    }

    #[test]
    fn head_entering_body_collides() {
        // Five segments curled so that turning down lands on segment 3.
        let mut snake = Snake::from_segments(
            [
                Position::new(25, 15),
                Position::new(15, 15),
                Position::new(15, 25),
                Position::new(25, 25),
                Position::new(35, 25),
            ],
            Direction::Down,
        )
        .expect("non-empty");
        assert_eq!(snake.advance(&board()), MoveOutcome::Collided);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn head_entering_vacated_tail_does_not_collide() {
        let mut snake = Snake::from_segments(
            [
                Position::new(25, 15),
                Position::new(15, 15),
                Position::new(15, 25),
                Position::new(25, 25),
            ],
            Direction::Down,
        )
        .expect("non-empty");
        assert_eq!(snake.advance(&board()), MoveOutcome::Clear);
    }

    #[test]
    fn reset_keeps_only_the_head() {
        let mut snake = straight(Position::new(55, 55), 6, Direction::Left);
        snake.reset(Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn from_segments_rejects_empty_chain() {
        assert!(Snake::from_segments(Vec::<Position>::new(), Direction::Up).is_none());
    }
}
