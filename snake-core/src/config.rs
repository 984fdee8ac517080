use serde::{Deserialize, Serialize};

use crate::constants::{
    BONUS_DECAY_INTERVAL_MS, DEFAULT_SEED, DEFAULT_SNAKE_LENGTH, DISPLAY_HEIGHT, DISPLAY_WIDTH,
    GAME_TICK_INTERVAL_MS, MIN_BOARD_SIDE, SNAKE_START_X, SNAKE_STEP, STATUS_BAR_HEIGHT,
};
use crate::error::ConfigError;
use crate::geometry::Board;

/// Everything a session needs to know at startup. The board is whatever the
/// display leaves below the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub display_width: i32,
    pub display_height: i32,
    pub status_bar_height: i32,
    pub tick_interval_ms: u32,
    pub bonus_interval_ms: u32,
    pub start_length: usize,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            status_bar_height: STATUS_BAR_HEIGHT,
            tick_interval_ms: GAME_TICK_INTERVAL_MS,
            bonus_interval_ms: BONUS_DECAY_INTERVAL_MS,
            start_length: DEFAULT_SNAKE_LENGTH,
            seed: DEFAULT_SEED,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn board(&self) -> Board {
        Board::new(
            self.display_width,
            self.display_height - self.status_bar_height,
        )
    }

    /// Longest start snake whose head does not wrap during setup.
    pub fn max_start_length(&self) -> usize {
        let span = self.board().width - SNAKE_START_X;
        if span < 0 {
            return 0;
        }
        (span / SNAKE_STEP) as usize + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = self.board();
        if board.width < MIN_BOARD_SIDE || board.height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width: board.width,
                height: board.height,
                min: MIN_BOARD_SIDE,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { timer: "tick" });
        }
        if self.bonus_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                timer: "bonus decay",
            });
        }

        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }
        let max = self.max_start_length();
        if self.start_length > max {
            return Err(ConfigError::StartSnakeTooLong {
                length: self.start_length,
                max,
            });
        }

        Ok(())
    }
}
