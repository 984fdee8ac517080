//! Game constants. Distances are display pixels, timers are milliseconds.

// Display (144x168 wearable panel, status bar on top)
pub const DISPLAY_WIDTH: i32 = 144;
pub const DISPLAY_HEIGHT: i32 = 168;
pub const STATUS_BAR_HEIGHT: i32 = 16;

// Smallest playable board side; below this the apple has nowhere to go.
pub const MIN_BOARD_SIDE: i32 = 40;

// Snake
pub const SNAKE_BODY_WIDTH: i32 = 5;
pub const SNAKE_BODY_SPACING: i32 = 0;
pub const SNAKE_STEP: i32 = 2 * SNAKE_BODY_WIDTH + SNAKE_BODY_SPACING; // 10px per tick
pub const SNAKE_START_X: i32 = SNAKE_BODY_WIDTH;
pub const SNAKE_START_Y: i32 = SNAKE_BODY_WIDTH;
pub const DEFAULT_SNAKE_LENGTH: usize = 3;

// Apple
pub const APPLE_SIZE: i32 = 5;
pub const APPLE_EXCLUSION: i32 = 2 * APPLE_SIZE;
pub const APPLE_PLACEMENT_ATTEMPTS: u32 = 64;

// Timers
pub const GAME_TICK_INTERVAL_MS: u32 = 100;
pub const BONUS_DECAY_INTERVAL_MS: u32 = 500;

// Debrief buckets: min(score, 189) / 21 -> 0..=9
pub const DEBRIEF_SCORE_CAP: u32 = 189;
pub const DEBRIEF_BUCKET_WIDTH: u32 = 21;
pub const COMPLIMENTS_PER_TITLE: usize = 5;

pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;
