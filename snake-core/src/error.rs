use core::fmt;

/// Invariants a live session must hold after every handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    SnakeEmpty,
    AppleOutOfBounds,
    AppleOffGrid,
    BonusAboveCap,
    ScoreBelowGrowth,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakeEmpty => write!(f, "SNAKE_EMPTY"),
            Self::AppleOutOfBounds => write!(f, "APPLE_OUT_OF_BOUNDS"),
            Self::AppleOffGrid => write!(f, "APPLE_OFF_GRID"),
            Self::BonusAboveCap => write!(f, "BONUS_ABOVE_CAP"),
            Self::ScoreBelowGrowth => write!(f, "SCORE_BELOW_GROWTH"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall { width: i32, height: i32, min: i32 },
    ZeroInterval { timer: &'static str },
    ZeroStartLength,
    StartSnakeTooLong { length: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardTooSmall { width, height, min } => write!(
                f,
                "board {width}x{height} is too small: both sides must be at least {min}px"
            ),
            Self::ZeroInterval { timer } => write!(f, "{timer} interval must be > 0"),
            Self::ZeroStartLength => write!(f, "start length must be > 0"),
            Self::StartSnakeTooLong { length, max } => {
                write!(f, "start length {length} does not fit the board (max {max})")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    BoardFull { cells_scanned: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardFull { cells_scanned } => {
                write!(f, "no free apple cell among {cells_scanned} candidates")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseButtonError {
    pub found: alloc::string::String,
}

impl fmt::Display for ParseButtonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown button `{}` (expected select, up or down)",
            self.found
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for ParseButtonError {}
