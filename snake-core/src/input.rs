use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseButtonError;

/// Physical buttons on the watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Select,
    Up,
    Down,
}

/// What a button press asks the next tick to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    TurnCcw,
    TurnCw,
    TogglePause,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Select => Command::TogglePause,
            Button::Up => Command::TurnCcw,
            Button::Down => Command::TurnCw,
        }
    }
}

impl FromStr for Button {
    type Err = ParseButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" | "s" => Ok(Button::Select),
            "up" | "u" => Ok(Button::Up),
            "down" | "d" => Ok(Button::Down),
            other => Err(ParseButtonError {
                found: other.into(),
            }),
        }
    }
}
