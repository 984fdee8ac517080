use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::apple::Apple;
use crate::geometry::Position;
use crate::snake::Snake;

/// The display, vibration motor and results screen as seen by the
/// simulation. Implementations must not call back into the session.
pub trait Presenter {
    fn render(&mut self, snake: &Snake, apple: &Apple);
    fn set_score_text(&mut self, text: &str);
    fn set_bonus_text(&mut self, text: &str);
    fn short_pulse(&mut self);
    fn double_pulse(&mut self);
    fn show_debrief(&mut self, score: u32);
}

/// Discards everything. Useful for batch runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _snake: &Snake, _apple: &Apple) {}
    fn set_score_text(&mut self, _text: &str) {}
    fn set_bonus_text(&mut self, _text: &str) {}
    fn short_pulse(&mut self) {}
    fn double_pulse(&mut self) {}
    fn show_debrief(&mut self, _score: u32) {}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresenterEvent {
    Render {
        head: Position,
        length: usize,
        apple: Position,
    },
    ScoreText {
        text: String,
    },
    BonusText {
        text: String,
    },
    ShortPulse,
    DoublePulse,
    Debrief {
        score: u32,
    },
}

/// Keeps every call in order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub events: Vec<PresenterEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn renders(&self) -> usize {
        self.count(|event| matches!(event, PresenterEvent::Render { .. }))
    }

    pub fn short_pulses(&self) -> usize {
        self.count(|event| matches!(event, PresenterEvent::ShortPulse))
    }

    pub fn double_pulses(&self) -> usize {
        self.count(|event| matches!(event, PresenterEvent::DoublePulse))
    }

    pub fn debriefs(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Debrief { score } => Some(*score),
                _ => None,
            })
            .collect()
    }

    pub fn last_score_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::ScoreText { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_bonus_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::BonusText { text } => Some(text.as_str()),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&PresenterEvent) -> bool) -> usize {
        self.events.iter().filter(|event| pred(event)).count()
    }
}

impl Presenter for Recorder {
    fn render(&mut self, snake: &Snake, apple: &Apple) {
        self.events.push(PresenterEvent::Render {
            head: snake.head(),
            length: snake.len(),
            apple: apple.position,
        });
    }

    fn set_score_text(&mut self, text: &str) {
        self.events.push(PresenterEvent::ScoreText {
            text: text.to_string(),
        });
    }

    fn set_bonus_text(&mut self, text: &str) {
        self.events.push(PresenterEvent::BonusText {
            text: text.to_string(),
        });
    }

    fn short_pulse(&mut self) {
        self.events.push(PresenterEvent::ShortPulse);
    }

    fn double_pulse(&mut self) {
        self.events.push(PresenterEvent::DoublePulse);
    }

    fn show_debrief(&mut self, score: u32) {
        self.events.push(PresenterEvent::Debrief { score });
    }
}
