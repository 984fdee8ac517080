//! Headless event loop: one session, one virtual clock, one presenter.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::clock::{TimerToken, VirtualClock};
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::input::Button;
use crate::presenter::Presenter;
use crate::session::GameSession;

/// A button press at an absolute time since the round started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub at_ms: u64,
    pub button: Button,
}

pub struct Runner<P: Presenter> {
    session: GameSession,
    clock: VirtualClock,
    presenter: P,
}

impl<P: Presenter> Runner<P> {
    /// Build a session and start its first round.
    pub fn new(config: SessionConfig, presenter: P) -> Result<Self, ConfigError> {
        let mut clock = VirtualClock::new();
        let mut session = GameSession::new(config)?;
        session.start(&mut clock);
        Ok(Self {
            session,
            clock,
            presenter,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// The round ended on its own and is waiting for a restart.
    pub fn is_over(&self) -> bool {
        self.session.state().resetting
    }

    pub fn press(&mut self, button: Button) {
        self.session.press(button);
    }

    /// Fire every timer due up to `until_ms`, then park the clock there.
    /// Returns the number of timers dispatched.
    pub fn run_until(&mut self, until_ms: u64) -> usize {
        let mut dispatched = 0;
        while let Some(fired) = self.clock.pop_due(until_ms) {
            self.session
                .on_timer(fired, &mut self.clock, &mut self.presenter);
            dispatched += 1;
        }
        self.clock.advance_to(until_ms);
        dispatched
    }

    /// Replay presses at their timestamps, then keep running to `until_ms`.
    /// Presses landing on the same instant as a tick are seen by that tick.
    pub fn run_script(&mut self, inputs: &[ScriptedInput], until_ms: u64) {
        let mut ordered: Vec<ScriptedInput> = inputs.to_vec();
        ordered.sort_by_key(|input| input.at_ms);

        for input in ordered {
            if input.at_ms > until_ms {
                break;
            }
            self.run_until(input.at_ms.saturating_sub(1));
            self.clock.advance_to(input.at_ms);
            self.press(input.button);
        }
        self.run_until(until_ms);
    }

    /// Drive the round with `policy`, consulted right before every tick.
    /// Stops when the round is over or `max_ms` is reached; returns whether
    /// the round ended.
    pub fn run_with_policy<F>(&mut self, max_ms: u64, mut policy: F) -> bool
    where
        F: FnMut(&GameSession) -> Option<Button>,
    {
        while !self.is_over() {
            let Some(due) = self.clock.next_due_ms() else {
                break;
            };
            if due > max_ms {
                break;
            }
            let Some(fired) = self.clock.pop_due(due) else {
                break;
            };
            if fired.token == TimerToken::Tick {
                if let Some(button) = policy(&self.session) {
                    self.session.press(button);
                }
            }
            self.session
                .on_timer(fired, &mut self.clock, &mut self.presenter);
        }
        self.is_over()
    }

    /// Start the next round once the debrief has been dismissed.
    pub fn restart(&mut self) {
        self.session.start(&mut self.clock);
    }

    pub fn close(&mut self) {
        self.session.close(&mut self.clock, &mut self.presenter);
    }
}
