//! Timer plumbing. The session never blocks: handlers re-arm themselves
//! through a [`Scheduler`] and keep the returned handle so teardown can
//! cancel whatever is still pending.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Which handler a timer wakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerToken {
    Tick,
    BonusDecay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) -> TimerHandle;

    /// Returns `false` when the timer already fired or was never scheduled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub token: TimerToken,
    pub at_ms: u64,
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    due_ms: u64,
    handle: TimerHandle,
    token: TimerToken,
}

/// Deterministic single-threaded event queue with a manual clock.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|timer| timer.token == token)
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|timer| timer.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.handle))?;

        let timer = self.pending.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(Fired {
            handle: timer.handle,
            token: timer.token,
            at_ms: timer.due_ms,
        })
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            due_ms: self.now_ms + u64::from(delay_ms),
            handle,
            token,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut clock = VirtualClock::new();
        let bonus = clock.schedule(500, TimerToken::BonusDecay);
        let tick = clock.schedule(100, TimerToken::Tick);
        let late_tick = clock.schedule(500, TimerToken::Tick);

        assert_eq!(clock.next_due_ms(), Some(100));
        assert_eq!(clock.pop_due(99), None);

        let first = clock.pop_due(1_000).expect("tick due");
        assert_eq!((first.handle, first.at_ms), (tick, 100));
        assert_eq!(clock.now_ms(), 100);

        let second = clock.pop_due(1_000).expect("bonus due");
        assert_eq!(second.handle, bonus);
        let third = clock.pop_due(1_000).expect("late tick due");
        assert_eq!(third.handle, late_tick);
        assert_eq!(clock.pop_due(1_000), None);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut clock = VirtualClock::new();
        let tick = clock.schedule(100, TimerToken::Tick);
        assert!(clock.cancel(tick));
        assert!(!clock.cancel(tick));
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.pop_due(u64::MAX), None);
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut clock = VirtualClock::new();
        clock.advance_to(250);
        clock.schedule(100, TimerToken::Tick);
        assert_eq!(clock.next_due_ms(), Some(350));
        clock.advance_to(10);
        assert_eq!(clock.now_ms(), 250);
    }
}
