//! Snake core - deterministic game simulation for a wrist-sized display.
//!
//! The crate owns the whole round: the segment chain, apple placement,
//! the fixed-interval tick, the decaying bonus and the round lifecycle.
//! Drawing, haptics and the debrief screen live behind [`Presenter`];
//! timers live behind [`Scheduler`], so the same code runs on a watch
//! event loop or headless under [`VirtualClock`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod apple;
pub mod clock;
pub mod config;
pub mod constants;
pub mod debrief;
pub mod error;
pub mod geometry;
pub mod input;
pub mod presenter;
pub mod rng;
pub mod runner;
pub mod session;
pub mod snake;

pub use apple::{place_apple, Apple};
pub use clock::{Fired, Scheduler, TimerHandle, TimerToken, VirtualClock};
pub use config::SessionConfig;
pub use debrief::Debrief;
pub use error::{ConfigError, ParseButtonError, PlacementError, RuleCode};
pub use geometry::{round_to_nearest_multiple, Board, Position};
pub use input::{Button, Command};
pub use presenter::{NullPresenter, Presenter, PresenterEvent, Recorder};
pub use rng::SeededRng;
pub use runner::{Runner, ScriptedInput};
pub use session::{GameSession, GameState, SessionSnapshot};
pub use snake::{Direction, MoveOutcome, Snake};
