//! Host-side driver for `snake-core`: configuration layering, scripted play,
//! terminal rendering and the autopilot benchmark.

pub mod bench;
pub mod config;
pub mod play;
pub mod render;
pub mod script;
pub mod util;
