//! Headless host for HORDE.
//!
//! Runs a game session on its own thread, feeds it input from the autopilot
//! or from piped commands, and dispatches platform requests when it ends.

pub mod autopilot;
pub mod game_loop;
pub mod platform;
pub mod state;

pub use horde_core as core;
