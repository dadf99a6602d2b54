//! Session simulation for HORDE.
//!
//! Owns the hecs ECS world, runs the per-frame systems and session timers,
//! and produces `GameStateSnapshot`s for the presentation layer.

pub mod engine;
pub mod player;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{GameRules, GameSession, SessionConfig};
pub use horde_core as core;
pub use horde_progression as progression;

#[cfg(test)]
mod tests;
