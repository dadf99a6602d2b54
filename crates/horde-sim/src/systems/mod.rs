//! ECS systems that operate on the arena world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Session-level bookkeeping (score, missions, persistence) stays in the engine.

pub mod combat;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod zombie_ai;
