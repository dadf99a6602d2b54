//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::ObstacleKind;

/// Marker for a zombie. `spawn_seq` fixes list order for collision tie-breaks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Zombie {
    pub spawn_seq: u64,
}

/// Marker for a player projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub spawn_seq: u64,
}

/// World position and facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Radians; zero looks down negative z.
    pub yaw: f32,
}

/// Per-tick displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Static collision obstacle on the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub radius: f32,
}

/// Arena boundary plane. The entity's `Transform` holds a point on the plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    /// Unit normal pointing into the arena.
    pub inward_normal: Vec3,
}
