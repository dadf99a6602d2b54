//! Fundamental identifiers, time tracking and ground-plane geometry.
//!
//! World space follows the renderer convention: y is up, the floor is the
//! x/z plane, and a yaw of zero looks down negative z.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of a mission in the catalog. Missions are evaluated in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub u32);

/// Identifier of an item in the upgrade shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopItemId(pub u32);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mission #{}", self.0)
    }
}

impl fmt::Display for ShopItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item #{}", self.0)
    }
}

/// Session time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTime {
    /// Frames processed while the session was active.
    pub tick: u64,
    /// Elapsed game time in seconds. Frozen once the session ends.
    pub elapsed_secs: f32,
}

impl SessionTime {
    /// Advance by one frame of `dt_secs`.
    pub fn advance(&mut self, dt_secs: f32) {
        self.tick += 1;
        self.elapsed_secs += dt_secs;
    }
}

/// Project a point onto the floor plane.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points ignoring height.
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a).distance(flatten(b))
}

/// Unit vector the camera looks along for a given yaw.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Unit strafe vector for a given yaw (`forward × up`).
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    forward_from_yaw(yaw).cross(Vec3::Y)
}

/// Yaw that makes `forward_from_yaw` point from `from` toward `to` on the floor plane.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    (-d.x).atan2(-d.z)
}

/// Format seconds as `m:ss`.
pub fn format_clock(secs: f32) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
