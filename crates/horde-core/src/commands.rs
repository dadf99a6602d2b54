//! Player commands sent from the input layer to the session.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Directional movement intent, as produced by keys or the virtual joystick.
///
/// `magnitude` is the normalized joystick deflection in `[0, 1]`. Zero with an
/// active direction means digital input and moves at full speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub magnitude: f32,
}

impl MovementInput {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held movement intent. It stays in effect until replaced.
    SetMovement { input: MovementInput },
    /// Horizontal drag since the last rotation event, in pixels.
    Rotate { delta_x: f32 },
    /// Fire one projectile along the camera direction.
    Shoot,
    /// Start a reload.
    Reload,
}
