//! First-person player controller: movement, arena collision and rate-limited turning.

use std::time::Duration;

use glam::Vec3;
use hecs::World;

use horde_core::commands::MovementInput;
use horde_core::components::{Obstacle, Transform, Wall};
use horde_core::constants::*;
use horde_core::types::{flatten, forward_from_yaw, ground_distance, right_from_yaw};

use crate::world_setup::player_start;

#[derive(Debug, Clone)]
pub struct PlayerController {
    position: Vec3,
    yaw: f32,
    movement: MovementInput,
    /// Drag accumulated since the last applied rotation.
    pending_drag: f32,
    last_rotation_at: Option<Duration>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            position: player_start(),
            yaw: 0.0,
            movement: MovementInput::default(),
            pending_drag: 0.0,
            last_rotation_at: None,
        }
    }
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Camera look direction on the floor plane.
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    pub fn set_movement(&mut self, input: MovementInput) {
        self.movement = input;
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.yaw = yaw;
    }

    /// Apply one tick of the held movement intent.
    ///
    /// The whole step is rejected if the destination collides with anything.
    /// Returns the distance actually moved.
    pub fn apply_movement(&mut self, world: &World, speed_multiplier: f32) -> f32 {
        let input = self.movement;
        if input.is_idle() {
            return 0.0;
        }
        let magnitude = if input.magnitude > 0.0 {
            input.magnitude.min(1.0)
        } else {
            1.0
        };
        let speed = PLAYER_BASE_SPEED * speed_multiplier * magnitude;
        let forward = self.forward();
        let right = right_from_yaw(self.yaw);

        let mut step = Vec3::ZERO;
        if input.forward {
            step += forward * speed;
        }
        if input.backward {
            step -= forward * speed;
        }
        if input.left {
            step -= right * speed;
        }
        if input.right {
            step += right * speed;
        }
        if step == Vec3::ZERO {
            return 0.0;
        }

        let candidate = self.position + step;
        if is_blocked(world, candidate, forward) {
            return 0.0;
        }
        self.position = candidate;
        step.length()
    }

    /// Turn by a horizontal drag of `delta_x` pixels at session time `now`.
    ///
    /// At most one update is applied per `ROTATION_UPDATE_INTERVAL`; drag that
    /// arrives in between is carried into the next update. Returns whether
    /// the yaw changed.
    pub fn apply_rotation(&mut self, delta_x: f32, now: Duration) -> bool {
        self.pending_drag += delta_x;
        if let Some(last) = self.last_rotation_at {
            if now.saturating_sub(last) < ROTATION_UPDATE_INTERVAL {
                return false;
            }
        }
        let drag = std::mem::take(&mut self.pending_drag);
        if drag == 0.0 {
            return false;
        }
        let step = (drag.abs() * ROTATION_SENSITIVITY).min(MAX_ROTATION_PER_UPDATE);
        self.yaw -= drag.signum() * step;
        self.last_rotation_at = Some(now);
        true
    }
}

/// Whether standing at `candidate` while looking along `forward` violates any obstacle or wall.
pub fn is_blocked(world: &World, candidate: Vec3, forward: Vec3) -> bool {
    for (_e, (t, o)) in world.query::<(&Transform, &Obstacle)>().iter() {
        if ground_distance(candidate, t.position) < o.radius {
            return true;
        }
    }
    for (_e, (t, w)) in world.query::<(&Transform, &Wall)>().iter() {
        let clearance = flatten(candidate - t.position).dot(w.inward_normal);
        let facing = -forward.dot(w.inward_normal);
        if clearance < WALL_RADIUS && facing > WALL_FACING_THRESHOLD {
            return true;
        }
    }
    false
}
