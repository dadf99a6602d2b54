//! Scripted player used for headless runs.
//!
//! Turns toward the nearest zombie, fires once lined up, reloads on an
//! empty magazine and backs off when something gets close.

use std::f32::consts::{PI, TAU};

use horde_core::commands::{MovementInput, PlayerCommand};
use horde_core::constants::ROTATION_SENSITIVITY;
use horde_core::enums::SessionPhase;
use horde_core::state::GameStateSnapshot;
use horde_core::types::{ground_distance, yaw_towards};

use crate::game_loop::InputSource;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Largest yaw error, in radians, at which a shot is taken.
    pub aim_tolerance: f32,
    /// Back-pedal while the nearest zombie is closer than this.
    pub retreat_distance: f32,
    retreating: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            aim_tolerance: 0.05,
            retreat_distance: 4.0,
            retreating: false,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if snapshot.phase != SessionPhase::Active {
            return commands;
        }

        let player = snapshot.player.position;
        let nearest = snapshot.zombies.iter().min_by(|a, b| {
            ground_distance(a.position, player).total_cmp(&ground_distance(b.position, player))
        });

        let Some(target) = nearest else {
            self.set_retreat(false, &mut commands);
            return commands;
        };

        // 1. Aim. Rotation subtracts drag, so drag against the error.
        let error = wrap_angle(yaw_towards(player, target.position) - snapshot.player.yaw);
        if error != 0.0 {
            commands.push(PlayerCommand::Rotate {
                delta_x: -error / ROTATION_SENSITIVITY,
            });
        }

        // 2. Fire or reload
        let hud = &snapshot.hud;
        if hud.ammo == 0 {
            if !hud.reloading {
                commands.push(PlayerCommand::Reload);
            }
        } else if error.abs() <= self.aim_tolerance {
            commands.push(PlayerCommand::Shoot);
        }

        // 3. Keep some distance
        let close = ground_distance(target.position, player) < self.retreat_distance;
        self.set_retreat(close, &mut commands);

        commands
    }

    fn set_retreat(&mut self, retreat: bool, commands: &mut Vec<PlayerCommand>) {
        if retreat == self.retreating {
            return;
        }
        self.retreating = retreat;
        commands.push(PlayerCommand::SetMovement {
            input: MovementInput {
                backward: retreat,
                ..Default::default()
            },
        });
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        self.decide(snapshot)
    }
}

/// Wrap an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
