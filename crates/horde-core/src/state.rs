//! Session counters and the game state snapshot handed to the presentation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::KILL_WINDOW_SECS;
use crate::enums::{Edition, SessionPhase};
use crate::events::GameEvent;
use crate::types::{MissionId, SessionTime};

/// Ephemeral per-session counters. Mission conditions read from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub score: u64,
    pub health: f32,
    pub ammo: u32,
    /// Seconds survived.
    pub game_time: f32,
    /// Monotonic within a session.
    pub zombies_killed: u32,
    /// Reset whenever a reload completes.
    pub zombies_killed_since_reload: u32,
    /// Reset with the kill window.
    pub zombies_killed_in_window: u32,
    pub kill_window_timer: f32,
    /// Net post-collision displacement, monotonic.
    pub distance_traveled: f32,
    pub is_game_over: bool,
}

impl SessionCounters {
    pub fn new(health: f32, ammo: u32) -> Self {
        Self {
            health,
            ammo,
            ..Default::default()
        }
    }

    /// Account for one kill worth `score` points.
    pub fn record_kill(&mut self, score: u64) {
        self.score += score;
        self.zombies_killed += 1;
        self.zombies_killed_since_reload += 1;
        self.zombies_killed_in_window += 1;
    }

    /// Advance the kill window; both window fields reset once it reaches its length.
    pub fn advance_kill_window(&mut self, dt_secs: f32) {
        self.kill_window_timer += dt_secs;
        if self.kill_window_timer >= KILL_WINDOW_SECS {
            self.kill_window_timer = 0.0;
            self.zombies_killed_in_window = 0;
        }
    }
}

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SessionTime,
    pub phase: SessionPhase,
    pub edition: Edition,
    pub player: PlayerView,
    pub hud: HudView,
    pub zombies: Vec<ZombieView>,
    pub projectiles: Vec<ProjectileView>,
    pub missions: Vec<MissionView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub yaw: f32,
}

/// Scalars shown on the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub total_score: u64,
    pub health: f32,
    pub max_health: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    pub zombies_killed: u32,
    pub distance_traveled: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieView {
    pub spawn_seq: u64,
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
}

/// One row of the mission list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionView {
    pub id: MissionId,
    pub title: String,
    /// Human-readable progress, e.g. `7/10` or `1:05/5:00`.
    pub progress: String,
    pub reward: u64,
    pub completed: bool,
}

/// Result reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub final_score: u64,
    pub completed_missions: usize,
    /// Persistent total after the session score was flushed.
    pub total_score: u64,
}
