//! Discrete events emitted by the session for audio, UI and platform hooks.

use serde::{Deserialize, Serialize};

use crate::state::GameOverSummary;
use crate::types::MissionId;

/// Gameplay events, drained by the host after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ZombieSpawned { spawn_seq: u64 },
    ShotFired { ammo_left: u32 },
    ReloadStarted,
    Reloaded { ammo: u32 },
    ZombieKilled { spawn_seq: u64, score: u64 },
    MissionCompleted { mission_id: MissionId, reward: u64 },
    GameOver { summary: GameOverSummary },
    /// The session wants something from the platform layer.
    Platform { request: PlatformRequest },
}

/// Call points into external platform services (ads, leaderboards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformRequest {
    SubmitScore { score: u64 },
    ShowInterstitial,
}
