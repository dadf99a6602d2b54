//! Types shared between the host and the game loop thread.

use horde_core::commands::PlayerCommand;
use horde_core::events::PlatformRequest;
use horde_core::state::GameOverSummary;
use horde_core::types::MissionId;
use horde_progression::Profile;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the session.
    PlayerCommand(PlayerCommand),
    /// Stop the loop without ending the session.
    Shutdown,
}

/// How the loop is paced and when it gives up.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Wall-clock speed-up; 1.0 is real time, 0.0 runs unpaced.
    pub speed: f64,
    /// Stop after this many ticks even if the player is still alive.
    pub max_ticks: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_ticks: None,
        }
    }
}

/// What the loop hands back when it stops.
pub struct SessionOutcome {
    pub profile: Profile,
    /// Present when the player died; absent when the loop was stopped early.
    pub summary: Option<GameOverSummary>,
    pub ticks: u64,
    pub missions_completed: Vec<MissionId>,
    pub platform_requests: Vec<PlatformRequest>,
}
