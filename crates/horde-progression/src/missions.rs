//! Mission catalog and per-kind completion rules.
//!
//! Every mission kind knows three things: which gameplay moment re-evaluates
//! it, how to read its progress from the session counters, and when that
//! progress satisfies it. The tracker dispatches through these methods only.

use serde::{Deserialize, Serialize};

use horde_core::enums::{Edition, MissionTrigger};
use horde_core::state::SessionCounters;
use horde_core::types::{format_clock, MissionId};

use crate::store::{MissionProgress, MissionState};

/// Out-of-game actions behind social missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialAction {
    JoinChannel,
    ShareGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MissionKind {
    /// Kill this many zombies in one session.
    KillCount { kills: u32 },
    /// Reach this session score.
    ScoreThreshold { score: u64 },
    /// Survive this long in one session.
    SurvivalTime { seconds: f32 },
    /// Walk this far in one session.
    DistanceTraveled { distance: f32 },
    /// Kill this many zombies without completing a reload.
    NoReloadKills { kills: u32 },
    /// Kill this many zombies inside one kill window.
    WindowedKills { kills: u32 },
    /// Completed only by an explicit claim from the menu.
    Social { action: SocialAction },
}

impl MissionKind {
    pub fn trigger(&self) -> MissionTrigger {
        match self {
            MissionKind::KillCount { .. }
            | MissionKind::ScoreThreshold { .. }
            | MissionKind::NoReloadKills { .. }
            | MissionKind::WindowedKills { .. } => MissionTrigger::Kill,
            MissionKind::SurvivalTime { .. } => MissionTrigger::Frame,
            MissionKind::DistanceTraveled { .. } => MissionTrigger::Movement,
            MissionKind::Social { .. } => MissionTrigger::Claim,
        }
    }

    /// Progress value for a mission nobody has worked on yet.
    pub fn initial_progress(&self) -> MissionProgress {
        match self {
            MissionKind::KillCount { .. }
            | MissionKind::NoReloadKills { .. }
            | MissionKind::WindowedKills { .. } => MissionProgress::Killed { killed: 0 },
            MissionKind::ScoreThreshold { .. } => MissionProgress::Score { score: 0 },
            MissionKind::SurvivalTime { .. } => MissionProgress::Time { time: 0.0 },
            MissionKind::DistanceTraveled { .. } => MissionProgress::Distance { distance: 0.0 },
            MissionKind::Social { .. } => MissionProgress::None {},
        }
    }

    /// Current progress as seen by this kind.
    pub fn read_progress(&self, counters: &SessionCounters) -> MissionProgress {
        match self {
            MissionKind::KillCount { .. } => MissionProgress::Killed {
                killed: counters.zombies_killed,
            },
            MissionKind::NoReloadKills { .. } => MissionProgress::Killed {
                killed: counters.zombies_killed_since_reload,
            },
            MissionKind::WindowedKills { .. } => MissionProgress::Killed {
                killed: counters.zombies_killed_in_window,
            },
            MissionKind::ScoreThreshold { .. } => MissionProgress::Score {
                score: counters.score,
            },
            MissionKind::SurvivalTime { .. } => MissionProgress::Time {
                time: counters.game_time,
            },
            MissionKind::DistanceTraveled { .. } => MissionProgress::Distance {
                distance: counters.distance_traveled,
            },
            MissionKind::Social { .. } => MissionProgress::None {},
        }
    }

    /// Whether `progress` meets the threshold. Progress of a mismatched shape never does.
    pub fn is_satisfied(&self, progress: &MissionProgress) -> bool {
        match (self, progress) {
            (
                MissionKind::KillCount { kills }
                | MissionKind::NoReloadKills { kills }
                | MissionKind::WindowedKills { kills },
                MissionProgress::Killed { killed },
            ) => killed >= kills,
            (MissionKind::ScoreThreshold { score: target }, MissionProgress::Score { score }) => {
                score >= target
            }
            (MissionKind::SurvivalTime { seconds }, MissionProgress::Time { time }) => {
                time >= seconds
            }
            (
                MissionKind::DistanceTraveled { distance: target },
                MissionProgress::Distance { distance },
            ) => distance >= target,
            _ => false,
        }
    }

    /// Progress line for the mission list.
    pub fn progress_text(&self, state: &MissionState) -> String {
        match (self, &state.progress) {
            (MissionKind::Social { .. }, _) if state.completed => "claimed".to_string(),
            (MissionKind::Social { .. }, _) => "open".to_string(),
            (MissionKind::SurvivalTime { seconds }, MissionProgress::Time { time }) => {
                format!("{}/{}", format_clock(*time), format_clock(*seconds))
            }
            (
                MissionKind::KillCount { kills }
                | MissionKind::NoReloadKills { kills }
                | MissionKind::WindowedKills { kills },
                MissionProgress::Killed { killed },
            ) => format!("{killed}/{kills}"),
            (MissionKind::ScoreThreshold { score: target }, MissionProgress::Score { score }) => {
                format!("{score}/{target}")
            }
            (
                MissionKind::DistanceTraveled { distance: target },
                MissionProgress::Distance { distance },
            ) => format!("{}/{}", distance.floor() as u64, target.floor() as u64),
            _ => self.progress_text(&MissionState::new(self)),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionDef {
    pub id: MissionId,
    pub title: &'static str,
    pub kind: MissionKind,
    pub reward: u64,
}

/// Every mission, ascending by id. Editions expose a prefix of this list.
pub const MISSIONS: [MissionDef; 11] = [
    MissionDef {
        id: MissionId(1),
        title: "Kill 10 zombies",
        kind: MissionKind::KillCount { kills: 10 },
        reward: 500,
    },
    MissionDef {
        id: MissionId(2),
        title: "Score 1000 points",
        kind: MissionKind::ScoreThreshold { score: 1000 },
        reward: 1000,
    },
    MissionDef {
        id: MissionId(3),
        title: "Survive 5 minutes",
        kind: MissionKind::SurvivalTime { seconds: 300.0 },
        reward: 2000,
    },
    MissionDef {
        id: MissionId(4),
        title: "Join the community channel",
        kind: MissionKind::Social {
            action: SocialAction::JoinChannel,
        },
        reward: 1500,
    },
    MissionDef {
        id: MissionId(5),
        title: "Share the game",
        kind: MissionKind::Social {
            action: SocialAction::ShareGame,
        },
        reward: 1000,
    },
    MissionDef {
        id: MissionId(6),
        title: "Kill 50 zombies",
        kind: MissionKind::KillCount { kills: 50 },
        reward: 2500,
    },
    MissionDef {
        id: MissionId(7),
        title: "Score 5000 points",
        kind: MissionKind::ScoreThreshold { score: 5000 },
        reward: 3000,
    },
    MissionDef {
        id: MissionId(8),
        title: "Survive 10 minutes",
        kind: MissionKind::SurvivalTime { seconds: 600.0 },
        reward: 4000,
    },
    MissionDef {
        id: MissionId(9),
        title: "Walk 500 metres",
        kind: MissionKind::DistanceTraveled { distance: 500.0 },
        reward: 1500,
    },
    MissionDef {
        id: MissionId(10),
        title: "Kill 15 zombies without reloading",
        kind: MissionKind::NoReloadKills { kills: 15 },
        reward: 2000,
    },
    MissionDef {
        id: MissionId(11),
        title: "Kill 5 zombies within 10 seconds",
        kind: MissionKind::WindowedKills { kills: 5 },
        reward: 2500,
    },
];

/// Missions available in `edition`, ascending by id.
pub fn catalog(edition: Edition) -> Vec<MissionDef> {
    MISSIONS
        .iter()
        .filter(|m| m.id.0 <= edition.mission_count())
        .copied()
        .collect()
}
