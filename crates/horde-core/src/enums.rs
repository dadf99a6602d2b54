//! Enumeration types used throughout the game.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Session lifecycle. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    GameOver,
}

/// Product edition. Editions share the core loop and differ in mission
/// count, shop stock, arena walls and platform integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// Five missions, two shop items, open arena.
    Classic,
    /// Eight missions, five shop items, open arena.
    Upgraded,
    /// All eleven missions, the full shop, walled arena, ads and leaderboard.
    #[default]
    Platform,
}

impl Edition {
    pub const ALL: [Edition; 3] = [Edition::Classic, Edition::Upgraded, Edition::Platform];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Classic => "classic",
            Edition::Upgraded => "upgraded",
            Edition::Platform => "platform",
        }
    }

    /// Highest mission id available in this edition.
    pub fn mission_count(&self) -> u32 {
        match self {
            Edition::Classic => 5,
            Edition::Upgraded => 8,
            Edition::Platform => 11,
        }
    }

    /// Highest shop item id stocked in this edition.
    pub fn shop_item_count(&self) -> u32 {
        match self {
            Edition::Classic => 2,
            Edition::Upgraded => 5,
            Edition::Platform => 7,
        }
    }

    pub fn has_arena_walls(&self) -> bool {
        matches!(self, Edition::Platform)
    }

    pub fn has_platform_services(&self) -> bool {
        matches!(self, Edition::Platform)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Edition::Classic),
            "upgraded" => Ok(Edition::Upgraded),
            "platform" => Ok(Edition::Platform),
            other => Err(format!(
                "unknown edition '{other}' (expected classic, upgraded or platform)"
            )),
        }
    }
}

/// Static obstacle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
}

/// Which gameplay moment causes a mission to be re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionTrigger {
    /// After every zombie kill.
    Kill,
    /// Once per frame, after game time advances.
    Frame,
    /// After every movement step.
    Movement,
    /// Only when the player explicitly claims it.
    Claim,
}
