//! The durable progression record.
//!
//! Serialized as one flat camelCase JSON object. Any field missing from a
//! stored blob falls back to its baseline value, so older saves keep loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use horde_core::constants::{DEFAULT_MAX_AMMO, DEFAULT_MAX_HEALTH, DEFAULT_RELOAD_TIME_MS};
use horde_core::enums::Edition;
use horde_core::types::MissionId;

use crate::error::StorageError;
use crate::missions::{self, MissionKind};

/// Progress shape depends on the mission kind. Stored flat next to `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MissionProgress {
    Killed { killed: u32 },
    Score { score: u64 },
    Time { time: f32 },
    Distance { distance: f32 },
    None {},
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionState {
    #[serde(flatten)]
    pub progress: MissionProgress,
    /// Terminal once set.
    #[serde(default)]
    pub completed: bool,
}

impl MissionState {
    pub fn new(kind: &MissionKind) -> Self {
        Self {
            progress: kind.initial_progress(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionStore {
    pub total_score: u64,
    pub max_health: f32,
    pub damage_multiplier: f32,
    pub max_ammo: u32,
    pub reload_time_ms: u64,
    pub movement_speed_multiplier: f32,
    /// Fraction of contact damage actually taken, in `(0, 1]`.
    pub damage_reduction: f32,
    pub health_regen_per_second: f32,
    pub missions: BTreeMap<MissionId, MissionState>,
}

impl Default for ProgressionStore {
    fn default() -> Self {
        Self {
            total_score: 0,
            max_health: DEFAULT_MAX_HEALTH,
            damage_multiplier: 1.0,
            max_ammo: DEFAULT_MAX_AMMO,
            reload_time_ms: DEFAULT_RELOAD_TIME_MS,
            movement_speed_multiplier: 1.0,
            damage_reduction: 1.0,
            health_regen_per_second: 0.0,
            missions: BTreeMap::new(),
        }
    }
}

impl ProgressionStore {
    /// Baseline store with zero progress on every mission of `edition`.
    pub fn baseline(edition: Edition) -> Self {
        let mut store = Self::default();
        store.ensure_missions(edition);
        store
    }

    /// Add a fresh entry for every catalog mission the store does not know yet.
    pub fn ensure_missions(&mut self, edition: Edition) {
        for def in missions::catalog(edition) {
            self.missions
                .entry(def.id)
                .or_insert_with(|| MissionState::new(&def.kind));
        }
    }

    pub fn completed_mission_count(&self) -> usize {
        self.missions.values().filter(|m| m.completed).count()
    }

    pub fn is_completed(&self, id: MissionId) -> bool {
        self.missions.get(&id).is_some_and(|m| m.completed)
    }

    /// Reset every upgrade stat outside its valid range to the baseline value.
    ///
    /// Returns the camelCase names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let base = Self::default();
        let mut reset = Vec::new();
        if !(self.max_health.is_finite() && self.max_health > 0.0) {
            self.max_health = base.max_health;
            reset.push("maxHealth");
        }
        if !(self.damage_multiplier.is_finite() && self.damage_multiplier > 0.0) {
            self.damage_multiplier = base.damage_multiplier;
            reset.push("damageMultiplier");
        }
        if self.max_ammo == 0 {
            self.max_ammo = base.max_ammo;
            reset.push("maxAmmo");
        }
        if self.reload_time_ms == 0 {
            self.reload_time_ms = base.reload_time_ms;
            reset.push("reloadTimeMs");
        }
        if !(self.movement_speed_multiplier.is_finite() && self.movement_speed_multiplier > 0.0) {
            self.movement_speed_multiplier = base.movement_speed_multiplier;
            reset.push("movementSpeedMultiplier");
        }
        if !(self.damage_reduction > 0.0 && self.damage_reduction <= 1.0) {
            self.damage_reduction = base.damage_reduction;
            reset.push("damageReduction");
        }
        if !(self.health_regen_per_second.is_finite() && self.health_regen_per_second >= 0.0) {
            self.health_regen_per_second = base.health_regen_per_second;
            reset.push("healthRegenPerSecond");
        }
        reset
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}
