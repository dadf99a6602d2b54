//! Mission evaluation against live session counters.

use tracing::info;

use horde_core::enums::{Edition, MissionTrigger};
use horde_core::state::{MissionView, SessionCounters};
use horde_core::types::MissionId;

use crate::error::MissionError;
use crate::missions::{self, MissionDef, MissionKind};
use crate::store::{MissionState, ProgressionStore};

/// A mission that just flipped to completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionCompletion {
    pub id: MissionId,
    pub reward: u64,
}

/// Evaluates the missions of one edition. Holds no progress of its own.
#[derive(Debug, Clone)]
pub struct MissionTracker {
    missions: Vec<MissionDef>,
}

impl MissionTracker {
    pub fn for_edition(edition: Edition) -> Self {
        Self {
            missions: missions::catalog(edition),
        }
    }

    pub fn missions(&self) -> &[MissionDef] {
        &self.missions
    }

    pub fn get(&self, id: MissionId) -> Option<&MissionDef> {
        self.missions.iter().find(|m| m.id == id)
    }

    /// Re-evaluate every open mission with the given trigger, ascending by id.
    ///
    /// Progress is refreshed from `counters`; a mission that reaches its
    /// threshold is marked completed and its reward added to the total score.
    /// Completed missions are skipped, so rewards are paid exactly once.
    pub fn evaluate(
        &self,
        trigger: MissionTrigger,
        counters: &SessionCounters,
        store: &mut ProgressionStore,
    ) -> Vec<MissionCompletion> {
        let mut completed = Vec::new();
        for def in self.missions.iter().filter(|m| m.kind.trigger() == trigger) {
            let state = store
                .missions
                .entry(def.id)
                .or_insert_with(|| MissionState::new(&def.kind));
            if state.completed {
                continue;
            }
            state.progress = def.kind.read_progress(counters);
            if def.kind.is_satisfied(&state.progress) {
                state.completed = true;
                store.total_score += def.reward;
                info!(
                    "[missions] {} '{}' completed, +{} score",
                    def.id, def.title, def.reward
                );
                completed.push(MissionCompletion {
                    id: def.id,
                    reward: def.reward,
                });
            }
        }
        completed
    }

    /// Complete a social mission on the player's word. Idempotency is enforced
    /// by rejecting repeat claims.
    pub fn claim(
        &self,
        id: MissionId,
        store: &mut ProgressionStore,
    ) -> Result<MissionCompletion, MissionError> {
        let def = self.get(id).ok_or(MissionError::UnknownMission(id))?;
        if !matches!(def.kind, MissionKind::Social { .. }) {
            return Err(MissionError::NotClaimable(id));
        }
        let state = store
            .missions
            .entry(id)
            .or_insert_with(|| MissionState::new(&def.kind));
        if state.completed {
            return Err(MissionError::AlreadyCompleted(id));
        }
        state.completed = true;
        store.total_score += def.reward;
        info!("[missions] {} '{}' claimed, +{} score", id, def.title, def.reward);
        Ok(MissionCompletion {
            id,
            reward: def.reward,
        })
    }

    /// Mission list rows in catalog order.
    pub fn views(&self, store: &ProgressionStore) -> Vec<MissionView> {
        self.missions
            .iter()
            .map(|def| {
                let state = store
                    .missions
                    .get(&def.id)
                    .copied()
                    .unwrap_or_else(|| MissionState::new(&def.kind));
                MissionView {
                    id: def.id,
                    title: def.title.to_string(),
                    progress: def.kind.progress_text(&state),
                    reward: def.reward,
                    completed: state.completed,
                }
            })
            .collect()
    }
}
