//! The player's profile: the progression store plus where it is saved.
//!
//! Every mutation goes through here and is persisted immediately. Loading
//! never fails: absent or unreadable data starts a fresh profile.

use tracing::{info, warn};

use horde_core::constants::{REWARDED_AD_BONUS, STORAGE_KEY};
use horde_core::enums::{Edition, MissionTrigger};
use horde_core::state::{MissionView, SessionCounters};
use horde_core::types::{MissionId, ShopItemId};

use crate::error::{MissionError, ShopError, StorageError};
use crate::shop::{self, ShopItem};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::store::ProgressionStore;
use crate::tracker::{MissionCompletion, MissionTracker};

pub struct Profile {
    store: ProgressionStore,
    storage: Box<dyn KeyValueStore>,
    edition: Edition,
    tracker: MissionTracker,
}

impl Profile {
    /// Load the profile saved in `storage`, falling back to the baseline.
    pub fn load(storage: Box<dyn KeyValueStore>, edition: Edition) -> Self {
        let mut store = match storage.get(STORAGE_KEY) {
            Ok(Some(json)) => ProgressionStore::from_json(&json).unwrap_or_else(|e| {
                warn!("[profile] Stored progression is unreadable, starting fresh: {e}");
                ProgressionStore::default()
            }),
            Ok(None) => {
                info!("[profile] No saved progression, starting fresh");
                ProgressionStore::default()
            }
            Err(e) => {
                warn!("[profile] Could not read saved progression, starting fresh: {e}");
                ProgressionStore::default()
            }
        };
        let reset = store.sanitize();
        if !reset.is_empty() {
            warn!(
                "[profile] Out-of-range progression values reset to defaults: {}",
                reset.join(", ")
            );
        }
        store.ensure_missions(edition);
        Self {
            store,
            storage,
            edition,
            tracker: MissionTracker::for_edition(edition),
        }
    }

    /// Fresh profile backed by memory only.
    pub fn in_memory(edition: Edition) -> Self {
        Self::load(Box::new(MemoryStore::new()), edition)
    }

    pub fn store(&self) -> &ProgressionStore {
        &self.store
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Give the backend back, e.g. to reload it under another edition.
    pub fn into_storage(self) -> Box<dyn KeyValueStore> {
        self.storage
    }

    pub fn persist(&mut self) -> Result<(), StorageError> {
        let json = self.store.to_json()?;
        self.storage.set(STORAGE_KEY, &json)
    }

    /// Gameplay never stops for a failed save.
    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!("[profile] Failed to save progression: {e}");
        }
    }

    /// Evaluate missions for `trigger`; persists if anything completed.
    pub fn evaluate_missions(
        &mut self,
        trigger: MissionTrigger,
        counters: &SessionCounters,
    ) -> Vec<MissionCompletion> {
        let completed = self.tracker.evaluate(trigger, counters, &mut self.store);
        if !completed.is_empty() {
            self.persist_or_warn();
        }
        completed
    }

    /// Add a finished session's score to the total and persist. Returns the new total.
    pub fn flush_session_score(&mut self, score: u64) -> u64 {
        self.store.total_score += score;
        self.persist_or_warn();
        self.store.total_score
    }

    pub fn purchase(&mut self, id: ShopItemId) -> Result<ShopItem, ShopError> {
        let item = shop::purchase(&mut self.store, self.edition, id)?;
        info!(
            "[shop] Bought '{}' for {} ({}), {} score left",
            item.name,
            item.price,
            item.effect.describe(),
            self.store.total_score
        );
        self.persist_or_warn();
        Ok(item)
    }

    pub fn claim_social_mission(&mut self, id: MissionId) -> Result<MissionCompletion, MissionError> {
        let done = self.tracker.claim(id, &mut self.store)?;
        self.persist_or_warn();
        Ok(done)
    }

    /// Credit the fixed bonus for a watched rewarded advert. Returns the new total.
    pub fn grant_rewarded_bonus(&mut self) -> u64 {
        self.store.total_score += REWARDED_AD_BONUS;
        info!("[profile] Rewarded advert bonus +{REWARDED_AD_BONUS}");
        self.persist_or_warn();
        self.store.total_score
    }

    /// Wipe all progress back to the baseline.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.store = ProgressionStore::baseline(self.edition);
        info!("[profile] Progression reset");
        self.persist()
    }

    pub fn completed_mission_count(&self) -> usize {
        self.tracker
            .missions()
            .iter()
            .filter(|m| self.store.is_completed(m.id))
            .count()
    }

    pub fn mission_views(&self) -> Vec<MissionView> {
        self.tracker.views(&self.store)
    }

    pub fn shop_items(&self) -> Vec<ShopItem> {
        shop::catalog(self.edition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;

    fn stored_blob(profile: &Profile) -> ProgressionStore {
        let json = profile.storage().get(STORAGE_KEY).unwrap().unwrap();
        ProgressionStore::from_json(&json).unwrap()
    }

    #[test]
    fn fresh_profile_is_baseline() {
        let profile = Profile::in_memory(Edition::Classic);
        assert_eq!(profile.store(), &ProgressionStore::baseline(Edition::Classic));
        assert_eq!(profile.completed_mission_count(), 0);
    }

    #[test]
    fn malformed_blob_loads_defaults() {
        let mut storage = MemoryStore::new();
        storage.set(STORAGE_KEY, "}}garbage{{").unwrap();
        let profile = Profile::load(Box::new(storage), Edition::Platform);
        assert_eq!(profile.store(), &ProgressionStore::baseline(Edition::Platform));
    }

    #[test]
    fn out_of_range_blob_loads_sanitized() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                STORAGE_KEY,
                r#"{"totalScore": 300, "maxHealth": -5, "damageReduction": 7, "maxAmmo": 0, "healthRegenPerSecond": 1.0}"#,
            )
            .unwrap();
        let profile = Profile::load(Box::new(storage), Edition::Platform);
        let store = profile.store();
        assert_eq!(store.total_score, 300);
        assert_eq!(store.max_health, 100.0);
        assert_eq!(store.damage_reduction, 1.0);
        assert_eq!(store.max_ammo, 30);
        assert_eq!(store.health_regen_per_second, 1.0);
    }

    #[test]
    fn purchase_persists_immediately() {
        let mut storage = MemoryStore::new();
        storage.set(STORAGE_KEY, r#"{"totalScore": 2500}"#).unwrap();
        let mut profile = Profile::load(Box::new(storage), Edition::Classic);

        profile.purchase(ShopItemId(1)).unwrap();
        let saved = stored_blob(&profile);
        assert_eq!(saved.total_score, 1500);
        assert_eq!(saved.max_health, 120.0);
    }

    #[test]
    fn failed_purchase_does_not_write() {
        let mut profile = Profile::in_memory(Edition::Classic);
        assert!(profile.purchase(ShopItemId(2)).is_err());
        assert_eq!(profile.storage().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn mission_completion_persists() {
        let mut profile = Profile::in_memory(Edition::Classic);
        let counters = SessionCounters {
            zombies_killed: 10,
            score: 1000,
            ..Default::default()
        };
        let done = profile.evaluate_missions(MissionTrigger::Kill, &counters);
        assert_eq!(done.len(), 2);
        let saved = stored_blob(&profile);
        assert_eq!(saved.total_score, 1500);
        assert!(saved.is_completed(MissionId(1)));
        assert!(saved.is_completed(MissionId(2)));
    }

    #[test]
    fn claim_and_bonus_add_to_total() {
        let mut profile = Profile::in_memory(Edition::Classic);
        profile.claim_social_mission(MissionId(5)).unwrap();
        assert_eq!(profile.grant_rewarded_bonus(), 1000 + REWARDED_AD_BONUS);
        assert_eq!(stored_blob(&profile).total_score, 1500);
        assert!(profile.claim_social_mission(MissionId(5)).is_err());
        assert_eq!(profile.completed_mission_count(), 1);
    }

    #[test]
    fn reset_returns_to_baseline() {
        let mut profile = Profile::in_memory(Edition::Upgraded);
        profile.flush_session_score(5000);
        profile.purchase(ShopItemId(3)).unwrap();
        profile.reset().unwrap();
        assert_eq!(profile.store(), &ProgressionStore::baseline(Edition::Upgraded));
        assert_eq!(stored_blob(&profile).total_score, 0);
    }

    #[test]
    fn file_backed_profile_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = Profile::load(Box::new(FileStore::new(dir.path())), Edition::Platform);
        profile.flush_session_score(3200);
        profile.purchase(ShopItemId(5)).unwrap();
        let expected = profile.store().clone();

        let reloaded = Profile::load(Box::new(FileStore::new(dir.path())), Edition::Platform);
        assert_eq!(reloaded.store(), &expected);
    }

    #[test]
    fn switching_edition_keeps_progress() {
        let mut profile = Profile::in_memory(Edition::Classic);
        profile.flush_session_score(700);
        let profile = Profile::load(profile.into_storage(), Edition::Platform);
        assert_eq!(profile.store().total_score, 700);
        assert_eq!(profile.store().missions.len(), 11);
    }
}
