//! Full progression flow against the on-disk backend.

use horde_core::enums::Edition;
use horde_core::types::{MissionId, ShopItemId};
use horde_progression::storage::{FileStore, KeyValueStore};
use horde_progression::{MissionError, Profile, ProgressionStore, ShopError};

fn load(dir: &std::path::Path, edition: Edition) -> Profile {
    Profile::load(Box::new(FileStore::new(dir)), edition)
}

#[test]
fn test_earn_spend_claim_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut profile = load(dir.path(), Edition::Classic);
    assert_eq!(profile.store(), &ProgressionStore::baseline(Edition::Classic));

    assert_eq!(profile.flush_session_score(2500), 2500);

    let bought = profile.purchase(ShopItemId(2)).unwrap();
    assert_eq!(bought.price, 2000);
    assert_eq!(profile.store().total_score, 500);
    assert!((profile.store().damage_multiplier - 1.25).abs() < 1e-6);

    // Too expensive now, and nothing changes.
    let before = profile.store().clone();
    assert_eq!(
        profile.purchase(ShopItemId(1)),
        Err(ShopError::InsufficientScore { have: 500, need: 1000 })
    );
    assert_eq!(profile.store(), &before);

    // Not sold in Classic.
    assert_eq!(
        profile.purchase(ShopItemId(7)),
        Err(ShopError::UnknownItem(ShopItemId(7)))
    );

    let done = profile.claim_social_mission(MissionId(4)).unwrap();
    assert_eq!(done.reward, 1500);
    assert_eq!(profile.store().total_score, 2000);
    assert_eq!(
        profile.claim_social_mission(MissionId(4)),
        Err(MissionError::AlreadyCompleted(MissionId(4)))
    );
    assert_eq!(
        profile.claim_social_mission(MissionId(1)),
        Err(MissionError::NotClaimable(MissionId(1)))
    );

    let reloaded = load(dir.path(), Edition::Classic);
    assert_eq!(reloaded.store(), profile.store());
    assert_eq!(reloaded.completed_mission_count(), 1);
}

#[test]
fn test_reset_persists_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let mut profile = load(dir.path(), Edition::Platform);
    profile.flush_session_score(4000);
    profile.purchase(ShopItemId(6)).unwrap();
    profile.reset().unwrap();

    let reloaded = load(dir.path(), Edition::Platform);
    assert_eq!(reloaded.store(), &ProgressionStore::baseline(Edition::Platform));
}

#[test]
fn test_upgrading_edition_keeps_progress_and_adds_missions() {
    let dir = tempfile::tempdir().unwrap();
    let mut classic = load(dir.path(), Edition::Classic);
    classic.claim_social_mission(MissionId(5)).unwrap();
    assert_eq!(classic.mission_views().len(), 5);

    let platform = load(dir.path(), Edition::Platform);
    assert_eq!(platform.mission_views().len(), 11);
    assert!(platform.store().is_completed(MissionId(5)));
    assert_eq!(platform.store().total_score, 1000);
}

#[test]
fn test_corrupt_save_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStore::new(dir.path());
    storage
        .set(horde_core::constants::STORAGE_KEY, "{ not json")
        .unwrap();

    let profile = Profile::load(Box::new(storage), Edition::Upgraded);
    assert_eq!(profile.store(), &ProgressionStore::baseline(Edition::Upgraded));
}
