//! Tests for the game session: timers, shooting, combat, missions and game over.

use std::time::Duration;

use glam::Vec3;

use horde_core::commands::{MovementInput, PlayerCommand};
use horde_core::constants::*;
use horde_core::enums::{Edition, SessionPhase};
use horde_core::events::{GameEvent, PlatformRequest};
use horde_core::types::MissionId;
use horde_progression::storage::{KeyValueStore, MemoryStore};
use horde_progression::{Profile, ProgressionStore};

use crate::engine::{GameSession, SessionConfig};
use crate::systems::spawner::live_zombies;

const TICK: Duration = Duration::from_millis(16);

fn quiet_config() -> SessionConfig {
    SessionConfig {
        spawner_enabled: false,
        ..Default::default()
    }
}

fn session(edition: Edition) -> GameSession {
    GameSession::new(quiet_config(), Profile::in_memory(edition))
}

/// Session whose profile was loaded from `json`.
fn session_with_store(edition: Edition, json: &str) -> GameSession {
    let mut storage = MemoryStore::new();
    storage.set(STORAGE_KEY, json).unwrap();
    GameSession::new(quiet_config(), Profile::load(Box::new(storage), edition))
}

/// Put a zombie three units ahead and shoot until it dies.
fn kill_zombie_ahead(session: &mut GameSession) {
    let kills_before = session.counters().zombies_killed;
    let target = session.player().position() + session.player().forward() * 3.0;
    session.spawn_test_zombie(target);
    for _ in 0..300 {
        session.shoot();
        session.tick(TICK);
        if session.counters().zombies_killed > kills_before {
            return;
        }
    }
    panic!("zombie ahead was never killed");
}

/// Let a zombie stand on the player until the run ends.
fn die(session: &mut GameSession) {
    let position = session.player().position();
    session.spawn_test_zombie(position);
    for _ in 0..5000 {
        session.tick(TICK);
        if session.is_game_over() {
            return;
        }
    }
    panic!("player never died");
}

fn advance(session: &mut GameSession, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        session.tick(TICK);
        elapsed += TICK;
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = GameSession::new(SessionConfig::default(), Profile::in_memory(Edition::Platform));
    let mut b = GameSession::new(SessionConfig::default(), Profile::in_memory(Edition::Platform));
    for _ in 0..600 {
        let snap_a = serde_json::to_string(&a.tick(TICK)).unwrap();
        let snap_b = serde_json::to_string(&b.tick(TICK)).unwrap();
        assert_eq!(snap_a, snap_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let config = |seed| SessionConfig {
        seed,
        ..Default::default()
    };
    let mut a = GameSession::new(config(111), Profile::in_memory(Edition::Classic));
    let mut b = GameSession::new(config(222), Profile::in_memory(Edition::Classic));
    let mut diverged = false;
    for _ in 0..400 {
        let snap_a = serde_json::to_string(&a.tick(TICK)).unwrap();
        let snap_b = serde_json::to_string(&b.tick(TICK)).unwrap();
        if snap_a != snap_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should place zombies differently");
}

// ---- Spawning ----

#[test]
fn test_spawn_every_three_seconds() {
    let mut s = GameSession::new(SessionConfig::default(), Profile::in_memory(Edition::Classic));
    s.tick(ZOMBIE_SPAWN_INTERVAL - Duration::from_millis(1));
    assert_eq!(live_zombies(s.world()), 0);
    let snap = s.tick(Duration::from_millis(1));
    assert_eq!(live_zombies(s.world()), 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ZombieSpawned { spawn_seq: 0 })));
}

#[test]
fn test_spawn_stops_at_live_cap() {
    let mut s = GameSession::new(SessionConfig::default(), Profile::in_memory(Edition::Classic));
    // Move the player far from the spawn ring so nobody reaches them.
    s.player_mut().place(Vec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0), 0.0);
    for _ in 0..15 {
        s.tick(ZOMBIE_SPAWN_INTERVAL);
    }
    assert_eq!(live_zombies(s.world()), MAX_LIVE_ZOMBIES);
}

// ---- Shooting & reloading ----

#[test]
fn test_shoot_spends_ammo_and_respects_cooldown() {
    let mut s = session(Edition::Classic);
    assert!(s.shoot());
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO - 1);
    assert!(!s.shoot(), "second shot inside the cooldown must be ignored");

    s.tick(SHOOT_COOLDOWN - Duration::from_millis(1));
    assert!(!s.shoot());
    s.tick(Duration::from_millis(1));
    assert!(s.shoot());
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO - 2);
}

#[test]
fn test_shoot_with_empty_magazine_is_noop() {
    let mut s = session(Edition::Classic);
    s.counters_mut().ammo = 0;
    assert!(!s.shoot());
    let snap = s.tick(TICK);
    assert!(snap.projectiles.is_empty());
    assert!(snap.events.is_empty());
}

#[test]
fn test_reload_full_magazine_is_noop() {
    let mut s = session(Edition::Classic);
    assert!(!s.reload());
    assert!(!s.is_reloading());
}

#[test]
fn test_reload_refills_after_reload_time() {
    let mut s = session(Edition::Classic);
    s.counters_mut().ammo = 3;
    s.counters_mut().zombies_killed_since_reload = 4;
    assert!(s.reload());
    assert!(!s.reload(), "a pending reload is not restarted");

    s.tick(Duration::from_millis(DEFAULT_RELOAD_TIME_MS - 1));
    assert_eq!(s.counters().ammo, 3);
    let snap = s.tick(Duration::from_millis(1));
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO);
    assert_eq!(s.counters().zombies_killed_since_reload, 0);
    assert!(!snap.hud.reloading);
    assert!(snap
        .events
        .contains(&GameEvent::Reloaded { ammo: DEFAULT_MAX_AMMO }));
}

#[test]
fn test_upgraded_magazine_and_reload_time() {
    let mut s = session_with_store(Edition::Platform, r#"{"maxAmmo": 40, "reloadTimeMs": 1000}"#);
    assert_eq!(s.counters().ammo, 40);
    s.counters_mut().ammo = 0;
    s.reload();
    s.tick(Duration::from_millis(1000));
    assert_eq!(s.counters().ammo, 40);
}

#[test]
fn test_commands_apply_at_tick_boundary() {
    let mut s = session(Edition::Classic);
    s.queue_commands([
        PlayerCommand::SetMovement {
            input: MovementInput {
                backward: true,
                ..Default::default()
            },
        },
        PlayerCommand::Rotate { delta_x: 25.0 },
        PlayerCommand::Shoot,
    ]);
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO);
    let snap = s.tick(TICK);
    assert_eq!(snap.hud.ammo, DEFAULT_MAX_AMMO - 1);
    assert!(snap.player.yaw < 0.0);
    assert!(snap.player.position.z > PLAYER_START_Z);
    assert_eq!(snap.projectiles.len(), 1);
}

// ---- Combat & kills ----

#[test]
fn test_two_hits_kill_and_score() {
    let mut s = session(Edition::Classic);
    kill_zombie_ahead(&mut s);
    assert_eq!(s.counters().zombies_killed, 1);
    assert_eq!(s.counters().score, KILL_SCORE);
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO - 2);
    assert_eq!(live_zombies(s.world()), 0);
}

#[test]
fn test_upgraded_damage_still_needs_two_hits() {
    let mut s = session_with_store(Edition::Classic, r#"{"damageMultiplier": 1.25}"#);
    kill_zombie_ahead(&mut s);
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO - 2);
}

#[test]
fn test_double_damage_kills_in_one_hit() {
    let mut s = session_with_store(Edition::Classic, r#"{"damageMultiplier": 2.0}"#);
    kill_zombie_ahead(&mut s);
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO - 1);
}

#[test]
fn test_contact_damage_scaled_by_reduction() {
    let mut s = session_with_store(Edition::Classic, r#"{"damageReduction": 0.5}"#);
    let position = s.player().position();
    s.spawn_test_zombie(position);
    s.tick(TICK);
    let expected = DEFAULT_MAX_HEALTH - ZOMBIE_CONTACT_DAMAGE * 0.5;
    assert!((s.counters().health - expected).abs() < 1e-4);
}

#[test]
fn test_out_of_range_save_starts_a_playable_session() {
    let mut s = session_with_store(
        Edition::Platform,
        r#"{"maxHealth": -5, "damageReduction": 7, "maxAmmo": 0, "healthRegenPerSecond": 1.0}"#,
    );
    assert_eq!(s.counters().health, DEFAULT_MAX_HEALTH);
    assert_eq!(s.counters().ammo, DEFAULT_MAX_AMMO);

    s.counters_mut().health = 50.0;
    let snap = s.tick(HEALTH_REGEN_INTERVAL);
    assert_eq!(snap.phase, SessionPhase::Active);
    assert_eq!(s.counters().health, 51.0);

    // Contact damage is taken at full rate, not scaled up.
    let at_player = s.player().position();
    s.spawn_test_zombie(at_player);
    s.tick(Duration::from_millis(16));
    assert!((s.counters().health - (51.0 - ZOMBIE_CONTACT_DAMAGE)).abs() < 1e-4);

    // The magazine can be emptied and refilled.
    s.counters_mut().ammo = 0;
    assert!(s.reload());
}

#[test]
fn test_health_regenerates_up_to_max() {
    let mut s = session_with_store(Edition::Platform, r#"{"healthRegenPerSecond": 2.0}"#);
    s.counters_mut().health = 50.0;
    s.tick(HEALTH_REGEN_INTERVAL);
    assert_eq!(s.counters().health, 52.0);

    s.counters_mut().health = 99.5;
    s.tick(HEALTH_REGEN_INTERVAL);
    assert_eq!(s.counters().health, DEFAULT_MAX_HEALTH);
}

// ---- Missions ----

#[test]
fn test_kill_mission_needs_exactly_ten() {
    let mut s = session(Edition::Classic);
    for _ in 0..9 {
        kill_zombie_ahead(&mut s);
    }
    assert!(!s.profile().store().is_completed(MissionId(1)));

    kill_zombie_ahead(&mut s);
    let store = s.profile().store();
    assert!(store.is_completed(MissionId(1)));
    assert!(store.is_completed(MissionId(2)));
    assert_eq!(store.total_score, 1500);
}

#[test]
fn test_windowed_kills_complete_mission() {
    let mut s = session(Edition::Platform);
    for _ in 0..5 {
        kill_zombie_ahead(&mut s);
    }
    assert!(s.time().elapsed_secs < KILL_WINDOW_SECS);
    assert!(s.profile().store().is_completed(MissionId(11)));
}

#[test]
fn test_windowed_kills_split_by_reset_do_not_count() {
    let mut s = session(Edition::Platform);
    for _ in 0..3 {
        kill_zombie_ahead(&mut s);
    }
    let remaining = KILL_WINDOW_SECS - s.time().elapsed_secs;
    advance(&mut s, Duration::from_secs_f32(remaining) + TICK);
    assert_eq!(s.counters().zombies_killed_in_window, 0);

    for _ in 0..2 {
        kill_zombie_ahead(&mut s);
    }
    assert!(!s.profile().store().is_completed(MissionId(11)));
}

#[test]
fn test_no_reload_kills_mission_and_reset() {
    let mut s = session(Edition::Platform);
    for _ in 0..2 {
        kill_zombie_ahead(&mut s);
    }
    s.reload();
    s.tick(Duration::from_millis(DEFAULT_RELOAD_TIME_MS));
    assert_eq!(s.counters().zombies_killed_since_reload, 0);

    for _ in 0..15 {
        kill_zombie_ahead(&mut s);
    }
    assert_eq!(s.counters().ammo, 0);
    assert!(s.profile().store().is_completed(MissionId(10)));
}

#[test]
fn test_survival_mission_completes_on_frame() {
    let mut s = session(Edition::Classic);
    for _ in 0..299 {
        s.tick(Duration::from_secs(1));
    }
    assert!(!s.profile().store().is_completed(MissionId(3)));
    let snap = s.tick(Duration::from_secs(1));
    assert!(s.profile().store().is_completed(MissionId(3)));
    assert!(snap.events.contains(&GameEvent::MissionCompleted {
        mission_id: MissionId(3),
        reward: 2000
    }));
    assert_eq!(snap.missions[2].progress, "5:00/5:00");
}

#[test]
fn test_distance_mission_completes_on_movement() {
    let mut s = session(Edition::Platform);
    s.counters_mut().distance_traveled = 499.98;
    s.set_movement(MovementInput {
        forward: true,
        ..Default::default()
    });
    s.tick(TICK);
    assert!(s.counters().distance_traveled >= 500.0);
    assert!(s.profile().store().is_completed(MissionId(9)));
}

#[test]
fn test_snapshot_mission_progress_strings() {
    let mut s = session(Edition::Classic);
    kill_zombie_ahead(&mut s);
    let snap = s.tick(TICK);
    assert_eq!(snap.missions.len(), 5);
    assert_eq!(snap.missions[0].progress, "1/10");
    assert_eq!(snap.missions[1].progress, "100/1000");
    assert_eq!(snap.missions[3].progress, "open");
}

// ---- Game over ----

#[test]
fn test_scenario_ten_kills_then_death_flushes_2500() {
    let mut s = session(Edition::Classic);
    for _ in 0..10 {
        kill_zombie_ahead(&mut s);
    }
    die(&mut s);

    let summary = s.summary().unwrap();
    assert_eq!(summary.final_score, 1000);
    assert_eq!(summary.completed_missions, 2);
    assert_eq!(summary.total_score, 1000 + 500 + 1000);
    assert_eq!(s.counters().health, 0.0);

    let profile = s.into_profile();
    let saved = profile.storage().get(STORAGE_KEY).unwrap().unwrap();
    let saved = ProgressionStore::from_json(&saved).unwrap();
    assert_eq!(saved.total_score, 2500);
    assert_eq!(&saved, profile.store());
}

#[test]
fn test_game_over_is_terminal_and_timers_noop() {
    let mut s = session(Edition::Classic);
    s.shoot();
    s.counters_mut().ammo = 10;
    s.reload();
    s.counters_mut().health = ZOMBIE_CONTACT_DAMAGE / 2.0;
    let position = s.player().position();
    s.spawn_test_zombie(position);

    let snap = s.tick(TICK);
    assert_eq!(snap.phase, SessionPhase::GameOver);
    let frozen = s.time();
    let total = s.profile().store().total_score;

    // The in-flight reload comes due but must not touch anything.
    s.queue_command(PlayerCommand::Shoot);
    let snap = s.tick(Duration::from_secs(5));
    assert_eq!(s.counters().ammo, 10);
    assert!(s.is_reloading());
    assert_eq!(s.time(), frozen);
    assert!(snap.events.is_empty());
    assert!(!s.shoot());
    assert!(!s.reload());
    assert_eq!(s.profile().store().total_score, total);
}

#[test]
fn test_game_over_platform_requests_only_on_platform_edition() {
    let mut classic = session(Edition::Classic);
    classic.counters_mut().health = 0.01;
    let position = classic.player().position();
    classic.spawn_test_zombie(position);
    let snap = classic.tick(TICK);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Platform { .. })));

    let mut platform = session(Edition::Platform);
    platform.counters_mut().score = 700;
    platform.counters_mut().health = 0.01;
    let position = platform.player().position();
    platform.spawn_test_zombie(position);
    let snap = platform.tick(TICK);
    assert!(snap.events.contains(&GameEvent::Platform {
        request: PlatformRequest::SubmitScore { score: 700 }
    }));
    assert!(snap.events.contains(&GameEvent::Platform {
        request: PlatformRequest::ShowInterstitial
    }));
    assert_eq!(platform.profile().store().total_score, 700);
}
