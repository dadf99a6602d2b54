//! Game session: the core of a single run.
//!
//! `GameSession` owns the hecs world, the player, the timer queue and the
//! player's `Profile` for the length of one run. It applies queued input,
//! runs the systems in a fixed order each tick, and flushes the session score
//! to the profile when the player dies. Completely headless.

use std::collections::VecDeque;
use std::time::Duration;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use horde_core::commands::{MovementInput, PlayerCommand};
use horde_core::constants::*;
use horde_core::enums::{Edition, MissionTrigger, SessionPhase};
use horde_core::events::{GameEvent, PlatformRequest};
use horde_core::state::{GameOverSummary, GameStateSnapshot, SessionCounters};
use horde_core::types::SessionTime;
use horde_progression::Profile;

use crate::player::PlayerController;
use crate::scheduler::{Scheduler, TimerTask};
use crate::systems;
use crate::systems::combat::HitOutcome;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for scenery layout and spawn placement.
    pub seed: u64,
    /// When false no zombies appear on their own (scripted scenarios).
    pub spawner_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawner_enabled: true,
        }
    }
}

/// Edition-dependent switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub arena_walls: bool,
    pub platform_services: bool,
}

impl GameRules {
    pub fn for_edition(edition: Edition) -> Self {
        Self {
            arena_walls: edition.has_arena_walls(),
            platform_services: edition.has_platform_services(),
        }
    }
}

pub struct GameSession {
    world: World,
    rng: ChaCha8Rng,
    profile: Profile,
    rules: GameRules,
    player: PlayerController,
    scheduler: Scheduler,
    counters: SessionCounters,
    time: SessionTime,
    phase: SessionPhase,
    can_shoot: bool,
    reload_pending: bool,
    next_zombie_seq: u64,
    next_projectile_seq: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    summary: Option<GameOverSummary>,
}

impl GameSession {
    /// Start a run for `profile`. The profile is handed back by `into_profile`.
    pub fn new(config: SessionConfig, profile: Profile) -> Self {
        let edition = profile.edition();
        let rules = GameRules::for_edition(edition);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        world_setup::setup_arena(&mut world, &mut rng, rules.arena_walls);

        let mut scheduler = Scheduler::new();
        if config.spawner_enabled {
            scheduler.schedule_repeating(ZOMBIE_SPAWN_INTERVAL, TimerTask::SpawnZombie);
        }
        scheduler.schedule_repeating(HEALTH_REGEN_INTERVAL, TimerTask::RegenerateHealth);

        let store = profile.store();
        let counters = SessionCounters::new(store.max_health, store.max_ammo);
        info!(
            "[session] Starting {} session (seed {}, health {}, ammo {}, damage x{})",
            edition, config.seed, store.max_health, store.max_ammo, store.damage_multiplier
        );

        Self {
            world,
            rng,
            profile,
            rules,
            player: PlayerController::new(),
            scheduler,
            counters,
            time: SessionTime::default(),
            phase: SessionPhase::Active,
            can_shoot: true,
            reload_pending: false,
            next_zombie_seq: 0,
            next_projectile_seq: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            summary: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one frame of `dt` and return the resulting snapshot.
    ///
    /// Due timers fire first, then queued commands, then the frame systems.
    /// After game over the clock and timers keep running but do nothing.
    pub fn tick(&mut self, dt: Duration) -> GameStateSnapshot {
        self.scheduler.advance(dt);
        self.run_timers();

        if self.phase == SessionPhase::Active {
            self.process_commands();
            self.run_systems(dt.as_secs_f32());
        } else {
            self.command_queue.clear();
        }

        self.build_snapshot()
    }

    /// Fire one projectile. No-op while cooling down, out of ammo or after game over.
    pub fn shoot(&mut self) -> bool {
        if self.phase != SessionPhase::Active || !self.can_shoot || self.counters.ammo == 0 {
            return false;
        }
        self.counters.ammo -= 1;
        let seq = self.next_projectile_seq;
        self.next_projectile_seq += 1;
        world_setup::spawn_projectile(
            &mut self.world,
            self.player.position(),
            self.player.forward(),
            seq,
        );
        self.can_shoot = false;
        self.scheduler
            .schedule_once(SHOOT_COOLDOWN, TimerTask::ShootCooldown);
        self.events.push(GameEvent::ShotFired {
            ammo_left: self.counters.ammo,
        });
        true
    }

    /// Start a reload. No-op with a full magazine, while reloading or after game over.
    pub fn reload(&mut self) -> bool {
        let max_ammo = self.profile.store().max_ammo;
        if self.phase != SessionPhase::Active
            || self.reload_pending
            || self.counters.ammo >= max_ammo
        {
            return false;
        }
        self.reload_pending = true;
        let reload_time = Duration::from_millis(self.profile.store().reload_time_ms);
        self.scheduler
            .schedule_once(reload_time, TimerTask::ReloadComplete);
        self.events.push(GameEvent::ReloadStarted);
        debug!("[session] Reload started ({reload_time:?})");
        true
    }

    pub fn set_movement(&mut self, input: MovementInput) {
        self.player.set_movement(input);
    }

    /// Turn by a horizontal drag; see `PlayerController::apply_rotation`.
    pub fn rotate(&mut self, delta_x: f32) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.player.apply_rotation(delta_x, self.scheduler.now())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn time(&self) -> SessionTime {
        self.time
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_pending
    }

    /// Set once the session has ended.
    pub fn summary(&self) -> Option<GameOverSummary> {
        self.summary
    }

    /// End the run and hand the profile back.
    pub fn into_profile(self) -> Profile {
        self.profile
    }

    /// Place a zombie at `position` (for tests and scripted scenarios).
    #[cfg(test)]
    pub fn spawn_test_zombie(&mut self, position: glam::Vec3) -> u64 {
        let seq = self.next_zombie_seq;
        self.next_zombie_seq += 1;
        world_setup::spawn_zombie_at(&mut self.world, position, seq);
        seq
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    #[cfg(test)]
    pub fn counters_mut(&mut self) -> &mut SessionCounters {
        &mut self.counters
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetMovement { input } => self.set_movement(input),
            PlayerCommand::Rotate { delta_x } => {
                self.rotate(delta_x);
            }
            PlayerCommand::Shoot => {
                self.shoot();
            }
            PlayerCommand::Reload => {
                self.reload();
            }
        }
    }

    /// Fire every due timer. Each task is a no-op once the session is over.
    fn run_timers(&mut self) {
        while let Some(task) = self.scheduler.pop_due() {
            if self.phase == SessionPhase::GameOver {
                continue;
            }
            match task {
                TimerTask::SpawnZombie => {
                    if let Some(spawn_seq) = systems::spawner::run(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.next_zombie_seq,
                    ) {
                        debug!("[session] Zombie {spawn_seq} spawned");
                        self.events.push(GameEvent::ZombieSpawned { spawn_seq });
                    }
                }
                TimerTask::RegenerateHealth => {
                    let store = self.profile.store();
                    if store.health_regen_per_second > 0.0 {
                        self.counters.health =
                            (self.counters.health + store.health_regen_per_second).min(store.max_health);
                    }
                }
                TimerTask::ShootCooldown => self.can_shoot = true,
                TimerTask::ReloadComplete => {
                    self.reload_pending = false;
                    self.counters.ammo = self.profile.store().max_ammo;
                    self.counters.zombies_killed_since_reload = 0;
                    self.events.push(GameEvent::Reloaded {
                        ammo: self.counters.ammo,
                    });
                }
            }
        }
    }

    /// Run all frame systems in order.
    fn run_systems(&mut self, dt_secs: f32) {
        // 1. Game time
        self.time.advance(dt_secs);
        self.counters.game_time = self.time.elapsed_secs;
        // 2. Time-based missions
        self.evaluate_missions(MissionTrigger::Frame);
        // 3. Kill window
        self.counters.advance_kill_window(dt_secs);
        // 4. Player movement (+ distance missions)
        let speed = self.profile.store().movement_speed_multiplier;
        let moved = self.player.apply_movement(&self.world, speed);
        if moved > 0.0 {
            self.counters.distance_traveled += moved;
            self.evaluate_missions(MissionTrigger::Movement);
        }
        // 5. Zombies close in; contact damage may end the run
        let attackers = systems::zombie_ai::run(&mut self.world, self.player.position());
        if attackers > 0 {
            let damage =
                attackers as f32 * ZOMBIE_CONTACT_DAMAGE * self.profile.store().damage_reduction;
            self.counters.health -= damage;
            if self.counters.health <= 0.0 {
                self.end_session();
                return;
            }
        }
        // 6. Projectiles and combat
        let damage = systems::combat::projectile_damage(self.profile.store().damage_multiplier);
        let outcomes = systems::projectiles::run(&mut self.world, damage, &mut self.despawn_buffer);
        for outcome in outcomes {
            if let HitOutcome::Killed { spawn_seq } = outcome {
                self.on_zombie_killed(spawn_seq);
            }
        }
    }

    fn on_zombie_killed(&mut self, spawn_seq: u64) {
        self.counters.record_kill(KILL_SCORE);
        self.events.push(GameEvent::ZombieKilled {
            spawn_seq,
            score: self.counters.score,
        });
        self.evaluate_missions(MissionTrigger::Kill);
    }

    fn evaluate_missions(&mut self, trigger: MissionTrigger) {
        for done in self.profile.evaluate_missions(trigger, &self.counters) {
            self.events.push(GameEvent::MissionCompleted {
                mission_id: done.id,
                reward: done.reward,
            });
        }
    }

    /// Transition to game over exactly once and flush the score.
    fn end_session(&mut self) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.phase = SessionPhase::GameOver;
        self.counters.health = self.counters.health.max(0.0);
        self.counters.is_game_over = true;

        let final_score = self.counters.score;
        let total_score = self.profile.flush_session_score(final_score);
        let summary = GameOverSummary {
            final_score,
            completed_missions: self.profile.completed_mission_count(),
            total_score,
        };
        info!(
            "[session] Game over after {:.1}s: score {}, {} missions completed, total {}",
            self.time.elapsed_secs, final_score, summary.completed_missions, total_score
        );
        self.summary = Some(summary);
        self.events.push(GameEvent::GameOver { summary });
        if self.rules.platform_services {
            self.events.push(GameEvent::Platform {
                request: PlatformRequest::SubmitScore { score: final_score },
            });
            self.events.push(GameEvent::Platform {
                request: PlatformRequest::ShowInterstitial,
            });
        }
    }

    fn build_snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                edition: self.profile.edition(),
                player: &self.player,
                counters: &self.counters,
                profile: &self.profile,
                reloading: self.reload_pending,
            },
            events,
        )
    }
}
