//! Gameplay constants and tuning parameters.
//!
//! Distances are world units, speeds are units per tick.

use std::time::Duration;

/// Nominal host frame rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Distance from the centre to each boundary wall.
pub const ARENA_WALL_DISTANCE: f32 = 30.0;

/// Collision radius of a boundary wall.
pub const WALL_RADIUS: f32 = 1.0;

/// A wall blocks movement only when the player faces into it more squarely than this.
pub const WALL_FACING_THRESHOLD: f32 = 0.9;

pub const TREE_COUNT: usize = 20;
pub const ROCK_COUNT: usize = 15;

/// Collision radius of a tree trunk.
pub const TREE_RADIUS: f32 = 1.5;

/// Collision radius of a rock.
pub const ROCK_RADIUS: f32 = 1.0;

/// Rocks sit half-buried; centre height above the floor.
pub const ROCK_HEIGHT: f32 = 0.25;

/// Obstacles are scattered in a ring between these distances from the centre.
pub const OBSTACLE_MIN_DISTANCE: f32 = 5.0;
pub const OBSTACLE_MAX_DISTANCE: f32 = 20.0;

/// Extra clearance kept between an obstacle and the player start point.
pub const OBSTACLE_SPAWN_CLEARANCE: f32 = 0.5;

// --- Player ---

/// Camera eye height above the floor.
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;

/// Player start position on the floor plane (x, z).
pub const PLAYER_START_X: f32 = 0.0;
pub const PLAYER_START_Z: f32 = 5.0;

/// Base movement per tick before the speed multiplier.
pub const PLAYER_BASE_SPEED: f32 = 0.05;

/// Radians of yaw per pixel of horizontal drag.
pub const ROTATION_SENSITIVITY: f32 = 0.002;

/// Upper bound on yaw applied by a single rotation update (radians).
pub const MAX_ROTATION_PER_UPDATE: f32 = 0.1;

/// Minimum spacing between two applied rotation updates.
pub const ROTATION_UPDATE_INTERVAL: Duration = Duration::from_millis(16);

pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
pub const DEFAULT_MAX_AMMO: u32 = 30;
pub const DEFAULT_RELOAD_TIME_MS: u64 = 1500;

/// Time between health regeneration pulses.
pub const HEALTH_REGEN_INTERVAL: Duration = Duration::from_millis(1000);

/// Minimum time between two shots.
pub const SHOOT_COOLDOWN: Duration = Duration::from_millis(250);

// --- Zombies ---

pub const ZOMBIE_HEIGHT: f32 = 0.9;
pub const ZOMBIE_MAX_HEALTH: f32 = 100.0;

/// Zombies spawn on a ring between these distances from the centre.
pub const ZOMBIE_SPAWN_MIN_RADIUS: f32 = 15.0;
pub const ZOMBIE_SPAWN_MAX_RADIUS: f32 = 25.0;

pub const ZOMBIE_SPAWN_INTERVAL: Duration = Duration::from_millis(3000);

/// Spawning pauses while this many zombies are alive.
pub const MAX_LIVE_ZOMBIES: usize = 10;

/// Distance a zombie shambles toward the player per tick.
pub const ZOMBIE_STEP: f32 = 0.03;

/// A zombie closer than this to the player's eye deals contact damage.
pub const ZOMBIE_MELEE_RADIUS: f32 = 1.5;

/// Contact damage per zombie per tick, before damage reduction.
pub const ZOMBIE_CONTACT_DAMAGE: f32 = 0.1;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f32 = 0.7;
pub const PROJECTILE_HIT_RADIUS: f32 = 1.0;

/// Projectiles farther than this from the arena centre are culled.
pub const PROJECTILE_MAX_RANGE: f32 = 50.0;

/// Damage per hit before the damage multiplier.
pub const BASE_PROJECTILE_DAMAGE: f32 = 50.0;

// --- Scoring & missions ---

pub const KILL_SCORE: u64 = 100;

/// Length of the rolling window used by windowed-kill missions.
pub const KILL_WINDOW_SECS: f32 = 10.0;

/// Score granted for watching a rewarded advert.
pub const REWARDED_AD_BONUS: u64 = 500;

// --- Persistence ---

/// Key the progression store is saved under.
pub const STORAGE_KEY: &str = "zombieShooterData";
