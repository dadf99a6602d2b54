//! Entity spawn factories for the arena.
//!
//! Creates the static scenery (trees, rocks, boundary walls) and the
//! dynamic zombie and projectile bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::*;
use horde_core::constants::*;
use horde_core::enums::ObstacleKind;
use horde_core::types::{ground_distance, yaw_towards};

/// Where the player's eye starts.
pub fn player_start() -> Vec3 {
    Vec3::new(PLAYER_START_X, PLAYER_EYE_HEIGHT, PLAYER_START_Z)
}

/// Scatter scenery; add boundary walls when `walls` is set.
pub fn setup_arena(world: &mut World, rng: &mut ChaCha8Rng, walls: bool) {
    for _ in 0..TREE_COUNT {
        spawn_scattered_obstacle(world, rng, ObstacleKind::Tree);
    }
    for _ in 0..ROCK_COUNT {
        spawn_scattered_obstacle(world, rng, ObstacleKind::Rock);
    }
    if walls {
        spawn_walls(world);
    }
}

/// Place an obstacle on the scenery ring, re-rolling spots that would trap the player at start.
fn spawn_scattered_obstacle(world: &mut World, rng: &mut ChaCha8Rng, kind: ObstacleKind) -> Entity {
    let (radius, height) = match kind {
        ObstacleKind::Tree => (TREE_RADIUS, 0.0),
        ObstacleKind::Rock => (ROCK_RADIUS, ROCK_HEIGHT),
    };
    let start = player_start();
    let position = loop {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.gen_range(OBSTACLE_MIN_DISTANCE..OBSTACLE_MAX_DISTANCE);
        let candidate = Vec3::new(angle.cos() * distance, height, angle.sin() * distance);
        if ground_distance(candidate, start) > radius + OBSTACLE_SPAWN_CLEARANCE {
            break candidate;
        }
    };
    spawn_obstacle(world, kind, position)
}

pub fn spawn_obstacle(world: &mut World, kind: ObstacleKind, position: Vec3) -> Entity {
    let radius = match kind {
        ObstacleKind::Tree => TREE_RADIUS,
        ObstacleKind::Rock => ROCK_RADIUS,
    };
    world.spawn((
        Transform { position, yaw: 0.0 },
        Obstacle { kind, radius },
    ))
}

/// Four walls boxing in the arena, normals pointing at the centre.
pub fn spawn_walls(world: &mut World) {
    let d = ARENA_WALL_DISTANCE;
    for (point, inward_normal) in [
        (Vec3::new(0.0, 0.0, -d), Vec3::Z),
        (Vec3::new(0.0, 0.0, d), Vec3::NEG_Z),
        (Vec3::new(-d, 0.0, 0.0), Vec3::X),
        (Vec3::new(d, 0.0, 0.0), Vec3::NEG_X),
    ] {
        world.spawn((
            Transform {
                position: point,
                yaw: 0.0,
            },
            Wall { inward_normal },
        ));
    }
}

/// Spawn a zombie on the spawn ring at a random bearing, facing the centre.
pub fn spawn_zombie(world: &mut World, rng: &mut ChaCha8Rng, spawn_seq: u64) -> Entity {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = rng.gen_range(ZOMBIE_SPAWN_MIN_RADIUS..=ZOMBIE_SPAWN_MAX_RADIUS);
    let position = Vec3::new(angle.cos() * distance, ZOMBIE_HEIGHT, angle.sin() * distance);
    spawn_zombie_at(world, position, spawn_seq)
}

pub fn spawn_zombie_at(world: &mut World, position: Vec3, spawn_seq: u64) -> Entity {
    let position = Vec3::new(position.x, ZOMBIE_HEIGHT, position.z);
    world.spawn((
        Zombie { spawn_seq },
        Transform {
            position,
            yaw: yaw_towards(position, Vec3::ZERO),
        },
        Health {
            current: ZOMBIE_MAX_HEALTH,
            max: ZOMBIE_MAX_HEALTH,
        },
    ))
}

/// Spawn a projectile at `origin` travelling along `direction`.
pub fn spawn_projectile(world: &mut World, origin: Vec3, direction: Vec3, spawn_seq: u64) -> Entity {
    let velocity = direction.normalize_or_zero() * PROJECTILE_SPEED;
    world.spawn((
        Projectile { spawn_seq },
        Transform {
            position: origin,
            yaw: 0.0,
        },
        Velocity(velocity),
    ))
}
