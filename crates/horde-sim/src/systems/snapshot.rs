//! Snapshot system: reads the world and session state into a `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use horde_core::components::{Health, Projectile, Transform, Zombie};
use horde_core::enums::{Edition, SessionPhase};
use horde_core::events::GameEvent;
use horde_core::state::*;
use horde_core::types::SessionTime;
use horde_progression::Profile;

use crate::player::PlayerController;

/// Everything the snapshot needs besides the world itself.
pub struct SnapshotContext<'a> {
    pub time: SessionTime,
    pub phase: SessionPhase,
    pub edition: Edition,
    pub player: &'a PlayerController,
    pub counters: &'a SessionCounters,
    pub profile: &'a Profile,
    pub reloading: bool,
}

pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let store = ctx.profile.store();
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        edition: ctx.edition,
        player: PlayerView {
            position: ctx.player.position(),
            yaw: ctx.player.yaw(),
        },
        hud: HudView {
            score: ctx.counters.score,
            total_score: store.total_score,
            health: ctx.counters.health,
            max_health: store.max_health,
            ammo: ctx.counters.ammo,
            max_ammo: store.max_ammo,
            reloading: ctx.reloading,
            zombies_killed: ctx.counters.zombies_killed,
            distance_traveled: ctx.counters.distance_traveled,
        },
        zombies: build_zombies(world),
        projectiles: build_projectiles(world),
        missions: ctx.profile.mission_views(),
        events,
    }
}

fn build_zombies(world: &World) -> Vec<ZombieView> {
    let mut zombies: Vec<ZombieView> = world
        .query::<(&Zombie, &Transform, &Health)>()
        .iter()
        .map(|(_e, (z, t, h))| ZombieView {
            spawn_seq: z.spawn_seq,
            position: t.position,
            yaw: t.yaw,
            health: h.current,
        })
        .collect();
    zombies.sort_unstable_by_key(|z| z.spawn_seq);
    zombies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Projectile, &Transform)>()
        .iter()
        .map(|(_e, (p, t))| {
            (
                p.spawn_seq,
                ProjectileView {
                    position: t.position,
                },
            )
        })
        .collect();
    projectiles.sort_unstable_by_key(|(seq, _)| *seq);
    projectiles.into_iter().map(|(_, view)| view).collect()
}
