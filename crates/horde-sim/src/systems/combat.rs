//! Combat resolution: projectile damage against zombies.

use hecs::{Entity, World};
use tracing::debug;

use horde_core::components::{Health, Zombie};
use horde_core::constants::BASE_PROJECTILE_DAMAGE;

/// What a single hit did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Wounded { spawn_seq: u64, remaining: f32 },
    Killed { spawn_seq: u64 },
}

/// Damage one projectile deals with the given multiplier.
pub fn projectile_damage(damage_multiplier: f32) -> f32 {
    BASE_PROJECTILE_DAMAGE * damage_multiplier
}

/// Apply `damage` to `zombie`, despawning it when health reaches zero.
/// Returns `None` if the entity is not a live zombie.
pub fn apply_hit(world: &mut World, zombie: Entity, damage: f32) -> Option<HitOutcome> {
    let (spawn_seq, remaining) = {
        let mut query = world.query_one::<(&Zombie, &mut Health)>(zombie).ok()?;
        let (z, health) = query.get()?;
        health.current -= damage;
        (z.spawn_seq, health.current)
    };
    if remaining <= 0.0 {
        let _ = world.despawn(zombie);
        debug!("[combat] Zombie {spawn_seq} killed");
        Some(HitOutcome::Killed { spawn_seq })
    } else {
        Some(HitOutcome::Wounded {
            spawn_seq,
            remaining,
        })
    }
}
