//! Projectile flight, zombie collision and culling.

use hecs::{Entity, World};

use horde_core::components::{Projectile, Transform, Velocity, Zombie};
use horde_core::constants::{PROJECTILE_HIT_RADIUS, PROJECTILE_MAX_RANGE};

use super::combat::{self, HitOutcome};

/// Advance every projectile one tick and resolve hits.
///
/// Projectiles move newest first. Each one hits at most one live zombie
/// within its hit radius, preferring the most recently spawned; a zombie
/// killed earlier in the tick cannot be hit again. Projectiles that hit, or that end up
/// beyond `PROJECTILE_MAX_RANGE` from the arena centre, are despawned.
pub fn run(
    world: &mut World,
    damage: f32,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<HitOutcome> {
    despawn_buffer.clear();

    let mut projectiles: Vec<(u64, Entity)> = world
        .query::<&Projectile>()
        .iter()
        .map(|(e, p)| (p.spawn_seq, e))
        .collect();
    projectiles.sort_unstable_by_key(|(seq, _)| std::cmp::Reverse(*seq));

    let mut zombies: Vec<(u64, Entity)> = world
        .query::<&Zombie>()
        .iter()
        .map(|(e, z)| (z.spawn_seq, e))
        .collect();
    zombies.sort_unstable_by_key(|(seq, _)| std::cmp::Reverse(*seq));

    let mut outcomes = Vec::new();
    for (_, projectile) in projectiles {
        let position = {
            let Ok(mut query) = world.query_one::<(&mut Transform, &Velocity)>(projectile) else {
                continue;
            };
            let Some((transform, velocity)) = query.get() else {
                continue;
            };
            transform.position += velocity.0;
            transform.position
        };

        let target = zombies.iter().position(|(_, zombie)| {
            world
                .get::<&Transform>(*zombie)
                .is_ok_and(|t| t.position.distance(position) < PROJECTILE_HIT_RADIUS)
        });

        if let Some(index) = target {
            despawn_buffer.push(projectile);
            if let Some(outcome) = combat::apply_hit(world, zombies[index].1, damage) {
                if matches!(outcome, HitOutcome::Killed { .. }) {
                    zombies.remove(index);
                }
                outcomes.push(outcome);
            }
        } else if position.length() > PROJECTILE_MAX_RANGE {
            despawn_buffer.push(projectile);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    outcomes
}
