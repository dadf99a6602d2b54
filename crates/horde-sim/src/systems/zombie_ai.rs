//! Zombie behaviour: shamble toward the player and bite when close.

use glam::Vec3;
use hecs::World;

use horde_core::components::{Transform, Zombie};
use horde_core::constants::{ZOMBIE_MELEE_RADIUS, ZOMBIE_STEP};
use horde_core::types::{flatten, yaw_towards};

/// Step every zombie toward `player` along the floor and turn it to face them.
/// Returns how many zombies ended the step within melee range.
pub fn run(world: &mut World, player: Vec3) -> u32 {
    let mut attackers = 0;
    for (_e, (_zombie, transform)) in world.query_mut::<(&Zombie, &mut Transform)>() {
        let to_player = flatten(player - transform.position);
        let distance = to_player.length();
        if distance > f32::EPSILON {
            transform.yaw = yaw_towards(transform.position, player);
            transform.position += to_player / distance * ZOMBIE_STEP.min(distance);
        }
        if transform.position.distance(player) < ZOMBIE_MELEE_RADIUS {
            attackers += 1;
        }
    }
    attackers
}
