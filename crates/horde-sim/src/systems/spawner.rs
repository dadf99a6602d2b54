//! Zombie spawner: tops the horde up when the spawn timer fires.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use horde_core::components::Zombie;
use horde_core::constants::MAX_LIVE_ZOMBIES;

use crate::world_setup;

pub fn live_zombies(world: &World) -> usize {
    world.query::<&Zombie>().iter().count()
}

/// Spawn one zombie unless the live cap is reached. Returns its spawn sequence number.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, next_seq: &mut u64) -> Option<u64> {
    if live_zombies(world) >= MAX_LIVE_ZOMBIES {
        return None;
    }
    let seq = *next_seq;
    *next_seq += 1;
    world_setup::spawn_zombie(world, rng, seq);
    Some(seq)
}
