//! Cleanup: drop mobs and pickups that wandered far outside the view.
//! Nothing removed here pays a reward.

use hecs::Entity;

use skirmish_core::components::{Mob, Pickup, Position};
use skirmish_core::types::Bounds;

use crate::registry::Registry;

/// Despawn mobs and pickups outside `bounds`. Returns how many were removed.
pub fn run(registry: &mut Registry, bounds: &Bounds, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    let world = registry.world_mut();
    for (entity, (pos, _mob)) in world.query_mut::<(&Position, &Mob)>() {
        if !bounds.contains(pos.0) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (pos, _pickup)) in world.query_mut::<(&Position, &Pickup)>() {
        if !bounds.contains(pos.0) {
            despawn_buffer.push(entity);
        }
    }
    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        registry.despawn(entity);
    }
    removed
}
