//! Snapshot builders: read-only views of registry contents.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::state::{MobView, PickupView};

use super::status::is_slowed;

/// Mob views in spawn order.
pub fn mob_views(world: &World, now: f64) -> Vec<MobView> {
    let mut views: Vec<(SpawnOrder, MobView)> = world
        .query::<(&Mob, &Position, &Body, &Health, &Mobility, &SpawnOrder)>()
        .iter()
        .map(|(entity, (mob, pos, body, health, mobility, order))| {
            (
                *order,
                MobView {
                    id: entity.to_bits().get(),
                    kind: mob.kind,
                    appearance: mob.appearance.clone(),
                    position: pos.0,
                    radius: body.radius,
                    health: health.current,
                    max_health: health.max,
                    slowed: is_slowed(mobility, now),
                },
            )
        })
        .collect();
    views.sort_by_key(|(order, _)| *order);
    views.into_iter().map(|(_, view)| view).collect()
}

pub fn pickup_views(world: &World) -> Vec<PickupView> {
    let mut views: Vec<(SpawnOrder, PickupView)> = world
        .query::<(&Pickup, &Position, &SpawnOrder)>()
        .iter()
        .map(|(entity, (pickup, pos, order))| {
            (
                *order,
                PickupView {
                    id: entity.to_bits().get(),
                    position: pos.0,
                    kind: pickup.kind,
                },
            )
        })
        .collect();
    views.sort_by_key(|(order, _)| *order);
    views.into_iter().map(|(_, view)| view).collect()
}
