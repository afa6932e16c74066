//! Movement: hero input, mobs chasing the hero, mobs walking the road.

use glam::Vec2;
use hecs::Entity;

use skirmish_core::components::{Mob, Mobility, PathProgress, Position};

use super::status::speed_factor;
use crate::registry::Registry;

/// Move the hero along the sampled input direction.
/// Inputs longer than one are clamped to unit length.
pub fn move_hero(position: &mut Vec2, input: Vec2, speed: f32, dt: f32) {
    *position += input.clamp_length_max(1.0) * speed * dt;
}

/// Step every mob straight toward `target`, never overshooting it.
pub fn chase(registry: &mut Registry, target: Vec2, now: f64, dt: f32) {
    for (_entity, (pos, mobility, _mob)) in registry
        .world_mut()
        .query_mut::<(&mut Position, &Mobility, &Mob)>()
    {
        let offset = target - pos.0;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            continue;
        }
        let step = (mobility.speed * speed_factor(mobility, now) * dt).min(distance);
        pos.0 += offset / distance * step;
    }
}

/// Walk road mobs through their waypoints. Returns mobs that reached the
/// last waypoint this frame; the caller decides what a leak costs.
pub fn follow_road(registry: &mut Registry, waypoints: &[Vec2], now: f64, dt: f32) -> Vec<Entity> {
    let mut arrived = Vec::new();
    for (entity, (pos, mobility, progress)) in registry
        .world_mut()
        .query_mut::<(&mut Position, &Mobility, &mut PathProgress)>()
    {
        let mut budget = mobility.speed * speed_factor(mobility, now) * dt;
        while budget > 0.0 {
            let Some(next) = waypoints.get(progress.next_waypoint) else {
                break;
            };
            let offset = *next - pos.0;
            let distance = offset.length();
            if distance <= budget {
                pos.0 = *next;
                progress.distance += distance;
                progress.next_waypoint += 1;
                budget -= distance;
            } else {
                pos.0 += offset / distance * budget;
                progress.distance += budget;
                budget = 0.0;
            }
        }
        if progress.next_waypoint >= waypoints.len() {
            arrived.push(entity);
        }
    }
    arrived
}
