//! Contact damage: mobs touching the hero, gated by a per-mob cooldown.

use glam::Vec2;

use skirmish_core::components::{Body, ContactDamage, Position, SpawnOrder};

use crate::registry::Registry;

/// Land contact hits on a hero at `hero` with body `hero_radius`.
/// Returns each hit's damage in spawn order.
pub fn run(registry: &mut Registry, hero: Vec2, hero_radius: f32, now: f64, cooldown: f64) -> Vec<f32> {
    let mut hits: Vec<(SpawnOrder, f32)> = Vec::new();
    for (_entity, (pos, body, contact, order)) in registry
        .world_mut()
        .query_mut::<(&Position, &Body, &mut ContactDamage, &SpawnOrder)>()
    {
        if pos.0.distance(hero) > body.radius + hero_radius {
            continue;
        }
        if contact.last_hit.is_some_and(|last| now - last < cooldown) {
            continue;
        }
        contact.last_hit = Some(now);
        hits.push((*order, contact.amount));
    }
    hits.sort_by_key(|(order, _)| *order);
    hits.into_iter().map(|(_, amount)| amount).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::MobKind;

    #[test]
    fn cooldown_gates_repeat_hits() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Grunt, "", Vec2::new(10.0, 0.0), 1.0);
        let damage = MobKind::Grunt.template().contact_damage;
        assert_eq!(run(&mut registry, Vec2::ZERO, 16.0, 0.0, 1.0), vec![damage]);
        assert!(run(&mut registry, Vec2::ZERO, 16.0, 0.5, 1.0).is_empty());
        assert_eq!(run(&mut registry, Vec2::ZERO, 16.0, 1.0, 1.0), vec![damage]);
    }

    #[test]
    fn distant_mobs_do_not_hit() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Grunt, "", Vec2::new(100.0, 0.0), 1.0);
        assert!(run(&mut registry, Vec2::ZERO, 16.0, 0.0, 1.0).is_empty());
    }
}
