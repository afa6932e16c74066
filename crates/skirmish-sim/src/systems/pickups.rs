//! Pickups: experience gems from kills and periodic heal drops.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::enums::PickupKind;
use skirmish_core::events::KillInfo;

use crate::registry::Registry;

/// Drop one experience gem where each mob died.
pub fn drop_gems(registry: &mut Registry, kills: &[KillInfo]) {
    for kill in kills.iter().filter(|k| k.xp > 0) {
        registry.spawn_pickup(PickupKind::Experience(kill.xp), kill.position);
    }
}

/// Drop a heal pickup `distance` away from the hero in a random direction.
pub fn drop_heal(registry: &mut Registry, hero: Vec2, distance: f32, amount: f32, rng: &mut ChaCha8Rng) {
    let direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
    registry.spawn_pickup(PickupKind::Heal(amount), hero + direction * distance);
}

/// Collect every pickup within `radius` of the hero, in spawn order.
pub fn collect(registry: &mut Registry, hero: Vec2, radius: f32) -> Vec<PickupKind> {
    let mut collected = Vec::new();
    for (entity, position, kind) in registry.pickups() {
        if position.distance(hero) <= radius {
            registry.despawn(entity);
            collected.push(kind);
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use skirmish_core::enums::{DamageSource, MobKind, WeaponKind};

    #[test]
    fn gems_drop_at_kill_site_and_are_collected_nearby() {
        let mut registry = Registry::new();
        let kill = KillInfo {
            id: 1,
            kind: MobKind::Grunt,
            position: Vec2::new(30.0, 0.0),
            xp: 2,
            coins: 4,
            source: DamageSource::Weapon(WeaponKind::Sword),
        };
        drop_gems(&mut registry, &[kill]);
        assert!(collect(&mut registry, Vec2::new(200.0, 0.0), 48.0).is_empty());
        assert_eq!(collect(&mut registry, Vec2::ZERO, 48.0), vec![PickupKind::Experience(2)]);
        assert!(registry.pickups().is_empty());
    }

    #[test]
    fn heal_drops_at_fixed_distance() {
        let mut registry = Registry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        drop_heal(&mut registry, Vec2::new(10.0, 10.0), 200.0, 25.0, &mut rng);
        let (_, position, kind) = registry.pickups()[0];
        assert!((position.distance(Vec2::new(10.0, 10.0)) - 200.0).abs() < 0.01);
        assert_eq!(kind, PickupKind::Heal(25.0));
    }
}
