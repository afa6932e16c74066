//! Pistol: aimed projectiles with pierce.

use std::collections::HashSet;

use glam::Vec2;
use hecs::Entity;

use skirmish_core::defs::{WeaponPattern, WeaponStats};
use skirmish_core::enums::WeaponKind;
use skirmish_core::state::EffectView;

use super::{strike, CombatContext};

/// Angle between neighbouring bullets of one volley (radians).
const VOLLEY_SPREAD: f32 = 0.15;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Targets this bullet may still damage.
    pub pierce_left: u32,
    /// Targets already damaged; never hit twice.
    pub hit: HashSet<Entity>,
}

impl Bullet {
    pub fn view(&self) -> EffectView {
        EffectView::Bullet {
            position: self.position,
            radius: self.radius,
        }
    }
}

/// Fire a volley at the nearest mob in range. `None` when nothing is in range.
pub fn trigger(stats: &WeaponStats, ctx: &mut CombatContext, bullets: &mut Vec<Bullet>) -> Option<f32> {
    let WeaponPattern::Projectile {
        pierce,
        count,
        speed,
        range,
    } = stats.pattern
    else {
        return None;
    };
    let target = ctx.registry.nearest_within(ctx.origin, range)?;
    let aim = (target.position - ctx.origin).try_normalize().unwrap_or(ctx.facing);
    let count = count.max(1);
    let middle = (count - 1) as f32 / 2.0;
    for i in 0..count {
        let direction = Vec2::from_angle((i as f32 - middle) * VOLLEY_SPREAD).rotate(aim);
        bullets.push(Bullet {
            position: ctx.origin,
            velocity: direction * speed,
            radius: stats.area,
            damage: stats.damage,
            pierce_left: pierce.max(1),
            hit: HashSet::new(),
        });
    }
    Some(0.0)
}

/// Move bullets and register hits. Spent or escaped bullets are dropped.
pub fn update(bullets: &mut Vec<Bullet>, dt: f32, ctx: &mut CombatContext) -> f32 {
    let mut dealt = 0.0;
    for bullet in bullets.iter_mut() {
        bullet.position += bullet.velocity * dt;
        for mob in ctx.registry.touching(bullet.position, bullet.radius) {
            if bullet.pierce_left == 0 {
                break;
            }
            if !bullet.hit.insert(mob.entity) {
                continue;
            }
            dealt += strike(ctx, mob.entity, bullet.damage, WeaponKind::Pistol).applied;
            bullet.pierce_left -= 1;
        }
    }
    let bounds = ctx.bounds;
    bullets.retain(|b| b.pierce_left > 0 && bounds.contains(b.position));
    dealt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use skirmish_core::components::Health;
    use skirmish_core::enums::MobKind;
    use skirmish_core::types::Bounds;

    fn ctx<'a>(registry: &'a mut Registry, kills: &'a mut Vec<skirmish_core::events::KillInfo>) -> CombatContext<'a> {
        CombatContext {
            registry,
            origin: Vec2::ZERO,
            facing: Vec2::X,
            now: 0.0,
            bounds: Bounds::centered(Vec2::ZERO, Vec2::splat(1000.0)),
            kills,
        }
    }

    fn bullet_at(position: Vec2, velocity: Vec2, pierce: u32) -> Bullet {
        Bullet {
            position,
            velocity,
            radius: 4.0,
            damage: 1.0,
            pierce_left: pierce,
            hit: HashSet::new(),
        }
    }

    #[test]
    fn no_target_in_range_does_not_fire() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Brute, "", Vec2::new(900.0, 0.0), 1.0);
        let mut kills = Vec::new();
        let mut bullets = Vec::new();
        let stats = WeaponStats::tier(WeaponKind::Pistol, 1).unwrap();
        assert!(trigger(&stats, &mut ctx(&mut registry, &mut kills), &mut bullets).is_none());
        assert!(bullets.is_empty());
    }

    #[test]
    fn volley_aims_at_nearest() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Brute, "", Vec2::new(0.0, 100.0), 1.0);
        let mut kills = Vec::new();
        let mut bullets = Vec::new();
        let stats = WeaponStats::tier(WeaponKind::Pistol, 1).unwrap();
        trigger(&stats, &mut ctx(&mut registry, &mut kills), &mut bullets).unwrap();
        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].velocity.normalize().abs_diff_eq(Vec2::Y, 1e-5));
    }

    #[test]
    fn bullet_never_hits_same_target_twice() {
        let mut registry = Registry::new();
        let brute = registry.spawn_mob(MobKind::Brute, "", Vec2::ZERO, 1.0);
        let mut kills = Vec::new();
        // Slow bullet sitting inside the brute for many frames.
        let mut bullets = vec![bullet_at(Vec2::ZERO, Vec2::new(1.0, 0.0), 3)];
        let mut c = ctx(&mut registry, &mut kills);
        for _ in 0..20 {
            update(&mut bullets, 0.016, &mut c);
        }
        let health = registry.world().get::<&Health>(brute).unwrap();
        assert!((health.max - health.current - 1.0).abs() < 0.01);
    }

    #[test]
    fn pierce_limits_targets() {
        let mut registry = Registry::new();
        for x in [10.0, 12.0, 14.0] {
            registry.spawn_mob(MobKind::Brute, "", Vec2::new(x, 0.0), 1.0);
        }
        let mut kills = Vec::new();
        let mut bullets = vec![bullet_at(Vec2::ZERO, Vec2::new(600.0, 0.0), 2)];
        let dealt = update(&mut bullets, 0.02, &mut ctx(&mut registry, &mut kills));
        assert!((dealt - 2.0).abs() < 0.01);
        assert!(bullets.is_empty());
    }

    #[test]
    fn escaped_bullets_are_dropped() {
        let mut registry = Registry::new();
        let mut kills = Vec::new();
        let mut bullets = vec![bullet_at(Vec2::new(995.0, 0.0), Vec2::new(600.0, 0.0), 1)];
        update(&mut bullets, 0.1, &mut ctx(&mut registry, &mut kills));
        assert!(bullets.is_empty());
    }
}
