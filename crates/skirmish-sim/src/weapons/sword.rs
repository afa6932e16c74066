//! Sword: a melee arc in the hero's facing direction.

use std::collections::HashSet;

use glam::Vec2;
use hecs::Entity;

use skirmish_core::defs::{WeaponPattern, WeaponStats};
use skirmish_core::enums::WeaponKind;
use skirmish_core::state::EffectView;
use skirmish_core::types::angular_deviation;

use super::{strike, CombatContext};

/// A live swing. Each target is hit at most once per swing, however many
/// frames the swing lasts.
#[derive(Debug, Clone)]
pub struct Swing {
    pub origin: Vec2,
    pub direction: Vec2,
    pub reach: f32,
    pub half_angle: f32,
    pub damage: f32,
    pub remaining: f32,
    pub hit: HashSet<Entity>,
}

impl Swing {
    pub fn view(&self) -> EffectView {
        EffectView::Swing {
            origin: self.origin,
            direction: self.direction,
            reach: self.reach,
            half_angle: self.half_angle,
        }
    }

    /// Hit every mob in the sector not yet hit by this swing.
    fn sweep(&mut self, ctx: &mut CombatContext) -> f32 {
        let mut dealt = 0.0;
        for mob in ctx.registry.within_radius(self.origin, self.reach) {
            let offset = mob.position - self.origin;
            if angular_deviation(self.direction, offset) > self.half_angle {
                continue;
            }
            if self.hit.insert(mob.entity) {
                dealt += strike(ctx, mob.entity, self.damage, WeaponKind::Sword).applied;
            }
        }
        dealt
    }
}

/// Start a swing if any mob is within reach. `None` otherwise.
pub fn trigger(stats: &WeaponStats, ctx: &mut CombatContext, swing: &mut Option<Swing>) -> Option<f32> {
    let WeaponPattern::Arc {
        half_angle,
        swing_secs,
    } = stats.pattern
    else {
        return None;
    };
    if ctx.registry.within_radius(ctx.origin, stats.area).is_empty() {
        return None;
    }
    let mut fresh = Swing {
        origin: ctx.origin,
        direction: ctx.facing.try_normalize().unwrap_or(Vec2::X),
        reach: stats.area,
        half_angle,
        damage: stats.damage,
        remaining: swing_secs,
        hit: HashSet::new(),
    };
    let dealt = fresh.sweep(ctx);
    *swing = Some(fresh);
    Some(dealt)
}

/// Keep the swing on the hero, hit newcomers, expire it when its time is up.
pub fn update(swing: &mut Option<Swing>, dt: f32, ctx: &mut CombatContext) -> f32 {
    let Some(active) = swing.as_mut() else {
        return 0.0;
    };
    active.remaining -= dt;
    if active.remaining <= 0.0 {
        *swing = None;
        return 0.0;
    }
    active.origin = ctx.origin;
    active.sweep(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use skirmish_core::components::Health;
    use skirmish_core::enums::MobKind;
    use skirmish_core::events::KillInfo;
    use skirmish_core::types::Bounds;

    fn ctx<'a>(registry: &'a mut Registry, kills: &'a mut Vec<KillInfo>) -> CombatContext<'a> {
        CombatContext {
            registry,
            origin: Vec2::ZERO,
            facing: Vec2::X,
            now: 0.0,
            bounds: Bounds::centered(Vec2::ZERO, Vec2::splat(500.0)),
            kills,
        }
    }

    #[test]
    fn hits_only_inside_sector() {
        let mut registry = Registry::new();
        let ahead = registry.spawn_mob(MobKind::Brute, "", Vec2::new(40.0, 5.0), 1.0);
        let behind = registry.spawn_mob(MobKind::Brute, "", Vec2::new(-40.0, 0.0), 1.0);
        let mut kills = Vec::new();
        let mut swing = None;
        let stats = WeaponStats::tier(WeaponKind::Sword, 1).unwrap();
        let dealt = trigger(&stats, &mut ctx(&mut registry, &mut kills), &mut swing).unwrap();
        assert!((dealt - stats.damage).abs() < 0.01);
        let hit = swing.as_ref().unwrap().hit.clone();
        assert!(hit.contains(&ahead));
        assert!(!hit.contains(&behind));
    }

    #[test]
    fn lingering_swing_hits_once() {
        let mut registry = Registry::new();
        let brute = registry.spawn_mob(MobKind::Brute, "", Vec2::new(30.0, 0.0), 1.0);
        let mut kills = Vec::new();
        let mut swing = None;
        let stats = WeaponStats::tier(WeaponKind::Sword, 1).unwrap();
        let mut c = ctx(&mut registry, &mut kills);
        trigger(&stats, &mut c, &mut swing).unwrap();
        for _ in 0..5 {
            update(&mut swing, 0.02, &mut c);
        }
        let health = registry.world().get::<&Health>(brute).unwrap();
        assert!((health.max - health.current - stats.damage).abs() < 0.01);
    }

    #[test]
    fn swing_expires() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Brute, "", Vec2::new(30.0, 0.0), 1.0);
        let mut kills = Vec::new();
        let mut swing = None;
        let stats = WeaponStats::tier(WeaponKind::Sword, 1).unwrap();
        let mut c = ctx(&mut registry, &mut kills);
        trigger(&stats, &mut c, &mut swing).unwrap();
        update(&mut swing, 1.0, &mut c);
        assert!(swing.is_none());
    }

    #[test]
    fn nothing_in_reach_skips() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Brute, "", Vec2::new(400.0, 0.0), 1.0);
        let mut kills = Vec::new();
        let mut swing = None;
        let stats = WeaponStats::tier(WeaponKind::Sword, 1).unwrap();
        assert!(trigger(&stats, &mut ctx(&mut registry, &mut kills), &mut swing).is_none());
        assert!(swing.is_none());
    }
}
