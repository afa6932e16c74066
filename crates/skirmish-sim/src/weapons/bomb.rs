//! Bomb: a fused charge dropped at the hero's feet.

use glam::Vec2;

use skirmish_core::defs::{WeaponPattern, WeaponStats};
use skirmish_core::enums::WeaponKind;
use skirmish_core::state::EffectView;

use super::{strike, CombatContext};

#[derive(Debug, Clone)]
pub struct Bomb {
    pub position: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Simulation time at which the fuse runs out.
    pub detonate_at: f64,
}

impl Bomb {
    pub fn view(&self, now: f64) -> EffectView {
        EffectView::Bomb {
            position: self.position,
            radius: self.radius,
            fuse_remaining: (self.detonate_at - now).max(0.0) as f32,
        }
    }
}

/// Arm a bomb at the hero. `None` when the arena has no mobs at all.
pub fn trigger(stats: &WeaponStats, ctx: &mut CombatContext, bombs: &mut Vec<Bomb>) -> Option<f32> {
    let WeaponPattern::Fused { fuse_secs } = stats.pattern else {
        return None;
    };
    if ctx.registry.mob_count() == 0 {
        return None;
    }
    bombs.push(Bomb {
        position: ctx.origin,
        radius: stats.area,
        damage: stats.damage,
        detonate_at: ctx.now + fuse_secs as f64,
    });
    Some(0.0)
}

/// Detonate every bomb whose deadline has passed.
pub fn update(bombs: &mut Vec<Bomb>, ctx: &mut CombatContext) -> f32 {
    let mut dealt = 0.0;
    let now = ctx.now;
    let (due, armed): (Vec<Bomb>, Vec<Bomb>) =
        bombs.drain(..).partition(|b| now >= b.detonate_at);
    *bombs = armed;
    for bomb in due {
        for mob in ctx.registry.within_radius(bomb.position, bomb.radius) {
            dealt += strike(ctx, mob.entity, bomb.damage, WeaponKind::Bomb).applied;
        }
    }
    dealt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
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
    fn inert_until_fuse_elapses() {
        let mut registry = Registry::new();
        for x in [20.0, 40.0, 500.0] {
            registry.spawn_mob(MobKind::Grunt, "", Vec2::new(x, 0.0), 1.0);
        }
        let mut kills = Vec::new();
        let mut bombs = Vec::new();
        let stats = WeaponStats::tier(WeaponKind::Bomb, 1).unwrap();
        let mut c = ctx(&mut registry, &mut kills);
        trigger(&stats, &mut c, &mut bombs).unwrap();

        c.now = 1.0;
        assert_eq!(update(&mut bombs, &mut c), 0.0);
        assert_eq!(bombs.len(), 1);

        c.now = 1.5;
        update(&mut bombs, &mut c);
        assert!(bombs.is_empty());
        assert_eq!(kills.len(), 2);
        assert_eq!(registry.mob_count(), 1);
    }

    #[test]
    fn empty_arena_skips() {
        let mut registry = Registry::new();
        let mut kills = Vec::new();
        let mut bombs = Vec::new();
        let stats = WeaponStats::tier(WeaponKind::Bomb, 1).unwrap();
        assert!(trigger(&stats, &mut ctx(&mut registry, &mut kills), &mut bombs).is_none());
    }
}
