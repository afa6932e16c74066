//! Bomber tower: lobs a shell at the furthest-advanced mob in range.
//! The shell flies for a fixed time and splashes where the target stood.

use glam::Vec2;

use skirmish_core::defs::TowerStats;
use skirmish_core::enums::TowerKind;
use skirmish_core::state::EffectView;

use super::{strike, TowerContext};

#[derive(Debug, Clone)]
pub struct Shell {
    pub from: Vec2,
    pub target: Vec2,
    pub splash: f32,
    pub damage: f32,
    pub launched_at: f64,
    pub arrive_at: f64,
}

impl Shell {
    /// Position along the straight flight line at `now`.
    pub fn position_at(&self, now: f64) -> Vec2 {
        let span = (self.arrive_at - self.launched_at).max(f64::EPSILON);
        let t = ((now - self.launched_at) / span).clamp(0.0, 1.0) as f32;
        self.from.lerp(self.target, t)
    }

    pub fn view(&self, now: f64) -> EffectView {
        EffectView::Shell {
            position: self.position_at(now),
            target: self.target,
            splash: self.splash,
        }
    }
}

pub fn trigger(
    origin: Vec2,
    stats: &TowerStats,
    splash: f32,
    travel_secs: f32,
    ctx: &mut TowerContext,
    shells: &mut Vec<Shell>,
) -> Option<f32> {
    let target = ctx.registry.furthest_advanced(origin, stats.range)?;
    shells.push(Shell {
        from: origin,
        target: target.position,
        splash,
        damage: stats.damage,
        launched_at: ctx.now,
        arrive_at: ctx.now + travel_secs as f64,
    });
    Some(0.0)
}

/// Detonate shells that have arrived.
pub fn update(shells: &mut Vec<Shell>, ctx: &mut TowerContext, kind: TowerKind) -> f32 {
    let now = ctx.now;
    let (landed, flying): (Vec<Shell>, Vec<Shell>) =
        shells.drain(..).partition(|s| now >= s.arrive_at);
    *shells = flying;
    let mut dealt = 0.0;
    for shell in landed {
        for mob in ctx.registry.within_radius(shell.target, shell.splash) {
            dealt += strike(ctx, mob.entity, shell.damage, kind).applied;
        }
    }
    dealt
}
