//! Freezer tower: pulses everything in range with damage and a slow.

use glam::Vec2;

use skirmish_core::defs::TowerStats;
use skirmish_core::enums::TowerKind;

use super::{strike, TowerContext};
use crate::systems::status::apply_slow;

pub fn trigger(
    origin: Vec2,
    stats: &TowerStats,
    slow_factor: f32,
    slow_secs: f32,
    ctx: &mut TowerContext,
) -> Option<f32> {
    let targets = ctx.registry.within_radius(origin, stats.range);
    if targets.is_empty() {
        return None;
    }
    let until = ctx.now + slow_secs as f64;
    let mut dealt = 0.0;
    for mob in targets {
        apply_slow(ctx.registry, mob.entity, slow_factor, until);
        dealt += strike(ctx, mob.entity, stats.damage, TowerKind::Freezer).applied;
    }
    Some(dealt)
}
