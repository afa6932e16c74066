//! Regular tower: instant hit on the nearest mob in range.

use glam::Vec2;

use skirmish_core::defs::TowerStats;
use skirmish_core::enums::TowerKind;

use super::{strike, TowerContext};

pub fn trigger(
    origin: Vec2,
    stats: &TowerStats,
    ctx: &mut TowerContext,
    tracers: &mut Vec<Vec2>,
) -> Option<f32> {
    let target = ctx.registry.nearest_within(origin, Some(stats.range))?;
    tracers.push(target.position);
    Some(strike(ctx, target.entity, stats.damage, TowerKind::Regular).applied)
}
