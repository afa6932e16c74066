//! Scatter tower: eight compass rays per trigger.
//!
//! On each ray only the closest qualifying mob along the ray is hit, and a
//! mob already hit by another ray this trigger is skipped.

use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec2;

use skirmish_core::constants::SCATTER_DIRECTIONS;
use skirmish_core::defs::TowerStats;
use skirmish_core::enums::TowerKind;

use super::{strike, TowerContext};

/// Unit vector of compass ray `index`.
pub fn ray(index: usize) -> Vec2 {
    Vec2::from_angle(index as f32 * TAU / SCATTER_DIRECTIONS as f32)
}

/// `None` when no ray has anything to hit.
pub fn trigger(
    origin: Vec2,
    stats: &TowerStats,
    hit_width: f32,
    ctx: &mut TowerContext,
    tracers: &mut Vec<Vec2>,
) -> Option<f32> {
    let candidates = ctx.registry.within_radius(origin, stats.range);
    let mut hit = HashSet::new();
    let mut dealt = 0.0;
    for index in 0..SCATTER_DIRECTIONS {
        let direction = ray(index);
        let mut best: Option<(f32, hecs::Entity, Vec2)> = None;
        for mob in &candidates {
            if hit.contains(&mob.entity) {
                continue;
            }
            let offset = mob.position - origin;
            let along = offset.dot(direction);
            if along < 0.0 {
                continue;
            }
            let across = offset.perp_dot(direction).abs();
            if across > hit_width {
                continue;
            }
            if best.map_or(true, |(d, _, _)| along < d) {
                best = Some((along, mob.entity, mob.position));
            }
        }
        if let Some((_, entity, position)) = best {
            hit.insert(entity);
            tracers.push(position);
            dealt += strike(ctx, entity, stats.damage, TowerKind::Scatter).applied;
        }
    }
    if hit.is_empty() {
        None
    } else {
        Some(dealt)
    }
}
