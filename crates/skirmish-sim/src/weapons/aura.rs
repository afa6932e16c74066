//! Aura: a damage pulse centered on the hero's current position.

use tracing::debug;

use skirmish_core::components::AuraMark;
use skirmish_core::defs::WeaponStats;
use skirmish_core::enums::WeaponKind;

use super::{strike, CombatContext};

/// Float slack when comparing a mark against the current time.
const MARK_SLACK: f64 = 1e-4;

/// Pulse every mob in the area whose per-target mark has expired.
/// `None` when no such mob exists.
///
/// Marks are set on the nominal firing schedule (`now - lag`), so carried
/// cadence time never makes a mark outlive the next trigger.
pub fn trigger(stats: &WeaponStats, lag: f32, ctx: &mut CombatContext) -> Option<f32> {
    let ready_at = ctx.now - lag as f64 + stats.cooldown as f64;
    let targets: Vec<_> = ctx
        .registry
        .within_radius(ctx.origin, stats.area)
        .into_iter()
        .filter(|mob| {
            ctx.registry
                .world()
                .get::<&AuraMark>(mob.entity)
                .map_or(true, |mark| ctx.now + MARK_SLACK >= mark.ready_at)
        })
        .collect();
    if targets.is_empty() {
        return None;
    }
    let mut dealt = 0.0;
    for mob in targets {
        let marked = ctx
            .registry
            .world_mut()
            .insert_one(mob.entity, AuraMark { ready_at });
        if marked.is_err() {
            debug!(entity = ?mob.entity, "aura target gone before marking");
            continue;
        }
        dealt += strike(ctx, mob.entity, stats.damage, WeaponKind::Aura).applied;
    }
    Some(dealt)
}
