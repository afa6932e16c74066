//! Damage pipeline: the single mutation point for mob health.

use hecs::Entity;

use skirmish_core::components::{Health, Mob, Position, Reward};
use skirmish_core::enums::DamageSource;
use skirmish_core::events::KillInfo;

use crate::registry::Registry;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageReport {
    /// Damage applied; zero when the target was already gone.
    pub applied: f32,
    pub killed: bool,
}

/// Apply `amount` to `entity`.
///
/// No-op on an inactive entity. On health ≤ 0 the mob is despawned before its
/// kill record is pushed, so later hits in the same frame find nothing.
pub fn apply_damage(
    registry: &mut Registry,
    entity: Entity,
    amount: f32,
    source: DamageSource,
    kills: &mut Vec<KillInfo>,
) -> DamageReport {
    let Ok((health, mob, pos, reward)) = registry
        .world_mut()
        .query_one_mut::<(&mut Health, &Mob, &Position, &Reward)>(entity)
    else {
        return DamageReport::default();
    };

    health.current -= amount;
    if health.current > 0.0 {
        return DamageReport {
            applied: amount,
            killed: false,
        };
    }

    let info = KillInfo {
        id: entity.to_bits().get(),
        kind: mob.kind,
        position: pos.0,
        xp: reward.xp,
        coins: reward.coins,
        source,
    };
    registry.despawn(entity);
    kills.push(info);
    DamageReport {
        applied: amount,
        killed: true,
    }
}
