//! Slow effects.
//!
//! Slows compose by taking the strongest factor and the latest expiry.

use hecs::Entity;

use skirmish_core::components::Mobility;

use crate::registry::Registry;

/// Apply a slow of `factor` lasting until `until`. Returns false if the
/// entity is gone or cannot move.
pub fn apply_slow(registry: &mut Registry, entity: Entity, factor: f32, until: f64) -> bool {
    let Ok(mobility) = registry.world_mut().query_one_mut::<&mut Mobility>(entity) else {
        return false;
    };
    mobility.slow_factor = mobility.slow_factor.min(factor);
    mobility.slow_until = mobility.slow_until.max(until);
    true
}

/// Speed multiplier in effect at `now`.
pub fn speed_factor(mobility: &Mobility, now: f64) -> f32 {
    if now < mobility.slow_until {
        mobility.slow_factor
    } else {
        1.0
    }
}

pub fn is_slowed(mobility: &Mobility, now: f64) -> bool {
    speed_factor(mobility, now) < 1.0
}

/// Clear slows whose expiry has passed.
pub fn expire(registry: &mut Registry, now: f64) {
    for (_entity, mobility) in registry.world_mut().query_mut::<&mut Mobility>() {
        if now >= mobility.slow_until && mobility.slow_factor < 1.0 {
            mobility.slow_factor = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use skirmish_core::enums::MobKind;

    fn mobility(registry: &Registry, entity: Entity) -> Mobility {
        *registry.world().get::<&Mobility>(entity).unwrap()
    }

    #[test]
    fn strongest_factor_latest_expiry() {
        let mut registry = Registry::new();
        let mob = registry.spawn_mob(MobKind::Grunt, "", Vec2::ZERO, 1.0);
        apply_slow(&mut registry, mob, 0.5, 2.0);
        apply_slow(&mut registry, mob, 0.8, 2.5);
        let m = mobility(&registry, mob);
        assert_eq!(m.slow_factor, 0.5);
        assert_eq!(m.slow_until, 2.5);
    }

    #[test]
    fn expiry_restores_speed() {
        let mut registry = Registry::new();
        let mob = registry.spawn_mob(MobKind::Grunt, "", Vec2::ZERO, 1.0);
        apply_slow(&mut registry, mob, 0.4, 1.0);
        assert!(is_slowed(&mobility(&registry, mob), 0.5));
        expire(&mut registry, 0.5);
        assert_eq!(mobility(&registry, mob).slow_factor, 0.4);
        expire(&mut registry, 1.0);
        let m = mobility(&registry, mob);
        assert_eq!(m.slow_factor, 1.0);
        assert_eq!(speed_factor(&m, 1.0), 1.0);
    }
}
