//! Hero weapons.
//!
//! Every weapon shares one fire loop: advance the [`Cadence`], and while it
//! is ready try to trigger. A trigger with nothing to hit leaves the
//! accumulator untouched, so idle time stays as fire-rate credit. In-flight effects (bullets, swings,
//! bombs) belong to the weapon that created them and die with it.

pub mod aura;
pub mod bomb;
pub mod pistol;
pub mod sword;

use glam::Vec2;

use skirmish_core::defs::WeaponStats;
use skirmish_core::enums::{DamageSource, WeaponKind};
use skirmish_core::events::KillInfo;
use skirmish_core::state::{EffectView, WeaponView};
use skirmish_core::types::Bounds;

use crate::clock::Cadence;
use crate::damage::{apply_damage, DamageReport};
use crate::registry::Registry;

/// Per-frame combat context handed to weapons by the session.
pub struct CombatContext<'a> {
    pub registry: &'a mut Registry,
    /// Current hero position.
    pub origin: Vec2,
    /// Unit facing of the hero.
    pub facing: Vec2,
    pub now: f64,
    /// Bullets leaving this rectangle are dropped.
    pub bounds: Bounds,
    pub kills: &'a mut Vec<KillInfo>,
}

/// Live effects owned by a weapon, one shape per family.
#[derive(Debug, Clone)]
pub enum InFlight {
    Bullets(Vec<pistol::Bullet>),
    Pulse,
    Swing(Option<sword::Swing>),
    Bombs(Vec<bomb::Bomb>),
}

impl InFlight {
    fn empty(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Pistol => InFlight::Bullets(Vec::new()),
            WeaponKind::Aura => InFlight::Pulse,
            WeaponKind::Sword => InFlight::Swing(None),
            WeaponKind::Bomb => InFlight::Bombs(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            InFlight::Bullets(bullets) => bullets.len(),
            InFlight::Pulse => 0,
            InFlight::Swing(swing) => usize::from(swing.is_some()),
            InFlight::Bombs(bombs) => bombs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runtime state of one equipped weapon.
#[derive(Debug, Clone)]
pub struct Weapon {
    kind: WeaponKind,
    tier: u8,
    /// Unmodified template of the active tier.
    base: WeaponStats,
    /// `base` with the hero's multipliers applied.
    effective: WeaponStats,
    cadence: Cadence,
    effects: InFlight,
    damage_dealt: f64,
}

impl Weapon {
    /// Equip `kind` at `tier`, or `None` if the tier does not exist.
    pub fn new(kind: WeaponKind, tier: u8, damage_mult: f32, area_mult: f32) -> Option<Self> {
        let base = WeaponStats::tier(kind, tier)?;
        let effective = base.scaled(damage_mult, area_mult);
        Some(Self {
            kind,
            tier,
            base,
            effective,
            cadence: Cadence::new(effective.cooldown),
            effects: InFlight::empty(kind),
            damage_dealt: 0.0,
        })
    }

    /// Swap to another tier's template, restarting timing and effects.
    /// Damage dealt so far is kept.
    pub fn set_tier(&mut self, tier: u8, damage_mult: f32, area_mult: f32) -> bool {
        let Some(base) = WeaponStats::tier(self.kind, tier) else {
            return false;
        };
        self.tier = tier;
        self.base = base;
        self.effects = InFlight::empty(self.kind);
        self.cadence = Cadence::new(base.cooldown);
        self.refresh(damage_mult, area_mult);
        true
    }

    /// Recompute effective stats from the unmodified template.
    pub fn refresh(&mut self, damage_mult: f32, area_mult: f32) {
        self.effective = self.base.scaled(damage_mult, area_mult);
        self.cadence.set_cooldown(self.effective.cooldown);
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn base(&self) -> &WeaponStats {
        &self.base
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.effective
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn effects(&self) -> &InFlight {
        &self.effects
    }

    pub fn damage_dealt(&self) -> f64 {
        self.damage_dealt
    }

    /// Run the fire loop, then advance in-flight effects.
    pub fn update(&mut self, dt: f32, ctx: &mut CombatContext) {
        self.cadence.advance(dt);
        while self.cadence.ready() {
            if !self.trigger(ctx) {
                break;
            }
            self.cadence.consume();
        }
        self.update_effects(dt, ctx);
    }

    fn trigger(&mut self, ctx: &mut CombatContext) -> bool {
        let stats = self.effective;
        let lag = self.cadence.lag();
        let fired = match &mut self.effects {
            InFlight::Bullets(bullets) => pistol::trigger(&stats, ctx, bullets),
            InFlight::Pulse => aura::trigger(&stats, lag, ctx),
            InFlight::Swing(swing) => sword::trigger(&stats, ctx, swing),
            InFlight::Bombs(bombs) => bomb::trigger(&stats, ctx, bombs),
        };
        match fired {
            Some(dealt) => {
                self.damage_dealt += dealt as f64;
                true
            }
            None => false,
        }
    }

    fn update_effects(&mut self, dt: f32, ctx: &mut CombatContext) {
        let dealt = match &mut self.effects {
            InFlight::Bullets(bullets) => pistol::update(bullets, dt, ctx),
            InFlight::Pulse => 0.0,
            InFlight::Swing(swing) => sword::update(swing, dt, ctx),
            InFlight::Bombs(bombs) => bomb::update(bombs, ctx),
        };
        self.damage_dealt += dealt as f64;
    }

    /// Drop bullets outside `bounds`.
    pub fn retain_within(&mut self, bounds: &Bounds) {
        if let InFlight::Bullets(bullets) = &mut self.effects {
            bullets.retain(|b| bounds.contains(b.position));
        }
    }

    pub fn effect_views(&self, now: f64) -> Vec<EffectView> {
        match &self.effects {
            InFlight::Bullets(bullets) => bullets.iter().map(pistol::Bullet::view).collect(),
            InFlight::Pulse => Vec::new(),
            InFlight::Swing(swing) => swing.iter().map(sword::Swing::view).collect(),
            InFlight::Bombs(bombs) => bombs.iter().map(|b| b.view(now)).collect(),
        }
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            kind: self.kind,
            tier: self.tier,
            damage: self.effective.damage,
            cooldown: self.effective.cooldown,
            area: self.effective.area,
        }
    }
}

/// Damage helper tagging the weapon as the source.
pub(crate) fn strike(
    ctx: &mut CombatContext,
    entity: hecs::Entity,
    amount: f32,
    kind: WeaponKind,
) -> DamageReport {
    apply_damage(
        ctx.registry,
        entity,
        amount,
        DamageSource::Weapon(kind),
        ctx.kills,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_never_compound_into_base() {
        let mut weapon = Weapon::new(WeaponKind::Aura, 1, 1.0, 1.0).unwrap();
        let base_area = weapon.base().area;
        weapon.refresh(1.0, 1.5);
        weapon.refresh(1.0, 1.5);
        assert!((weapon.stats().area - base_area * 1.5).abs() < 0.01);
        assert_eq!(weapon.base().area, base_area);
    }

    #[test]
    fn tier_swap_keeps_damage_and_replaces_template() {
        let mut weapon = Weapon::new(WeaponKind::Pistol, 1, 2.0, 1.0).unwrap();
        weapon.damage_dealt = 12.0;
        assert!(weapon.set_tier(2, 2.0, 1.0));
        assert_eq!(weapon.tier(), 2);
        assert!((weapon.stats().damage - weapon.base().damage * 2.0).abs() < 0.01);
        assert_eq!(weapon.damage_dealt(), 12.0);
        assert!(!weapon.set_tier(9, 1.0, 1.0));
        assert_eq!(weapon.tier(), 2);
    }

    #[test]
    fn unknown_tier_is_none() {
        assert!(Weapon::new(WeaponKind::Bomb, 0, 1.0, 1.0).is_none());
        assert!(Weapon::new(WeaponKind::Bomb, 6, 1.0, 1.0).is_none());
    }
}
