//! The horde hero: body, weapons and global multipliers.

use glam::Vec2;
use tracing::debug;

use skirmish_core::constants::HERO_RADIUS;
use skirmish_core::enums::{HeroKind, WeaponKind};
use skirmish_core::error::Rejection;
use skirmish_core::state::HeroView;
use skirmish_progression::UpgradeEffect;

use crate::weapons::Weapon;

#[derive(Debug, Clone)]
pub struct Hero {
    pub kind: HeroKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Last non-zero input direction.
    pub facing: Vec2,
    pub weapons: Vec<Weapon>,
    area_multiplier: f32,
    damage_multiplier: f32,
}

impl Hero {
    pub fn new(kind: HeroKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            position: Vec2::ZERO,
            radius: HERO_RADIUS,
            health: stats.max_health,
            max_health: stats.max_health,
            speed: stats.speed,
            facing: Vec2::X,
            weapons: Vec::new(),
            area_multiplier: 1.0,
            damage_multiplier: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn has_weapon(&self) -> bool {
        !self.weapons.is_empty()
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind() == kind)
    }

    pub fn area_multiplier(&self) -> f32 {
        self.area_multiplier
    }

    pub fn damage_multiplier(&self) -> f32 {
        self.damage_multiplier
    }

    /// Track the last non-zero input as the facing direction.
    pub fn steer(&mut self, input: Vec2) {
        if let Some(direction) = input.try_normalize() {
            self.facing = direction;
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Equip `weapon` at `tier`, or swap an equipped weapon's template.
    pub fn equip_tier(&mut self, weapon: WeaponKind, tier: u8) -> bool {
        let (damage, area) = (self.damage_multiplier, self.area_multiplier);
        if let Some(equipped) = self.weapons.iter_mut().find(|w| w.kind() == weapon) {
            return equipped.set_tier(tier, damage, area);
        }
        match Weapon::new(weapon, tier, damage, area) {
            Some(fresh) => {
                self.weapons.push(fresh);
                true
            }
            None => false,
        }
    }

    /// Remove a weapon with all its in-flight effects. Returns it so the
    /// caller can keep its damage tally.
    pub fn unequip(&mut self, weapon: WeaponKind) -> Result<Weapon, Rejection> {
        let index = self
            .weapons
            .iter()
            .position(|w| w.kind() == weapon)
            .ok_or(Rejection::NotEquipped)?;
        Ok(self.weapons.remove(index))
    }

    /// Dispatch an upgrade effect. Returns false when it changed nothing,
    /// which only happens for a weapon tier with no template.
    pub fn apply(&mut self, effect: UpgradeEffect) -> bool {
        match effect {
            UpgradeEffect::EquipTier { weapon, tier } => self.equip_tier(weapon, tier),
            UpgradeEffect::AreaMultiplier(factor) => {
                self.area_multiplier *= factor;
                self.refresh_weapons();
                true
            }
            UpgradeEffect::DamageMultiplier(factor) => {
                self.damage_multiplier *= factor;
                self.refresh_weapons();
                true
            }
        }
    }

    fn refresh_weapons(&mut self) {
        debug!(
            area = self.area_multiplier,
            damage = self.damage_multiplier,
            "refreshing weapon stats"
        );
        for weapon in &mut self.weapons {
            weapon.refresh(self.damage_multiplier, self.area_multiplier);
        }
    }

    pub fn view(&self) -> HeroView {
        HeroView {
            kind: self.kind,
            position: self.position,
            radius: self.radius,
            health: self.health,
            max_health: self.max_health,
            facing: self.facing,
            weapons: self.weapons.iter().map(Weapon::view).collect(),
            area_multiplier: self.area_multiplier,
            damage_multiplier: self.damage_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_refresh_from_base() {
        let mut hero = Hero::new(HeroKind::Ranger);
        hero.equip_tier(WeaponKind::Aura, 1);
        let base = *hero.weapon(WeaponKind::Aura).unwrap().base();
        assert!(hero.apply(UpgradeEffect::AreaMultiplier(1.5)));
        assert!(hero.apply(UpgradeEffect::AreaMultiplier(2.0)));
        let weapon = hero.weapon(WeaponKind::Aura).unwrap();
        assert!((weapon.stats().area - base.area * 3.0).abs() < 0.01);
        assert_eq!(weapon.base().area, base.area);
    }

    #[test]
    fn new_weapons_pick_up_existing_multipliers() {
        let mut hero = Hero::new(HeroKind::Ranger);
        hero.apply(UpgradeEffect::DamageMultiplier(2.0));
        hero.apply(UpgradeEffect::EquipTier {
            weapon: WeaponKind::Pistol,
            tier: 1,
        });
        let weapon = hero.weapon(WeaponKind::Pistol).unwrap();
        assert!((weapon.stats().damage - weapon.base().damage * 2.0).abs() < 0.01);
    }

    #[test]
    fn missing_tier_reports_no_change() {
        let mut hero = Hero::new(HeroKind::Knight);
        hero.equip_tier(WeaponKind::Sword, 1);
        assert!(!hero.apply(UpgradeEffect::EquipTier {
            weapon: WeaponKind::Sword,
            tier: 9,
        }));
        assert!(!hero.apply(UpgradeEffect::EquipTier {
            weapon: WeaponKind::Bomb,
            tier: 0,
        }));
        assert_eq!(hero.weapons.len(), 1);
        assert_eq!(hero.weapon(WeaponKind::Sword).unwrap().tier(), 1);
    }

    #[test]
    fn tier_upgrade_replaces_in_place() {
        let mut hero = Hero::new(HeroKind::Knight);
        hero.equip_tier(WeaponKind::Sword, 1);
        hero.equip_tier(WeaponKind::Sword, 2);
        assert_eq!(hero.weapons.len(), 1);
        assert_eq!(hero.weapon(WeaponKind::Sword).unwrap().tier(), 2);
    }

    #[test]
    fn unequip_missing_weapon_is_rejected() {
        let mut hero = Hero::new(HeroKind::Ranger);
        assert_eq!(hero.unequip(WeaponKind::Bomb).unwrap_err(), Rejection::NotEquipped);
    }

    #[test]
    fn facing_ignores_zero_input() {
        let mut hero = Hero::new(HeroKind::Knight);
        hero.steer(Vec2::new(0.0, -2.0));
        hero.steer(Vec2::ZERO);
        assert_eq!(hero.facing, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn heal_caps_at_max() {
        let mut hero = Hero::new(HeroKind::Knight);
        hero.health = 10.0;
        hero.heal(1000.0);
        assert_eq!(hero.health, hero.max_health);
    }
}
