//! Upgrade catalog and eligibility.
//!
//! Options form a forest: one Mk1→Mk5 chain per weapon plus two short global
//! multiplier chains. An option is offered only when it is unowned, every
//! prerequisite is owned, its weapon tier is unlocked by lifetime damage, and
//! (for a hero with no weapon yet) it is a Mk1 starter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_core::constants::*;
use skirmish_core::enums::{UpgradeId, WeaponKind};
use skirmish_core::error::Rejection;

use crate::persistence::LifetimeDamage;

/// What applying an upgrade does to the hero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Swap the weapon's active template to this tier (equipping it at Mk1).
    EquipTier { weapon: WeaponKind, tier: u8 },
    /// Multiply the global area multiplier.
    AreaMultiplier(f32),
    /// Multiply the global damage multiplier.
    DamageMultiplier(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOption {
    pub id: UpgradeId,
    pub prerequisites: Vec<UpgradeId>,
    pub effect: UpgradeEffect,
}

impl UpgradeOption {
    /// Mk1 weapon options are the starter subset.
    pub fn is_starter(&self) -> bool {
        matches!(self.id, UpgradeId::Weapon { tier: 1, .. })
    }
}

/// Every upgrade in a stable order: weapon chains first, then multipliers.
pub fn catalog() -> Vec<UpgradeOption> {
    let mut options = Vec::new();
    for weapon in WeaponKind::ALL {
        for tier in 1..=WEAPON_TIERS {
            let prerequisites = if tier > 1 {
                vec![UpgradeId::weapon(weapon, tier - 1)]
            } else {
                Vec::new()
            };
            options.push(UpgradeOption {
                id: UpgradeId::weapon(weapon, tier),
                prerequisites,
                effect: UpgradeEffect::EquipTier { weapon, tier },
            });
        }
    }
    for tier in 1..=MULTIPLIER_TIERS {
        options.push(UpgradeOption {
            id: UpgradeId::Area(tier),
            prerequisites: (tier > 1).then(|| UpgradeId::Area(tier - 1)).into_iter().collect(),
            effect: UpgradeEffect::AreaMultiplier(AREA_UPGRADE_FACTOR),
        });
    }
    for tier in 1..=MULTIPLIER_TIERS {
        options.push(UpgradeOption {
            id: UpgradeId::Damage(tier),
            prerequisites: (tier > 1).then(|| UpgradeId::Damage(tier - 1)).into_iter().collect(),
            effect: UpgradeEffect::DamageMultiplier(DAMAGE_UPGRADE_FACTOR),
        });
    }
    options
}

pub fn find(id: UpgradeId) -> Option<UpgradeOption> {
    catalog().into_iter().find(|option| option.id == id)
}

/// Upgrades owned by one hero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeTree {
    owned: BTreeSet<UpgradeId>,
}

impl UpgradeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, id: UpgradeId) -> bool {
        self.owned.contains(&id)
    }

    pub fn owned(&self) -> impl Iterator<Item = UpgradeId> + '_ {
        self.owned.iter().copied()
    }

    /// Record an upgrade as owned without dispatching its effect.
    /// Used for a hero's starting weapon.
    pub fn grant(&mut self, id: UpgradeId) {
        self.owned.insert(id);
    }

    /// Remove a weapon's whole chain so it can be offered again.
    pub fn revoke_weapon(&mut self, weapon: WeaponKind) {
        self.owned.retain(|id| !matches!(id, UpgradeId::Weapon { weapon: w, .. } if *w == weapon));
    }

    /// Options the hero may be offered right now, in catalog order.
    pub fn eligible_options(&self, has_weapon: bool, lifetime: &LifetimeDamage) -> Vec<UpgradeId> {
        catalog()
            .into_iter()
            .filter(|option| self.is_eligible(option, has_weapon, lifetime))
            .map(|option| option.id)
            .collect()
    }

    fn is_eligible(&self, option: &UpgradeOption, has_weapon: bool, lifetime: &LifetimeDamage) -> bool {
        if self.owns(option.id) {
            return false;
        }
        if !option.prerequisites.iter().all(|p| self.owns(*p)) {
            return false;
        }
        if !has_weapon && !option.is_starter() {
            return false;
        }
        match option.id {
            UpgradeId::Weapon { weapon, tier } => tier <= lifetime.unlocked_tier(weapon),
            _ => true,
        }
    }

    /// Mark `id` owned and return the effect to dispatch.
    ///
    /// Eligibility against the current menu is checked by the caller; this
    /// only guards ownership and the prerequisite chain.
    pub fn apply(&mut self, id: UpgradeId) -> Result<UpgradeEffect, Rejection> {
        if self.owns(id) {
            return Err(Rejection::AlreadyOwned(id));
        }
        let option = find(id).ok_or(Rejection::NotOffered(id))?;
        if !option.prerequisites.iter().all(|p| self.owns(*p)) {
            return Err(Rejection::NotOffered(id));
        }
        self.owned.insert(id);
        debug!(upgrade = %id, "upgrade owned");
        Ok(option.effect)
    }
}
