//! Immutable stat templates: mobs, hero archetypes, weapon tiers, tower levels.
//!
//! Upgrades swap which template is active. Templates are never mutated;
//! global multipliers are applied to a copy at refresh time.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Stats a mob is spawned with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobTemplate {
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub xp: u32,
    pub coins: u32,
}

impl MobKind {
    pub fn template(&self) -> MobTemplate {
        match self {
            MobKind::Grunt => MobTemplate {
                radius: 12.0,
                health: 5.0,
                speed: 60.0,
                contact_damage: 5.0,
                xp: 2,
                coins: 4,
            },
            MobKind::Runner => MobTemplate {
                radius: 10.0,
                health: 3.0,
                speed: 110.0,
                contact_damage: 3.0,
                xp: 2,
                coins: 3,
            },
            MobKind::Brute => MobTemplate {
                radius: 20.0,
                health: 30.0,
                speed: 40.0,
                contact_damage: 12.0,
                xp: 8,
                coins: 12,
            },
            MobKind::Swarmer => MobTemplate {
                radius: 7.0,
                health: 2.0,
                speed: 80.0,
                contact_damage: 2.0,
                xp: 1,
                coins: 1,
            },
        }
    }
}

/// Stats of a playable hero archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    pub max_health: f32,
    pub speed: f32,
    pub starting_weapon: Option<WeaponKind>,
}

impl HeroKind {
    pub fn stats(&self) -> HeroStats {
        match self {
            HeroKind::Knight => HeroStats {
                max_health: 120.0,
                speed: 150.0,
                starting_weapon: Some(WeaponKind::Sword),
            },
            HeroKind::Ranger => HeroStats {
                max_health: 80.0,
                speed: 190.0,
                starting_weapon: None,
            },
        }
    }
}

/// Type-specific part of a weapon template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponPattern {
    /// `area` is the bullet radius.
    Projectile {
        /// Total targets one bullet may damage.
        pierce: u32,
        /// Bullets per trigger, fanned around the aim direction.
        count: u32,
        speed: f32,
        /// `None` targets the nearest mob regardless of distance.
        range: Option<f32>,
    },
    /// `area` is the pulse radius.
    Pulse,
    /// `area` is the reach of the swing.
    Arc { half_angle: f32, swing_secs: f32 },
    /// `area` is the blast radius.
    Fused { fuse_secs: f32 },
}

/// One tier of a weapon chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f32,
    pub cooldown: f32,
    pub area: f32,
    pub pattern: WeaponPattern,
}

impl WeaponStats {
    /// Copy of these stats with the global multipliers applied.
    pub fn scaled(&self, damage_mult: f32, area_mult: f32) -> Self {
        Self {
            damage: self.damage * damage_mult,
            area: self.area * area_mult,
            ..*self
        }
    }

    /// Template for `tier` (1-based) of a weapon chain.
    pub fn tier(weapon: WeaponKind, tier: u8) -> Option<WeaponStats> {
        let table = match weapon {
            WeaponKind::Pistol => &PISTOL_TIERS,
            WeaponKind::Aura => &AURA_TIERS,
            WeaponKind::Sword => &SWORD_TIERS,
            WeaponKind::Bomb => &BOMB_TIERS,
        };
        let index = (tier as usize).checked_sub(1)?;
        table.get(index).copied()
    }
}

const fn projectile(
    damage: f32,
    cooldown: f32,
    area: f32,
    pierce: u32,
    count: u32,
    range: Option<f32>,
) -> WeaponStats {
    WeaponStats {
        damage,
        cooldown,
        area,
        pattern: WeaponPattern::Projectile {
            pierce,
            count,
            speed: 520.0,
            range,
        },
    }
}

const fn arc(damage: f32, cooldown: f32, area: f32, half_angle: f32) -> WeaponStats {
    WeaponStats {
        damage,
        cooldown,
        area,
        pattern: WeaponPattern::Arc {
            half_angle,
            swing_secs: 0.2,
        },
    }
}

const fn fused(damage: f32, cooldown: f32, area: f32, fuse_secs: f32) -> WeaponStats {
    WeaponStats {
        damage,
        cooldown,
        area,
        pattern: WeaponPattern::Fused { fuse_secs },
    }
}

const fn pulse(damage: f32, cooldown: f32, area: f32) -> WeaponStats {
    WeaponStats {
        damage,
        cooldown,
        area,
        pattern: WeaponPattern::Pulse,
    }
}

pub const PISTOL_TIERS: [WeaponStats; 5] = [
    projectile(3.0, 0.8, 6.0, 1, 1, Some(400.0)),
    projectile(4.0, 0.7, 6.0, 2, 1, Some(420.0)),
    projectile(5.0, 0.6, 7.0, 2, 2, Some(440.0)),
    projectile(6.0, 0.5, 7.0, 3, 3, Some(460.0)),
    projectile(8.0, 0.4, 8.0, 4, 3, None),
];

pub const AURA_TIERS: [WeaponStats; 5] = [
    pulse(1.0, 0.5, 60.0),
    pulse(1.5, 0.45, 70.0),
    pulse(2.0, 0.4, 80.0),
    pulse(3.0, 0.35, 95.0),
    pulse(4.0, 0.3, 110.0),
];

pub const SWORD_TIERS: [WeaponStats; 5] = [
    arc(6.0, 1.2, 70.0, 0.6),
    arc(8.0, 1.1, 75.0, 0.7),
    arc(10.0, 1.0, 85.0, 0.8),
    arc(13.0, 0.85, 90.0, 0.9),
    arc(16.0, 0.7, 100.0, 1.0),
];

pub const BOMB_TIERS: [WeaponStats; 5] = [
    fused(10.0, 3.0, 70.0, 1.5),
    fused(14.0, 2.7, 80.0, 1.4),
    fused(18.0, 2.4, 90.0, 1.3),
    fused(24.0, 2.0, 105.0, 1.2),
    fused(30.0, 1.6, 120.0, 1.0),
];

/// Type-specific part of a tower level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TowerEffect {
    /// Instant hit on the nearest mob in range.
    Single,
    /// Pulse over everything in range, applying damage and a slow.
    Freeze { slow_factor: f32, slow_secs: f32 },
    /// Shell lobbed at the furthest-advanced mob, splashing on arrival.
    Bomb { splash: f32, travel_secs: f32 },
    /// Eight compass rays; a mob counts as on a ray within `hit_width`.
    Scatter { hit_width: f32 },
}

/// One level of a tower. `cost` is the price of reaching this level
/// (placement for level 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub cost: u32,
    pub damage: f32,
    pub cooldown: f32,
    pub range: f32,
    pub effect: TowerEffect,
}

impl TowerKind {
    pub fn levels(&self) -> &'static [TowerStats] {
        match self {
            TowerKind::Regular => &REGULAR_LEVELS,
            TowerKind::Freezer => &FREEZER_LEVELS,
            TowerKind::Bomber => &BOMBER_LEVELS,
            TowerKind::Scatter => &SCATTER_LEVELS,
        }
    }

    pub fn placement_cost(&self) -> u32 {
        self.levels()[0].cost
    }
}

pub const REGULAR_LEVELS: [TowerStats; 3] = [
    TowerStats { cost: 50, damage: 4.0, cooldown: 0.8, range: 120.0, effect: TowerEffect::Single },
    TowerStats { cost: 40, damage: 6.0, cooldown: 0.65, range: 140.0, effect: TowerEffect::Single },
    TowerStats { cost: 60, damage: 9.0, cooldown: 0.5, range: 160.0, effect: TowerEffect::Single },
];

pub const FREEZER_LEVELS: [TowerStats; 3] = [
    TowerStats {
        cost: 70,
        damage: 0.5,
        cooldown: 1.0,
        range: 90.0,
        effect: TowerEffect::Freeze { slow_factor: 0.6, slow_secs: 2.0 },
    },
    TowerStats {
        cost: 50,
        damage: 1.0,
        cooldown: 0.9,
        range: 105.0,
        effect: TowerEffect::Freeze { slow_factor: 0.5, slow_secs: 2.5 },
    },
    TowerStats {
        cost: 70,
        damage: 1.5,
        cooldown: 0.8,
        range: 120.0,
        effect: TowerEffect::Freeze { slow_factor: 0.4, slow_secs: 3.0 },
    },
];

pub const BOMBER_LEVELS: [TowerStats; 3] = [
    TowerStats {
        cost: 90,
        damage: 10.0,
        cooldown: 2.0,
        range: 150.0,
        effect: TowerEffect::Bomb { splash: 50.0, travel_secs: 0.6 },
    },
    TowerStats {
        cost: 60,
        damage: 15.0,
        cooldown: 1.8,
        range: 170.0,
        effect: TowerEffect::Bomb { splash: 60.0, travel_secs: 0.6 },
    },
    TowerStats {
        cost: 90,
        damage: 22.0,
        cooldown: 1.5,
        range: 190.0,
        effect: TowerEffect::Bomb { splash: 70.0, travel_secs: 0.5 },
    },
];

pub const SCATTER_LEVELS: [TowerStats; 3] = [
    TowerStats {
        cost: 80,
        damage: 3.0,
        cooldown: 1.0,
        range: 110.0,
        effect: TowerEffect::Scatter { hit_width: 12.0 },
    },
    TowerStats {
        cost: 60,
        damage: 4.0,
        cooldown: 0.9,
        range: 125.0,
        effect: TowerEffect::Scatter { hit_width: 14.0 },
    },
    TowerStats {
        cost: 80,
        damage: 6.0,
        cooldown: 0.75,
        range: 140.0,
        effect: TowerEffect::Scatter { hit_width: 16.0 },
    },
];
