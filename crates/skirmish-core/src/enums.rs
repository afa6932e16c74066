//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hostile mob template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MobKind {
    /// Baseline walker.
    Grunt,
    /// Fast, fragile.
    Runner,
    /// Slow, heavy, hits hard.
    Brute,
    /// Tiny and numerous.
    Swarmer,
}

/// Hero weapon family. Each family is an upgrade chain of tiers Mk1..Mk5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Single-target ranged projectiles with pierce.
    Pistol,
    /// Damage pulse around the hero.
    Aura,
    /// Melee arc in the facing direction.
    Sword,
    /// Fused explosive dropped at the hero's feet.
    Bomb,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::Aura,
        WeaponKind::Sword,
        WeaponKind::Bomb,
    ];

    /// Key used in persisted snapshots and upgrade identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Aura => "aura",
            WeaponKind::Sword => "sword",
            WeaponKind::Bomb => "bomb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        WeaponKind::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Tower-defense tower family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    Regular,
    Freezer,
    Bomber,
    Scatter,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Regular,
        TowerKind::Freezer,
        TowerKind::Bomber,
        TowerKind::Scatter,
    ];

    /// Key used for per-source damage tallies.
    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::Regular => "regular",
            TowerKind::Freezer => "freezer",
            TowerKind::Bomber => "bomber",
            TowerKind::Scatter => "scatter",
        }
    }
}

/// Playable hero archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroKind {
    /// Sturdy, slower.
    #[default]
    Knight,
    /// Fragile, faster.
    Ranger,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed, not yet started.
    #[default]
    Idle,
    Active,
    Paused,
    /// Frozen while the player picks an upgrade.
    ChoosingUpgrade,
    Ended,
}

/// Wave scheduler state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
    /// Every scripted wave has been released.
    Over,
}

/// One of the four screen-edge spawn zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn from_index(index: usize) -> Self {
        Edge::ALL[index % 4]
    }

    pub fn index(&self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Right => 1,
            Edge::Bottom => 2,
            Edge::Left => 3,
        }
    }

    /// The edge `k` steps clockwise from this one, wrapping modulo 4.
    pub fn offset(&self, k: usize) -> Self {
        Edge::from_index(self.index() + k)
    }
}

/// What dealt a point of damage. Used for per-weapon lifetime damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    Weapon(WeaponKind),
    Tower(TowerKind),
}

/// Collectible dropped into the horde arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Experience gem carrying the xp of the mob that dropped it.
    Experience(u32),
    /// Restores a fixed amount of hero health.
    Heal(f32),
}

/// Identifier of an upgrade option.
///
/// Weapon tiers form chains (Mk1 → Mk2 → … → Mk5); the global multipliers
/// form two independent shorter chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeId {
    Weapon { weapon: WeaponKind, tier: u8 },
    Area(u8),
    Damage(u8),
}

impl UpgradeId {
    pub fn weapon(weapon: WeaponKind, tier: u8) -> Self {
        UpgradeId::Weapon { weapon, tier }
    }

    /// Stable string key, e.g. `pistol_mk2` or `area_1`.
    pub fn key(&self) -> String {
        match self {
            UpgradeId::Weapon { weapon, tier } => format!("{}_mk{}", weapon.as_str(), tier),
            UpgradeId::Area(tier) => format!("area_{tier}"),
            UpgradeId::Damage(tier) => format!("damage_{tier}"),
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
