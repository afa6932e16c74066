//! Per-frame snapshots handed to the presentation layer, and run outcomes.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{SimTime, Tile};

/// Result of a finished (or abandoned) run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub victory: bool,
    pub waves_cleared: usize,
    pub kills: u32,
    pub leaks: u32,
    /// Experience collected (horde) or coins earned over the run (defense).
    pub resources_earned: u64,
    /// Damage dealt this run, keyed by weapon or tower name.
    pub damage_by_weapon: BTreeMap<String, f64>,
}

/// A mob as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobView {
    pub id: u64,
    pub kind: MobKind,
    pub appearance: String,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub slowed: bool,
}

/// An in-flight weapon or tower effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectView {
    Bullet { position: Vec2, radius: f32 },
    Swing { origin: Vec2, direction: Vec2, reach: f32, half_angle: f32 },
    Bomb { position: Vec2, radius: f32, fuse_remaining: f32 },
    Shell { position: Vec2, target: Vec2, splash: f32 },
    /// Instant shot drawn as a tracer for one frame.
    Tracer { from: Vec2, to: Vec2 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub position: Vec2,
    pub kind: PickupKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub tier: u8,
    pub damage: f32,
    pub cooldown: f32,
    pub area: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub kind: HeroKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub facing: Vec2,
    pub weapons: Vec<WeaponView>,
    pub area_multiplier: f32,
    pub damage_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u32,
    pub kind: TowerKind,
    pub level: usize,
    pub tile: Tile,
    pub position: Vec2,
    pub range: f32,
}

/// Complete horde state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HordeSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub scheduler: SchedulerState,
    pub wave_index: usize,
    pub wave_count: usize,
    pub hero: HeroView,
    pub mobs: Vec<MobView>,
    pub effects: Vec<EffectView>,
    pub pickups: Vec<PickupView>,
    pub level: u32,
    pub xp: f64,
    pub next_level_xp: f64,
    pub pending_options: Vec<UpgradeId>,
    pub kills: u32,
    pub events: Vec<GameEvent>,
}

/// Complete defense state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub scheduler: SchedulerState,
    pub wave_index: usize,
    pub wave_count: usize,
    pub base_health: f32,
    pub base_max_health: f32,
    pub coins: u32,
    pub lifetime_earned: u64,
    pub mobs: Vec<MobView>,
    pub effects: Vec<EffectView>,
    pub towers: Vec<TowerView>,
    pub kills: u32,
    pub leaks: u32,
    pub events: Vec<GameEvent>,
}
