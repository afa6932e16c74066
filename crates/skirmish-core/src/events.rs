//! Events emitted by the simulation for UI and audio feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::RunOutcome;
use crate::types::Tile;

/// Reward information for a killed mob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillInfo {
    /// Entity bits of the mob that died.
    pub id: u64,
    pub kind: MobKind,
    pub position: Vec2,
    pub xp: u32,
    pub coins: u32,
    pub source: DamageSource,
}

/// Everything a presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave has been released.
    WaveAdvanced { wave_index: usize },
    /// The scripted wave table is exhausted.
    CampaignComplete { waves: usize },
    EntityKilled(KillInfo),
    HeroDamaged { amount: f32, remaining: f32 },
    LevelUp { level: u32 },
    UpgradeMenuOpened { options: Vec<UpgradeId> },
    UpgradeApplied { id: UpgradeId },
    /// A mob reached the defended base.
    MobLeaked { kind: MobKind, damage: f32, base_health: f32 },
    TowerPlaced { tower_id: u32, kind: TowerKind, tile: Tile, cost: u32 },
    TowerUpgraded { tower_id: u32, level: usize, cost: u32 },
    /// A queued command was refused.
    ActionRejected { reason: String },
    RunEnded(RunOutcome),
}
