//! ECS components for mob and pickup entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// World-space center of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Collision circle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Marks an entity as a hostile mob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub kind: MobKind,
    /// Visual variant forwarded untouched to the presentation layer.
    pub appearance: String,
}

/// Movement speed and the active slow effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    /// Base speed in units per second.
    pub speed: f32,
    /// Speed multiplier while slowed (1.0 = unslowed).
    pub slow_factor: f32,
    /// Simulation time (seconds) at which the slow wears off.
    pub slow_until: f64,
}

/// Damage dealt on touching the hero or reaching the defended base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactDamage {
    pub amount: f32,
    /// Simulation time of the last landed contact hit.
    pub last_hit: Option<f64>,
}

/// Paid out exactly once when the mob dies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub coins: u32,
}

/// Monotonic insertion counter. Queries sort by it so ties resolve in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Per-target aura cooldown, shared by every aura that touches this mob.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuraMark {
    pub ready_at: f64,
}

/// Progress along the defense road.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the waypoint being walked toward.
    pub next_waypoint: usize,
    /// Distance travelled along the road so far.
    pub distance: f32,
}

/// Collectible lying in the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
}
