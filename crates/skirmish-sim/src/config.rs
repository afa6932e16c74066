//! Session configuration.
//!
//! Both configs deserialize from JSON with every field optional; missing
//! fields take the tuning constants. `validate` runs at session construction
//! and turns setup mistakes into [`ConfigError`]s.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;
use skirmish_core::error::ConfigError;

use crate::waves::WaveTable;

/// Largest accepted time scale.
pub const MAX_TIME_SCALE: f32 = 4.0;

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn time_scale(value: f32) -> Result<(), ConfigError> {
    if (0.0..=MAX_TIME_SCALE).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: "time_scale",
            reason: format!("must be within 0..={MAX_TIME_SCALE}, got {value}"),
        })
    }
}

/// Configuration for a horde run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HordeConfig {
    /// RNG seed. Same seed and inputs reproduce the same run.
    pub seed: u64,
    pub time_scale: f32,
    pub view_half_width: f32,
    pub view_half_height: f32,
    pub wave_interval: f32,
    pub waves: WaveTable,
    pub spawn_buffer: f32,
    pub mob_spacing: f32,
    /// Minimum seconds between two contact hits from the same mob.
    pub contact_cooldown: f64,
    pub pickup_radius: f32,
    pub heal_interval: f32,
    pub heal_amount: f32,
    pub xp_base: f64,
    pub xp_growth: f64,
}

impl Default for HordeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            view_half_width: VIEW_HALF_WIDTH,
            view_half_height: VIEW_HALF_HEIGHT,
            wave_interval: HORDE_WAVE_INTERVAL_SECS,
            waves: WaveTable::default_horde(),
            spawn_buffer: SPAWN_BUFFER,
            mob_spacing: MOB_SPACING,
            contact_cooldown: CONTACT_COOLDOWN_SECS,
            pickup_radius: PICKUP_RADIUS,
            heal_interval: HEAL_INTERVAL_SECS,
            heal_amount: HEAL_AMOUNT,
            xp_base: XP_BASE,
            xp_growth: XP_GROWTH,
        }
    }
}

impl HordeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        time_scale(self.time_scale)?;
        positive("view_half_width", self.view_half_width)?;
        positive("view_half_height", self.view_half_height)?;
        positive("wave_interval", self.wave_interval)?;
        positive("heal_interval", self.heal_interval)?;
        positive("pickup_radius", self.pickup_radius)?;
        if self.waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }
        if self.spawn_buffer < 0.0 || self.mob_spacing < 0.0 || self.contact_cooldown < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "spacing",
                reason: "spawn_buffer, mob_spacing and contact_cooldown must not be negative"
                    .to_string(),
            });
        }
        if self.spawn_buffer >= MOB_CLEANUP_PADDING {
            return Err(ConfigError::InvalidValue {
                field: "spawn_buffer",
                reason: format!(
                    "{} would spawn mobs outside the cleanup margin of {MOB_CLEANUP_PADDING}",
                    self.spawn_buffer
                ),
            });
        }
        if self.xp_base <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "xp_base",
                reason: format!("must be positive, got {}", self.xp_base),
            });
        }
        if self.xp_growth <= 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "xp_growth",
                reason: format!("must exceed 1, got {}", self.xp_growth),
            });
        }
        Ok(())
    }
}

/// Configuration for a tower-defense run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    pub seed: u64,
    pub time_scale: f32,
    pub grid_width: i32,
    pub grid_height: i32,
    pub tile_size: f32,
    pub road_length: usize,
    pub starting_coins: u32,
    pub base_health: f32,
    pub wave_interval: f32,
    pub spawn_spacing: f32,
    pub waves: WaveTable,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            tile_size: TILE_SIZE,
            road_length: ROAD_LENGTH,
            starting_coins: STARTING_COINS,
            base_health: BASE_HEALTH,
            wave_interval: DEFENSE_WAVE_INTERVAL_SECS,
            spawn_spacing: SPAWN_SPACING_SECS,
            waves: WaveTable::default_defense(),
        }
    }
}

impl DefenseConfig {
    /// Tiles the road may occupy: half the map.
    pub fn road_budget(&self) -> usize {
        (self.grid_width.max(0) as usize * self.grid_height.max(0) as usize) / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        time_scale(self.time_scale)?;
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid",
                reason: format!("{}x{} has no tiles", self.grid_width, self.grid_height),
            });
        }
        positive("tile_size", self.tile_size)?;
        positive("base_health", self.base_health)?;
        positive("wave_interval", self.wave_interval)?;
        positive("spawn_spacing", self.spawn_spacing)?;
        if self.road_length < 2 {
            return Err(ConfigError::InvalidValue {
                field: "road_length",
                reason: "a road needs at least a start and a goal tile".to_string(),
            });
        }
        let budget = self.road_budget();
        if self.road_length > budget {
            return Err(ConfigError::RoadTooLong {
                requested: self.road_length,
                budget,
            });
        }
        if self.waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }
        Ok(())
    }
}
