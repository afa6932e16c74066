//! Lifetime damage snapshot: a flat `weapon → damage` map persisted as JSON.
//!
//! The snapshot is read at session start to decide which upgrade tiers are
//! unlocked, and merged with each run's damage when the run ends.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use skirmish_core::constants::TIER_UNLOCK_DAMAGE;
use skirmish_core::enums::WeaponKind;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse save file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Cumulative damage dealt per weapon across all runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifetimeDamage {
    totals: BTreeMap<String, f64>,
}

impl LifetimeDamage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot. A missing file is an empty snapshot, not an error.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            debug!(path = %path.display(), "no lifetime damage snapshot, starting empty");
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn damage_for(&self, weapon: WeaponKind) -> f64 {
        self.totals.get(weapon.as_str()).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, key: &str, amount: f64) {
        *self.totals.entry(key.to_string()).or_insert(0.0) += amount;
    }

    /// Add a run's per-weapon damage into the lifetime totals.
    pub fn merge(&mut self, run: &BTreeMap<String, f64>) {
        for (key, amount) in run {
            self.add(key, *amount);
        }
    }

    /// Highest tier (1-based) of `weapon` whose damage threshold has been met.
    pub fn unlocked_tier(&self, weapon: WeaponKind) -> u8 {
        let dealt = self.damage_for(weapon);
        TIER_UNLOCK_DAMAGE
            .iter()
            .take_while(|&&threshold| dealt >= threshold)
            .count() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
