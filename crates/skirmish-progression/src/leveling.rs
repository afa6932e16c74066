//! Experience accumulation and level thresholds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_core::constants::{XP_BASE, XP_GROWTH};

/// Absorbs float rounding when an award lands exactly on a threshold.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Per-hero experience state.
///
/// Reaching the threshold raises the level, grows the threshold by
/// `base × growth^(level − 1)` and queues one pending level-up token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    base: f64,
    growth: f64,
    total: f64,
    level: u32,
    threshold: f64,
    pending: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(XP_BASE, XP_GROWTH)
    }
}

impl Experience {
    /// `growth` must exceed 1 so each level costs strictly more than the last.
    pub fn new(base: f64, growth: f64) -> Self {
        Self {
            base,
            growth,
            total: 0.0,
            level: 1,
            threshold: base,
            pending: 0,
        }
    }

    /// Add experience. Returns the levels gained by this award.
    pub fn gain(&mut self, amount: f64) -> u32 {
        self.total += amount;
        let mut gained = 0;
        while self.total + THRESHOLD_EPSILON >= self.threshold {
            self.level += 1;
            self.threshold += self.base * self.growth.powi(self.level as i32 - 1);
            self.pending += 1;
            gained += 1;
        }
        if gained > 0 {
            debug!(level = self.level, pending = self.pending, "level up");
        }
        gained
    }

    /// Consume one pending level-up token, if any.
    pub fn take_token(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    /// Queue a token without levelling (e.g. a weaponless hero's first pick).
    pub fn grant_token(&mut self) {
        self.pending += 1;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Cumulative experience at which the next level is reached.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}
