//! Frame-driven timing primitives.
//!
//! Nothing here reads a wall clock. Sessions feed every accumulator the same
//! scaled `dt`, so a time scale of zero freezes all of them at once.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::MIN_COOLDOWN_SECS;

/// f32 sums drift a few ulps below an exact boundary; a trigger that is due
/// must not slip a frame because of it.
const READY_SLACK: f32 = 1e-5;

/// Carry-forward cooldown accumulator shared by every weapon and tower.
///
/// Firing subtracts one cooldown instead of zeroing, so leftover time carries
/// into the next trigger and a long frame can fire several times. A trigger
/// with nothing to hit leaves the accumulator alone, so idle time is kept
/// as fire-rate credit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    cooldown: f32,
    elapsed: f32,
}

impl Cadence {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown: cooldown.max(MIN_COOLDOWN_SECS),
            elapsed: 0.0,
        }
    }

    /// Change the cooldown, keeping accumulated time.
    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.cooldown = cooldown.max(MIN_COOLDOWN_SECS);
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn ready(&self) -> bool {
        self.elapsed + READY_SLACK >= self.cooldown
    }

    /// Spend one cooldown's worth of accumulated time.
    pub fn consume(&mut self) {
        self.elapsed -= self.cooldown;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time by which the current trigger is late relative to its nominal slot.
    pub fn lag(&self) -> f32 {
        (self.elapsed - self.cooldown).max(0.0)
    }
}

/// Cooperative repeating timer (wave interval, spawn spacing, heal drops).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    period: f32,
    elapsed: f32,
    armed: bool,
}

impl RepeatingTimer {
    /// A disarmed timer with the given period.
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(MIN_COOLDOWN_SECS),
            elapsed: 0.0,
            armed: false,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed = 0.0;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance and return how many periods completed during `dt`.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.armed {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed + READY_SLACK >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}
