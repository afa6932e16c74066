//! Coin ledger for the tower-defense game.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::KILL_REWARD_PER_WAVE;
use skirmish_core::error::Rejection;

/// Coin balance plus a lifetime-earned counter used for end-of-run scoring.
///
/// The balance never goes negative: a spend either succeeds in full or is
/// rejected with nothing charged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u32,
    lifetime_earned: u64,
}

impl Ledger {
    /// Ledger seeded with a starting balance. Starting coins are not "earned".
    pub fn with_balance(balance: u32) -> Self {
        Self {
            balance,
            lifetime_earned: 0,
        }
    }

    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
        self.lifetime_earned += amount as u64;
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Charge `cost`, or reject without charging anything.
    pub fn try_spend(&mut self, cost: u32) -> Result<(), Rejection> {
        if !self.can_afford(cost) {
            return Err(Rejection::InsufficientFunds {
                have: self.balance,
                need: cost,
            });
        }
        self.balance -= cost;
        Ok(())
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn lifetime_earned(&self) -> u64 {
        self.lifetime_earned
    }
}

/// Coins for a kill: the mob's base reward plus a linear per-wave bonus.
pub fn kill_reward(base_coins: u32, wave_index: usize) -> u32 {
    base_coins + KILL_REWARD_PER_WAVE * wave_index as u32
}
