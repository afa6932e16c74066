//! Progression rules shared by the arcade sessions.
//!
//! Experience and leveling, the upgrade catalog and its eligibility rules,
//! the coin ledger, and the persisted lifetime-damage snapshot. Pure data and
//! rules: nothing here touches the ECS world.

pub mod economy;
pub mod leveling;
pub mod persistence;
pub mod upgrades;

pub use economy::Ledger;
pub use leveling::Experience;
pub use persistence::{LifetimeDamage, PersistenceError};
pub use upgrades::{UpgradeEffect, UpgradeTree};
