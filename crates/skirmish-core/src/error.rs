//! Error taxonomy.
//!
//! Invalid player actions are [`Rejection`]s: reported synchronously, state
//! untouched. Broken setup is a [`ConfigError`] and aborts session
//! construction. Spatial edge cases (coincident mobs, no clear spawn spot)
//! are recovered locally and never surface as errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::UpgradeId;
use crate::types::Tile;

/// An action that was refused. Nothing changed.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("insufficient coins: have {have}, need {need}")]
    InsufficientFunds { have: u32, need: u32 },
    #[error("tile ({}, {}) is outside the map", .0.x, .0.y)]
    OutOfBounds(Tile),
    #[error("tile ({}, {}) is part of the road", .0.x, .0.y)]
    OnRoad(Tile),
    #[error("tile ({}, {}) is already occupied", .0.x, .0.y)]
    Occupied(Tile),
    #[error("no tower with id {0}")]
    UnknownTower(u32),
    #[error("tower {0} is already at max level")]
    MaxLevel(u32),
    #[error("upgrade {0} is not on offer")]
    NotOffered(UpgradeId),
    #[error("upgrade {0} is already owned")]
    AlreadyOwned(UpgradeId),
    #[error("weapon is not equipped")]
    NotEquipped,
    #[error("session is not running")]
    NotRunning,
    #[error("session has already started")]
    AlreadyStarted,
}

/// Setup-time invariant violation. The session cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("road of {requested} tiles exceeds the map budget of {budget}")]
    RoadTooLong { requested: usize, budget: usize },
    #[error("could not lay a road after {attempts} attempts")]
    RoadGeneration { attempts: u32 },
    #[error("wave table is empty")]
    EmptyWaveTable,
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
