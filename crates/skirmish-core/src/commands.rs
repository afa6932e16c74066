//! Player commands sent from the presentation layer to a session.
//!
//! Commands are queued and processed at the next tick boundary. Refusals
//! surface as `GameEvent::ActionRejected`.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Tile;

/// Hero chosen at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSelection {
    pub kind: HeroKind,
    /// Overrides the archetype's starting weapon when set.
    pub starting_weapon: Option<WeaponKind>,
}

impl HeroSelection {
    pub fn new(kind: HeroKind) -> Self {
        Self {
            kind,
            starting_weapon: None,
        }
    }

    pub fn with_weapon(kind: HeroKind, weapon: WeaponKind) -> Self {
        Self {
            kind,
            starting_weapon: Some(weapon),
        }
    }

    /// The weapon the hero enters the arena with, if any.
    pub fn resolved_weapon(&self) -> Option<WeaponKind> {
        self.starting_weapon.or(self.kind.stats().starting_weapon)
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    Pause,
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f32 },

    // --- Horde ---
    ChooseUpgrade { id: UpgradeId },
    UnequipWeapon { weapon: WeaponKind },

    // --- Defense ---
    PlaceTower { kind: TowerKind, tile: Tile },
    UpgradeTower { tower_id: u32 },
}
