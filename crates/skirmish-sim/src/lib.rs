//! Simulation layer for the skirmish arcade games.
//!
//! Owns the hecs entity registry, runs weapon, tower and movement systems
//! for a frame of `dt` seconds, and produces snapshots for the presentation
//! layer. Two session engines share the same building blocks:
//! [`HordeSession`] (survival shooter) and [`DefenseSession`] (tower defense).

pub mod clock;
pub mod config;
pub mod damage;
pub mod defense;
pub mod hero;
pub mod horde;
pub mod registry;
pub mod road;
pub mod spawn;
pub mod systems;
pub mod towers;
pub mod waves;
pub mod weapons;

pub use skirmish_core as core;
pub use config::{DefenseConfig, HordeConfig};
pub use defense::DefenseSession;
pub use horde::HordeSession;

#[cfg(test)]
mod tests;
