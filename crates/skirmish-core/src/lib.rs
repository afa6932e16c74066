//! Core types and definitions for the skirmish arcade simulations.
//!
//! This crate defines the vocabulary shared by the progression rules, the
//! simulation, and any presentation layer: components, stat templates,
//! commands, snapshots, events, errors, and constants. It has no dependency
//! on an ECS runtime or a renderer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod defs;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
