//! Per-frame systems operating on the entity registry.
//!
//! Systems are free functions over `&mut Registry` (or `&Registry` for
//! read-only passes). They own no state; the sessions call them in a fixed
//! order each frame.

pub mod cleanup;
pub mod contact;
pub mod movement;
pub mod overlap;
pub mod pickups;
pub mod snapshot;
pub mod status;
