//! Overlap resolver: one symmetric relaxation pass over every mob pair.
//!
//! Displacements are accumulated from the positions at the start of the pass
//! and applied together, so the result does not depend on pair order.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::Position;
use skirmish_core::constants::OVERLAP_NUDGE;

use crate::registry::{pairwise, Registry};

/// Push overlapping mobs apart by half the overlap each.
/// Coincident mobs are separated by [`OVERLAP_NUDGE`] along a random direction.
pub fn resolve(registry: &mut Registry, spacing: f32, rng: &mut ChaCha8Rng) {
    let mobs = registry.mobs();
    let mut shifts = vec![Vec2::ZERO; mobs.len()];
    for (i, j) in pairwise(mobs.len()) {
        let (a, b) = (&mobs[i], &mobs[j]);
        let delta = b.position - a.position;
        let min_distance = a.radius + b.radius + spacing;
        let distance = delta.length();
        if distance >= min_distance {
            continue;
        }
        let (normal, push) = if distance <= f32::EPSILON {
            (Vec2::from_angle(rng.gen_range(0.0..TAU)), OVERLAP_NUDGE / 2.0)
        } else {
            (delta / distance, (min_distance - distance) / 2.0)
        };
        shifts[i] -= normal * push;
        shifts[j] += normal * push;
    }
    let world = registry.world_mut();
    for (mob, shift) in mobs.iter().zip(shifts) {
        if shift == Vec2::ZERO {
            continue;
        }
        if let Ok(pos) = world.query_one_mut::<&mut Position>(mob.entity) {
            pos.0 += shift;
        }
    }
}
