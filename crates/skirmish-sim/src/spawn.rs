//! Spawn position search for the horde arena.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::SPAWN_ATTEMPTS;
use skirmish_core::enums::Edge;
use skirmish_core::types::Bounds;

use crate::registry::Registry;

/// Random point just outside `view` on `edge`, `buffer` units out.
pub fn edge_candidate(view: &Bounds, edge: Edge, buffer: f32, rng: &mut ChaCha8Rng) -> Vec2 {
    let x = rng.gen_range(view.min.x..=view.max.x);
    let y = rng.gen_range(view.min.y..=view.max.y);
    match edge {
        Edge::Top => Vec2::new(x, view.min.y - buffer),
        Edge::Bottom => Vec2::new(x, view.max.y + buffer),
        Edge::Left => Vec2::new(view.min.x - buffer, y),
        Edge::Right => Vec2::new(view.max.x + buffer, y),
    }
}

/// Pick a spawn point on `edge` clear of every live mob by `spacing`.
///
/// After [`SPAWN_ATTEMPTS`] crowded candidates the last one is used anyway;
/// the overlap resolver sorts it out.
pub fn find_position(
    registry: &Registry,
    view: &Bounds,
    edge: Edge,
    buffer: f32,
    radius: f32,
    spacing: f32,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    let mobs = registry.mobs();
    let mut candidate = edge_candidate(view, edge, buffer, rng);
    for attempt in 0..SPAWN_ATTEMPTS {
        if attempt > 0 {
            candidate = edge_candidate(view, edge, buffer, rng);
        }
        let clear = mobs
            .iter()
            .all(|m| m.position.distance(candidate) >= m.radius + radius + spacing);
        if clear {
            return candidate;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use skirmish_core::enums::MobKind;

    fn view() -> Bounds {
        Bounds::centered(Vec2::ZERO, Vec2::new(100.0, 50.0))
    }

    #[test]
    fn candidates_sit_outside_the_chosen_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            assert_eq!(edge_candidate(&view(), Edge::Top, 60.0, &mut rng).y, -110.0);
            assert_eq!(edge_candidate(&view(), Edge::Right, 60.0, &mut rng).x, 160.0);
            assert_eq!(edge_candidate(&view(), Edge::Bottom, 60.0, &mut rng).y, 110.0);
            assert_eq!(edge_candidate(&view(), Edge::Left, 60.0, &mut rng).x, -160.0);
        }
    }

    #[test]
    fn avoids_crowded_spots_when_possible() {
        let mut registry = Registry::new();
        registry.spawn_mob(MobKind::Brute, "", Vec2::new(0.0, -110.0), 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let p = find_position(&registry, &view(), Edge::Top, 60.0, 12.0, 4.0, &mut rng);
        assert!(p.distance(Vec2::new(0.0, -110.0)) >= 36.0);
    }

    #[test]
    fn falls_back_when_edge_is_full() {
        let mut registry = Registry::new();
        // Wall the whole top edge with brutes.
        let mut x = -120.0;
        while x <= 120.0 {
            registry.spawn_mob(MobKind::Brute, "", Vec2::new(x, -110.0), 1.0);
            x += 10.0;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let p = find_position(&registry, &view(), Edge::Top, 60.0, 12.0, 4.0, &mut rng);
        assert_eq!(p.y, -110.0);
        assert!((-100.0..=100.0).contains(&p.x));
    }
}
