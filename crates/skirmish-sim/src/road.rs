//! Road generation for the defense map.
//!
//! The road is a seeded self-avoiding walk starting on the left column.
//! Steps that would run alongside earlier road tiles are avoided when another
//! option exists, so the road reads as a single lane.

use std::collections::HashSet;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use skirmish_core::constants::ROAD_GENERATION_ATTEMPTS;
use skirmish_core::error::ConfigError;
use skirmish_core::types::Tile;

#[derive(Debug, Clone)]
pub struct Road {
    tiles: Vec<Tile>,
    occupied: HashSet<Tile>,
    waypoints: Vec<Vec2>,
}

impl Road {
    /// Build a road from explicit tiles.
    pub fn from_tiles(tiles: Vec<Tile>, tile_size: f32) -> Self {
        let occupied = tiles.iter().copied().collect();
        let waypoints = tiles.iter().map(|t| t.center(tile_size)).collect();
        Self {
            tiles,
            occupied,
            waypoints,
        }
    }

    /// Generate a road of `length` tiles on a `width × height` grid.
    pub fn generate(
        width: i32,
        height: i32,
        length: usize,
        tile_size: f32,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, ConfigError> {
        let budget = (width.max(0) as usize * height.max(0) as usize) / 2;
        if length > budget {
            return Err(ConfigError::RoadTooLong {
                requested: length,
                budget,
            });
        }
        for attempt in 0..ROAD_GENERATION_ATTEMPTS {
            if let Some(tiles) = walk(width, height, length, rng) {
                debug!(attempt, length, "road generated");
                return Ok(Self::from_tiles(tiles, tile_size));
            }
        }
        Err(ConfigError::RoadGeneration {
            attempts: ROAD_GENERATION_ATTEMPTS,
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.occupied.contains(&tile)
    }

    /// Tile-center waypoints in walking order.
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn start(&self) -> Vec2 {
        self.waypoints.first().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

fn walk(width: i32, height: i32, length: usize, rng: &mut ChaCha8Rng) -> Option<Vec<Tile>> {
    let mut current = Tile::new(0, rng.gen_range(0..height));
    let mut tiles = vec![current];
    let mut visited: HashSet<Tile> = HashSet::from([current]);
    while tiles.len() < length {
        let mut open: Vec<Tile> = current
            .neighbours()
            .into_iter()
            .filter(|t| t.in_grid(width, height) && !visited.contains(t))
            .collect();
        if open.is_empty() {
            return None;
        }
        open.shuffle(rng);
        let lane = open.iter().copied().find(|t| {
            t.neighbours()
                .iter()
                .all(|n| *n == current || !visited.contains(n))
        });
        current = lane.unwrap_or(open[0]);
        visited.insert(current);
        tiles.push(current);
    }
    Some(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn road_is_connected_and_self_avoiding() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let road = Road::generate(20, 12, 40, 40.0, &mut rng).unwrap();
        assert_eq!(road.len(), 40);
        assert_eq!(road.tiles()[0].x, 0);
        let unique: HashSet<_> = road.tiles().iter().collect();
        assert_eq!(unique.len(), 40);
        for pair in road.tiles().windows(2) {
            let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(d, 1);
        }
        assert!(road.tiles().iter().all(|t| t.in_grid(20, 12)));
        assert_eq!(road.waypoints()[0], road.tiles()[0].center(40.0));
    }

    #[test]
    fn same_seed_same_road() {
        let a = Road::generate(20, 12, 30, 40.0, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        let b = Road::generate(20, 12, 30, 40.0, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn over_budget_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            Road::generate(4, 4, 9, 40.0, &mut rng).unwrap_err(),
            ConfigError::RoadTooLong {
                requested: 9,
                budget: 8
            }
        );
    }
}
