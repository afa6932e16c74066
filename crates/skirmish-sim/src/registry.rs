//! Entity registry and spatial queries.
//!
//! Mobs and pickups live in a `hecs::World`. Every entity carries a
//! [`SpawnOrder`]; queries return results sorted by it so that "first
//! encountered wins" tie-breaks are stable across runs. Scans are linear,
//! which is fine for a few hundred live mobs.

use glam::Vec2;
use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::enums::{MobKind, PickupKind};

/// Read-only copy of the fields targeting needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobSample {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    /// Distance travelled along the defense road; zero in the arena.
    pub progress: f32,
}

#[derive(Default)]
pub struct Registry {
    world: World,
    next_order: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn next_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_order);
        self.next_order += 1;
        order
    }

    /// Spawn a mob from its template, with health scaled by `health_scale`.
    pub fn spawn_mob(
        &mut self,
        kind: MobKind,
        appearance: &str,
        position: Vec2,
        health_scale: f32,
    ) -> Entity {
        let template = kind.template();
        let health = template.health * health_scale;
        let order = self.next_order();
        self.world.spawn((
            Position(position),
            Body {
                radius: template.radius,
            },
            Health {
                current: health,
                max: health,
            },
            Mob {
                kind,
                appearance: appearance.to_string(),
            },
            Mobility {
                speed: template.speed,
                slow_factor: 1.0,
                slow_until: 0.0,
            },
            ContactDamage {
                amount: template.contact_damage,
                last_hit: None,
            },
            Reward {
                xp: template.xp,
                coins: template.coins,
            },
            order,
        ))
    }

    pub fn spawn_pickup(&mut self, kind: PickupKind, position: Vec2) -> Entity {
        let order = self.next_order();
        self.world.spawn((Position(position), Pickup { kind }, order))
    }

    /// All live mobs in spawn order.
    pub fn mobs(&self) -> Vec<MobSample> {
        let mut found: Vec<(SpawnOrder, MobSample)> = self
            .world
            .query::<(&Mob, &Position, &Body, &SpawnOrder, Option<&PathProgress>)>()
            .iter()
            .map(|(entity, (_mob, pos, body, order, progress))| {
                (
                    *order,
                    MobSample {
                        entity,
                        position: pos.0,
                        radius: body.radius,
                        progress: progress.map_or(0.0, |p| p.distance),
                    },
                )
            })
            .collect();
        found.sort_by_key(|(order, _)| *order);
        found.into_iter().map(|(_, sample)| sample).collect()
    }

    /// All pickups in spawn order.
    pub fn pickups(&self) -> Vec<(Entity, Vec2, PickupKind)> {
        let mut found: Vec<(SpawnOrder, (Entity, Vec2, PickupKind))> = self
            .world
            .query::<(&Pickup, &Position, &SpawnOrder)>()
            .iter()
            .map(|(entity, (pickup, pos, order))| (*order, (entity, pos.0, pickup.kind)))
            .collect();
        found.sort_by_key(|(order, _)| *order);
        found.into_iter().map(|(_, item)| item).collect()
    }

    /// Closest mob satisfying `predicate`. Ties go to the earliest spawned.
    pub fn nearest(&self, origin: Vec2, predicate: impl Fn(&MobSample) -> bool) -> Option<MobSample> {
        let mut best: Option<(f32, MobSample)> = None;
        for sample in self.mobs() {
            if !predicate(&sample) {
                continue;
            }
            let d = sample.position.distance_squared(origin);
            if best.map_or(true, |(best_d, _)| d < best_d) {
                best = Some((d, sample));
            }
        }
        best.map(|(_, sample)| sample)
    }

    /// Closest mob whose center is within `range`, or the closest overall when
    /// `range` is `None`.
    pub fn nearest_within(&self, origin: Vec2, range: Option<f32>) -> Option<MobSample> {
        match range {
            Some(r) => self.nearest(origin, |m| m.position.distance(origin) <= r),
            None => self.nearest(origin, |_| true),
        }
    }

    /// In-range mob furthest along the road. Ties go to the earliest spawned.
    pub fn furthest_advanced(&self, origin: Vec2, range: f32) -> Option<MobSample> {
        let mut best: Option<MobSample> = None;
        for sample in self.mobs() {
            if sample.position.distance(origin) > range {
                continue;
            }
            if best.map_or(true, |b| sample.progress > b.progress) {
                best = Some(sample);
            }
        }
        best
    }

    /// Mobs whose center lies within `radius` of `origin` (inclusive).
    pub fn within_radius(&self, origin: Vec2, radius: f32) -> Vec<MobSample> {
        self.mobs()
            .into_iter()
            .filter(|m| m.position.distance(origin) <= radius)
            .collect()
    }

    /// Mobs whose body overlaps a circle of `radius` at `origin`.
    pub fn touching(&self, origin: Vec2, radius: f32) -> Vec<MobSample> {
        self.mobs()
            .into_iter()
            .filter(|m| m.position.distance(origin) <= radius + m.radius)
            .collect()
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    pub fn mob_count(&self) -> usize {
        self.world.query::<&Mob>().iter().count()
    }
}

/// Every unordered index pair `(i, j)` with `i < j` over `len` items.
pub fn pairwise(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(points: &[Vec2]) -> (Registry, Vec<Entity>) {
        let mut registry = Registry::new();
        let entities = points
            .iter()
            .map(|p| registry.spawn_mob(MobKind::Grunt, "g", *p, 1.0))
            .collect();
        (registry, entities)
    }

    #[test]
    fn nearest_breaks_ties_by_spawn_order() {
        let (registry, entities) =
            registry_with(&[Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0), Vec2::new(0.0, 10.0)]);
        let hit = registry.nearest(Vec2::ZERO, |_| true).unwrap();
        assert_eq!(hit.entity, entities[0]);
    }

    #[test]
    fn nearest_respects_predicate_and_range() {
        let (registry, entities) = registry_with(&[Vec2::new(5.0, 0.0), Vec2::new(50.0, 0.0)]);
        let far = registry.nearest(Vec2::ZERO, |m| m.entity != entities[0]).unwrap();
        assert_eq!(far.entity, entities[1]);
        assert!(registry.nearest_within(Vec2::new(200.0, 0.0), Some(100.0)).is_none());
        assert!(registry.nearest_within(Vec2::new(200.0, 0.0), None).is_some());
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let (registry, _) = registry_with(&[Vec2::new(30.0, 0.0), Vec2::new(30.5, 0.0)]);
        assert_eq!(registry.within_radius(Vec2::ZERO, 30.0).len(), 1);
    }

    #[test]
    fn despawned_mobs_leave_queries() {
        let (mut registry, entities) = registry_with(&[Vec2::ZERO, Vec2::ONE]);
        assert!(registry.despawn(entities[0]));
        assert!(!registry.despawn(entities[0]));
        assert!(!registry.is_active(entities[0]));
        assert_eq!(registry.mob_count(), 1);
        assert_eq!(registry.mobs()[0].entity, entities[1]);
    }

    #[test]
    fn pickups_are_not_mobs() {
        let mut registry = Registry::new();
        registry.spawn_pickup(PickupKind::Experience(3), Vec2::ZERO);
        assert_eq!(registry.mob_count(), 0);
        assert!(registry.nearest(Vec2::ZERO, |_| true).is_none());
        assert_eq!(registry.pickups().len(), 1);
    }

    #[test]
    fn pairwise_lists_each_pair_once() {
        let pairs: Vec<_> = pairwise(4).collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (0, 1));
        assert_eq!(pairs[5], (2, 3));
        assert_eq!(pairwise(1).count(), 0);
    }
}
