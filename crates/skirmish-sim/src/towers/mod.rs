//! Defense towers.
//!
//! Towers share the weapon fire loop: a carry-forward [`Cadence`] that keeps
//! its credit when nothing is in range. Level templates are immutable;
//! upgrading swaps the active level and restarts timing and effects.

pub mod bomber;
pub mod freezer;
pub mod regular;
pub mod scatter;

use glam::Vec2;

use skirmish_core::defs::{TowerEffect, TowerStats};
use skirmish_core::enums::{DamageSource, TowerKind};
use skirmish_core::events::KillInfo;
use skirmish_core::state::{EffectView, TowerView};
use skirmish_core::types::Tile;

use crate::clock::Cadence;
use crate::damage::{apply_damage, DamageReport};
use crate::registry::Registry;

pub struct TowerContext<'a> {
    pub registry: &'a mut Registry,
    pub now: f64,
    pub kills: &'a mut Vec<KillInfo>,
}

#[derive(Debug, Clone)]
pub struct Tower {
    id: u32,
    kind: TowerKind,
    level: usize,
    tile: Tile,
    position: Vec2,
    cadence: Cadence,
    shells: Vec<bomber::Shell>,
    /// Instant shots fired this frame, drawn once.
    tracers: Vec<Vec2>,
    damage_dealt: f64,
}

impl Tower {
    pub fn new(id: u32, kind: TowerKind, tile: Tile, tile_size: f32) -> Self {
        Self {
            id,
            kind,
            level: 0,
            tile,
            position: tile.center(tile_size),
            cadence: Cadence::new(kind.levels()[0].cooldown),
            shells: Vec::new(),
            tracers: Vec::new(),
            damage_dealt: 0.0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> TowerKind {
        self.kind
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn stats(&self) -> &'static TowerStats {
        &self.kind.levels()[self.level]
    }

    /// Cost of the next level, or `None` at max level.
    pub fn upgrade_cost(&self) -> Option<u32> {
        self.kind.levels().get(self.level + 1).map(|s| s.cost)
    }

    /// Move to the next level, restarting the cadence and dropping shells in
    /// flight, the same way a weapon tier swap does. Returns false at max level.
    pub fn level_up(&mut self) -> bool {
        if self.upgrade_cost().is_none() {
            return false;
        }
        self.level += 1;
        self.cadence = Cadence::new(self.stats().cooldown);
        self.clear_effects();
        true
    }

    /// Drop every shell and tracer this tower owns.
    pub fn clear_effects(&mut self) {
        self.shells.clear();
        self.tracers.clear();
    }

    pub fn damage_dealt(&self) -> f64 {
        self.damage_dealt
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn update(&mut self, dt: f32, ctx: &mut TowerContext) {
        self.tracers.clear();
        self.cadence.advance(dt);
        while self.cadence.ready() {
            if !self.trigger(ctx) {
                break;
            }
            self.cadence.consume();
        }
        let dealt = bomber::update(&mut self.shells, ctx, self.kind);
        self.damage_dealt += dealt as f64;
    }

    fn trigger(&mut self, ctx: &mut TowerContext) -> bool {
        let stats = self.stats();
        let fired = match stats.effect {
            TowerEffect::Single => regular::trigger(self.position, stats, ctx, &mut self.tracers),
            TowerEffect::Freeze {
                slow_factor,
                slow_secs,
            } => freezer::trigger(self.position, stats, slow_factor, slow_secs, ctx),
            TowerEffect::Bomb {
                splash,
                travel_secs,
            } => bomber::trigger(self.position, stats, splash, travel_secs, ctx, &mut self.shells),
            TowerEffect::Scatter { hit_width } => {
                scatter::trigger(self.position, stats, hit_width, ctx, &mut self.tracers)
            }
        };
        match fired {
            Some(dealt) => {
                self.damage_dealt += dealt as f64;
                true
            }
            None => false,
        }
    }

    pub fn effect_views(&self, now: f64) -> Vec<EffectView> {
        let tracers = self.tracers.iter().map(|to| EffectView::Tracer {
            from: self.position,
            to: *to,
        });
        let shells = self.shells.iter().map(|s| s.view(now));
        tracers.chain(shells).collect()
    }

    pub fn view(&self) -> TowerView {
        TowerView {
            id: self.id,
            kind: self.kind,
            level: self.level,
            tile: self.tile,
            position: self.position,
            range: self.stats().range,
        }
    }
}

pub(crate) fn strike(
    ctx: &mut TowerContext,
    entity: hecs::Entity,
    amount: f32,
    kind: TowerKind,
) -> DamageReport {
    apply_damage(ctx.registry, entity, amount, DamageSource::Tower(kind), ctx.kills)
}
