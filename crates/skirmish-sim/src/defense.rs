//! Defense session: tower defense on a generated road.
//!
//! Waves fill a spawn queue that releases one mob per `spawn_spacing`
//! seconds at the start of the road. Mobs walk tile-center waypoints; one
//! reaching the end leaks and damages the base. Towers are bought and
//! upgraded with coins earned from kills.

use std::collections::{BTreeMap, VecDeque};

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::{ContactDamage, Mob, PathProgress};
use skirmish_core::constants::DEFENSE_HEALTH_GROWTH;
use skirmish_core::enums::{MobKind, SchedulerState, SessionPhase, TowerKind};
use skirmish_core::error::{ConfigError, Rejection};
use skirmish_core::events::{GameEvent, KillInfo};
use skirmish_core::state::{DefenseSnapshot, RunOutcome};
use skirmish_core::types::{Bounds, SimTime, Tile};
use skirmish_progression::economy::kill_reward;
use skirmish_progression::Ledger;

use crate::clock::RepeatingTimer;
use crate::config::{DefenseConfig, MAX_TIME_SCALE};
use crate::registry::Registry;
use crate::road::Road;
use crate::systems::{cleanup, movement, snapshot, status};
use crate::towers::{Tower, TowerContext};
use crate::waves::{WaveScheduler, WaveTick};

/// A mob waiting in the spawn queue.
#[derive(Debug, Clone)]
struct Queued {
    kind: MobKind,
    appearance: String,
    wave: usize,
}

pub struct DefenseSession {
    config: DefenseConfig,
    phase: SessionPhase,
    time: SimTime,
    time_scale: f32,
    rng: ChaCha8Rng,
    registry: Registry,
    road: Road,
    towers: Vec<Tower>,
    next_tower_id: u32,
    ledger: Ledger,
    base_health: f32,
    scheduler: WaveScheduler,
    spawn_queue: VecDeque<Queued>,
    spawn_timer: RepeatingTimer,
    /// Index of the most recently released wave.
    current_wave: usize,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    kill_buffer: Vec<KillInfo>,
    events: Vec<GameEvent>,
    kills: u32,
    leaks: u32,
    waves_released: usize,
    outcome: Option<RunOutcome>,
}

impl DefenseSession {
    /// Validate the config and lay the road.
    pub fn new(config: DefenseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let road = Road::generate(
            config.grid_width,
            config.grid_height,
            config.road_length,
            config.tile_size,
            &mut rng,
        )?;
        Ok(Self {
            phase: SessionPhase::Idle,
            time: SimTime::default(),
            time_scale: config.time_scale,
            rng,
            registry: Registry::new(),
            road,
            towers: Vec::new(),
            next_tower_id: 0,
            ledger: Ledger::with_balance(config.starting_coins),
            base_health: config.base_health,
            scheduler: WaveScheduler::new(config.waves.clone(), config.wave_interval),
            spawn_queue: VecDeque::new(),
            spawn_timer: RepeatingTimer::new(config.spawn_spacing),
            current_wave: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            kill_buffer: Vec::new(),
            events: Vec::new(),
            kills: 0,
            leaks: 0,
            waves_released: 0,
            outcome: None,
            config,
        })
    }

    /// Release the first wave and start the clocks.
    pub fn start(&mut self) -> Result<(), Rejection> {
        if self.phase != SessionPhase::Idle {
            return Err(Rejection::AlreadyStarted);
        }
        self.phase = SessionPhase::Active;
        self.spawn_timer.arm();
        info!(
            road = self.road.len(),
            coins = self.ledger.balance(),
            "defense run started"
        );
        if let Some(tick) = self.scheduler.start(&mut self.rng) {
            self.handle_wave(tick);
        }
        Ok(())
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn tick(&mut self, dt: f32) -> DefenseSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let dt = dt.max(0.0) * self.time_scale;
            if dt > 0.0 {
                self.time.advance(dt);
                self.run_systems(dt);
            }
        }

        self.snapshot()
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Paused;
            info!(time = self.time.now(), "defense paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Active;
            info!(time = self.time.now(), "defense resumed");
        }
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
    }

    pub fn end(&mut self) -> RunOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        self.finish(false)
    }

    /// Buy a tower on `tile`. Nothing is charged when the placement is refused.
    pub fn place_tower(&mut self, kind: TowerKind, tile: Tile) -> Result<u32, Rejection> {
        if self.phase == SessionPhase::Ended {
            return Err(Rejection::NotRunning);
        }
        if !tile.in_grid(self.config.grid_width, self.config.grid_height) {
            return Err(Rejection::OutOfBounds(tile));
        }
        if self.road.contains(tile) {
            return Err(Rejection::OnRoad(tile));
        }
        if self.towers.iter().any(|t| t.tile() == tile) {
            return Err(Rejection::Occupied(tile));
        }
        let cost = kind.placement_cost();
        self.ledger.try_spend(cost)?;

        let id = self.next_tower_id;
        self.next_tower_id += 1;
        self.towers
            .push(Tower::new(id, kind, tile, self.config.tile_size));
        debug!(id, ?kind, x = tile.x, y = tile.y, cost, "tower placed");
        self.events.push(GameEvent::TowerPlaced {
            tower_id: id,
            kind,
            tile,
            cost,
        });
        Ok(id)
    }

    /// Raise a tower one level. Returns the new level.
    pub fn upgrade_tower(&mut self, tower_id: u32) -> Result<usize, Rejection> {
        if self.phase == SessionPhase::Ended {
            return Err(Rejection::NotRunning);
        }
        let tower = self
            .towers
            .iter_mut()
            .find(|t| t.id() == tower_id)
            .ok_or(Rejection::UnknownTower(tower_id))?;
        let cost = tower.upgrade_cost().ok_or(Rejection::MaxLevel(tower_id))?;
        self.ledger.try_spend(cost)?;
        tower.level_up();
        let level = tower.level();
        debug!(tower_id, level, cost, "tower upgraded");
        self.events.push(GameEvent::TowerUpgraded {
            tower_id,
            level,
            cost,
        });
        Ok(level)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn base_health(&self) -> f32 {
        self.base_health
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Tiles a tower could be placed on right now.
    pub fn open_tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for y in 0..self.config.grid_height {
            for x in 0..self.config.grid_width {
                let tile = Tile::new(x, y);
                if !self.road.contains(tile) && self.towers.iter().all(|t| t.tile() != tile) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Damage dealt this run per tower kind.
    pub fn damage_by_tower(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for tower in &self.towers {
            *totals
                .entry(tower.kind().as_str().to_string())
                .or_insert(0.0) += tower.damage_dealt();
        }
        totals
    }

    /// Put a mob at the start of the road (scripted scenarios and tests).
    pub fn spawn_mob(&mut self, kind: MobKind) -> Entity {
        self.spawn_on_road(kind, "", 1.0)
    }

    fn spawn_on_road(&mut self, kind: MobKind, appearance: &str, health_scale: f32) -> Entity {
        let entity = self
            .registry
            .spawn_mob(kind, appearance, self.road.start(), health_scale);
        let _ = self.registry.world_mut().insert_one(
            entity,
            PathProgress {
                next_waypoint: 1,
                distance: 0.0,
            },
        );
        entity
    }

    fn map_bounds(&self) -> Bounds {
        let size = self.config.tile_size;
        Bounds::new(
            glam::Vec2::ZERO,
            glam::Vec2::new(
                self.config.grid_width as f32 * size,
                self.config.grid_height as f32 * size,
            ),
        )
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        let result = match command {
            PlayerCommand::Pause => {
                self.pause();
                Ok(())
            }
            PlayerCommand::Resume => {
                self.resume();
                Ok(())
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.set_time_scale(scale);
                Ok(())
            }
            PlayerCommand::PlaceTower { kind, tile } => self.place_tower(kind, tile).map(|_| ()),
            PlayerCommand::UpgradeTower { tower_id } => self.upgrade_tower(tower_id).map(|_| ()),
            PlayerCommand::ChooseUpgrade { .. } | PlayerCommand::UnequipWeapon { .. } => {
                debug!(?command, "horde command ignored by defense session");
                Ok(())
            }
        };
        if let Err(rejection) = result {
            debug!(%rejection, "command rejected");
            self.events.push(GameEvent::ActionRejected {
                reason: rejection.to_string(),
            });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let now = self.time.now();

        // 1. Spawn queue
        for _ in 0..self.spawn_timer.tick(dt) {
            if let Some(queued) = self.spawn_queue.pop_front() {
                let scale = 1.0 + DEFENSE_HEALTH_GROWTH * queued.wave as f32;
                self.spawn_on_road(queued.kind, &queued.appearance, scale);
            }
        }
        // 2. Movement and leaks
        let arrived = movement::follow_road(&mut self.registry, self.road.waypoints(), now, dt);
        for entity in arrived {
            self.leak(entity);
        }
        if self.base_health <= 0.0 {
            self.finish(false);
            return;
        }
        // 3. Slow expiry
        status::expire(&mut self.registry, now);
        // 4. Towers
        let mut ctx = TowerContext {
            registry: &mut self.registry,
            now,
            kills: &mut self.kill_buffer,
        };
        for tower in &mut self.towers {
            tower.update(dt, &mut ctx);
        }
        self.process_kills();
        // 5. Cleanup
        let bounds = self.map_bounds().expanded(self.config.tile_size);
        cleanup::run(&mut self.registry, &bounds, &mut self.despawn_buffer);
        // 6. Waves
        for tick in self.scheduler.advance(dt, &mut self.rng) {
            self.handle_wave(tick);
        }

        if self.scheduler.state() == SchedulerState::Over
            && self.spawn_queue.is_empty()
            && self.registry.mob_count() == 0
        {
            self.finish(true);
        }
    }

    fn leak(&mut self, entity: Entity) {
        let Ok((mob, contact)) = self
            .registry
            .world_mut()
            .query_one_mut::<(&Mob, &ContactDamage)>(entity)
        else {
            return;
        };
        let (kind, damage) = (mob.kind, contact.amount);
        self.registry.despawn(entity);
        self.base_health -= damage;
        self.leaks += 1;
        debug!(?kind, damage, base = self.base_health, "mob leaked");
        self.events.push(GameEvent::MobLeaked {
            kind,
            damage,
            base_health: self.base_health,
        });
    }

    fn process_kills(&mut self) {
        for kill in self.kill_buffer.drain(..) {
            self.ledger.credit(kill_reward(kill.coins, self.current_wave));
            self.kills += 1;
            self.events.push(GameEvent::EntityKilled(kill));
        }
    }

    fn handle_wave(&mut self, tick: WaveTick) {
        match tick {
            WaveTick::Spawn(plan) => {
                self.waves_released += 1;
                self.current_wave = plan.index;
                self.events.push(GameEvent::WaveAdvanced {
                    wave_index: plan.index,
                });
                self.spawn_queue
                    .extend(plan.spawns.into_iter().map(|spawn| Queued {
                        kind: spawn.kind,
                        appearance: spawn.appearance,
                        wave: plan.index,
                    }));
            }
            WaveTick::Complete => {
                self.events.push(GameEvent::CampaignComplete {
                    waves: self.scheduler.wave_count(),
                });
            }
        }
    }

    fn finish(&mut self, victory: bool) -> RunOutcome {
        let waves_cleared = if victory {
            self.scheduler.wave_count()
        } else {
            self.waves_released.saturating_sub(1)
        };
        let outcome = RunOutcome {
            victory,
            waves_cleared,
            kills: self.kills,
            leaks: self.leaks,
            resources_earned: self.ledger.lifetime_earned(),
            damage_by_weapon: self.damage_by_tower(),
        };

        self.scheduler.stop();
        self.spawn_timer.disarm();
        self.spawn_queue.clear();
        self.registry.clear();
        for tower in &mut self.towers {
            tower.clear_effects();
        }
        self.command_queue.clear();
        self.phase = SessionPhase::Ended;

        info!(
            victory,
            waves = outcome.waves_cleared,
            kills = outcome.kills,
            leaks = outcome.leaks,
            coins = outcome.resources_earned,
            "defense run ended"
        );
        self.events.push(GameEvent::RunEnded(outcome.clone()));
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn snapshot(&mut self) -> DefenseSnapshot {
        let now = self.time.now();
        DefenseSnapshot {
            time: self.time,
            phase: self.phase,
            scheduler: self.scheduler.state(),
            wave_index: self.scheduler.index(),
            wave_count: self.scheduler.wave_count(),
            base_health: self.base_health,
            base_max_health: self.config.base_health,
            coins: self.ledger.balance(),
            lifetime_earned: self.ledger.lifetime_earned(),
            mobs: snapshot::mob_views(self.registry.world(), now),
            effects: self.towers.iter().flat_map(|t| t.effect_views(now)).collect(),
            towers: self.towers.iter().map(Tower::view).collect(),
            kills: self.kills,
            leaks: self.leaks,
            events: std::mem::take(&mut self.events),
        }
    }
}
