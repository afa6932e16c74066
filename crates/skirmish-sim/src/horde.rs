//! Horde session: the survival shooter.
//!
//! `HordeSession` owns the registry, the hero and every timer. Commands are
//! queued and applied at the next tick boundary; `tick` runs the frame's
//! systems only while the session is `Active` and returns a snapshot.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use hecs::Entity;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use skirmish_core::commands::{HeroSelection, PlayerCommand};
use skirmish_core::constants::*;
use skirmish_core::enums::{MobKind, PickupKind, SchedulerState, SessionPhase, UpgradeId, WeaponKind};
use skirmish_core::error::{ConfigError, Rejection};
use skirmish_core::events::{GameEvent, KillInfo};
use skirmish_core::state::{HordeSnapshot, RunOutcome};
use skirmish_core::types::{Bounds, SimTime};
use skirmish_progression::{Experience, LifetimeDamage, UpgradeTree};

use crate::clock::RepeatingTimer;
use crate::config::{HordeConfig, MAX_TIME_SCALE};
use crate::hero::Hero;
use crate::registry::Registry;
use crate::spawn;
use crate::systems::{cleanup, contact, movement, overlap, pickups, snapshot};
use crate::waves::{WaveScheduler, WaveTick};
use crate::weapons::CombatContext;

pub struct HordeSession {
    config: HordeConfig,
    phase: SessionPhase,
    time: SimTime,
    time_scale: f32,
    rng: ChaCha8Rng,
    registry: Registry,
    hero: Hero,
    experience: Experience,
    upgrades: UpgradeTree,
    lifetime: LifetimeDamage,
    scheduler: WaveScheduler,
    heal_timer: RepeatingTimer,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    kill_buffer: Vec<KillInfo>,
    events: Vec<GameEvent>,
    pending_options: Vec<UpgradeId>,
    /// Damage dealt by weapons that have since been unequipped.
    retired_damage: BTreeMap<String, f64>,
    kills: u32,
    xp_collected: u64,
    waves_released: usize,
    outcome: Option<RunOutcome>,
}

impl HordeSession {
    pub fn new(config: HordeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            phase: SessionPhase::Idle,
            time: SimTime::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            registry: Registry::new(),
            hero: Hero::new(Default::default()),
            experience: Experience::new(config.xp_base, config.xp_growth),
            upgrades: UpgradeTree::new(),
            lifetime: LifetimeDamage::new(),
            scheduler: WaveScheduler::new(config.waves.clone(), config.wave_interval),
            heal_timer: RepeatingTimer::new(config.heal_interval),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            kill_buffer: Vec::new(),
            events: Vec::new(),
            pending_options: Vec::new(),
            retired_damage: BTreeMap::new(),
            kills: 0,
            xp_collected: 0,
            waves_released: 0,
            outcome: None,
            config,
        })
    }

    /// Lifetime damage snapshot used to unlock higher weapon tiers.
    pub fn with_lifetime_damage(mut self, lifetime: LifetimeDamage) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Enter the arena with the selected hero and release the first wave.
    pub fn start(&mut self, selection: HeroSelection) -> Result<(), Rejection> {
        if self.phase != SessionPhase::Idle {
            return Err(Rejection::AlreadyStarted);
        }
        self.hero = Hero::new(selection.kind);
        match selection.resolved_weapon() {
            Some(weapon) => {
                self.hero.equip_tier(weapon, 1);
                self.upgrades.grant(UpgradeId::weapon(weapon, 1));
            }
            // Weaponless heroes pick a starter from the first menu.
            None => self.experience.grant_token(),
        }
        self.heal_timer.arm();
        self.phase = SessionPhase::Active;
        info!(hero = ?selection.kind, weapon = ?selection.resolved_weapon(), "horde run started");

        if let Some(tick) = self.scheduler.start(&mut self.rng) {
            self.handle_wave(tick);
        }
        self.open_upgrade_menu();
        Ok(())
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame of `dt` seconds with the sampled input direction.
    pub fn tick(&mut self, dt: f32, input: Vec2) -> HordeSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let dt = dt.max(0.0) * self.time_scale;
            if dt > 0.0 {
                self.time.advance(dt);
                self.run_systems(dt, input);
            }
        }

        self.snapshot()
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Paused;
            info!(time = self.time.now(), "horde paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Active;
            info!(time = self.time.now(), "horde resumed");
        }
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
    }

    /// End the run now (or return the outcome of a run that already ended).
    /// Tears down every timer and in-flight effect.
    pub fn end(&mut self) -> RunOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        self.finish(false)
    }

    /// Apply one of the options on the open upgrade menu.
    pub fn choose_upgrade(&mut self, id: UpgradeId) -> Result<(), Rejection> {
        if self.phase != SessionPhase::ChoosingUpgrade || !self.pending_options.contains(&id) {
            return Err(Rejection::NotOffered(id));
        }
        let effect = self.upgrades.apply(id)?;
        if !self.hero.apply(effect) {
            warn!(upgrade = %id, ?effect, "upgrade owned but changed no weapon");
        }
        self.pending_options.clear();
        self.events.push(GameEvent::UpgradeApplied { id });
        debug!(upgrade = %id, "upgrade applied");

        self.phase = SessionPhase::Active;
        self.open_upgrade_menu();
        Ok(())
    }

    /// Remove a weapon and everything it has in flight.
    pub fn unequip_weapon(&mut self, weapon: WeaponKind) -> Result<(), Rejection> {
        if matches!(self.phase, SessionPhase::Idle | SessionPhase::Ended) {
            return Err(Rejection::NotRunning);
        }
        let removed = self.hero.unequip(weapon)?;
        *self
            .retired_damage
            .entry(weapon.as_str().to_string())
            .or_insert(0.0) += removed.damage_dealt();
        self.upgrades.revoke_weapon(weapon);
        debug!(?weapon, "weapon unequipped");
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn upgrades(&self) -> &UpgradeTree {
        &self.upgrades
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn pending_options(&self) -> &[UpgradeId] {
        &self.pending_options
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Damage dealt this run per weapon, including unequipped ones.
    pub fn damage_by_weapon(&self) -> BTreeMap<String, f64> {
        let mut totals = self.retired_damage.clone();
        for weapon in &self.hero.weapons {
            *totals.entry(weapon.kind().as_str().to_string()).or_insert(0.0) +=
                weapon.damage_dealt();
        }
        totals
    }

    /// Place a mob directly (scripted scenarios and tests).
    pub fn spawn_mob(&mut self, kind: MobKind, position: Vec2) -> Entity {
        self.registry.spawn_mob(kind, "", position, 1.0)
    }

    /// Visible area around the hero.
    pub fn view(&self) -> Bounds {
        Bounds::centered(
            self.hero.position,
            Vec2::new(self.config.view_half_width, self.config.view_half_height),
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
            PlayerCommand::ChooseUpgrade { id } => self.choose_upgrade(id),
            PlayerCommand::UnequipWeapon { weapon } => self.unequip_weapon(weapon),
            PlayerCommand::PlaceTower { .. } | PlayerCommand::UpgradeTower { .. } => {
                debug!(?command, "defense command ignored by horde session");
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
    fn run_systems(&mut self, dt: f32, input: Vec2) {
        let now = self.time.now();

        // 1. Hero movement
        self.hero.steer(input);
        movement::move_hero(&mut self.hero.position, input, self.hero.speed, dt);
        // 2. Mob movement
        movement::chase(&mut self.registry, self.hero.position, now, dt);
        // 3. Contact damage
        let hits = contact::run(
            &mut self.registry,
            self.hero.position,
            self.hero.radius,
            now,
            self.config.contact_cooldown,
        );
        for amount in hits {
            self.hero.health -= amount;
            self.events.push(GameEvent::HeroDamaged {
                amount,
                remaining: self.hero.health,
            });
        }
        if !self.hero.is_alive() {
            self.finish(false);
            return;
        }
        // 4. Weapons
        let view = self.view();
        let mut ctx = CombatContext {
            registry: &mut self.registry,
            origin: self.hero.position,
            facing: self.hero.facing,
            now,
            bounds: view.expanded(BULLET_CLEANUP_PADDING),
            kills: &mut self.kill_buffer,
        };
        for weapon in &mut self.hero.weapons {
            weapon.update(dt, &mut ctx);
        }
        self.process_kills();
        // 5. Pickups
        for _ in 0..self.heal_timer.tick(dt) {
            pickups::drop_heal(
                &mut self.registry,
                self.hero.position,
                HEAL_DROP_DISTANCE,
                self.config.heal_amount,
                &mut self.rng,
            );
        }
        let collected = pickups::collect(&mut self.registry, self.hero.position, self.config.pickup_radius);
        for pickup in collected {
            self.collect(pickup);
        }
        // 6. Overlap resolution
        overlap::resolve(&mut self.registry, self.config.mob_spacing, &mut self.rng);
        // 7. Cleanup
        let removed = cleanup::run(
            &mut self.registry,
            &view.expanded(MOB_CLEANUP_PADDING),
            &mut self.despawn_buffer,
        );
        if removed > 0 {
            trace!(removed, "cleaned up distant entities");
        }
        let bullet_bounds = view.expanded(BULLET_CLEANUP_PADDING);
        for weapon in &mut self.hero.weapons {
            weapon.retain_within(&bullet_bounds);
        }
        // 8. Waves
        for tick in self.scheduler.advance(dt, &mut self.rng) {
            self.handle_wave(tick);
        }

        if self.scheduler.state() == SchedulerState::Over && self.registry.mob_count() == 0 {
            self.finish(true);
            return;
        }
        self.open_upgrade_menu();
    }

    fn process_kills(&mut self) {
        if self.kill_buffer.is_empty() {
            return;
        }
        pickups::drop_gems(&mut self.registry, &self.kill_buffer);
        for kill in self.kill_buffer.drain(..) {
            self.kills += 1;
            self.events.push(GameEvent::EntityKilled(kill));
        }
    }

    fn collect(&mut self, pickup: PickupKind) {
        match pickup {
            PickupKind::Experience(xp) => {
                self.xp_collected += xp as u64;
                let before = self.experience.level();
                let gained = self.experience.gain(xp as f64);
                for level in before + 1..=before + gained {
                    self.events.push(GameEvent::LevelUp { level });
                }
            }
            PickupKind::Heal(amount) => self.hero.heal(amount),
        }
    }

    fn handle_wave(&mut self, tick: WaveTick) {
        match tick {
            WaveTick::Spawn(plan) => {
                self.waves_released += 1;
                self.events.push(GameEvent::WaveAdvanced {
                    wave_index: plan.index,
                });
                let view = self.view();
                for planned in plan.spawns {
                    let radius = planned.kind.template().radius;
                    let position = spawn::find_position(
                        &self.registry,
                        &view,
                        planned.edge,
                        self.config.spawn_buffer,
                        radius,
                        self.config.mob_spacing,
                        &mut self.rng,
                    );
                    self.registry
                        .spawn_mob(planned.kind, &planned.appearance, position, 1.0);
                }
            }
            WaveTick::Complete => {
                self.events.push(GameEvent::CampaignComplete {
                    waves: self.scheduler.wave_count(),
                });
            }
        }
    }

    /// Consume pending level-up tokens until one yields a menu.
    /// Tokens with nothing eligible are discarded.
    fn open_upgrade_menu(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        while self.experience.take_token() {
            let mut options = self
                .upgrades
                .eligible_options(self.hero.has_weapon(), &self.lifetime);
            if options.is_empty() {
                debug!("no eligible upgrade, level-up token discarded");
                continue;
            }
            options.shuffle(&mut self.rng);
            options.truncate(MAX_UPGRADE_OPTIONS);
            self.pending_options = options.clone();
            self.phase = SessionPhase::ChoosingUpgrade;
            debug!(?options, "upgrade menu opened");
            self.events.push(GameEvent::UpgradeMenuOpened { options });
            return;
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
            leaks: 0,
            resources_earned: self.xp_collected,
            damage_by_weapon: self.damage_by_weapon(),
        };

        self.scheduler.stop();
        self.heal_timer.disarm();
        self.registry.clear();
        for weapon in std::mem::take(&mut self.hero.weapons) {
            *self
                .retired_damage
                .entry(weapon.kind().as_str().to_string())
                .or_insert(0.0) += weapon.damage_dealt();
        }
        self.command_queue.clear();
        self.pending_options.clear();
        self.phase = SessionPhase::Ended;

        info!(
            victory,
            waves = outcome.waves_cleared,
            kills = outcome.kills,
            xp = outcome.resources_earned,
            "horde run ended"
        );
        self.events.push(GameEvent::RunEnded(outcome.clone()));
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn snapshot(&mut self) -> HordeSnapshot {
        let now = self.time.now();
        HordeSnapshot {
            time: self.time,
            phase: self.phase,
            scheduler: self.scheduler.state(),
            wave_index: self.scheduler.index(),
            wave_count: self.scheduler.wave_count(),
            hero: self.hero.view(),
            mobs: snapshot::mob_views(self.registry.world(), now),
            effects: self
                .hero
                .weapons
                .iter()
                .flat_map(|w| w.effect_views(now))
                .collect(),
            pickups: snapshot::pickup_views(self.registry.world()),
            level: self.experience.level(),
            xp: self.experience.total(),
            next_level_xp: self.experience.threshold(),
            pending_options: self.pending_options.clone(),
            kills: self.kills,
            events: std::mem::take(&mut self.events),
        }
    }
}
