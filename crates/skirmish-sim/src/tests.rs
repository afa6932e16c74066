//! Cross-system tests: weapons against the registry, tower cadence, wave flow, and determinism.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::Mobility;
use skirmish_core::constants::DT;
use skirmish_core::enums::*;
use skirmish_core::events::KillInfo;
use skirmish_core::types::{Bounds, Tile};

use crate::clock::Cadence;
use crate::registry::Registry;
use crate::towers::{Tower, TowerContext};
use crate::waves::{Batch, WaveDef, WaveScheduler, WaveTable, WaveTick};
use crate::weapons::{CombatContext, Weapon};
use crate::{DefenseConfig, DefenseSession, HordeConfig, HordeSession};

fn arena() -> Bounds {
    Bounds::centered(Vec2::ZERO, Vec2::new(600.0, 400.0))
}

/// Run `weapon` for `frames` frames from the origin, facing right.
fn fire(weapon: &mut Weapon, registry: &mut Registry, kills: &mut Vec<KillInfo>, frames: usize) {
    let mut now = 0.0;
    for _ in 0..frames {
        now += DT as f64;
        let mut ctx = CombatContext {
            registry: &mut *registry,
            origin: Vec2::ZERO,
            facing: Vec2::X,
            now,
            bounds: arena(),
            kills: &mut *kills,
        };
        weapon.update(DT, &mut ctx);
    }
}

fn jittered_frames(seed: u64, count: usize) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(0.002..0.05)).collect()
}

// ---- Damage and kills ----

#[test]
fn test_two_pistol_shots_kill_once() {
    let mut registry = Registry::new();
    let grunt = registry.spawn_mob(MobKind::Grunt, "", Vec2::new(50.0, 0.0), 1.0);
    let mut kills = Vec::new();
    let mut pistol = Weapon::new(WeaponKind::Pistol, 1, 1.0, 1.0).unwrap();

    // First shot leaves at 0.8s: 5 - 3 = 2 health left.
    fire(&mut pistol, &mut registry, &mut kills, 60);
    assert!(registry.is_active(grunt));
    assert!(kills.is_empty());

    fire(&mut pistol, &mut registry, &mut kills, 180);
    assert_eq!(kills.len(), 1, "kill reported exactly once");
    assert_eq!(kills[0].kind, MobKind::Grunt);
    assert_eq!(kills[0].source, DamageSource::Weapon(WeaponKind::Pistol));
    assert!(!registry.is_active(grunt));
    assert!(registry.mobs().is_empty());
    // Overkill still counts the full hit.
    assert!((pistol.damage_dealt() - 6.0).abs() < 1e-6);
}

#[test]
fn test_dead_mob_never_targeted_again() {
    let mut registry = Registry::new();
    let near = registry.spawn_mob(MobKind::Swarmer, "", Vec2::new(30.0, 0.0), 1.0);
    let far = registry.spawn_mob(MobKind::Brute, "", Vec2::new(200.0, 0.0), 1.0);
    let mut kills = Vec::new();
    let mut pistol = Weapon::new(WeaponKind::Pistol, 1, 1.0, 1.0).unwrap();

    fire(&mut pistol, &mut registry, &mut kills, 60 * 4);

    assert_eq!(kills.len(), 1);
    assert!(!registry.is_active(near));
    assert!(registry.is_active(far));
    // Later shots went to the brute.
    assert!(pistol.damage_dealt() > 2.0);
}

// ---- Cadence ----

#[test]
fn test_cadence_converges_under_jitter() {
    let frames = jittered_frames(7, 2000);
    let total: f32 = frames.iter().sum();
    let mut cadence = Cadence::new(0.3);
    let mut fired = 0;
    for dt in &frames {
        cadence.advance(*dt);
        while cadence.ready() {
            fired += 1;
            cadence.consume();
        }
    }
    let expected = (total / 0.3).floor() as i64;
    assert!((fired - expected).abs() <= 1, "fired {fired}, expected {expected}");
}

#[test]
fn test_tower_fire_rate_converges_under_jitter() {
    let mut registry = Registry::new();
    let tile = Tile::new(2, 2);
    let mut tower = Tower::new(0, TowerKind::Regular, tile, 40.0);
    registry.spawn_mob(MobKind::Brute, "", tower.position() + Vec2::new(30.0, 0.0), 1000.0);

    let frames = jittered_frames(11, 1500);
    let total: f32 = frames.iter().sum();
    let mut kills = Vec::new();
    let mut now = 0.0;
    for dt in &frames {
        now += *dt as f64;
        let mut ctx = TowerContext {
            registry: &mut registry,
            now,
            kills: &mut kills,
        };
        tower.update(*dt, &mut ctx);
    }

    let shots = (tower.damage_dealt() / 4.0).round() as i64;
    let expected = (total / 0.8).floor() as i64;
    assert!((shots - expected).abs() <= 1, "shots {shots}, expected {expected}");
    assert!(kills.is_empty());
}

#[test]
fn test_aura_pulse_rate_converges_under_jitter() {
    let mut registry = Registry::new();
    registry.spawn_mob(MobKind::Brute, "", Vec2::new(10.0, 0.0), 1000.0);
    let mut aura = Weapon::new(WeaponKind::Aura, 1, 1.0, 1.0).unwrap();

    let frames = jittered_frames(3, 1200);
    let total: f32 = frames.iter().sum();
    let mut kills = Vec::new();
    let mut now = 0.0;
    for dt in &frames {
        now += *dt as f64;
        let mut ctx = CombatContext {
            registry: &mut registry,
            origin: Vec2::ZERO,
            facing: Vec2::X,
            now,
            bounds: arena(),
            kills: &mut kills,
        };
        aura.update(*dt, &mut ctx);
    }

    // One damage per pulse, and the per-target mark never skips a pulse.
    let pulses = aura.damage_dealt().round() as i64;
    let expected = (total / 0.5).floor() as i64;
    assert!((pulses - expected).abs() <= 1, "pulses {pulses}, expected {expected}");
}

#[test]
fn test_idle_weapon_keeps_fire_credit() {
    let mut registry = Registry::new();
    let mut kills = Vec::new();
    let mut pistol = Weapon::new(WeaponKind::Pistol, 1, 1.0, 1.0).unwrap();

    // Five seconds without a target: nothing fires, nothing is lost.
    fire(&mut pistol, &mut registry, &mut kills, 300);
    assert!((pistol.cadence().elapsed() - 5.0).abs() < 1e-3);
    assert_eq!(pistol.damage_dealt(), 0.0);

    // The banked 5s pays out six 0.8s shots on the first frame with a target.
    let brute = registry.spawn_mob(MobKind::Brute, "", Vec2::new(40.0, 0.0), 1.0);
    fire(&mut pistol, &mut registry, &mut kills, 10);

    assert!((pistol.damage_dealt() - 18.0).abs() < 1e-6);
    assert!(registry.is_active(brute));
    assert!(pistol.cadence().elapsed() < pistol.cadence().cooldown());
}

// ---- Status effects ----

#[test]
fn test_freezer_slows_compose_strongest_and_longest() {
    let mut registry = Registry::new();
    let tile = Tile::new(1, 1);
    let mut weak = Tower::new(0, TowerKind::Freezer, tile, 40.0);
    let grunt = registry.spawn_mob(MobKind::Grunt, "", weak.position() + Vec2::new(20.0, 0.0), 100.0);

    // 0.6 for 2s at t=1.0, then a level-2 freezer applies 0.5 for 2.5s at t=1.2.
    let mut strong = Tower::new(1, TowerKind::Freezer, tile, 40.0);
    strong.level_up();
    let mut kills = Vec::new();
    let mut now = 0.0;
    for frame in 0..90 {
        now += DT as f64;
        let mut ctx = TowerContext {
            registry: &mut registry,
            now,
            kills: &mut kills,
        };
        weak.update(DT, &mut ctx);
        if frame >= 18 {
            strong.update(DT, &mut ctx);
        }
    }

    let mobility = *registry.world().get::<&Mobility>(grunt).unwrap();
    assert!((mobility.slow_factor - 0.5).abs() < 1e-6);
    // The stronger slow started later, so its expiry wins too.
    assert!(mobility.slow_until > 3.0);
}

// ---- Waves ----

fn table(waves: usize) -> WaveTable {
    WaveTable::new(
        (0..waves)
            .map(|_| WaveDef {
                batches: vec![Batch::new(MobKind::Grunt, "", 4)],
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_three_wave_table_completes_on_third_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut scheduler = WaveScheduler::new(table(3), 2.0);

    assert!(matches!(scheduler.start(&mut rng), Some(WaveTick::Spawn(plan)) if plan.index == 0));
    let ticks = scheduler.advance(2.0, &mut rng);
    assert!(matches!(ticks.as_slice(), [WaveTick::Spawn(plan)] if plan.index == 1));
    let ticks = scheduler.advance(2.0, &mut rng);
    assert!(matches!(ticks.as_slice(), [WaveTick::Spawn(plan)] if plan.index == 2));
    assert_eq!(scheduler.state(), SchedulerState::Running);

    let ticks = scheduler.advance(2.0, &mut rng);
    assert!(matches!(ticks.as_slice(), [WaveTick::Complete]));
    assert_eq!(scheduler.state(), SchedulerState::Over);
    assert!(scheduler.advance(10.0, &mut rng).is_empty());
}

#[test]
fn test_scheduler_never_overruns_on_long_frame() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut scheduler = WaveScheduler::new(table(2), 1.0);
    scheduler.start(&mut rng);

    let ticks = scheduler.advance(10.0, &mut rng);
    assert_eq!(ticks.len(), 2);
    assert!(matches!(ticks.last(), Some(WaveTick::Complete)));
}

// ---- Determinism ----

#[test]
fn test_horde_deterministic_with_same_seed() {
    let run = || {
        let config = HordeConfig {
            seed: 99,
            wave_interval: 2.0,
            ..Default::default()
        };
        let mut session = HordeSession::new(config).unwrap();
        session
            .start(skirmish_core::commands::HeroSelection::with_weapon(
                HeroKind::Knight,
                WeaponKind::Bomb,
            ))
            .unwrap();
        let mut snapshots = Vec::new();
        for i in 0..600 {
            let input = Vec2::from_angle(i as f32 * 0.01);
            let snapshot = session.tick(DT, input);
            snapshots.push(serde_json::to_string(&snapshot).unwrap());
        }
        snapshots
    };

    assert_eq!(run(), run());
}

#[test]
fn test_defense_deterministic_with_same_seed() {
    let run = || {
        let config = DefenseConfig {
            seed: 5,
            ..Default::default()
        };
        let mut session = DefenseSession::new(config).unwrap();
        let tile = session.open_tiles()[0];
        session.place_tower(TowerKind::Scatter, tile).unwrap();
        session.start().unwrap();
        let road: Vec<Tile> = session.road().tiles().to_vec();
        let mut snapshots = Vec::new();
        for _ in 0..900 {
            snapshots.push(serde_json::to_string(&session.tick(DT)).unwrap());
        }
        (road, snapshots)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_different_seeds_lay_different_roads() {
    let road = |seed| {
        let session = DefenseSession::new(DefenseConfig {
            seed,
            ..Default::default()
        })
        .unwrap();
        session.road().tiles().to_vec()
    };

    assert_ne!(road(1), road(2));
}
