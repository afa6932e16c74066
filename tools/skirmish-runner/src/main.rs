//! skirmish-runner: headless driver for both arcade sessions.
//!
//! Runs a scripted bot against a horde or defense session and prints the
//! run outcome as JSON. Horde runs read and update a lifetime-damage save.
//!
//! Usage:
//!   skirmish-runner --mode horde --seed 7 --ticks 7200 --save save/lifetime.json
//!   skirmish-runner --mode defense --config defense.json

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use glam::Vec2;
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use skirmish_core::commands::{HeroSelection, PlayerCommand};
use skirmish_core::constants::DT;
use skirmish_core::enums::{HeroKind, SessionPhase, TowerKind, WeaponKind};
use skirmish_core::state::RunOutcome;
use skirmish_core::types::Tile;
use skirmish_progression::LifetimeDamage;
use skirmish_sim::{DefenseConfig, DefenseSession, HordeConfig, HordeSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Horde,
    Defense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Hero {
    Knight,
    Ranger,
}

#[derive(Parser, Debug)]
#[command(name = "skirmish-runner")]
#[command(about = "Run a scripted horde or defense session headlessly")]
struct Args {
    #[arg(long, value_enum, default_value = "horde")]
    mode: Mode,

    /// Overrides the seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate before ending the run
    #[arg(long, default_value = "7200")]
    ticks: u64,

    /// JSON session config; missing fields take the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lifetime damage save file (horde only)
    #[arg(long)]
    save: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "knight")]
    hero: Hero,

    /// Starting weapon override (pistol, aura, sword, bomb)
    #[arg(long)]
    weapon: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let outcome = match args.mode {
        Mode::Horde => run_horde(&args)?,
        Mode::Defense => run_defense(&args)?,
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<Value, Box<dyn Error>> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(Value::Object(Default::default())),
    }
}

fn run_horde(args: &Args) -> Result<RunOutcome, Box<dyn Error>> {
    let mut config: HordeConfig = serde_json::from_value(read_config(args.config.as_deref())?)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let lifetime = match &args.save {
        Some(path) => LifetimeDamage::load(path)?,
        None => LifetimeDamage::new(),
    };

    let kind = match args.hero {
        Hero::Knight => HeroKind::Knight,
        Hero::Ranger => HeroKind::Ranger,
    };
    let selection = match args.weapon.as_deref() {
        Some(name) => {
            let weapon = WeaponKind::parse(name).ok_or_else(|| format!("unknown weapon: {name}"))?;
            HeroSelection::with_weapon(kind, weapon)
        }
        None => HeroSelection::new(kind),
    };

    let mut session = HordeSession::new(config)?.with_lifetime_damage(lifetime.clone());
    session.start(selection)?;
    info!(seed = ?args.seed, ticks = args.ticks, "horde bot running");

    for frame in 0..args.ticks {
        if session.phase() == SessionPhase::ChoosingUpgrade {
            if let Some(&id) = session.pending_options().first() {
                debug!(upgrade = %id, "bot picks upgrade");
                session.queue_command(PlayerCommand::ChooseUpgrade { id });
            }
        }
        // Orbit the spawn point so mobs trail behind.
        let input = Vec2::from_angle(frame as f32 * DT * 0.4);
        session.tick(DT, input);
        if session.phase() == SessionPhase::Ended {
            break;
        }
    }

    let outcome = session.end();
    if let Some(path) = &args.save {
        let mut lifetime = lifetime;
        lifetime.merge(&outcome.damage_by_weapon);
        lifetime.save(path)?;
        info!(path = %path.display(), "lifetime damage saved");
    }
    Ok(outcome)
}

/// Tower the bot buys next, cycling through the kinds.
const BUILD_ORDER: [TowerKind; 4] = [
    TowerKind::Regular,
    TowerKind::Freezer,
    TowerKind::Regular,
    TowerKind::Bomber,
];

fn run_defense(args: &Args) -> Result<RunOutcome, Box<dyn Error>> {
    if args.save.is_some() {
        warn!("--save is ignored in defense mode");
    }
    let mut config: DefenseConfig = serde_json::from_value(read_config(args.config.as_deref())?)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let tile_size = config.tile_size;

    let mut session = DefenseSession::new(config)?;
    session.start()?;
    info!(road = session.road().len(), "defense bot running");

    let mut built = 0;
    for frame in 0..args.ticks {
        // Spend once a second.
        if frame % 60 == 0 {
            let next = BUILD_ORDER[built % BUILD_ORDER.len()];
            match road_side_tile(&session, tile_size) {
                Some(tile) if session.ledger().can_afford(next.placement_cost()) => {
                    session.queue_command(PlayerCommand::PlaceTower { kind: next, tile });
                    built += 1;
                }
                _ => {
                    let cheapest = session
                        .towers()
                        .iter()
                        .filter_map(|t| t.upgrade_cost().map(|cost| (cost, t.id())))
                        .min();
                    if let Some((cost, tower_id)) = cheapest {
                        if session.ledger().can_afford(cost) {
                            session.queue_command(PlayerCommand::UpgradeTower { tower_id });
                        }
                    }
                }
            }
        }
        session.tick(DT);
        if session.phase() == SessionPhase::Ended {
            break;
        }
    }

    Ok(session.end())
}

/// Open tile next to the most road tiles.
fn road_side_tile(session: &DefenseSession, tile_size: f32) -> Option<Tile> {
    let reach = tile_size * 2.5;
    session.open_tiles().into_iter().max_by_key(|tile| {
        let center = tile.center(tile_size);
        session
            .road()
            .tiles()
            .iter()
            .filter(|road| road.center(tile_size).distance(center) <= reach)
            .count()
    })
}
