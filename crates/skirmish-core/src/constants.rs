//! Simulation constants and tuning parameters.

/// Nominal frame rate the tuning values assume (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal frame.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Shortest cooldown any cadence accepts (seconds). Keeps the fire loop finite.
pub const MIN_COOLDOWN_SECS: f32 = 0.01;

// --- Horde view and cleanup ---

/// Half width of the visible play area around the hero.
pub const VIEW_HALF_WIDTH: f32 = 480.0;

/// Half height of the visible play area around the hero.
pub const VIEW_HALF_HEIGHT: f32 = 270.0;

/// Bullets are removed once they leave the view expanded by this much.
pub const BULLET_CLEANUP_PADDING: f32 = 100.0;

/// Mobs are removed (without reward) once they leave the view expanded by this much.
pub const MOB_CLEANUP_PADDING: f32 = 900.0;

// --- Spawning and crowding ---

/// Distance outside the view edge at which mobs appear.
pub const SPAWN_BUFFER: f32 = 60.0;

/// Number of randomized candidates tried before accepting an overlapping spot.
pub const SPAWN_ATTEMPTS: u32 = 10;

/// Extra gap kept between mob bodies by spawning and overlap resolution.
pub const MOB_SPACING: f32 = 4.0;

/// Separation applied to two mobs sharing the exact same center.
pub const OVERLAP_NUDGE: f32 = 1.0;

// --- Hero ---

/// Hero body radius.
pub const HERO_RADIUS: f32 = 16.0;

/// Minimum time between two contact hits from the same mob (seconds).
pub const CONTACT_COOLDOWN_SECS: f64 = 1.0;

/// Radius within which the hero collects pickups.
pub const PICKUP_RADIUS: f32 = 48.0;

/// Seconds between heal pickup drops.
pub const HEAL_INTERVAL_SECS: f32 = 30.0;

/// Health restored by a heal pickup.
pub const HEAL_AMOUNT: f32 = 25.0;

/// Distance from the hero at which heal pickups appear.
pub const HEAL_DROP_DISTANCE: f32 = 200.0;

// --- Progression ---

/// Experience needed for the first level-up.
pub const XP_BASE: f64 = 10.0;

/// Growth factor of each subsequent level requirement (must be > 1).
pub const XP_GROWTH: f64 = 1.3;

/// Upgrade choices offered per level-up menu.
pub const MAX_UPGRADE_OPTIONS: usize = 3;

/// Area multiplier applied by each area upgrade.
pub const AREA_UPGRADE_FACTOR: f32 = 1.15;

/// Damage multiplier applied by each damage upgrade.
pub const DAMAGE_UPGRADE_FACTOR: f32 = 1.2;

/// Number of tiers in each global multiplier chain.
pub const MULTIPLIER_TIERS: u8 = 3;

/// Number of tiers in each weapon chain (Mk1..Mk5).
pub const WEAPON_TIERS: u8 = 5;

/// Lifetime damage with a weapon required to unlock each tier (Mk1..Mk5).
pub const TIER_UNLOCK_DAMAGE: [f64; 5] = [0.0, 200.0, 400.0, 600.0, 800.0];

// --- Horde waves ---

/// Seconds between horde waves.
pub const HORDE_WAVE_INTERVAL_SECS: f32 = 20.0;

// --- Tower defense ---

/// Side length of a map tile in world units.
pub const TILE_SIZE: f32 = 40.0;

/// Default map width in tiles.
pub const GRID_WIDTH: i32 = 20;

/// Default map height in tiles.
pub const GRID_HEIGHT: i32 = 12;

/// Default road length in tiles.
pub const ROAD_LENGTH: usize = 40;

/// Attempts at generating a road before setup fails.
pub const ROAD_GENERATION_ATTEMPTS: u32 = 64;

/// Coins available at the start of a defense run.
pub const STARTING_COINS: u32 = 150;

/// Base health of the defended goal.
pub const BASE_HEALTH: f32 = 20.0;

/// Seconds between defense waves.
pub const DEFENSE_WAVE_INTERVAL_SECS: f32 = 25.0;

/// Seconds between individual mob releases from the spawn queue.
pub const SPAWN_SPACING_SECS: f32 = 0.6;

/// Additional coins per kill for each wave index.
pub const KILL_REWARD_PER_WAVE: u32 = 1;

/// Mob health growth per wave index in the defense game.
pub const DEFENSE_HEALTH_GROWTH: f32 = 0.15;

/// Number of scatter directions (compass rose).
pub const SCATTER_DIRECTIONS: usize = 8;
