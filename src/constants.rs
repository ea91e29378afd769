//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every value and can override any
//! subset from `assets/game.toml` at startup.

// ── Map ───────────────────────────────────────────────────────────────────────

/// Half the side length of the square playable area (world units).
///
/// Interior placement and the recurring spawner pick positions uniformly in
/// `[-MAP_HALF_SIZE, MAP_HALF_SIZE)` on both axes; the border wall of
/// buildings is tiled just outside this range.
pub const MAP_HALF_SIZE: f32 = 500.0;

/// Viewport extents used by the spawner to keep new entities off-screen.
///
/// Anything whose candidate box would overlap a rectangle of this size
/// centered on the player is rejected — nothing may pop into view.
pub const VIEW_WIDTH: f32 = 1280.0;
pub const VIEW_HEIGHT: f32 = 720.0;

// ── Entity sizes ──────────────────────────────────────────────────────────────

/// Player bounding-box side length (world units).
pub const PLAYER_SIZE: f32 = 32.0;

/// Enemy bounding-box side length.
pub const ENEMY_SIZE: f32 = 32.0;

/// Building (static obstacle) side length; also the border tiling interval.
pub const BUILDING_SIZE: f32 = 64.0;

/// Pickup side length (ammo and meds share one footprint).
pub const PICKUP_SIZE: f32 = 24.0;

/// Bullet side length.
pub const BULLET_SIZE: f32 = 8.0;

/// Home base side length.
pub const HOME_SIZE: f32 = 96.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player movement speed (world units per second).
pub const PLAYER_SPEED: f32 = 100.0;

/// Starting ammo count.
pub const INIT_AMMO: u32 = 10;

/// Starting health. Contact damage can drive this to zero and end the run.
pub const INIT_HEALTH: i32 = 5;

/// Starting carried meds.
pub const INIT_MEDS: u32 = 0;

/// Meds consumed by one heal action (R key).
pub const HEAL_MEDS_COST: u32 = 1;

/// Health restored by one heal action.
pub const HEAL_HEALTH_GAIN: i32 = 1;

// ── Combat ────────────────────────────────────────────────────────────────────

/// Seconds a bullet travels before it self-removes.
pub const BULLET_TRAVEL_TIME: f32 = 3.0;

/// Bullet speed (world units per second).
pub const BULLET_SPEED: f32 = 1000.0;

/// Ammo deducted per shot.
pub const BULLET_SHOT_COST: u32 = 1;

/// Enemy seek speed (world units per second).
///
/// Enemy velocity magnitude is always exactly this value or zero.
pub const ENEMY_SPEED: f32 = 30.0;

/// Health lost per enemy contact event.
pub const ENEMY_DAMAGE: i32 = 1;

/// Seconds of immunity after taking contact damage. While active the player
/// sprite flashes at [`FLASH_PERIOD`].
pub const IMMUNE_TIME: f32 = 1.0;

/// Visibility toggle period while the immunity window is active (seconds).
pub const FLASH_PERIOD: f32 = 0.1;

// ── Pickups & delivery ────────────────────────────────────────────────────────

/// Ammo gained per ammo pickup.
pub const AMMO_PICKUP_GAIN: u32 = 1;

/// Meds gained per meds pickup.
pub const MEDS_PICKUP_GAIN: u32 = 1;

/// Meds handed over per drop-off at the home base.
pub const DROP_OFF_MEDS_COST: u32 = 1;

/// Score gained per drop-off.
pub const DROP_OFF_SCORE_GAIN: u32 = 1;

/// Carried meds must strictly exceed this for a drop-off to register.
pub const MIN_MEDS_FOR_DROP_OFF: u32 = 0;

// ── World generation ──────────────────────────────────────────────────────────

/// Random placement attempts for interior buildings.
///
/// Attempts, not guaranteed placements: each attempt is rejected if its
/// margin-padded box overlaps anything already placed.
pub const BUILDING_INIT_ATTEMPTS: u32 = 250;

/// Random placement attempts for the initial pickup population.
pub const PICKUP_INIT_ATTEMPTS: u32 = 250;

/// Probability that an initial pickup attempt is ammo rather than meds.
pub const AMMO_INIT_PROPORTION: f32 = 0.5;

/// Random placement attempts for the initial enemy population.
pub const ENEMY_INIT_ATTEMPTS: u32 = 250;

// ── Recurring spawner ─────────────────────────────────────────────────────────

/// Delay before the spawner's first attempt (seconds).
pub const FIRST_SPAWN_DELAY: f32 = 10.0;

/// Interval between spawn attempts once running (seconds). The timer re-arms
/// whether or not the attempt actually placed anything.
pub const SPAWN_INTERVAL: f32 = 5.0;

/// Weighted chance per attempt of spawning an enemy / ammo / meds.
///
/// The chances need not sum to 1; any remainder maps to "no spawn this
/// attempt". A sum above 1 is rejected by `error::validate_config`.
pub const ENEMY_SPAWN_CHANCE: f32 = 0.33;
pub const AMMO_SPAWN_CHANCE: f32 = 0.33;
pub const MEDS_SPAWN_CHANCE: f32 = 0.33;

/// Scale factor applied to the candidate box of non-enemy spawns.
pub const SPAWN_MARGIN_FACTOR: f32 = 1.0;

/// Maximum simultaneous enemies; the spawner skips enemy placements at cap.
pub const ENEMY_POPULATION_CAP: usize = 64;

/// Maximum simultaneous pickups (ammo and meds combined).
pub const PICKUP_POPULATION_CAP: usize = 96;
