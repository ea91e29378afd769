//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! Every simulation system receives tunables through `Res<GameConfig>`
//! rather than reading ambient globals, so tests can inject arbitrary
//! configurations per scenario.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::validate_config;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Map ───────────────────────────────────────────────────────────────────
    pub map_half_size: f32,
    pub view_width: f32,
    pub view_height: f32,

    // ── Entity sizes ──────────────────────────────────────────────────────────
    pub player_size: f32,
    pub enemy_size: f32,
    pub building_size: f32,
    pub pickup_size: f32,
    pub bullet_size: f32,
    pub home_size: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub init_ammo: u32,
    pub init_health: i32,
    pub init_meds: u32,
    pub heal_meds_cost: u32,
    pub heal_health_gain: i32,

    // ── Combat ────────────────────────────────────────────────────────────────
    pub bullet_travel_time: f32,
    pub bullet_speed: f32,
    pub bullet_shot_cost: u32,
    pub enemy_speed: f32,
    pub enemy_damage: i32,
    pub immune_time: f32,
    pub flash_period: f32,

    // ── Pickups & delivery ────────────────────────────────────────────────────
    pub ammo_pickup_gain: u32,
    pub meds_pickup_gain: u32,
    pub drop_off_meds_cost: u32,
    pub drop_off_score_gain: u32,
    pub min_meds_for_drop_off: u32,

    // ── World generation ──────────────────────────────────────────────────────
    pub building_init_attempts: u32,
    pub pickup_init_attempts: u32,
    pub ammo_init_proportion: f32,
    pub enemy_init_attempts: u32,

    // ── Recurring spawner ─────────────────────────────────────────────────────
    pub first_spawn_delay: f32,
    pub spawn_interval: f32,
    pub enemy_spawn_chance: f32,
    pub ammo_spawn_chance: f32,
    pub meds_spawn_chance: f32,
    pub spawn_margin_factor: f32,
    pub enemy_population_cap: usize,
    pub pickup_population_cap: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Map
            map_half_size: MAP_HALF_SIZE,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            // Entity sizes
            player_size: PLAYER_SIZE,
            enemy_size: ENEMY_SIZE,
            building_size: BUILDING_SIZE,
            pickup_size: PICKUP_SIZE,
            bullet_size: BULLET_SIZE,
            home_size: HOME_SIZE,
            // Player
            player_speed: PLAYER_SPEED,
            init_ammo: INIT_AMMO,
            init_health: INIT_HEALTH,
            init_meds: INIT_MEDS,
            heal_meds_cost: HEAL_MEDS_COST,
            heal_health_gain: HEAL_HEALTH_GAIN,
            // Combat
            bullet_travel_time: BULLET_TRAVEL_TIME,
            bullet_speed: BULLET_SPEED,
            bullet_shot_cost: BULLET_SHOT_COST,
            enemy_speed: ENEMY_SPEED,
            enemy_damage: ENEMY_DAMAGE,
            immune_time: IMMUNE_TIME,
            flash_period: FLASH_PERIOD,
            // Pickups & delivery
            ammo_pickup_gain: AMMO_PICKUP_GAIN,
            meds_pickup_gain: MEDS_PICKUP_GAIN,
            drop_off_meds_cost: DROP_OFF_MEDS_COST,
            drop_off_score_gain: DROP_OFF_SCORE_GAIN,
            min_meds_for_drop_off: MIN_MEDS_FOR_DROP_OFF,
            // World generation
            building_init_attempts: BUILDING_INIT_ATTEMPTS,
            pickup_init_attempts: PICKUP_INIT_ATTEMPTS,
            ammo_init_proportion: AMMO_INIT_PROPORTION,
            enemy_init_attempts: ENEMY_INIT_ATTEMPTS,
            // Recurring spawner
            first_spawn_delay: FIRST_SPAWN_DELAY,
            spawn_interval: SPAWN_INTERVAL,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            ammo_spawn_chance: AMMO_SPAWN_CHANCE,
            meds_spawn_chance: MEDS_SPAWN_CHANCE,
            spawn_margin_factor: SPAWN_MARGIN_FACTOR,
            enemy_population_cap: ENEMY_POPULATION_CAP,
            pickup_population_cap: PICKUP_POPULATION_CAP,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  A missing file is silently
/// ignored.  Parse errors and validation failures (e.g. spawn chances summing
/// above 1.0) are logged and the compiled defaults kept.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match validate_config(&loaded) {
                Ok(()) => {
                    *config = loaded;
                    info!("loaded game config from {path}");
                }
                Err(e) => {
                    warn!("rejected {path}: {e}; using defaults");
                }
            },
            Err(e) => {
                warn!("failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("no {path} found; using compiled defaults");
        }
    }
}
