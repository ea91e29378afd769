//! Player components, resources, and terminal-state detection.
//!
//! Systems that mutate this state live in the sibling modules:
//! - [`super::control`] — movement + heal action
//! - [`super::combat`] — shooting, bullets, contact-damage bookkeeping

use crate::config::GameConfig;
use crate::world::{BodySize, Solid, Velocity, WorldEntity};
use bevy::prelude::*;

use crate::menu::GameState;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker component for the player avatar entity.
#[derive(Component)]
pub struct Player;

/// Current health and the contact-damage cooldown.
///
/// `next_damage_at` is the simulation timestamp (seconds) before which no
/// further contact damage may apply — the immunity window.  `None` means the
/// player has never been hit.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerHealth {
    pub hp: i32,
    pub next_damage_at: Option<f64>,
}

impl PlayerHealth {
    pub fn new(hp: i32) -> Self {
        Self {
            hp,
            next_damage_at: None,
        }
    }

    /// Whether contact damage may apply at time `now`.
    pub fn can_take_damage(&self, now: f64) -> bool {
        self.next_damage_at.is_none_or(|next| now >= next)
    }

    /// Returns `true` while the immunity window is active at time `now`.
    pub fn is_immune(&self, now: f64) -> bool {
        !self.can_take_damage(now)
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Carried resources: ammo for shooting, meds for healing and delivery.
///
/// Mutated only by the combat, pickup, delivery, and heal systems.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInventory {
    pub ammo: u32,
    pub meds: u32,
}

/// Accumulated score; grows only through med drop-offs at the home base.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerScore {
    pub points: u32,
}

// ── Session setup ─────────────────────────────────────────────────────────────

/// Reset inventory and score to their configured starting values.
/// Runs on `OnEnter(Playing)` so every run starts identically.
pub fn init_session(
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    mut score: ResMut<PlayerScore>,
) {
    inventory.ammo = config.init_ammo;
    inventory.meds = config.init_meds;
    score.points = 0;
}

/// Spawn the player avatar at the map origin, next to the home base.
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Player,
        PlayerHealth::new(config.init_health),
        Solid,
        WorldEntity,
        BodySize::square(config.player_size),
        Velocity::default(),
        Transform::from_xyz(0.0, 0.0, 1.0),
        Visibility::default(),
    ));
}

// ── Terminal state ────────────────────────────────────────────────────────────

/// Run condition: the player exists and has positive health.
///
/// Gates the post-damage systems (pickup, drop-off, heal, spawner) so no
/// further game-state mutation happens in the tick that killed the player.
pub fn player_alive(query: Query<&PlayerHealth, With<Player>>) -> bool {
    query.single().is_ok_and(|health| health.hp > 0)
}

/// Detect death and perform the single transition to the game-over screen.
///
/// Runs only in `Playing`, and the transition leaves `Playing`, so the
/// signal cannot repeat without an intervening restart.
pub fn health_death_system(
    query: Query<&PlayerHealth, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(health) = query.single() else {
        return;
    };
    if health.hp <= 0 {
        info!("player died; ending run");
        next_state.set(GameState::GameOver);
    }
}
