//! Player avatar: state, movement, heal action, and combat.
//!
//! Submodules:
//! - [`state`] — components/resources, session reset, death detection
//! - [`control`] — intent-driven movement with obstruction probes, healing
//! - [`combat`] — shooting, bullet lifetime, bullet collision resolution

pub mod combat;
pub mod control;
pub mod state;

pub use combat::{
    bullet_hit_enemy_system, bullet_hit_static_system, bullet_lifetime_system, shoot_system, Bullet,
};
pub use control::{med_heal_system, player_move_system, probed_velocity};
pub use state::{
    health_death_system, init_session, player_alive, spawn_player, Player, PlayerHealth,
    PlayerInventory, PlayerScore,
};
