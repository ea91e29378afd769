//! Core simulation wiring: resources, messages, and the fixed tick order.
//!
//! ## Tick order (`Update`, only in `GameState::Playing`)
//!
//! | Set          | Systems, in order                                        |
//! |--------------|----------------------------------------------------------|
//! | `Resolve`    | player move → enemy seek → integrate motion → shoot →    |
//! |              | bullet lifetime → bullet vs enemy → bullet vs static →   |
//! |              | contact damage → death check                             |
//! | `PostDamage` | pickup consume → drop-off → heal → recurring spawner     |
//! | `Flush`      | clear intent                                             |
//!
//! `PostDamage` additionally requires [`player_alive`]: the tick that drops
//! health to zero performs no further world mutation beyond the death
//! transition itself.  Deferred `Commands` are applied between chained
//! systems, so removals from one resolution pass are visible to the next.
//!
//! Device input is deliberately *not* wired here — `main.rs` schedules
//! [`crate::input::gather_input_system`] ahead of [`SimulationSet::Resolve`].
//! Headless tests drive [`crate::input::PlayerIntent`] directly instead.

use bevy::prelude::*;

use crate::audio::SoundEffect;
use crate::enemy::{contact_damage_system, enemy_seek_system};
use crate::input::{clear_intent_system, PlayerIntent};
use crate::menu::GameState;
use crate::pickup::{drop_off_system, pickup_consume_system};
use crate::player::{
    bullet_hit_enemy_system, bullet_hit_static_system, bullet_lifetime_system, health_death_system,
    init_session, med_heal_system, player_alive, player_move_system, shoot_system,
};
use crate::spawn::{reset_spawn_timer, spawner_system, SpawnTimer};
use crate::world::integrate_motion_system;

/// Ordered phases of one simulation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Movement, combat, damage, and the death check.
    Resolve,
    /// Interactions that must not run in the tick that killed the player.
    PostDamage,
    /// End-of-tick intent cleanup.
    Flush,
}

/// Registers the simulation resources and the full tick pipeline.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .init_resource::<crate::player::PlayerInventory>()
            .init_resource::<crate::player::PlayerScore>()
            .init_resource::<SpawnTimer>()
            .add_message::<SoundEffect>()
            .add_systems(
                OnEnter(GameState::Playing),
                (init_session, reset_spawn_timer),
            )
            .configure_sets(
                Update,
                (
                    SimulationSet::Resolve,
                    SimulationSet::PostDamage,
                    SimulationSet::Flush,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .configure_sets(Update, SimulationSet::PostDamage.run_if(player_alive))
            .add_systems(
                Update,
                (
                    player_move_system,
                    enemy_seek_system,
                    integrate_motion_system,
                    shoot_system,
                    bullet_lifetime_system,
                    bullet_hit_enemy_system,
                    bullet_hit_static_system,
                    contact_damage_system,
                    health_death_system,
                )
                    .chain()
                    .in_set(SimulationSet::Resolve),
            )
            .add_systems(
                Update,
                (
                    pickup_consume_system,
                    drop_off_system,
                    med_heal_system,
                    spawner_system,
                )
                    .chain()
                    .in_set(SimulationSet::PostDamage),
            )
            .add_systems(Update, clear_intent_system.in_set(SimulationSet::Flush));
    }
}
