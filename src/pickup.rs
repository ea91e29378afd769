//! Pickups and delivery.
//!
//! Pickups sit on the ground until the player's box overlaps theirs; the
//! kind-specific effect fires, the pickup is removed, and a collect cue is
//! emitted.  Carried meds are converted into score by pressing the drop-off
//! key while standing on the home base.

use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::input::PlayerIntent;
use crate::player::{Player, PlayerInventory, PlayerScore};
use crate::world::{body_aabb, BodySize, Home, WorldEntity};
use bevy::prelude::*;

/// The two consumable kinds.  Dispatching the effect through the enum keeps
/// pickups one component with per-kind behaviour, not a type per kind.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Ammo,
    Meds,
}

impl PickupKind {
    /// Apply this pickup's effect to the player's inventory.
    pub fn apply(self, inventory: &mut PlayerInventory, config: &GameConfig) {
        match self {
            PickupKind::Ammo => inventory.ammo += config.ammo_pickup_gain,
            PickupKind::Meds => inventory.meds += config.meds_pickup_gain,
        }
    }
}

/// Spawn one pickup of `kind` at `pos`.  Used by world generation and the
/// recurring spawner.
pub fn spawn_pickup(commands: &mut Commands, kind: PickupKind, pos: Vec2, config: &GameConfig) {
    commands.spawn((
        kind,
        WorldEntity,
        BodySize::square(config.pickup_size),
        Transform::from_translation(pos.extend(0.2)),
        Visibility::default(),
    ));
}

// ── Consumption ───────────────────────────────────────────────────────────────

/// Consume every pickup the player's box overlaps this tick.
///
/// Removal is deferred through `Commands`, so the scan always walks the
/// snapshot taken at iteration start.
pub fn pickup_consume_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    q_player: Query<(&Transform, &BodySize), With<Player>>,
    q_pickups: Query<(Entity, &Transform, &BodySize, &PickupKind)>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok((player_transform, player_size)) = q_player.single() else {
        return;
    };
    let player_box = body_aabb(player_transform, player_size);

    for (entity, transform, size, kind) in q_pickups.iter() {
        if player_box.overlaps(&body_aabb(transform, size)) {
            kind.apply(&mut inventory, &config);
            commands.entity(entity).despawn();
            sounds.write(SoundEffect::Collect);
        }
    }
}

// ── Delivery ──────────────────────────────────────────────────────────────────

/// Convert carried meds into score at the home base.
///
/// Requires the drop-off key to have been freshly pressed this tick (holding
/// it does nothing), the player's box overlapping the home's box, and carried
/// meds both strictly above the configured minimum and enough to cover the
/// configured cost.
pub fn drop_off_system(
    intent: Res<PlayerIntent>,
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    mut score: ResMut<PlayerScore>,
    q_player: Query<(&Transform, &BodySize), With<Player>>,
    q_home: Query<(&Transform, &BodySize), (With<Home>, Without<Player>)>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    if !intent.drop_off {
        return;
    }
    let (Ok((player_transform, player_size)), Ok((home_transform, home_size))) =
        (q_player.single(), q_home.single())
    else {
        return;
    };
    if inventory.meds <= config.min_meds_for_drop_off
        || inventory.meds < config.drop_off_meds_cost
    {
        return;
    }

    let player_box = body_aabb(player_transform, player_size);
    let home_box = body_aabb(home_transform, home_size);
    if player_box.overlaps(&home_box) {
        inventory.meds -= config.drop_off_meds_cost;
        score.points += config.drop_off_score_gain;
        sounds.write(SoundEffect::DropOff);
    }
}
