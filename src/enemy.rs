//! Enemy steering and contact damage.
//!
//! Enemies recompute their velocity every tick: the vector toward the player
//! is vetted one axis at a time with a one-unit obstruction probe against
//! every other solid body, then normalized to exactly the configured speed.
//! Zeroing only the blocked axis gives the wall-slide behaviour — an enemy
//! stopped against a building still closes along the free axis.

use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::player::{probed_velocity, Player, PlayerHealth};
use crate::spatial::Aabb;
use crate::world::{body_aabb, BodySize, Solid, Velocity, WorldEntity};
use bevy::prelude::*;

/// Marker component for enemy entities.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Spawn one enemy at `pos`.  Used by world generation and the recurring
/// spawner.
pub fn spawn_enemy(commands: &mut Commands, pos: Vec2, config: &GameConfig) {
    commands.spawn((
        Enemy,
        Solid,
        WorldEntity,
        BodySize::square(config.enemy_size),
        Velocity::default(),
        Transform::from_translation(pos.extend(0.4)),
        Visibility::default(),
    ));
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Steer every enemy toward the player with per-axis obstruction probes.
///
/// The probe set is all solid bodies except the enemy itself — buildings,
/// fellow enemies, and the player.  The resulting velocity magnitude is
/// always exactly `enemy_speed` or zero (never NaN: a sub-unit remaining
/// distance snaps to rest before normalization).
pub fn enemy_seek_system(
    config: Res<GameConfig>,
    q_player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q_enemies: Query<(Entity, &Transform, &BodySize, &mut Velocity), With<Enemy>>,
    q_solids: Query<(Entity, &Transform, &BodySize), With<Solid>>,
) {
    let Ok(player_transform) = q_player.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    // Snapshot the solid bodies once; the probe closure runs per axis per enemy.
    let solids: Vec<(Entity, Aabb)> = q_solids
        .iter()
        .map(|(entity, transform, size)| (entity, body_aabb(transform, size)))
        .collect();

    for (entity, transform, size, mut velocity) in q_enemies.iter_mut() {
        let body = body_aabb(transform, size);
        let to_player = player_pos - transform.translation.truncate();
        velocity.0 = probed_velocity(to_player, body, config.enemy_speed, |probe| {
            solids
                .iter()
                .any(|(other, other_box)| *other != entity && probe.overlaps(other_box))
        });
    }
}

// ── Contact damage ────────────────────────────────────────────────────────────

/// Apply contact damage when an enemy presses against the player.
///
/// The player box is probed one unit in each of the four cardinal directions;
/// any probe overlapping an enemy counts as contact.  Damage is gated by the
/// immunity window recorded on [`PlayerHealth`]: one hit, then nothing until
/// `immune_time` has elapsed.
pub fn contact_damage_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut q_player: Query<(&Transform, &BodySize, &mut PlayerHealth), With<Player>>,
    q_enemies: Query<(&Transform, &BodySize), With<Enemy>>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok((transform, size, mut health)) = q_player.single_mut() else {
        return;
    };

    let body = body_aabb(transform, size);
    let probes = [
        body.offset(Vec2::new(-1.0, 0.0)),
        body.offset(Vec2::new(1.0, 0.0)),
        body.offset(Vec2::new(0.0, -1.0)),
        body.offset(Vec2::new(0.0, 1.0)),
    ];

    let touching = q_enemies.iter().any(|(enemy_transform, enemy_size)| {
        let enemy_box = body_aabb(enemy_transform, enemy_size);
        probes.iter().any(|probe| probe.overlaps(&enemy_box))
    });

    let now = time.elapsed_secs_f64();
    if touching && health.can_take_damage(now) {
        health.hp -= config.enemy_damage;
        health.next_damage_at = Some(now + f64::from(config.immune_time));
        sounds.write(SoundEffect::Hurt);
    }
}
