//! Shooting, bullet lifetime, and bullet collision resolution.
//!
//! ## Resolution rules
//!
//! | Pair             | Outcome                                   |
//! |------------------|-------------------------------------------|
//! | bullet vs enemy  | both removed (first match wins the pair)  |
//! | bullet vs static | bullet removed; buildings are indestructible |
//!
//! Both passes scan a snapshot of the live entities and collect matches into
//! mark-sets before despawning, so an entity matched once can never be
//! resolved a second time within the same tick.

use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::input::PlayerIntent;
use crate::world::{body_aabb, BodySize, Building, Velocity, WorldEntity};
use bevy::prelude::*;
use std::collections::HashSet;

use super::state::{Player, PlayerInventory};

// ── Components ────────────────────────────────────────────────────────────────

/// Per-bullet state: seconds since launch.  A bullet travels on a straight
/// line for exactly `bullet_travel_time` seconds, then self-removes.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Bullet {
    pub age: f32,
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// Spawn a bullet toward the click target registered this tick.
///
/// Costs `bullet_shot_cost` ammo; silently does nothing when the magazine
/// cannot cover it.  A click landing exactly on the player has no direction —
/// the shot is skipped without consuming ammo rather than normalizing a zero
/// vector into NaN velocity.
pub fn shoot_system(
    mut commands: Commands,
    intent: Res<PlayerIntent>,
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    q_player: Query<&Transform, With<Player>>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Some(target) = intent.fire_at else {
        return;
    };
    if inventory.ammo < config.bullet_shot_cost {
        return;
    }
    let Ok(transform) = q_player.single() else {
        return;
    };

    let origin = transform.translation.truncate();
    let dir = target - origin;
    let dist = dir.length();
    if dist == 0.0 {
        return;
    }

    inventory.ammo -= config.bullet_shot_cost;
    commands.spawn((
        Bullet::default(),
        WorldEntity,
        BodySize::square(config.bullet_size),
        Velocity(dir * (config.bullet_speed / dist)),
        Transform::from_translation(origin.extend(0.5)),
        Visibility::default(),
    ));
    sounds.write(SoundEffect::Fire);
}

// ── Lifetime ──────────────────────────────────────────────────────────────────

/// Age bullets each tick and remove the ones whose travel time has elapsed.
pub fn bullet_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(Entity, &mut Bullet)>,
) {
    let dt = time.delta_secs();
    for (entity, mut bullet) in query.iter_mut() {
        bullet.age += dt;
        if bullet.age >= config.bullet_travel_time {
            commands.entity(entity).despawn();
        }
    }
}

// ── Collision resolution ──────────────────────────────────────────────────────

/// Resolve bullet-vs-enemy overlaps: each match removes one bullet and one
/// enemy.  Already-matched entities are skipped for the rest of the pass, so
/// a second bullet overlapping the same enemy keeps flying.
pub fn bullet_hit_enemy_system(
    mut commands: Commands,
    q_bullets: Query<(Entity, &Transform, &BodySize), With<Bullet>>,
    q_enemies: Query<(Entity, &Transform, &BodySize), With<Enemy>>,
) {
    let mut dead_bullets: HashSet<Entity> = HashSet::new();
    let mut dead_enemies: HashSet<Entity> = HashSet::new();

    for (bullet, bullet_transform, bullet_size) in q_bullets.iter() {
        if dead_bullets.contains(&bullet) {
            continue;
        }
        let bullet_box = body_aabb(bullet_transform, bullet_size);
        for (enemy, enemy_transform, enemy_size) in q_enemies.iter() {
            if dead_enemies.contains(&enemy) {
                continue;
            }
            if bullet_box.overlaps(&body_aabb(enemy_transform, enemy_size)) {
                dead_bullets.insert(bullet);
                dead_enemies.insert(enemy);
                break;
            }
        }
    }

    for entity in dead_bullets.into_iter().chain(dead_enemies) {
        commands.entity(entity).despawn();
    }
}

/// Remove bullets that struck a building.
pub fn bullet_hit_static_system(
    mut commands: Commands,
    q_bullets: Query<(Entity, &Transform, &BodySize), With<Bullet>>,
    q_buildings: Query<(&Transform, &BodySize), With<Building>>,
) {
    let mut dead_bullets: HashSet<Entity> = HashSet::new();

    for (bullet, bullet_transform, bullet_size) in q_bullets.iter() {
        if dead_bullets.contains(&bullet) {
            continue;
        }
        let bullet_box = body_aabb(bullet_transform, bullet_size);
        if q_buildings
            .iter()
            .any(|(t, s)| bullet_box.overlaps(&body_aabb(t, s)))
        {
            dead_bullets.insert(bullet);
        }
    }

    for entity in dead_bullets {
        commands.entity(entity).despawn();
    }
}
