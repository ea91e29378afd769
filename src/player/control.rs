//! Player movement and the heal action.
//!
//! Movement reads the per-tick [`PlayerIntent`] and sets the player velocity
//! directly.  Each axis is vetted independently with a one-unit obstruction
//! probe against the buildings, the same probe primitive the enemy AI uses —
//! blocking one axis never cancels movement along the other, so the player
//! slides along walls instead of sticking to them.

use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::input::PlayerIntent;
use crate::spatial::Aabb;
use crate::world::{body_aabb, BodySize, Building, Velocity};
use bevy::prelude::*;

use super::state::{Player, PlayerHealth, PlayerInventory};

/// Zero out the axes of `dir` whose one-unit probe from `body` hits an
/// obstacle, then scale what survives to `speed`.
///
/// Shared between player movement and enemy steering.  The post-probe vector
/// is re-normalized, so the returned velocity magnitude is always exactly
/// `speed` or zero — a blocked axis redirects effort, it does not slow the
/// mover down.  A vector shorter than one unit snaps to rest, which also
/// guards the normalization against dividing by zero.
pub fn probed_velocity(
    dir: Vec2,
    body: Aabb,
    speed: f32,
    mut blocked: impl FnMut(Aabb) -> bool,
) -> Vec2 {
    let mut vetted = dir;
    if vetted.x != 0.0 && blocked(body.offset(Vec2::new(vetted.x.signum(), 0.0))) {
        vetted.x = 0.0;
    }
    if vetted.y != 0.0 && blocked(body.offset(Vec2::new(0.0, vetted.y.signum()))) {
        vetted.y = 0.0;
    }

    let dist = vetted.length();
    if dist < 1.0 {
        Vec2::ZERO
    } else {
        vetted * (speed / dist)
    }
}

/// Apply held movement intent to the player velocity, probing each axis
/// against the buildings before committing to it.
pub fn player_move_system(
    intent: Res<PlayerIntent>,
    config: Res<GameConfig>,
    mut q_player: Query<(&Transform, &BodySize, &mut Velocity), With<Player>>,
    q_buildings: Query<(&Transform, &BodySize), (With<Building>, Without<Player>)>,
) {
    let Ok((transform, size, mut velocity)) = q_player.single_mut() else {
        return;
    };

    let body = body_aabb(transform, size);
    let desired = intent.move_dir * config.player_speed;
    velocity.0 = probed_velocity(desired, body, config.player_speed, |probe| {
        q_buildings
            .iter()
            .any(|(t, s)| probe.overlaps(&body_aabb(t, s)))
    });
}

/// Convert one carried med into health when the heal key is freshly pressed.
pub fn med_heal_system(
    intent: Res<PlayerIntent>,
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    mut q_player: Query<&mut PlayerHealth, With<Player>>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    if !intent.heal {
        return;
    }
    let Ok(mut health) = q_player.single_mut() else {
        return;
    };
    if inventory.meds < config.heal_meds_cost {
        return;
    }
    inventory.meds -= config.heal_meds_cost;
    health.hp += config.heal_health_gain;
    sounds.write(SoundEffect::UseItem);
}
