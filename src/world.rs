//! Shared entity components and motion integration.
//!
//! Every simulated object carries a `Transform` (position) and a [`BodySize`]
//! from which its world-space [`Aabb`] is derived on demand.  Kind markers
//! ([`Building`], [`Home`], enemy/pickup/bullet markers in their own modules)
//! play the role of homogeneous entity collections: membership is a marker
//! component, iteration is a `Query`, size is `query.iter().count()`, and
//! insertion notifications are Bevy `Added<T>` change detection.
//!
//! Removal goes through `Commands::despawn`, which is applied after the
//! current pass finishes iterating — the resolution systems therefore never
//! mutate a collection they are walking (skipped/double-visited elements are
//! impossible by construction).

use crate::config::GameConfig;
use crate::spatial::Aabb;
use bevy::prelude::*;

/// Marker for every entity belonging to the active run; despawned wholesale
/// when leaving `Playing` so a fresh run starts clean.
#[derive(Component)]
pub struct WorldEntity;

/// Marker for solid bodies that block movement probes (buildings, enemies,
/// the player).  Pickups, bullets, and the home are not solid.
#[derive(Component)]
pub struct Solid;

/// Immovable static obstacle.  Created once at world generation, never removed.
#[derive(Component)]
pub struct Building;

/// The single meds delivery point.  Created once at world generation.
#[derive(Component)]
pub struct Home;

/// Full extents of an entity's axis-aligned bounding box (world units).
#[derive(Component, Debug, Clone, Copy)]
pub struct BodySize(pub Vec2);

impl BodySize {
    /// Square body helper; every entity kind in the game is square.
    pub fn square(side: f32) -> Self {
        Self(Vec2::splat(side))
    }
}

/// Linear velocity (world units per second), integrated by
/// [`integrate_motion_system`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Spawn one static building at `pos`.  Buildings block movement probes and
/// stop bullets.
pub fn spawn_building(commands: &mut Commands, pos: Vec2, config: &GameConfig) {
    commands.spawn((
        Building,
        Solid,
        WorldEntity,
        BodySize::square(config.building_size),
        Transform::from_translation(pos.extend(0.3)),
        Visibility::default(),
    ));
}

/// Spawn the home base at `pos`.  Walk-through: delivery checks overlap, not
/// collision.
pub fn spawn_home(commands: &mut Commands, pos: Vec2, config: &GameConfig) {
    commands.spawn((
        Home,
        WorldEntity,
        BodySize::square(config.home_size),
        Transform::from_translation(pos.extend(0.1)),
        Visibility::default(),
    ));
}

/// World-space bounding box of an entity at `transform`'s position.
pub fn body_aabb(transform: &Transform, size: &BodySize) -> Aabb {
    Aabb::from_center_size(transform.translation.truncate(), size.0)
}

/// Apply velocities to positions.  Runs once per tick after all steering and
/// input systems have settled their velocities for the frame.
pub fn integrate_motion_system(time: Res<Time>, mut query: Query<(&Velocity, &mut Transform)>) {
    let dt = time.delta_secs();
    for (velocity, mut transform) in query.iter_mut() {
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_aabb_is_centered_on_transform() {
        let transform = Transform::from_xyz(10.0, -4.0, 0.0);
        let aabb = body_aabb(&transform, &BodySize::square(8.0));
        assert_eq!(aabb.min, Vec2::new(6.0, -8.0));
        assert_eq!(aabb.max, Vec2::new(14.0, 0.0));
    }
}
