//! Retained 2D presentation: camera, per-kind quad meshes, damage flash.
//!
//! | Element    | Visual                       |
//! |------------|------------------------------|
//! | Player     | white quad                   |
//! | Enemy      | red quad                     |
//! | Building   | slate-grey quad              |
//! | Home       | large green quad             |
//! | Ammo       | small yellow quad            |
//! | Meds       | small cyan quad              |
//! | Bullet     | tiny white quad              |
//!
//! Spawn helpers create bare logic entities; the `attach_*_mesh_system`
//! family supplies the `Mesh2d` / `MeshMaterial2d` one frame later via
//! `Added<T>` change detection, so gameplay code never touches asset
//! storages.  Mesh handles are shared per kind and built once at startup
//! from the loaded config's sizes.

use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::menu::GameState;
use crate::pickup::PickupKind;
use crate::player::{Bullet, Player, PlayerHealth};
use crate::world::{Building, Home};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

// ── Resources ─────────────────────────────────────────────────────────────────

/// Shared mesh handles, one quad per entity kind (created once at startup).
#[derive(Resource)]
pub struct GameMeshes {
    player: Handle<Mesh>,
    enemy: Handle<Mesh>,
    building: Handle<Mesh>,
    home: Handle<Mesh>,
    pickup: Handle<Mesh>,
    bullet: Handle<Mesh>,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the mesh-attach systems, camera follow, and the damage flash.
///
/// Startup wiring (camera + mesh construction) lives in `main.rs`, ordered
/// after the config load so mesh sizes reflect the loaded values.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_player_mesh_system,
                attach_enemy_mesh_system,
                attach_building_mesh_system,
                attach_home_mesh_system,
                attach_pickup_mesh_system,
                attach_bullet_mesh_system,
                camera_follow_system,
                damage_flash_system,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the single 2D camera.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Build the per-kind quad meshes from the loaded config's entity sizes.
pub fn setup_game_meshes(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let mut quad = |side: f32| meshes.add(quad_mesh(side / 2.0, side / 2.0));
    commands.insert_resource(GameMeshes {
        player: quad(config.player_size),
        enemy: quad(config.enemy_size),
        building: quad(config.building_size),
        home: quad(config.home_size),
        pickup: quad(config.pickup_size),
        bullet: quad(config.bullet_size),
    });
}

// ── Mesh-attach systems ───────────────────────────────────────────────────────

fn attach_player_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Player>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.95, 0.95, 0.95)));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.player.clone()), MeshMaterial2d(mat)));
    }
}

fn attach_enemy_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Enemy>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.85, 0.18, 0.18)));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.enemy.clone()), MeshMaterial2d(mat)));
    }
}

fn attach_building_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Building>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.35, 0.38, 0.42)));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.building.clone()), MeshMaterial2d(mat)));
    }
}

fn attach_home_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Home>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.16, 0.55, 0.22)));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.home.clone()), MeshMaterial2d(mat)));
    }
}

fn attach_pickup_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &PickupKind), Added<PickupKind>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, kind) in query.iter() {
        let color = match kind {
            PickupKind::Ammo => Color::srgb(0.92, 0.82, 0.25),
            PickupKind::Meds => Color::srgb(0.25, 0.85, 0.90),
        };
        let mat = materials.add(ColorMaterial::from_color(color));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.pickup.clone()), MeshMaterial2d(mat)));
    }
}

fn attach_bullet_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Bullet>>,
    game_meshes: Res<GameMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(1.0, 1.0, 0.85)));
        commands
            .entity(entity)
            .insert((Mesh2d(game_meshes.bullet.clone()), MeshMaterial2d(mat)));
    }
}

// ── Per-frame systems ─────────────────────────────────────────────────────────

/// Keep the camera centered on the player.
fn camera_follow_system(
    q_player: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut q_camera: Query<&mut Transform, With<Camera2d>>,
) {
    let (Ok(player), Ok(mut camera)) = (q_player.single(), q_camera.single_mut()) else {
        return;
    };
    camera.translation.x = player.translation.x;
    camera.translation.y = player.translation.y;
}

/// Blink the player while the contact-damage immunity window is active.
///
/// Visibility toggles every `flash_period` seconds of remaining immunity and
/// always settles back to visible once the window expires.
fn damage_flash_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(&PlayerHealth, &mut Visibility), With<Player>>,
) {
    let Ok((health, mut visibility)) = query.single_mut() else {
        return;
    };
    let now = time.elapsed_secs_f64();
    *visibility = match health.next_damage_at {
        Some(next) if now < next => {
            let remaining = (next - now) as f32;
            if (remaining / config.flash_period) as i32 % 2 == 0 {
                Visibility::Hidden
            } else {
                Visibility::Visible
            }
        }
        _ => Visibility::Visible,
    };
}

// ── Mesh helper ───────────────────────────────────────────────────────────────

/// Build a filled axis-aligned quad mesh with the given half-extents.
fn quad_mesh(half_w: f32, half_h: f32) -> Mesh {
    // 4 corners, two CCW triangles.
    let positions: Vec<[f32; 3]> = vec![
        [-half_w, half_h, 0.0],
        [half_w, half_h, 0.0],
        [half_w, -half_h, 0.0],
        [-half_w, -half_h, 0.0],
    ];
    let indices = Indices::U32(vec![0, 2, 1, 0, 3, 2]);
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(indices);
    mesh
}
