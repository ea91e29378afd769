//! In-run status HUD.
//!
//! One top-left text node showing health, ammo, carried meds, and score.
//! Spawned on `OnEnter(Playing)`, refreshed every frame the underlying values
//! change, despawned on `OnExit(Playing)`.

use crate::menu::GameState;
use crate::player::{Player, PlayerHealth, PlayerInventory, PlayerScore};
use bevy::prelude::*;

/// Marker for the status HUD node.
#[derive(Component)]
pub struct HudStatusDisplay;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnExit(GameState::Playing), cleanup_hud)
            .add_systems(
                Update,
                hud_status_system.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Spawn the top-left status HUD.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudStatusDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Refresh the HUD text.  Cheap enough to rebuild unconditionally: four
/// integers into one line.
pub fn hud_status_system(
    inventory: Res<PlayerInventory>,
    score: Res<PlayerScore>,
    q_health: Query<&PlayerHealth, With<Player>>,
    parent_query: Query<&Children, With<HudStatusDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let hp = q_health.single().map(|h| h.hp).unwrap_or(0);
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "HP: {}  Ammo: {}  Meds: {}  Delivered: {}",
                    hp, inventory.ammo, inventory.meds, score.points
                ));
            }
        }
    }
}

/// Despawn the HUD when the run ends.
pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudStatusDisplay>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
