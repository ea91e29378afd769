//! Input intent abstraction.
//!
//! The simulation never reads devices directly.  [`PlayerIntent`] is the
//! aggregated player intent for the current tick: [`gather_input_system`]
//! (keyboard + mouse, registered by `main.rs`) writes it each frame, the core
//! systems read it, and [`clear_intent_system`] wipes the edge-triggered
//! fields at the end of the tick.  Headless tests populate the resource
//! directly to drive behaviour without a real input device.

use crate::player::Player;
use bevy::prelude::*;

/// Aggregated player intent for the current simulation tick.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    /// Held movement direction, one of {-1, 0, 1} per axis (world axes:
    /// +y is up).
    pub move_dir: Vec2,
    /// World position the player fired at this tick, if any (edge-triggered).
    pub fire_at: Option<Vec2>,
    /// Drop-off key freshly pressed this tick (edge-triggered).
    pub drop_off: bool,
    /// Heal key freshly pressed this tick (edge-triggered).
    pub heal: bool,
}

/// Translate keyboard and mouse state into [`PlayerIntent`].
///
/// WASD moves, left-click fires at the cursor, `F` drops meds off, `R` heals.
/// The cursor position is converted to world coordinates as its offset from
/// the window center plus the player position — the camera is centered on the
/// player, so the two frames differ only by that translation.
pub fn gather_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    q_player: Query<&Transform, With<Player>>,
    mut intent: ResMut<PlayerIntent>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyD) {
        dir.x = 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        dir.x = -1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        dir.y = -1.0;
    }
    if keys.pressed(KeyCode::KeyW) {
        dir.y = 1.0;
    }
    intent.move_dir = dir;

    intent.drop_off = keys.just_pressed(KeyCode::KeyF);
    intent.heal = keys.just_pressed(KeyCode::KeyR);

    intent.fire_at = None;
    if mouse_buttons.just_pressed(MouseButton::Left) {
        let (Ok(window), Ok(player_transform)) = (windows.single(), q_player.single()) else {
            return;
        };
        if let Some(cursor) = window.cursor_position() {
            // Screen-space y grows downward; world-space y grows upward.
            let offset = Vec2::new(
                cursor.x - window.width() / 2.0,
                -(cursor.y - window.height() / 2.0),
            );
            intent.fire_at = Some(player_transform.translation.truncate() + offset);
        }
    }
}

/// Wipe edge-triggered intent at the end of the tick so a press registers
/// exactly once even if the gather system does not run (headless tests).
pub fn clear_intent_system(mut intent: ResMut<PlayerIntent>) {
    intent.fire_at = None;
    intent.drop_off = false;
    intent.heal = false;
    intent.move_dir = Vec2::ZERO;
}
