use bevy::prelude::*;
use bevy::window::WindowResolution;

use medrun::config::{self, GameConfig};
use medrun::hud::HudPlugin;
use medrun::input::gather_input_system;
use medrun::menu::{GameState, MenuPlugin};
use medrun::player::spawn_player;
use medrun::rendering::{self, RenderingPlugin};
use medrun::simulation::{SimulationPlugin, SimulationSet};
use medrun::spawn::generate_world;
use medrun::{audio, constants};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Medrun".into(),
                resolution: WindowResolution::new(
                    constants::VIEW_WIDTH as u32,
                    constants::VIEW_HEIGHT as u32,
                ),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        // Compiled defaults first; load_game_config overwrites them from
        // assets/game.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        .add_plugins(MenuPlugin)
        .add_plugins(SimulationPlugin)
        .add_plugins(RenderingPlugin)
        .add_plugins(HudPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_game_config,
                rendering::setup_camera.after(config::load_game_config),
                rendering::setup_game_meshes.after(config::load_game_config),
            ),
        )
        .add_systems(OnEnter(GameState::Playing), (generate_world, spawn_player))
        .add_systems(
            Update,
            (
                gather_input_system.before(SimulationSet::Resolve),
                audio::sound_sink_system.after(SimulationSet::Flush),
            )
                .run_if(in_state(GameState::Playing)),
        )
        .run();
}
