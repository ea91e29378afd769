//! Headless integration tests for the simulation core.
//!
//! No window, no rendering, no real clock: the app gets `StatesPlugin`, a
//! manually-advanced `Time`, and [`SimulationPlugin`].  Tests drive the game
//! by writing [`PlayerIntent`] directly and spawning entities straight into
//! the world, exactly the seams the simulation exposes for this purpose.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use medrun::config::GameConfig;
use medrun::enemy::Enemy;
use medrun::input::PlayerIntent;
use medrun::menu::GameState;
use medrun::pickup::PickupKind;
use medrun::player::{Bullet, Player, PlayerHealth, PlayerInventory, PlayerScore};
use medrun::simulation::SimulationPlugin;
use medrun::world::{BodySize, Building, Home, Solid, Velocity, WorldEntity};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app in `Playing` with the given config, settled through
/// one update so the `OnEnter` systems have run.
fn test_app(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_resource::<Time>();
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);
    app.insert_state(GameState::Playing);
    app.update();
    app
}

/// Advance the simulation clock by `dt` seconds and run one frame.
fn tick(app: &mut App, dt: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
    app.update();
}

fn spawn_player_at(app: &mut App, pos: Vec2, hp: i32) -> Entity {
    let size = app.world().resource::<GameConfig>().player_size;
    app.world_mut()
        .spawn((
            Player,
            PlayerHealth::new(hp),
            Solid,
            WorldEntity,
            BodySize::square(size),
            Velocity::default(),
            Transform::from_translation(pos.extend(1.0)),
        ))
        .id()
}

fn spawn_enemy_at(app: &mut App, pos: Vec2) -> Entity {
    let size = app.world().resource::<GameConfig>().enemy_size;
    app.world_mut()
        .spawn((
            Enemy,
            Solid,
            WorldEntity,
            BodySize::square(size),
            Velocity::default(),
            Transform::from_translation(pos.extend(0.4)),
        ))
        .id()
}

fn spawn_building_at(app: &mut App, pos: Vec2) -> Entity {
    let size = app.world().resource::<GameConfig>().building_size;
    app.world_mut()
        .spawn((
            Building,
            Solid,
            WorldEntity,
            BodySize::square(size),
            Transform::from_translation(pos.extend(0.3)),
        ))
        .id()
}

fn spawn_pickup_at(app: &mut App, kind: PickupKind, pos: Vec2) -> Entity {
    let size = app.world().resource::<GameConfig>().pickup_size;
    app.world_mut()
        .spawn((
            kind,
            WorldEntity,
            BodySize::square(size),
            Transform::from_translation(pos.extend(0.2)),
        ))
        .id()
}

fn spawn_home_at(app: &mut App, pos: Vec2) -> Entity {
    let size = app.world().resource::<GameConfig>().home_size;
    app.world_mut()
        .spawn((
            Home,
            WorldEntity,
            BodySize::square(size),
            Transform::from_translation(pos.extend(0.1)),
        ))
        .id()
}

fn intent(app: &mut App) -> Mut<'_, PlayerIntent> {
    app.world_mut().resource_mut::<PlayerIntent>()
}

fn inventory(app: &App) -> PlayerInventory {
    *app.world().resource::<PlayerInventory>()
}

fn count_with<T: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<T>>();
    query.iter(app.world()).count()
}

fn player_hp(app: &mut App, player: Entity) -> i32 {
    app.world().get::<PlayerHealth>(player).unwrap().hp
}

fn game_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn held_movement_covers_speed_times_dt() {
    let mut app = test_app(GameConfig::default());
    let player = spawn_player_at(&mut app, Vec2::ZERO, 5);

    intent(&mut app).move_dir = Vec2::new(1.0, 0.0);
    tick(&mut app, 0.5);

    let pos = app.world().get::<Transform>(player).unwrap().translation;
    // player_speed 100 for 0.5 s
    assert!((pos.x - 50.0).abs() < 1e-3, "moved {}", pos.x);
    assert_eq!(pos.y, 0.0);
}

#[test]
fn wall_blocks_one_axis_and_player_slides_along_it() {
    let mut app = test_app(GameConfig::default());
    // Building box spans x 17..81; the player's +x probe (x -15..17) touches it.
    let player = spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_building_at(&mut app, Vec2::new(49.0, 0.0));

    intent(&mut app).move_dir = Vec2::new(1.0, 1.0);
    tick(&mut app, 0.5);

    let pos = app.world().get::<Transform>(player).unwrap().translation;
    assert_eq!(pos.x, 0.0, "blocked axis must not move");
    assert!((pos.y - 50.0).abs() < 1e-3, "free axis gets full speed");
}

// ── Shooting and bullets ──────────────────────────────────────────────────────

#[test]
fn firing_spawns_one_bullet_and_deducts_ammo() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    let before = inventory(&app).ammo;

    intent(&mut app).fire_at = Some(Vec2::new(200.0, 0.0));
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).ammo, before - 1);
    assert_eq!(count_with::<Bullet>(&mut app), 1);
}

#[test]
fn firing_at_own_position_is_skipped_without_cost() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    let before = inventory(&app).ammo;

    intent(&mut app).fire_at = Some(Vec2::ZERO);
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).ammo, before, "no direction, no shot, no cost");
    assert_eq!(count_with::<Bullet>(&mut app), 0);
}

#[test]
fn firing_with_empty_magazine_does_nothing() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    app.world_mut().resource_mut::<PlayerInventory>().ammo = 0;

    intent(&mut app).fire_at = Some(Vec2::new(200.0, 0.0));
    tick(&mut app, 0.0);

    assert_eq!(count_with::<Bullet>(&mut app), 0);
}

#[test]
fn bullet_expires_when_travel_time_elapses() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);

    intent(&mut app).fire_at = Some(Vec2::new(1.0, 0.0));
    tick(&mut app, 0.0); // spawn at age 0

    // 29 × 0.1 s: age 2.9, still short of the 3 s travel time.
    for _ in 0..29 {
        tick(&mut app, 0.1);
    }
    assert_eq!(count_with::<Bullet>(&mut app), 1);

    // One more step crosses 3.0 s; the removal command applies within the tick.
    tick(&mut app, 0.1);
    assert_eq!(count_with::<Bullet>(&mut app), 0);
}

#[test]
fn bullet_and_enemy_annihilate_pairwise() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::new(500.0, 500.0), 5);
    let enemy_pos = Vec2::new(-200.0, 0.0);
    spawn_enemy_at(&mut app, enemy_pos);

    // Two bullets overlapping the same enemy: only one pair resolves.
    for _ in 0..2 {
        app.world_mut().spawn((
            Bullet::default(),
            WorldEntity,
            BodySize::square(8.0),
            Velocity::default(),
            Transform::from_translation(enemy_pos.extend(0.5)),
        ));
    }
    tick(&mut app, 0.0);

    assert_eq!(count_with::<Enemy>(&mut app), 0, "enemy dies once");
    assert_eq!(count_with::<Bullet>(&mut app), 1, "second bullet keeps flying");
}

#[test]
fn building_stops_bullets_and_survives() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::new(500.0, 500.0), 5);
    let wall_pos = Vec2::new(-200.0, 0.0);
    spawn_building_at(&mut app, wall_pos);
    app.world_mut().spawn((
        Bullet::default(),
        WorldEntity,
        BodySize::square(8.0),
        Velocity::default(),
        Transform::from_translation(wall_pos.extend(0.5)),
    ));

    tick(&mut app, 0.0);

    assert_eq!(count_with::<Bullet>(&mut app), 0);
    assert_eq!(count_with::<Building>(&mut app), 1);
}

// ── Contact damage and immunity ───────────────────────────────────────────────

#[test]
fn adjacent_enemy_damages_once_per_immunity_window() {
    let mut app = test_app(GameConfig::default());
    // Enemy box 17..49 touches the player's one-unit +x probe.
    let player = spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_enemy_at(&mut app, Vec2::new(33.0, 0.0));

    tick(&mut app, 0.1);
    assert_eq!(player_hp(&mut app, player), 4, "first contact hits");

    tick(&mut app, 0.5);
    assert_eq!(player_hp(&mut app, player), 4, "immune window holds");

    // Cross the 1 s immunity boundary.
    tick(&mut app, 0.6);
    assert_eq!(player_hp(&mut app, player), 3, "window expired, next hit lands");
}

#[test]
fn lethal_contact_transitions_to_game_over() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 1);
    spawn_enemy_at(&mut app, Vec2::new(33.0, 0.0));

    tick(&mut app, 0.1); // damage lands, transition is requested
    tick(&mut app, 0.0); // state transition applies

    assert_eq!(game_state(&app), GameState::GameOver);
}

#[test]
fn death_tick_performs_no_further_interactions() {
    let mut app = test_app(GameConfig::default());
    // hp 1, an adjacent enemy, and a pickup directly under the player.
    spawn_player_at(&mut app, Vec2::ZERO, 1);
    spawn_enemy_at(&mut app, Vec2::new(33.0, 0.0));
    spawn_pickup_at(&mut app, PickupKind::Ammo, Vec2::ZERO);
    let ammo_before = inventory(&app).ammo;

    tick(&mut app, 0.1);

    assert_eq!(
        count_with::<PickupKind>(&mut app),
        1,
        "pickup must survive the killing tick"
    );
    assert_eq!(inventory(&app).ammo, ammo_before);
}

// ── Pickups, delivery, healing ────────────────────────────────────────────────

#[test]
fn overlapping_pickup_is_consumed_exactly_once() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_pickup_at(&mut app, PickupKind::Ammo, Vec2::new(10.0, 0.0));
    let before = inventory(&app);

    tick(&mut app, 0.0);
    assert_eq!(inventory(&app).ammo, before.ammo + 1);
    assert_eq!(inventory(&app).meds, before.meds);
    assert_eq!(count_with::<PickupKind>(&mut app), 0);

    // Nothing left to collect.
    tick(&mut app, 0.0);
    assert_eq!(inventory(&app).ammo, before.ammo + 1);
}

#[test]
fn drop_off_at_home_trades_one_med_for_one_point() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_home_at(&mut app, Vec2::ZERO);
    app.world_mut().resource_mut::<PlayerInventory>().meds = 2;

    intent(&mut app).drop_off = true;
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).meds, 1);
    assert_eq!(app.world().resource::<PlayerScore>().points, 1);

    // Intent was cleared at end of tick; holding the key does not repeat.
    tick(&mut app, 0.0);
    assert_eq!(inventory(&app).meds, 1);
    assert_eq!(app.world().resource::<PlayerScore>().points, 1);
}

#[test]
fn drop_off_without_meds_is_a_no_op() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_home_at(&mut app, Vec2::ZERO);
    app.world_mut().resource_mut::<PlayerInventory>().meds = 0;

    intent(&mut app).drop_off = true;
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).meds, 0);
    assert_eq!(app.world().resource::<PlayerScore>().points, 0);
}

#[test]
fn drop_off_below_cost_leaves_meds_untouched() {
    // Cost higher than the minimum threshold: a single carried med clears
    // the threshold but cannot cover the cost, and must never go negative.
    let mut app = test_app(GameConfig {
        drop_off_meds_cost: 3,
        min_meds_for_drop_off: 0,
        ..Default::default()
    });
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    spawn_home_at(&mut app, Vec2::ZERO);
    app.world_mut().resource_mut::<PlayerInventory>().meds = 1;

    intent(&mut app).drop_off = true;
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).meds, 1);
    assert_eq!(app.world().resource::<PlayerScore>().points, 0);

    // With the cost covered, the drop-off goes through.
    app.world_mut().resource_mut::<PlayerInventory>().meds = 3;
    intent(&mut app).drop_off = true;
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).meds, 0);
    assert_eq!(app.world().resource::<PlayerScore>().points, 1);
}

#[test]
fn drop_off_away_from_home_is_a_no_op() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::new(300.0, 0.0), 5);
    spawn_home_at(&mut app, Vec2::ZERO);
    app.world_mut().resource_mut::<PlayerInventory>().meds = 2;

    intent(&mut app).drop_off = true;
    tick(&mut app, 0.0);

    assert_eq!(inventory(&app).meds, 2);
    assert_eq!(app.world().resource::<PlayerScore>().points, 0);
}

#[test]
fn healing_spends_a_med_for_health() {
    let mut app = test_app(GameConfig::default());
    let player = spawn_player_at(&mut app, Vec2::ZERO, 3);
    app.world_mut().resource_mut::<PlayerInventory>().meds = 1;

    intent(&mut app).heal = true;
    tick(&mut app, 0.0);

    assert_eq!(player_hp(&mut app, player), 4);
    assert_eq!(inventory(&app).meds, 0);

    // Out of meds: a second press changes nothing.
    intent(&mut app).heal = true;
    tick(&mut app, 0.0);
    assert_eq!(player_hp(&mut app, player), 4);
}

// ── Enemy steering ────────────────────────────────────────────────────────────

#[test]
fn enemy_closes_on_the_player_at_configured_speed() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::ZERO, 5);
    let enemy = spawn_enemy_at(&mut app, Vec2::new(300.0, 0.0));

    tick(&mut app, 1.0);

    let pos = app.world().get::<Transform>(enemy).unwrap().translation;
    // enemy_speed 30 for 1 s, straight toward the player.
    assert!((pos.x - 270.0).abs() < 1e-3, "enemy at {}", pos.x);
    assert_eq!(pos.y, 0.0);
}

#[test]
fn enemy_blocked_by_wall_slides_toward_the_player() {
    let mut app = test_app(GameConfig::default());
    spawn_player_at(&mut app, Vec2::new(-300.0, 100.0), 5);
    // Wall box 168..232 in x.  The enemy body (233..265) clears it, but the
    // one-unit -x probe (232..264) touches the wall's right edge.
    spawn_building_at(&mut app, Vec2::new(200.0, 0.0));
    let enemy = spawn_enemy_at(&mut app, Vec2::new(249.0, 0.0));

    tick(&mut app, 1.0);

    let pos = app.world().get::<Transform>(enemy).unwrap().translation;
    assert_eq!(pos.x, 249.0, "x axis blocked by the wall");
    assert!((pos.y - 30.0).abs() < 1e-3, "full speed along the free axis");
}

// ── Recurring spawner ─────────────────────────────────────────────────────────

fn spawner_config(enemy_cap: usize) -> GameConfig {
    GameConfig {
        enemy_spawn_chance: 1.0,
        ammo_spawn_chance: 0.0,
        meds_spawn_chance: 0.0,
        first_spawn_delay: 0.2,
        spawn_interval: 0.2,
        enemy_population_cap: enemy_cap,
        ..Default::default()
    }
}

#[test]
fn spawner_waits_for_the_first_delay_then_spawns() {
    let mut app = test_app(spawner_config(64));
    // Player far off-map so the viewport exclusion cannot reject anything.
    spawn_player_at(&mut app, Vec2::new(50_000.0, 50_000.0), 5);

    // First tick with a live player arms the timer: due at 0.1 + 0.2 = 0.3.
    tick(&mut app, 0.1);
    assert_eq!(count_with::<Enemy>(&mut app), 0, "arming tick spawns nothing");

    tick(&mut app, 0.15); // t = 0.25, still inside the delay
    assert_eq!(count_with::<Enemy>(&mut app), 0);

    tick(&mut app, 0.1); // t = 0.35: past the deadline, certain enemy
    assert_eq!(count_with::<Enemy>(&mut app), 1);

    // Remove the spawned enemy so the next attempt cannot be rejected by a
    // random overlap with it.
    let spawned = {
        let mut query = app.world_mut().query_filtered::<Entity, With<Enemy>>();
        query.iter(app.world()).next().unwrap()
    };
    app.world_mut().despawn(spawned);

    tick(&mut app, 0.15); // t = 0.5: next deadline is 0.55
    assert_eq!(count_with::<Enemy>(&mut app), 0);

    tick(&mut app, 0.1); // t = 0.6
    assert_eq!(count_with::<Enemy>(&mut app), 1);
}

#[test]
fn population_cap_blocks_instantiation() {
    let mut app = test_app(spawner_config(0));
    spawn_player_at(&mut app, Vec2::new(50_000.0, 50_000.0), 5);

    for _ in 0..20 {
        tick(&mut app, 0.2);
    }
    assert_eq!(count_with::<Enemy>(&mut app), 0, "cap 0 means no enemies ever");
}

#[test]
fn on_screen_attempts_are_rejected() {
    // Player at the map center: every candidate position is inside the
    // viewport, so no attempt can succeed even with a certain spawn chance.
    let mut app = test_app(GameConfig {
        map_half_size: 200.0,
        ..spawner_config(64)
    });
    spawn_player_at(&mut app, Vec2::ZERO, 5);

    for _ in 0..20 {
        tick(&mut app, 0.2);
    }
    assert_eq!(count_with::<Enemy>(&mut app), 0);
}
