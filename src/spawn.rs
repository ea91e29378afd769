//! World generation and the recurring procedural spawner.
//!
//! ## One-time generation (`generate_world`)
//!
//! 1. Home base at the origin.
//! 2. Border wall: buildings tiled just outside the map rim at fixed
//!    intervals (no rejection — the rim is always closed).
//! 3. Rejection-sampled interior placement: a fixed number of *attempts*
//!    each for buildings, pickups (ammo vs meds by configured proportion),
//!    and enemies.  An attempt whose margin-padded box overlaps anything
//!    already placed is silently dropped.
//!
//! ## Recurring spawner (`spawner_system`)
//!
//! A single timestamp drives a two-state machine: unarmed → armed at
//! `now + first_spawn_delay`; once armed, every elapse performs exactly one
//! attempt and re-arms at `now + spawn_interval` regardless of outcome.
//! An attempt weighted-picks {enemy, ammo, meds, none}, samples a uniform
//! map position, and is rejected if the candidate box would be on screen
//! (viewport centered on the player), overlap any existing body, or push a
//! population past its cap.  Rejection is an expected outcome, not an error.

use crate::config::GameConfig;
use crate::enemy::{spawn_enemy, Enemy};
use crate::pickup::{spawn_pickup, PickupKind};
use crate::player::Player;
use crate::spatial::Aabb;
use crate::world::{body_aabb, spawn_building, spawn_home, BodySize, Building, Home};
use bevy::prelude::*;
use rand::Rng;

// ── Spawn planning (pure) ─────────────────────────────────────────────────────

/// What one recurring spawn attempt decided to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Enemy,
    Ammo,
    Meds,
}

/// Weighted selection over the configured chances.
///
/// The chances partition `[0, 1)` cumulatively; any remainder above their sum
/// maps to `None` ("no spawn this attempt").
pub fn choose_spawn_kind(roll: f32, config: &GameConfig) -> Option<SpawnKind> {
    let enemy_edge = config.enemy_spawn_chance;
    let ammo_edge = enemy_edge + config.ammo_spawn_chance;
    let meds_edge = ammo_edge + config.meds_spawn_chance;
    if roll < enemy_edge {
        Some(SpawnKind::Enemy)
    } else if roll < ammo_edge {
        Some(SpawnKind::Ammo)
    } else if roll < meds_edge {
        Some(SpawnKind::Meds)
    } else {
        None
    }
}

fn kind_side(kind: SpawnKind, config: &GameConfig) -> f32 {
    match kind {
        SpawnKind::Enemy => config.enemy_size,
        SpawnKind::Ammo | SpawnKind::Meds => config.pickup_size,
    }
}

/// Candidate bounding box for a spawn of `kind` at `pos`.
///
/// Non-enemy candidates are scaled by the margin factor so pickups keep a
/// little clearance around whatever they land next to.
pub fn candidate_box(kind: SpawnKind, pos: Vec2, config: &GameConfig) -> Aabb {
    let side = kind_side(kind, config);
    let scaled = match kind {
        SpawnKind::Enemy => side,
        SpawnKind::Ammo | SpawnKind::Meds => side * config.spawn_margin_factor,
    };
    Aabb::from_center_size(pos, Vec2::splat(scaled))
}

/// Whether `candidate` must be rejected: on screen, or overlapping an
/// existing body.
pub fn candidate_is_blocked(candidate: &Aabb, viewport: &Aabb, occupied: &[Aabb]) -> bool {
    candidate.overlaps(viewport) || occupied.iter().any(|other| candidate.overlaps(other))
}

/// Perform the random half of one spawn attempt: pick a kind and a position,
/// then apply the viewport and overlap rejections.
///
/// Population caps are left to the caller — they depend on live entity
/// counts, and a capped attempt still consumes the timer cycle.
pub fn plan_spawn_attempt<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    player_pos: Vec2,
    occupied: &[Aabb],
) -> Option<(SpawnKind, Vec2)> {
    let kind = choose_spawn_kind(rng.gen::<f32>(), config)?;

    let half = config.map_half_size;
    let pos = Vec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half));

    let candidate = candidate_box(kind, pos, config);
    let viewport =
        Aabb::from_center_size(player_pos, Vec2::new(config.view_width, config.view_height));
    if candidate_is_blocked(&candidate, &viewport, occupied) {
        return None;
    }
    Some((kind, pos))
}

// ── Recurring spawner ─────────────────────────────────────────────────────────

/// Next time the spawner may act; `None` until the first tick arms it.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    pub next_spawn: Option<f64>,
}

/// Disarm the spawner at the start of every run.
pub fn reset_spawn_timer(mut timer: ResMut<SpawnTimer>) {
    timer.next_spawn = None;
}

/// The time-gated spawner tick.
#[allow(clippy::too_many_arguments)]
pub fn spawner_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut timer: ResMut<SpawnTimer>,
    q_player: Query<(&Transform, &BodySize), With<Player>>,
    q_buildings: Query<(&Transform, &BodySize), With<Building>>,
    q_enemies: Query<(&Transform, &BodySize), With<Enemy>>,
    q_pickups: Query<(&Transform, &BodySize), With<PickupKind>>,
    q_home: Query<(&Transform, &BodySize), With<Home>>,
) {
    let now = time.elapsed_secs_f64();
    let Some(due) = timer.next_spawn else {
        timer.next_spawn = Some(now + f64::from(config.first_spawn_delay));
        return;
    };
    if now < due {
        return;
    }
    // One attempt per elapse; the timer re-arms whatever happens below.
    timer.next_spawn = Some(now + f64::from(config.spawn_interval));

    let Ok((player_transform, player_size)) = q_player.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    let occupied: Vec<Aabb> = q_buildings
        .iter()
        .chain(q_enemies.iter())
        .chain(q_pickups.iter())
        .chain(q_home.iter())
        .map(|(t, s)| body_aabb(t, s))
        .chain(std::iter::once(body_aabb(player_transform, player_size)))
        .collect();

    let Some((kind, pos)) =
        plan_spawn_attempt(&mut rand::thread_rng(), &config, player_pos, &occupied)
    else {
        return;
    };

    match kind {
        SpawnKind::Enemy => {
            if q_enemies.iter().count() < config.enemy_population_cap {
                spawn_enemy(&mut commands, pos, &config);
            }
        }
        SpawnKind::Ammo | SpawnKind::Meds => {
            if q_pickups.iter().count() < config.pickup_population_cap {
                let pickup = match kind {
                    SpawnKind::Ammo => PickupKind::Ammo,
                    _ => PickupKind::Meds,
                };
                spawn_pickup(&mut commands, pickup, pos, &config);
            }
        }
    }
}

// ── World generation ──────────────────────────────────────────────────────────

/// Build the initial world: home, border wall, and the rejection-sampled
/// interior population.  Runs once on `OnEnter(Playing)`.
pub fn generate_world(mut commands: Commands, config: Res<GameConfig>) {
    let mut rng = rand::thread_rng();
    let mut occupied: Vec<Aabb> = Vec::new();

    let home_pos = Vec2::ZERO;
    spawn_home(&mut commands, home_pos, &config);
    occupied.push(Aabb::from_center_size(home_pos, Vec2::splat(config.home_size)));

    tile_border(&mut commands, &config);

    let building = Vec2::splat(config.building_size);
    for _ in 0..config.building_init_attempts {
        if let Some(pos) = sample_placement(&mut rng, &config, &mut occupied, building) {
            spawn_building(&mut commands, pos, &config);
        }
    }

    let pickup = Vec2::splat(config.pickup_size);
    for _ in 0..config.pickup_init_attempts {
        let kind = if rng.gen::<f32>() < config.ammo_init_proportion {
            PickupKind::Ammo
        } else {
            PickupKind::Meds
        };
        if let Some(pos) = sample_placement(&mut rng, &config, &mut occupied, pickup) {
            spawn_pickup(&mut commands, kind, pos, &config);
        }
    }

    let enemy = Vec2::splat(config.enemy_size);
    for _ in 0..config.enemy_init_attempts {
        if let Some(pos) = sample_placement(&mut rng, &config, &mut occupied, enemy) {
            spawn_enemy(&mut commands, pos, &config);
        }
    }

    info!(
        "world generated: {} bodies placed inside ±{}",
        occupied.len(),
        config.map_half_size
    );
}

/// Tile the map rim with buildings at fixed intervals, one tile outside the
/// playable square on every side.
fn tile_border(commands: &mut Commands, config: &GameConfig) {
    let half = config.map_half_size;
    let side = config.building_size;
    let rim = half + side / 2.0;

    let mut along = -half;
    while along < half {
        spawn_building(commands, Vec2::new(along, -rim), config);
        spawn_building(commands, Vec2::new(along, rim), config);
        spawn_building(commands, Vec2::new(-rim, along), config);
        spawn_building(commands, Vec2::new(rim, along), config);
        along += side;
    }
}

/// Sample one interior placement: uniform position, margin-padded overlap
/// rejection against everything placed so far.  On success the *unpadded*
/// box is recorded so later attempts only avoid the body itself.
pub fn sample_placement<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    occupied: &mut Vec<Aabb>,
    size: Vec2,
) -> Option<Vec2> {
    let half = config.map_half_size;
    let pos = Vec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half));

    let margin = size.x;
    let padded = Aabb::from_center_size(pos, size).padded(margin);
    if occupied.iter().any(|other| padded.overlaps(other)) {
        return None;
    }
    occupied.push(Aabb::from_center_size(pos, size));
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weighted_choice_partitions_the_unit_interval() {
        let config = GameConfig::default();
        // Defaults: 0.33 / 0.33 / 0.33 with 0.01 of remainder.
        assert_eq!(choose_spawn_kind(0.0, &config), Some(SpawnKind::Enemy));
        assert_eq!(choose_spawn_kind(0.32, &config), Some(SpawnKind::Enemy));
        assert_eq!(choose_spawn_kind(0.34, &config), Some(SpawnKind::Ammo));
        assert_eq!(choose_spawn_kind(0.67, &config), Some(SpawnKind::Meds));
        assert_eq!(choose_spawn_kind(0.995, &config), None);
    }

    #[test]
    fn remainder_maps_to_no_spawn() {
        let mut config = GameConfig::default();
        config.enemy_spawn_chance = 0.1;
        config.ammo_spawn_chance = 0.0;
        config.meds_spawn_chance = 0.0;
        assert_eq!(choose_spawn_kind(0.05, &config), Some(SpawnKind::Enemy));
        assert_eq!(choose_spawn_kind(0.5, &config), None);
    }

    /// One 64×64 building at the origin; any candidate whose
    /// box overlaps it must be rejected, whatever the kind.
    #[test]
    fn candidate_overlapping_building_is_rejected_for_every_kind() {
        let config = GameConfig::default();
        let building = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(64.0));
        // Viewport far away so only the body overlap can reject.
        let viewport = Aabb::from_center_size(Vec2::new(10_000.0, 0.0), Vec2::new(1280.0, 720.0));

        for kind in [SpawnKind::Enemy, SpawnKind::Ammo, SpawnKind::Meds] {
            let candidate = candidate_box(kind, Vec2::new(30.0, 0.0), &config);
            assert!(
                candidate_is_blocked(&candidate, &viewport, &[building]),
                "{kind:?} should be rejected on top of the building"
            );
        }
    }

    #[test]
    fn candidate_inside_viewport_is_rejected() {
        let config = GameConfig::default();
        let viewport = Aabb::from_center_size(Vec2::ZERO, Vec2::new(1280.0, 720.0));
        let candidate = candidate_box(SpawnKind::Enemy, Vec2::new(100.0, 50.0), &config);
        assert!(candidate_is_blocked(&candidate, &viewport, &[]));
    }

    #[test]
    fn planned_spawn_lands_inside_the_map() {
        let mut config = GameConfig::default();
        // Guarantee a kind is always chosen; park the viewport off-map.
        config.enemy_spawn_chance = 1.0;
        config.ammo_spawn_chance = 0.0;
        config.meds_spawn_chance = 0.0;
        let mut rng = StdRng::seed_from_u64(7);

        let player_far_away = Vec2::new(50_000.0, 50_000.0);
        let (kind, pos) = plan_spawn_attempt(&mut rng, &config, player_far_away, &[])
            .expect("empty map with certain chance must spawn");
        assert_eq!(kind, SpawnKind::Enemy);
        assert!(pos.x.abs() <= config.map_half_size);
        assert!(pos.y.abs() <= config.map_half_size);
    }

    #[test]
    fn fully_occupied_map_rejects_every_attempt() {
        let mut config = GameConfig::default();
        config.enemy_spawn_chance = 1.0;
        let mut rng = StdRng::seed_from_u64(7);

        let everything = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(10_000.0));
        for _ in 0..32 {
            assert!(plan_spawn_attempt(
                &mut rng,
                &config,
                Vec2::new(50_000.0, 50_000.0),
                &[everything]
            )
            .is_none());
        }
    }

    #[test]
    fn sample_placement_respects_previous_bodies() {
        let mut config = GameConfig::default();
        config.map_half_size = 100.0;
        let mut rng = StdRng::seed_from_u64(3);

        // Cover the whole map: nothing can land.
        let mut occupied = vec![Aabb::from_center_size(Vec2::ZERO, Vec2::splat(1_000.0))];
        for _ in 0..16 {
            assert!(sample_placement(&mut rng, &config, &mut occupied, Vec2::splat(64.0)).is_none());
        }
        assert_eq!(occupied.len(), 1);

        // Empty map: placements land and are recorded.
        let mut open = Vec::new();
        let mut placed = 0;
        for _ in 0..16 {
            if sample_placement(&mut rng, &config, &mut open, Vec2::splat(8.0)).is_some() {
                placed += 1;
            }
        }
        assert!(placed >= 1);
        assert_eq!(open.len(), placed);
    }
}
