//! Game-specific error types and configuration validation.
//!
//! Normal gameplay has no error paths: spawn rejection, cap refusal, and the
//! death transition are all designed outcomes.  What *can* go wrong is a bad
//! configuration file, so validation runs once at load time and a rejected
//! file falls back to compiled defaults.

use crate::config::GameConfig;
use std::fmt;

/// Top-level error enum for medrun.
#[derive(Debug)]
pub enum GameError {
    /// The per-attempt spawn chances sum above 1.0, which would silently bias
    /// selection toward the first-checked kind.
    SpawnChanceOverflow {
        /// Sum of enemy + ammo + meds chances.
        sum: f32,
    },

    /// A configuration value that must be strictly positive is not.
    NonPositiveValue {
        /// Name of the offending key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A probability that must lie in `[0, 1]` does not.
    ProbabilityOutOfRange {
        /// Name of the offending key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::SpawnChanceOverflow { sum } => write!(
                f,
                "spawn chances sum to {} (> 1.0); the remainder up to 1.0 must map to \"no spawn\"",
                sum
            ),
            GameError::NonPositiveValue { name, value } => {
                write!(f, "config key '{}' = {} must be strictly positive", name, value)
            }
            GameError::ProbabilityOutOfRange { name, value } => {
                write!(f, "config key '{}' = {} must lie within [0, 1]", name, value)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::NonPositiveValue { name, value })
    }
}

fn require_probability(name: &'static str, value: f32) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::ProbabilityOutOfRange { name, value })
    }
}

/// Validate a loaded [`GameConfig`] before it replaces the defaults.
///
/// Rejects spawn chances that individually leave `[0, 1]` or collectively sum
/// above 1.0, and non-positive geometry/timing values that would break the
/// simulation (zero-size bodies, zero-length map, instant bullets).
pub fn validate_config(config: &GameConfig) -> GameResult<()> {
    require_probability("enemy_spawn_chance", config.enemy_spawn_chance)?;
    require_probability("ammo_spawn_chance", config.ammo_spawn_chance)?;
    require_probability("meds_spawn_chance", config.meds_spawn_chance)?;
    require_probability("ammo_init_proportion", config.ammo_init_proportion)?;

    let sum = config.enemy_spawn_chance + config.ammo_spawn_chance + config.meds_spawn_chance;
    if sum > 1.0 {
        return Err(GameError::SpawnChanceOverflow { sum });
    }

    require_positive("map_half_size", config.map_half_size)?;
    require_positive("player_size", config.player_size)?;
    require_positive("enemy_size", config.enemy_size)?;
    require_positive("building_size", config.building_size)?;
    require_positive("pickup_size", config.pickup_size)?;
    require_positive("bullet_size", config.bullet_size)?;
    require_positive("home_size", config.home_size)?;
    require_positive("bullet_travel_time", config.bullet_travel_time)?;
    require_positive("bullet_speed", config.bullet_speed)?;
    require_positive("immune_time", config.immune_time)?;
    require_positive("flash_period", config.flash_period)?;
    require_positive("spawn_interval", config.spawn_interval)?;
    require_positive("spawn_margin_factor", config.spawn_margin_factor)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&GameConfig::default()).is_ok());
    }

    #[test]
    fn spawn_chances_summing_above_one_are_rejected() {
        let mut config = GameConfig::default();
        config.enemy_spawn_chance = 0.5;
        config.ammo_spawn_chance = 0.4;
        config.meds_spawn_chance = 0.2;
        match validate_config(&config) {
            Err(GameError::SpawnChanceOverflow { sum }) => {
                assert!((sum - 1.1).abs() < 1e-6);
            }
            other => panic!("expected SpawnChanceOverflow, got {:?}", other),
        }
    }

    #[test]
    fn chances_summing_below_one_are_fine() {
        // The remainder simply maps to "no spawn this attempt".
        let mut config = GameConfig::default();
        config.enemy_spawn_chance = 0.1;
        config.ammo_spawn_chance = 0.1;
        config.meds_spawn_chance = 0.1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn negative_probability_is_rejected() {
        let mut config = GameConfig::default();
        config.ammo_spawn_chance = -0.2;
        assert!(matches!(
            validate_config(&config),
            Err(GameError::ProbabilityOutOfRange { name: "ammo_spawn_chance", .. })
        ));
    }

    #[test]
    fn zero_map_size_is_rejected() {
        let mut config = GameConfig::default();
        config.map_half_size = 0.0;
        assert!(matches!(
            validate_config(&config),
            Err(GameError::NonPositiveValue { name: "map_half_size", .. })
        ));
    }
}
