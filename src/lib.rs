//! Top-down survival delivery game.
//!
//! Scavenge med packs across a walled city while enemies converge on you,
//! carry them back to the home base for points, and spend them to heal when
//! the crowd gets through.  The simulation core (movement probes, combat
//! resolution, pickups, the recurring spawner) is headless and fully
//! exercised by the integration tests; presentation lives in [`rendering`],
//! [`hud`], and [`menu`].

pub mod audio;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod hud;
pub mod input;
pub mod menu;
pub mod pickup;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod spatial;
pub mod spawn;
pub mod world;
