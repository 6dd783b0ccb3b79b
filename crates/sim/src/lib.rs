//! Simulation session: owns the island, its agents and the camera.
//!
//! # Invariants
//! - One frame steps the player, then every NPC, then the camera.
//! - All randomness after construction comes from one seeded generator, so a
//!   config plus an action sequence replays identically.
//! - The world is only mutated by actions, never during a frame's update pass.

pub mod config;
pub mod session;

pub use config::{SimConfig, SimError};
pub use session::{Outcome, Session};
