//! Movement: turns tile paths into smooth world-space motion.
//!
//! # Invariants
//! - Each controller owns its movement state; only its own `set_target` and
//!   `update` mutate it.
//! - A retarget that finds no route never disturbs motion already under way.
//! - Arrival at a segment snaps exactly onto the tile centre.

pub mod controller;

pub use controller::{MotionConfig, MotionState, MovementController, Retarget};
