//! Input: high-level actions and the follow camera.
//!
//! # Invariants
//! - The session consumes actions, never raw device events.
//! - Camera height and zoom distance always stay inside their configured ranges.
//! - Camera motion never feeds back into the world or agents.

pub mod action;
pub mod camera;

pub use action::Action;
pub use camera::{CameraConfig, FollowCamera};
