//! World Kernel: the island the agents walk on.
//!
//! # Invariants
//! - At most one static object per tile; occupied tiles are blocked for navigation.
//! - Generation is a pure function of (config, seed).
//! - Agents only ever see the world through `GridModel` (read-only).

pub mod terrain;
pub mod world;

pub use terrain::Heightmap;
pub use world::{ObjectKind, World, WorldConfig, WorldError, WorldObject};
