//! Shared types: entity ids and the tile coordinate system.
//!
//! # Invariants
//! - A world-space position maps to tile (floor(x), floor(z)).
//! - Tile centres sit at (x + 0.5, z + 0.5).

mod types;

pub use types::{EntityId, TileCoord};
