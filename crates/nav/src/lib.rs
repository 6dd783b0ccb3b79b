//! Navigation: the grid model contract and A* search over it.
//!
//! # Invariants
//! - The pathfinder never mutates or caches the grid between searches.
//! - Returned paths exclude the start tile and never contain a blocked or
//!   out-of-bounds tile.
//! - `Some(empty)` means "already there"; `None` means "no route".

pub mod astar;
pub mod grid;

pub use astar::{DEFAULT_MAX_ITERATIONS, Path, Pathfinder, SearchConfig, search};
pub use grid::{GridError, GridModel, OccupancyGrid};
