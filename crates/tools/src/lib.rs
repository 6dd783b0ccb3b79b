//! Developer Tooling: world inspector and text map rendering.
//!
//! # Invariants
//! - Tools only read world and agent state; they never mutate it.

pub mod inspector;
pub mod map;

pub use inspector::{AgentInfo, WorldInspector, WorldSummary};
pub use map::MapView;
