//! Agents: the policies that decide when a mover gets a new destination.
//!
//! # Invariants
//! - Player and NPC drive `MovementController` identically; they differ only
//!   in when `set_target` is called.
//! - Randomness is injected by the caller, never drawn from a global source.

pub mod agent;
pub mod npc;
pub mod player;
pub mod roster;

pub use agent::Agent;
pub use npc::{Npc, NpcConfig, random_destination};
pub use player::{Player, PlayerConfig};
pub use roster::NpcRoster;
