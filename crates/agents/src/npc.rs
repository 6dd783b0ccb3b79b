use glam::Vec3;
use islewalk_common::EntityId;
use islewalk_motion::{MotionConfig, MovementController, Retarget};
use islewalk_nav::GridModel;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// NPCs spawned when the session starts.
    pub count: usize,
    /// Chance per idle tick of picking a new destination.
    pub wander_chance: f64,
    pub motion: MotionConfig,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            count: 5,
            wander_chance: 0.01,
            motion: MotionConfig::default(),
        }
    }
}

/// A wandering character: idles, and now and then walks to a random tile.
#[derive(Debug, Clone)]
pub struct Npc {
    id: EntityId,
    controller: MovementController,
    wander_chance: f64,
}

impl Npc {
    /// Place an NPC and send it straight off to a random destination.
    pub fn spawn<G, R>(position: Vec3, config: &NpcConfig, grid: &G, rng: &mut R) -> Self
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        let mut npc = Self {
            id: EntityId::new(),
            controller: MovementController::new(position, config.motion),
            wander_chance: config.wander_chance.clamp(0.0, 1.0),
        };
        npc.wander(grid, rng);
        npc
    }

    pub fn update<G, R>(&mut self, dt: f32, grid: &G, rng: &mut R)
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        self.controller.update(dt, grid);
        if !self.controller.is_moving() && rng.gen_bool(self.wander_chance) {
            self.wander(grid, rng);
        }
    }

    fn wander<G, R>(&mut self, grid: &G, rng: &mut R) -> Retarget
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        let destination = random_destination(grid, rng);
        let outcome = self.controller.set_target(destination, grid);
        tracing::trace!(id = ?self.id, ?destination, ?outcome, "npc wander");
        outcome
    }
}

impl Agent for Npc {
    fn id(&self) -> EntityId {
        self.id
    }

    fn controller(&self) -> &MovementController {
        &self.controller
    }
}

/// Centre of a uniformly random in-bounds tile, at NPC standing height.
pub fn random_destination<G, R>(grid: &G, rng: &mut R) -> Vec3
where
    G: GridModel + ?Sized,
    R: Rng,
{
    let x = rng.gen_range(0..grid.width());
    let z = rng.gen_range(0..grid.height());
    Vec3::new(x as f32 + 0.5, 0.5, z as f32 + 0.5)
}
