use glam::Vec3;
use islewalk_common::EntityId;
use islewalk_motion::{MotionConfig, MovementController, Retarget};
use islewalk_nav::GridModel;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: Vec3,
    pub motion: MotionConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(5.5, 0.5, 5.5),
            motion: MotionConfig::default(),
        }
    }
}

/// The user-controlled character. Passive until a pointer pick arrives.
#[derive(Debug, Clone)]
pub struct Player {
    id: EntityId,
    controller: MovementController,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            id: EntityId::new(),
            controller: MovementController::new(config.spawn, config.motion),
        }
    }

    /// A click on the terrain, already resolved to a world position.
    pub fn pointer_pick<G: GridModel + ?Sized>(&mut self, world_pos: Vec3, grid: &G) -> Retarget {
        let outcome = self.controller.set_target(world_pos, grid);
        tracing::debug!(?world_pos, ?outcome, "player retarget");
        outcome
    }

    pub fn update<G: GridModel + ?Sized>(&mut self, dt: f32, grid: &G) {
        self.controller.update(dt, grid);
    }
}

impl Agent for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn controller(&self) -> &MovementController {
        &self.controller
    }
}
