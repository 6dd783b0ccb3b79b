use glam::Vec3;
use islewalk_common::EntityId;
use islewalk_nav::GridModel;
use rand::Rng;

use crate::agent::Agent;
use crate::npc::{Npc, NpcConfig};

/// All NPCs in the session, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct NpcRoster {
    config: NpcConfig,
    npcs: Vec<Npc>,
}

impl NpcRoster {
    pub fn new(config: NpcConfig) -> Self {
        Self {
            config,
            npcs: Vec::new(),
        }
    }

    /// Roster pre-filled with `config.count` NPCs.
    pub fn populated<G, R>(config: NpcConfig, grid: &G, rng: &mut R) -> Self
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        let mut roster = Self::new(config);
        for _ in 0..config.count {
            roster.add(grid, rng);
        }
        tracing::debug!(count = roster.len(), "npc roster populated");
        roster
    }

    /// Spawn one NPC at a random point on the map.
    pub fn add<G, R>(&mut self, grid: &G, rng: &mut R) -> EntityId
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        let position = Vec3::new(
            rng.gen_range(0.0..grid.width() as f32),
            self.config.motion.vertical_offset,
            rng.gen_range(0.0..grid.height() as f32),
        );
        let npc = Npc::spawn(position, &self.config, grid, rng);
        let id = npc.id();
        self.npcs.push(npc);
        id
    }

    /// Remove the most recently added NPC.
    pub fn remove(&mut self) -> Option<Npc> {
        self.npcs.pop()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id() == id)
    }

    pub fn update<G, R>(&mut self, dt: f32, grid: &G, rng: &mut R)
    where
        G: GridModel + ?Sized,
        R: Rng,
    {
        for npc in &mut self.npcs {
            npc.update(dt, grid, rng);
        }
    }
}
