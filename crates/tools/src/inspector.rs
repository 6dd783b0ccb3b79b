use islewalk_agents::Agent;
use islewalk_common::{EntityId, TileCoord};
use islewalk_kernel::{ObjectKind, World};
use islewalk_nav::GridModel;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world and its agents for
/// debugging and the CLI.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            width: world.width(),
            height: world.height(),
            seed: world.seed(),
            trees: world.object_count(ObjectKind::Tree),
            rocks: world.object_count(ObjectKind::Rock),
            bushes: world.object_count(ObjectKind::Bush),
            peak: world.heightmap().max(),
            layout_hash: world.layout_hash(),
        }
    }

    /// Snapshot of one agent's movement state.
    pub fn inspect_agent(agent: &dyn Agent) -> AgentInfo {
        let p = agent.position();
        let controller = agent.controller();
        let path = agent.path();
        AgentInfo {
            id: agent.id(),
            position: [p.x, p.y, p.z],
            moving: agent.is_moving(),
            destination: path.last().copied(),
            remaining: path.len().saturating_sub(controller.path_index()),
        }
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub trees: usize,
    pub rocks: usize,
    pub bushes: usize,
    pub peak: f32,
    pub layout_hash: u64,
}

impl WorldSummary {
    pub fn blocked(&self) -> usize {
        self.trees + self.rocks + self.bushes
    }
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: {}x{} seed={} trees={} rocks={} bushes={} blocked={} peak={:.2} hash={:016x}",
            self.width,
            self.height,
            self.seed,
            self.trees,
            self.rocks,
            self.bushes,
            self.blocked(),
            self.peak,
            self.layout_hash
        )
    }
}

/// Detailed info about a single agent.
#[derive(Debug, Clone)]
pub struct AgentInfo {
    pub id: EntityId,
    pub position: [f32; 3],
    pub moving: bool,
    pub destination: Option<TileCoord>,
    /// Tiles left to reach, including the one being walked to.
    pub remaining: usize,
}

impl std::fmt::Display for AgentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Agent [{:.8}] pos=({:.2}, {:.2}, {:.2})",
            &self.id.0.to_string()[..8],
            self.position[0],
            self.position[1],
            self.position[2],
        )?;
        match self.destination {
            Some(dest) if self.moving => {
                write!(f, " -> {dest} ({} tiles left)", self.remaining)
            }
            _ => write!(f, " idle"),
        }
    }
}
