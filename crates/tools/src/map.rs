use std::collections::BTreeMap;
use std::fmt;

use islewalk_agents::Agent;
use islewalk_common::TileCoord;
use islewalk_kernel::World;
use islewalk_nav::GridModel;

const GROUND: char = '.';
/// Terrain above half the island's peak.
const HIGH_GROUND: char = ':';
const PATH: char = '*';

/// Top-down text rendering of the island, one character per tile, row `y = 0`
/// first. Overlays stack as agents over paths over objects over terrain.
pub struct MapView<'a> {
    world: &'a World,
    paths: BTreeMap<TileCoord, char>,
    agents: BTreeMap<TileCoord, char>,
}

impl<'a> MapView<'a> {
    pub fn new(world: &'a World) -> Self {
        Self {
            world,
            paths: BTreeMap::new(),
            agents: BTreeMap::new(),
        }
    }

    /// Mark every tile of `path`. Out-of-bounds tiles are ignored.
    pub fn with_path(mut self, path: &[TileCoord]) -> Self {
        for &tile in path {
            self.paths.insert(tile, PATH);
        }
        self
    }

    /// Draw `agent` as `symbol`, together with the route it is following.
    pub fn with_agent(self, agent: &dyn Agent, symbol: char) -> Self {
        let mut view = self.with_path(agent.path());
        view.agents
            .insert(TileCoord::from_world(agent.position()), symbol);
        view
    }

    fn glyph(&self, tile: TileCoord) -> char {
        if let Some(&c) = self.agents.get(&tile) {
            return c;
        }
        if let Some(&c) = self.paths.get(&tile) {
            return c;
        }
        if let Some(obj) = self.world.object_at(tile) {
            return obj.kind.symbol();
        }
        let peak = self.world.heightmap().max();
        match self.world.heightmap().get(tile) {
            Some(h) if peak > 0.0 && h > peak * 0.5 => HIGH_GROUND,
            _ => GROUND,
        }
    }
}

impl fmt::Display for MapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.world.height() as i32 {
            for x in 0..self.world.width() as i32 {
                write!(f, "{}", self.glyph(TileCoord::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
