use std::collections::BTreeMap;

use islewalk_common::TileCoord;
use islewalk_nav::GridModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::terrain::Heightmap;

/// Kind of static object scattered over the island. Every kind blocks its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Tree,
    Rock,
    Bush,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Tree, ObjectKind::Rock, ObjectKind::Bush];

    /// Range of the size parameter handed to the renderer (trunk or body radius).
    pub fn size_range(self) -> std::ops::Range<f32> {
        match self {
            ObjectKind::Tree => 0.15..0.3,
            ObjectKind::Rock => 0.1..0.3,
            ObjectKind::Bush => 0.1..0.3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ObjectKind::Tree => 'T',
            ObjectKind::Rock => 'R',
            ObjectKind::Bush => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub kind: ObjectKind,
    pub tile: TileCoord,
    pub size: f32,
}

/// Parameters for island generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub tree_count: usize,
    pub rock_count: usize,
    pub bush_count: usize,
    /// Highest terrain point. Zero gives a flat map.
    pub terrain_peak: f32,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            tree_count: 10,
            rock_count: 20,
            bush_count: 10,
            terrain_peak: 1.0,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn count_of(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Tree => self.tree_count,
            ObjectKind::Rock => self.rock_count,
            ObjectKind::Bush => self.bush_count,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("world dimensions must be non-zero and fit u32 tile indices, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("tile {0} is outside the world")]
    OutOfBounds(TileCoord),
    #[error("tile {0} is already occupied")]
    Occupied(TileCoord),
}

/// The authoritative island.
///
/// Objects live in a BTreeMap keyed by tile so iteration (and therefore
/// hashing and debug output) is deterministic.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    seed: u64,
    heightmap: Heightmap,
    objects: BTreeMap<TileCoord, WorldObject>,
}

impl World {
    /// Generate a world from `config`, seeded with `config.seed`.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let tiles = config.width.checked_mul(config.height).unwrap_or(0);
        if tiles == 0 {
            return Err(WorldError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let seed = config.seed;
        let mut world = Self {
            heightmap: Heightmap::flat(config.width, config.height),
            config,
            seed,
            objects: BTreeMap::new(),
        };
        world.generate(seed);
        Ok(world)
    }

    /// Flat, empty world.
    pub fn flat(width: u32, height: u32) -> Result<Self, WorldError> {
        Self::new(WorldConfig {
            width,
            height,
            tree_count: 0,
            rock_count: 0,
            bush_count: 0,
            terrain_peak: 0.0,
            seed: 0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Seed of the current layout.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn objects(&self) -> &BTreeMap<TileCoord, WorldObject> {
        &self.objects
    }

    pub fn object_count(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    /// Object occupying `tile`, if any.
    pub fn object_at(&self, tile: TileCoord) -> Option<&WorldObject> {
        self.objects.get(&tile)
    }

    /// Discard the current layout and build a new one from `seed`.
    ///
    /// Each kind gets `count` placement attempts at uniformly random tiles; an
    /// attempt that lands on an occupied tile is dropped, not retried.
    pub fn generate(&mut self, seed: u64) {
        let _span = tracing::info_span!("world_generate", seed).entered();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (width, height) = (self.config.width, self.config.height);

        self.seed = seed;
        self.objects.clear();
        self.heightmap = if self.config.terrain_peak > 0.0 {
            Heightmap::island(width, height, self.config.terrain_peak, &mut rng)
        } else {
            Heightmap::flat(width, height)
        };

        for kind in ObjectKind::ALL {
            for _ in 0..self.config.count_of(kind) {
                let tile = TileCoord::new(
                    rng.gen_range(0..width) as i32,
                    rng.gen_range(0..height) as i32,
                );
                let size = rng.gen_range(kind.size_range());
                if self.objects.contains_key(&tile) {
                    tracing::trace!(%tile, ?kind, "placement skipped, tile occupied");
                    continue;
                }
                self.objects.insert(tile, WorldObject { kind, tile, size });
            }
        }

        tracing::debug!(
            trees = self.object_count(ObjectKind::Tree),
            rocks = self.object_count(ObjectKind::Rock),
            bushes = self.object_count(ObjectKind::Bush),
            "world generated"
        );
    }

    /// Regenerate from a seed derived from the current one. Returns the new seed.
    pub fn regenerate(&mut self) -> u64 {
        let next = splitmix64(self.seed);
        self.generate(next);
        next
    }

    pub fn place_object(
        &mut self,
        tile: TileCoord,
        kind: ObjectKind,
        size: f32,
    ) -> Result<(), WorldError> {
        if !self.in_bounds(tile) {
            return Err(WorldError::OutOfBounds(tile));
        }
        if self.objects.contains_key(&tile) {
            return Err(WorldError::Occupied(tile));
        }
        self.objects.insert(tile, WorldObject { kind, tile, size });
        tracing::debug!(%tile, ?kind, "object placed");
        Ok(())
    }

    pub fn remove_object(&mut self, tile: TileCoord) -> Option<WorldObject> {
        let removed = self.objects.remove(&tile);
        if let Some(obj) = &removed {
            tracing::debug!(%tile, kind = ?obj.kind, "object removed");
        }
        removed
    }

    /// Deterministic hash of the layout (seed, heights, objects).
    pub fn layout_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.seed.to_le_bytes());
        for sample in self.heightmap.samples() {
            mix(&mut h, &sample.to_le_bytes());
        }
        for (tile, obj) in &self.objects {
            mix(&mut h, &tile.x.to_le_bytes());
            mix(&mut h, &tile.y.to_le_bytes());
            mix(&mut h, &[obj.kind.symbol() as u8]);
            mix(&mut h, &obj.size.to_le_bytes());
        }
        h
    }
}

impl GridModel for World {
    fn width(&self) -> u32 {
        self.config.width
    }

    fn height(&self) -> u32 {
        self.config.height
    }

    fn is_blocked(&self, tile: TileCoord) -> bool {
        self.objects.contains_key(&tile)
    }

    fn terrain_height(&self, x: f32, z: f32) -> f32 {
        self.heightmap.sample(x, z)
    }
}

/// Splitmix64 step, used to derive the next layout seed.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
