use glam::Vec3;
use islewalk_common::TileCoord;
use islewalk_nav::{GridModel, Path, Pathfinder, SearchConfig};
use serde::{Deserialize, Serialize};

/// Tunables for one mover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// World units per second along the path.
    pub speed: f32,
    /// Height of the entity's origin above the terrain.
    pub vertical_offset: f32,
    /// Rate at which Y converges on the terrain, per second.
    pub smoothing_factor: f32,
    pub search: SearchConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            vertical_offset: 0.5,
            smoothing_factor: 5.0,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MotionState {
    Idle,
    Moving {
        path: Path,
        /// Index into `path` of the tile currently being walked to.
        index: usize,
        /// World-space centre of `path[index]`.
        segment_target: Vec3,
    },
}

/// What a retarget request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retarget {
    /// A new path was adopted.
    Started { tiles: usize },
    /// Goal is the start tile; the mover stopped where it was.
    AlreadyThere,
    /// No route while idle; nothing changed.
    Rejected,
    /// No route while moving; the previous path is still being followed.
    KeptCurrent,
}

/// Path-following state machine for a single entity.
///
/// The grid is passed into every call rather than stored, so many
/// controllers can share one world without holding borrows across frames.
#[derive(Debug, Clone)]
pub struct MovementController {
    position: Vec3,
    state: MotionState,
    config: MotionConfig,
    pathfinder: Pathfinder,
}

impl MovementController {
    pub fn new(position: Vec3, config: MotionConfig) -> Self {
        Self {
            position,
            state: MotionState::Idle,
            pathfinder: Pathfinder::new(config.search),
            config,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, MotionState::Moving { .. })
    }

    /// Route being followed (see `path_index`), empty when idle.
    pub fn path(&self) -> &[TileCoord] {
        match &self.state {
            MotionState::Moving { path, .. } => path,
            MotionState::Idle => &[],
        }
    }

    pub fn path_index(&self) -> usize {
        match self.state {
            MotionState::Moving { index, .. } => index,
            MotionState::Idle => 0,
        }
    }

    /// Point currently being walked to; the current position when idle.
    pub fn segment_target(&self) -> Vec3 {
        match self.state {
            MotionState::Moving { segment_target, .. } => segment_target,
            MotionState::Idle => self.position,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Route to the tile under `goal`.
    ///
    /// While moving, the search starts from the tile being walked to rather
    /// than the tile underfoot, so the new route continues from there.
    pub fn set_target<G: GridModel + ?Sized>(&mut self, goal: Vec3, grid: &G) -> Retarget {
        let start = match &self.state {
            MotionState::Moving { segment_target, .. } => TileCoord::from_world(*segment_target),
            MotionState::Idle => TileCoord::from_world(self.position),
        };
        let goal_tile = TileCoord::from_world(goal);

        match self.pathfinder.search(start, goal_tile, grid) {
            Some(path) => self.follow(path, grid),
            None if self.is_moving() => {
                tracing::info!(%goal_tile, "no path to target, continuing to previous destination");
                Retarget::KeptCurrent
            }
            None => {
                tracing::info!(%start, %goal_tile, "no path to target");
                Retarget::Rejected
            }
        }
    }

    /// Adopt a precomputed path. An empty path stops the mover in place.
    pub fn follow<G: GridModel + ?Sized>(&mut self, path: Path, grid: &G) -> Retarget {
        let Some(&first) = path.first() else {
            self.state = MotionState::Idle;
            return Retarget::AlreadyThere;
        };
        let tiles = path.len();
        tracing::debug!(tiles, first = %first, "following new path");
        self.state = MotionState::Moving {
            segment_target: tile_center(first, grid, self.config.vertical_offset),
            path,
            index: 0,
        };
        Retarget::Started { tiles }
    }

    /// Advance along the path by `dt` seconds. No-op while idle.
    pub fn update<G: GridModel + ?Sized>(&mut self, dt: f32, grid: &G) {
        let MotionState::Moving {
            path,
            index,
            segment_target,
        } = &mut self.state
        else {
            return;
        };

        let direction = (*segment_target - self.position).normalize_or_zero();
        let step = direction * (self.config.speed * dt);
        let mut stepped = self.position + step;

        let ground = grid.terrain_height(stepped.x, stepped.z) + self.config.vertical_offset;
        stepped.y += (ground - stepped.y) * (self.config.smoothing_factor * dt).min(1.0);

        if stepped.distance(*segment_target) > step.length() {
            self.position = stepped;
            return;
        }

        // Reached or overshot: land exactly on the tile centre.
        self.position = *segment_target;
        if *index + 1 < path.len() {
            *index += 1;
            *segment_target = tile_center(path[*index], grid, self.config.vertical_offset);
        } else {
            tracing::debug!(position = ?self.position, "arrived");
            self.state = MotionState::Idle;
        }
    }
}

fn tile_center<G: GridModel + ?Sized>(tile: TileCoord, grid: &G, offset: f32) -> Vec3 {
    let (x, z) = tile.center_xz();
    Vec3::new(x, grid.terrain_height(x, z) + offset, z)
}
