use islewalk_common::TileCoord;
use thiserror::Error;

/// Read-only view of world occupancy, bounds and terrain.
///
/// The pathfinder calls `in_bounds` and `is_blocked` once per neighbour it
/// considers, so implementations should answer in O(1) or O(log n).
pub trait GridModel {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && (tile.x as u32) < self.width()
            && (tile.y as u32) < self.height()
    }

    /// True if a static object occupies the tile.
    fn is_blocked(&self, tile: TileCoord) -> bool;

    /// Terrain height under a world-space XZ point.
    fn terrain_height(&self, x: f32, z: f32) -> f32;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero and fit u32 tile indices, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// In-memory grid: a blocked bitmap plus one height sample per tile.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
    heights: Vec<f32>,
}

impl OccupancyGrid {
    /// Open, flat grid. Rejects a zero side and any size whose tile count
    /// overflows `u32`.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let len = match width.checked_mul(height) {
            Some(n) if n > 0 => n as usize,
            _ => return Err(GridError::InvalidDimensions { width, height }),
        };
        Ok(Self {
            width,
            height,
            blocked: vec![false; len],
            heights: vec![0.0; len],
        })
    }

    /// Grid with the given tiles blocked. Out-of-bounds tiles are ignored.
    pub fn with_blocked(
        width: u32,
        height: u32,
        blocked: impl IntoIterator<Item = TileCoord>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for tile in blocked {
            grid.set_blocked(tile, true);
        }
        Ok(grid)
    }

    /// Parse a text map: `#` is blocked, anything else is open.
    /// Rows run along +y, columns along +x.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.set_blocked(TileCoord::new(x as i32, y as i32), true);
                }
            }
        }
        Ok(grid)
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.y as u32 * self.width + tile.x as u32) as usize)
    }

    pub fn set_blocked(&mut self, tile: TileCoord, blocked: bool) {
        if let Some(i) = self.index(tile) {
            self.blocked[i] = blocked;
        }
    }

    pub fn set_height(&mut self, tile: TileCoord, height: f32) {
        if let Some(i) = self.index(tile) {
            self.heights[i] = height;
        }
    }
}

impl GridModel for OccupancyGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_blocked(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some_and(|i| self.blocked[i])
    }

    fn terrain_height(&self, x: f32, z: f32) -> f32 {
        let tile = TileCoord::new(x.floor() as i32, z.floor() as i32);
        self.index(tile).map_or(0.0, |i| self.heights[i])
    }
}
