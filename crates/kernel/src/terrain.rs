use islewalk_common::TileCoord;
use rand::Rng;

/// Spacing, in tiles, between random lattice points of the value noise.
const NOISE_CELL: u32 = 4;

/// One height sample per tile, row-major (`z * width + x`).
///
/// Built only through [`World`](crate::World), which rejects dimensions whose
/// tile count does not fit in `u32`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl Heightmap {
    pub(crate) fn flat(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width as usize * height as usize],
        }
    }

    /// Island-shaped terrain: value noise scaled by a radial falloff that
    /// reaches zero before the map edge. Heights stay within `[0, peak]`.
    pub(crate) fn island<R: Rng>(width: u32, height: u32, peak: f32, rng: &mut R) -> Self {
        let lattice_w = width / NOISE_CELL + 2;
        let lattice_h = height / NOISE_CELL + 2;
        let lattice: Vec<f32> = (0..lattice_w * lattice_h)
            .map(|_| rng.gen_range(0.0..1.0))
            .collect();

        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for z in 0..height {
            for x in 0..width {
                let nx = (x as f32 + 0.5 - half_w) / half_w;
                let nz = (z as f32 + 0.5 - half_h) / half_h;
                let falloff = smoothstep(1.0 - (nx * nx + nz * nz).sqrt());
                let noise = lattice_noise(&lattice, lattice_w, x, z);
                samples.push(peak * falloff * (0.5 + 0.5 * noise));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height of a tile, `None` outside the map.
    pub fn get(&self, tile: TileCoord) -> Option<f32> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let (x, z) = (tile.x as u32, tile.y as u32);
        if x >= self.width || z >= self.height {
            return None;
        }
        self.samples.get((z * self.width + x) as usize).copied()
    }

    /// Nearest-sample lookup at (floor(x), floor(z)); 0.0 off the map.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.get(TileCoord::new(x.floor() as i32, z.floor() as i32))
            .unwrap_or(0.0)
    }

    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(0.0, f32::max)
    }

    pub(crate) fn samples(&self) -> &[f32] {
        &self.samples
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Bilinear interpolation of the random lattice at tile (x, z).
fn lattice_noise(lattice: &[f32], lattice_w: u32, x: u32, z: u32) -> f32 {
    let (cx, fx) = (x / NOISE_CELL, (x % NOISE_CELL) as f32 / NOISE_CELL as f32);
    let (cz, fz) = (z / NOISE_CELL, (z % NOISE_CELL) as f32 / NOISE_CELL as f32);
    let at = |lx: u32, lz: u32| lattice[(lz * lattice_w + lx) as usize];
    let top = at(cx, cz) + (at(cx + 1, cz) - at(cx, cz)) * fx;
    let bottom = at(cx, cz + 1) + (at(cx + 1, cz + 1) - at(cx, cz + 1)) * fx;
    top + (bottom - top) * fz
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn flat_map_is_zero_everywhere() {
        let map = Heightmap::flat(4, 3);
        assert_eq!(map.max(), 0.0);
        assert_eq!(map.get(TileCoord::new(3, 2)), Some(0.0));
    }

    #[test]
    fn out_of_range_lookups() {
        let map = Heightmap::flat(4, 3);
        assert_eq!(map.get(TileCoord::new(4, 0)), None);
        assert_eq!(map.get(TileCoord::new(0, -1)), None);
        assert_eq!(map.sample(-0.5, 1.0), 0.0);
    }

    #[test]
    fn island_heights_are_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = Heightmap::island(10, 20, 1.5, &mut rng);
        for &h in map.samples() {
            assert!((0.0..=1.5).contains(&h), "height {h} out of range");
        }
    }

    #[test]
    fn island_rises_from_the_shore() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = Heightmap::island(10, 20, 1.5, &mut rng);
        assert_eq!(map.get(TileCoord::new(0, 0)), Some(0.0));
        assert_eq!(map.get(TileCoord::new(9, 19)), Some(0.0));
        assert!(map.get(TileCoord::new(5, 10)).unwrap() > 0.0);
    }

    #[test]
    fn sample_floors_to_tile() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let map = Heightmap::island(16, 16, 2.0, &mut rng);
        let tile = map.get(TileCoord::new(7, 8)).unwrap();
        assert_eq!(map.sample(7.0, 8.0), tile);
        assert_eq!(map.sample(7.99, 8.5), tile);
    }

    #[test]
    fn same_seed_same_island() {
        let a = Heightmap::island(12, 12, 1.0, &mut ChaCha8Rng::seed_from_u64(9));
        let b = Heightmap::island(12, 12, 1.0, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
