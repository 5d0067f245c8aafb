//! Seeded 3D gradient noise

use noise::{NoiseFn, Perlin, Seedable};

/// Improved Perlin noise over a seeded permutation table.
///
/// The table is built once at construction; sampling is pure and
/// continuous across lattice cell boundaries, with output in roughly
/// [-1, 1].
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.perlin.seed()
    }

    /// Sample the field at a 3D point.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}
