//! Finite-difference surface normals

use glam::DVec3;

use super::height::HeightField;

/// Default finite-difference step
pub const DEFAULT_NORMAL_EPSILON: f64 = 0.001;

/// Squared cross-product length below which the normal is treated as degenerate
const MIN_CROSS_LENGTH_SQ: f64 = 1e-24;

/// Estimates upward-facing unit normals of a [`HeightField`].
pub struct NormalEstimator<'a, H: HeightField + ?Sized> {
    field: &'a H,
    epsilon: f64,
}

impl<'a, H: HeightField + ?Sized> NormalEstimator<'a, H> {
    pub fn new(field: &'a H, epsilon: f64) -> Self {
        Self { field, epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Unit normal at (x, z)
    pub fn normal(&self, x: f64, z: f64) -> DVec3 {
        self.normal_with_height(x, z, self.field.height(x, z))
    }

    /// Unit normal at (x, z) when the center height `h` is already known.
    pub fn normal_with_height(&self, x: f64, z: f64, h: f64) -> DVec3 {
        let eps = self.epsilon;
        let center = DVec3::new(x, h, z);
        let along_x = DVec3::new(x + eps, self.field.height(x + eps, z), z);
        let along_z = DVec3::new(x, self.field.height(x, z + eps), z + eps);

        // (z edge) x (x edge) points up for a right-handed frame
        let cross = (along_z - center).cross(along_x - center);
        let length_sq = cross.length_squared();
        if !length_sq.is_finite() || length_sq <= MIN_CROSS_LENGTH_SQ {
            return DVec3::Y;
        }
        cross / length_sq.sqrt()
    }
}
