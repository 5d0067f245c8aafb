//! Heightfield self-shadowing by variable-step ray marching

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::math::Ray;
use crate::terrain::HeightField;

/// Tuning of the shadow march. The defaults are empirically chosen and
/// define the reference look; they are not derived from a shadow model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// First advance along the ray
    pub initial_step: f64,
    pub max_steps: u32,
    /// Depth below the surface that counts as occluded
    pub occlusion_depth: f64,
    /// Darkest attainable factor
    pub min_factor: f64,
    /// Fully lit factor
    pub max_factor: f64,
    /// Smallest step growth, before the distance term
    pub min_growth: f64,
    /// Extra minimum growth per unit of distance to the light
    pub growth_per_distance: f64,
    pub max_growth: f64,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            initial_step: 0.2,
            max_steps: 32,
            occlusion_depth: 1.0,
            min_factor: 0.4,
            max_factor: 1.0,
            min_growth: 0.5,
            growth_per_distance: 0.05,
            max_growth: 25.0,
        }
    }
}

/// Estimates how much terrain relief shadows a point from a light.
pub struct ShadowMarcher<'a, H: HeightField + ?Sized> {
    field: &'a H,
    params: ShadowParams,
}

impl<'a, H: HeightField + ?Sized> ShadowMarcher<'a, H> {
    pub fn new(field: &'a H, params: ShadowParams) -> Self {
        Self { field, params }
    }

    pub fn params(&self) -> &ShadowParams {
        &self.params
    }

    /// Shadow factor in `[min_factor, max_factor]`; `max_factor` is fully lit.
    ///
    /// Marches from `vertex` toward `light`, growing the step by how far the
    /// ray sits above the terrain. The first sample more than
    /// `occlusion_depth` below the surface ends the march, darker for
    /// shorter steps and deeper intrusions. Running out of steps means lit.
    pub fn shadow_factor(&self, vertex: DVec3, light: DVec3) -> f32 {
        let p = &self.params;
        let Some((ray, distance)) = Ray::between(vertex, light) else {
            return p.max_factor as f32;
        };

        let min_growth = p.min_growth + distance * p.growth_per_distance;
        let mut step = p.initial_step;
        let mut t = 0.0;

        for _ in 0..p.max_steps {
            t += step;
            let pos = ray.at(t);
            let depth = self.field.height(pos.x, pos.z) - pos.y;

            if depth > p.occlusion_depth {
                return (step / depth + p.min_factor).max(p.min_factor).min(p.max_factor) as f32;
            }

            // max-then-min: saturates at max_growth for very distant lights
            step += (-depth).max(min_growth).min(p.max_growth);
        }

        p.max_factor as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{HeightFunction, HeightParams};

    #[test]
    fn test_shadow_params_default() {
        let params = ShadowParams::default();
        assert_eq!(params.initial_step, 0.2);
        assert_eq!(params.max_steps, 32);
        assert_eq!(params.occlusion_depth, 1.0);
        assert_eq!(params.min_factor, 0.4);
        assert_eq!(params.max_factor, 1.0);
        assert_eq!(params.min_growth, 0.5);
        assert_eq!(params.growth_per_distance, 0.05);
        assert_eq!(params.max_growth, 25.0);
    }

    #[test]
    fn test_flat_ground_light_overhead_is_lit() {
        let flat = |_x: f64, _z: f64| -2.0;
        let marcher = ShadowMarcher::new(&flat, ShadowParams::default());

        for (x, z) in [(0.0, 0.0), (-120.0, 40.0), (299.0, 499.0)] {
            let vertex = DVec3::new(x, -2.0, z);
            let light = DVec3::new(x, 1000.0, z);
            assert_eq!(marcher.shadow_factor(vertex, light), 1.0);
        }
    }

    #[test]
    fn test_buried_point_hits_on_first_step() {
        let plateau = |_x: f64, _z: f64| 10.0;
        let marcher = ShadowMarcher::new(&plateau, ShadowParams::default());

        let factor = marcher.shadow_factor(DVec3::ZERO, DVec3::new(0.0, 100.0, 0.0));
        // 0.2 / 9.8 + 0.4
        assert!((factor - 0.420_408_16).abs() < 1e-6, "got {}", factor);
    }

    #[test]
    fn test_ridge_casts_shadow() {
        let ridge = |x: f64, _z: f64| if x > 10.0 && x < 30.0 { 50.0 } else { 0.0 };
        let marcher = ShadowMarcher::new(&ridge, ShadowParams::default());

        let behind = marcher.shadow_factor(DVec3::ZERO, DVec3::new(100.0, 10.0, 0.0));
        assert!(behind < 1.0 && behind >= 0.4, "got {}", behind);

        // Same ridge, light on the other side
        let facing = marcher.shadow_factor(DVec3::ZERO, DVec3::new(-100.0, 10.0, 0.0));
        assert_eq!(facing, 1.0);
    }

    #[test]
    fn test_growth_at_distance_floor() {
        // Light 50 away: growth floor is 0.5 + 50 * 0.05 = 3.0.
        // Samples at x = 0.2, 3.4, 9.6; the last is 20 under the wall.
        let wall = |x: f64, _z: f64| if x > 5.0 { 20.0 } else { 0.0 };
        let marcher = ShadowMarcher::new(&wall, ShadowParams::default());

        let factor = marcher.shadow_factor(DVec3::ZERO, DVec3::new(50.0, 0.0, 0.0));
        // step 0.2 + 3.0 + 3.0 = 6.2; 6.2 / 20 + 0.4
        assert!((factor - 0.71).abs() < 1e-6, "got {}", factor);
    }

    #[test]
    fn test_growth_follows_clearance() {
        // Ray 10 above flat ground, floor 0.5 + 100 * 0.05 = 5.5, so each
        // growth is the clearance itself. Samples at x = 0.2, 10.4, 30.6.
        let wall = |x: f64, _z: f64| if x > 20.0 { 60.0 } else { 0.0 };
        let marcher = ShadowMarcher::new(&wall, ShadowParams::default());

        let factor = marcher.shadow_factor(DVec3::new(0.0, 10.0, 0.0), DVec3::new(100.0, 10.0, 0.0));
        // step 0.2 + 10 + 10 = 20.2; depth 60 - 10 = 50
        assert!((factor - 0.804).abs() < 1e-6, "got {}", factor);
    }

    #[test]
    fn test_growth_saturates_for_distant_light() {
        // Floor 0.5 + 1000 * 0.05 = 50.5 exceeds the 25 cap, so growth is 25.
        // Samples at x = 0.2, 25.4, 75.6.
        let wall = |x: f64, _z: f64| if x > 30.0 { 200.0 } else { 0.0 };
        let marcher = ShadowMarcher::new(&wall, ShadowParams::default());

        let factor = marcher.shadow_factor(DVec3::ZERO, DVec3::new(1000.0, 0.0, 0.0));
        // step 0.2 + 25 + 25 = 50.2; 50.2 / 200 + 0.4
        assert!((factor - 0.651).abs() < 1e-6, "got {}", factor);
    }

    #[test]
    fn test_light_at_vertex_is_lit() {
        let flat = |_x: f64, _z: f64| 0.0;
        let marcher = ShadowMarcher::new(&flat, ShadowParams::default());
        let p = DVec3::new(3.0, 0.0, 4.0);
        assert_eq!(marcher.shadow_factor(p, p), 1.0);
    }

    #[test]
    fn test_distant_light_does_not_panic() {
        // Minimum growth exceeds max_growth beyond ~490 units
        let flat = |_x: f64, _z: f64| 0.0;
        let marcher = ShadowMarcher::new(&flat, ShadowParams::default());
        let factor = marcher.shadow_factor(DVec3::ZERO, DVec3::new(5000.0, 2000.0, 0.0));
        assert_eq!(factor, 1.0);
    }

    #[test]
    fn test_factor_bounds_on_noise_terrain() {
        let terrain = HeightFunction::new(12345, HeightParams::default());
        let marcher = ShadowMarcher::new(&terrain, ShadowParams::default());
        let lights = [
            DVec3::new(50.0, 60.0, 20.0),
            DVec3::new(-10.0, 10.0, -10.0),
            DVec3::new(300.0, 5.0, 250.0),
            DVec3::new(0.0, -50.0, 0.0),
        ];

        for light in lights {
            for i in -6..6 {
                for j in 0..10 {
                    let (x, z) = (i as f64 * 50.0, j as f64 * 50.0);
                    let vertex = DVec3::new(x, terrain.height(x, z), z);
                    let factor = marcher.shadow_factor(vertex, light);
                    assert!((0.4..=1.0).contains(&factor), "factor {} out of range", factor);
                }
            }
        }
    }
}
