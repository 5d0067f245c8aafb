//! Per-vertex shadow buffer for a whole mesh

use glam::{DVec3, Vec3};
use rayon::prelude::*;

use super::shadow::{ShadowMarcher, ShadowParams};
use crate::mesh::MeshBuffers;
use crate::terrain::HeightField;

/// Applies a [`ShadowMarcher`] to every vertex of a mesh.
pub struct ShadowField<'a, H: HeightField + ?Sized> {
    marcher: ShadowMarcher<'a, H>,
}

impl<'a, H: HeightField + ?Sized> ShadowField<'a, H> {
    pub fn new(field: &'a H, params: ShadowParams) -> Self {
        Self {
            marcher: ShadowMarcher::new(field, params),
        }
    }

    /// One factor per vertex, index-aligned with `mesh.positions`.
    pub fn compute(&self, mesh: &MeshBuffers, light: Vec3) -> Vec<f32> {
        let light = light.as_dvec3();
        mesh.positions
            .par_chunks_exact(4)
            .map(|p| {
                let vertex = DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64);
                self.marcher.shadow_factor(vertex, light)
            })
            .collect()
    }
}
