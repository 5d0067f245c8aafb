//! Immutable buffer views published to the renderer

use std::sync::Arc;

use crate::mesh::MeshBuffers;

/// One consistent generation of terrain buffers.
///
/// Cloning is cheap. Geometry and shadows are each replaced wholesale, so a
/// holder never sees a mix of generations. Revisions tell a consumer which
/// buffers changed since its last upload.
#[derive(Clone, Debug, Default)]
pub struct TerrainSnapshot {
    pub(crate) mesh: Arc<MeshBuffers>,
    pub(crate) shadows: Arc<[f32]>,
    pub(crate) geometry_revision: u64,
    pub(crate) shadow_revision: u64,
}

impl TerrainSnapshot {
    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    /// `(x, y, z, 1)` per vertex
    pub fn positions(&self) -> &[f32] {
        &self.mesh.positions
    }

    /// `(nx, ny, nz, 0)` per vertex
    pub fn normals(&self) -> &[f32] {
        &self.mesh.normals
    }

    /// Three per triangle
    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    /// One factor in `[0.4, 1.0]` per vertex
    pub fn shadows(&self) -> &[f32] {
        &self.shadows
    }

    pub fn shadows_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.shadows)
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Bumped on every full regeneration
    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    /// Bumped on every shadow recomputation, including full regenerations
    pub fn shadow_revision(&self) -> u64 {
        self.shadow_revision
    }

    /// Whether both snapshots hold the very same geometry buffers.
    pub fn shares_geometry_with(&self, other: &TerrainSnapshot) -> bool {
        Arc::ptr_eq(&self.mesh, &other.mesh)
    }

    /// Whether all four buffers agree in length and indices stay in range.
    pub fn is_consistent(&self) -> bool {
        self.mesh.is_consistent() && self.shadows.len() == self.mesh.vertex_count()
    }
}
