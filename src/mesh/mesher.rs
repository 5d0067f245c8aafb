//! Heightfield tessellation into flat render buffers

use glam::{DVec3, Vec3};
use rayon::prelude::*;

use super::grid::GridSpec;
use crate::terrain::{HeightField, NormalEstimator};

/// Flattened triangle mesh ready for upload.
///
/// Vertex `k` occupies `positions[4k..4k+4]` as `(x, y, z, 1)` and
/// `normals[4k..4k+4]` as `(nx, ny, nz, 0)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `k`
    pub fn position(&self, k: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[4 * k..4 * k + 3])
    }

    /// Normal of vertex `k`
    pub fn normal(&self, k: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[4 * k..4 * k + 3])
    }

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normals_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn indices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Whether buffer lengths agree and every index names an existing vertex.
    pub fn is_consistent(&self) -> bool {
        let vertices = self.vertex_count();
        self.positions.len() % 4 == 0
            && self.normals.len() == self.positions.len()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < vertices)
    }
}

#[derive(Clone, Copy, Debug)]
struct SurfacePoint {
    position: DVec3,
    normal: DVec3,
}

/// Tessellates a [`GridSpec`] over a heightfield, one unshared quad per cell.
pub struct TerrainMesher<'a, H: HeightField + ?Sized> {
    field: &'a H,
    normals: NormalEstimator<'a, H>,
}

impl<'a, H: HeightField + ?Sized> TerrainMesher<'a, H> {
    pub fn new(field: &'a H, normal_epsilon: f64) -> Self {
        Self {
            field,
            normals: NormalEstimator::new(field, normal_epsilon),
        }
    }

    /// Build the mesh. Cells are visited x-outer, z-inner; each adds four
    /// vertices `(x,z), (x,z+s), (x+s,z+s), (x+s,z)` and triangles
    /// `(0,1,2), (0,2,3)` relative to its first vertex.
    pub fn generate(&self, grid: &GridSpec) -> MeshBuffers {
        // Indexed parallel collect keeps traversal order
        let cells: Vec<[SurfacePoint; 4]> = (0..grid.cell_count())
            .into_par_iter()
            .map(|cell| {
                let (i, j) = grid.cell_coords(cell);
                let (x0, x1) = (grid.x_at(i), grid.x_at(i + 1));
                let (z0, z1) = (grid.z_at(j), grid.z_at(j + 1));
                [
                    self.surface_point(x0, z0),
                    self.surface_point(x0, z1),
                    self.surface_point(x1, z1),
                    self.surface_point(x1, z0),
                ]
            })
            .collect();

        let mut mesh = MeshBuffers {
            positions: Vec::with_capacity(grid.vertex_count() * 4),
            normals: Vec::with_capacity(grid.vertex_count() * 4),
            indices: Vec::with_capacity(grid.index_count()),
        };

        for (cell, corners) in cells.iter().enumerate() {
            for corner in corners {
                let p = corner.position.as_vec3();
                let n = corner.normal.as_vec3();
                mesh.positions.extend_from_slice(&[p.x, p.y, p.z, 1.0]);
                mesh.normals.extend_from_slice(&[n.x, n.y, n.z, 0.0]);
            }

            let base = (cell * 4) as u32;
            mesh.indices.extend_from_slice(&[
                base, base + 1, base + 2,
                base, base + 2, base + 3,
            ]);
        }

        mesh
    }

    fn surface_point(&self, x: f64, z: f64) -> SurfacePoint {
        let h = self.field.height(x, z);
        SurfacePoint {
            position: DVec3::new(x, h, z),
            normal: self.normals.normal_with_height(x, z, h),
        }
    }
}
