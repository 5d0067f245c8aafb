//! Terrain tessellation

pub mod grid;
pub use grid::GridSpec;

pub mod mesher;
pub use mesher::{MeshBuffers, TerrainMesher};
