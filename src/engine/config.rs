//! Engine configuration, loadable from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::lighting::ShadowParams;
use crate::mesh::GridSpec;
use crate::terrain::{HeightParams, DEFAULT_NORMAL_EPSILON};

/// Everything needed to build a [`TerrainEngine`](super::TerrainEngine)
/// apart from the light position. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed of the noise permutation table
    pub seed: u32,
    /// Domain extent along x, centered on the origin
    pub width: f32,
    /// Domain extent along z, starting at the origin
    pub depth: f32,
    /// World-space quad size
    pub grid_step: f32,
    /// Finite-difference step for normals
    pub normal_epsilon: f64,
    pub height: HeightParams,
    pub shadow: ShadowParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            width: 600.0,
            depth: 500.0,
            grid_step: 4.0,
            normal_epsilon: DEFAULT_NORMAL_EPSILON,
            height: HeightParams::default(),
            shadow: ShadowParams::default(),
        }
    }
}

impl EngineConfig {
    /// Check the domain and grid step, returning the grid they describe.
    pub fn grid(&self) -> Result<GridSpec> {
        GridSpec::new(self.width, self.depth, self.grid_step)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
