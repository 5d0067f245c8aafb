//! Terrain engine: owns the grid and light, regenerates buffers on demand

pub mod config;
pub mod snapshot;

pub use config::EngineConfig;
pub use snapshot::TerrainSnapshot;

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;

use crate::core::Result;
use crate::lighting::ShadowField;
use crate::mesh::{GridSpec, TerrainMesher};
use crate::terrain::{HeightField, HeightFunction, HeightStats};

/// Light position used when none is supplied.
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(-10.0, 10.0, -10.0);

/// Generates terrain geometry and shadows and publishes them as snapshots.
///
/// The engine is the only writer. Every rebuild produces complete new
/// buffers before the published [`TerrainSnapshot`] is swapped.
pub struct TerrainEngine<H: HeightField = HeightFunction> {
    config: EngineConfig,
    field: H,
    grid: GridSpec,
    light: Vec3,
    snapshot: TerrainSnapshot,
    stats: Option<HeightStats>,
}

impl TerrainEngine {
    /// Build noise terrain from `config` and run the first full generation.
    pub fn new(config: EngineConfig, light: Vec3) -> Result<Self> {
        let field = HeightFunction::new(config.seed, config.height.clone());
        Self::with_height_field(config, field, light)
    }
}

impl<H: HeightField> TerrainEngine<H> {
    /// Use a custom heightfield; `config.seed` and `config.height` are ignored.
    pub fn with_height_field(config: EngineConfig, field: H, light: Vec3) -> Result<Self> {
        let grid = config.grid()?;
        let mut engine = Self {
            config,
            field,
            grid,
            light,
            snapshot: TerrainSnapshot::default(),
            stats: None,
        };
        engine.generate();
        Ok(engine)
    }

    /// Rebuild geometry and shadows from scratch.
    pub fn generate(&mut self) {
        let start = Instant::now();
        let mesh = TerrainMesher::new(&self.field, self.config.normal_epsilon).generate(&self.grid);
        let mesh_elapsed = start.elapsed();

        let shadows = ShadowField::new(&self.field, self.config.shadow.clone())
            .compute(&mesh, self.light);
        self.stats = HeightStats::from_positions(&mesh.positions);

        self.snapshot = TerrainSnapshot {
            mesh: Arc::new(mesh),
            shadows: shadows.into(),
            geometry_revision: self.snapshot.geometry_revision + 1,
            shadow_revision: self.snapshot.shadow_revision + 1,
        };

        log::info!(
            "Generated terrain: {}x{} cells (step {}), {} vertices in {:.1}ms (mesh {:.1}ms)",
            self.grid.columns(),
            self.grid.rows(),
            self.grid.step(),
            self.snapshot.vertex_count(),
            start.elapsed().as_secs_f64() * 1000.0,
            mesh_elapsed.as_secs_f64() * 1000.0,
        );
        if let Some(stats) = self.stats {
            log::info!("Terrain height range [{:.2}, {:.2}]", stats.min, stats.max);
        }
    }

    /// Change the quad size and regenerate everything. An invalid step is
    /// rejected and the current terrain is kept.
    pub fn set_grid_step(&mut self, step: f32) -> Result<()> {
        let grid = GridSpec::new(self.grid.width(), self.grid.depth(), step).inspect_err(|e| {
            log::warn!("Rejected grid step {}: {}", step, e);
        })?;

        self.grid = grid;
        self.config.grid_step = step;
        self.generate();
        Ok(())
    }

    /// Move the light and recompute shadows only. Geometry is shared with
    /// the previous snapshot.
    pub fn update_shadows(&mut self, light: Vec3) {
        let start = Instant::now();
        self.light = light;

        let shadows = ShadowField::new(&self.field, self.config.shadow.clone())
            .compute(&self.snapshot.mesh, light);

        self.snapshot = TerrainSnapshot {
            mesh: Arc::clone(&self.snapshot.mesh),
            shadows: shadows.into(),
            geometry_revision: self.snapshot.geometry_revision,
            shadow_revision: self.snapshot.shadow_revision + 1,
        };

        log::debug!(
            "Updated shadows for light {:?}: {} vertices in {:.1}ms",
            light,
            self.snapshot.vertex_count(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
    }

    /// Current published buffers
    pub fn snapshot(&self) -> TerrainSnapshot {
        self.snapshot.clone()
    }

    pub fn positions(&self) -> &[f32] {
        self.snapshot.positions()
    }

    pub fn normals(&self) -> &[f32] {
        self.snapshot.normals()
    }

    pub fn indices(&self) -> &[u32] {
        self.snapshot.indices()
    }

    pub fn shadows(&self) -> &[f32] {
        self.snapshot.shadows()
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn grid_step(&self) -> f32 {
        self.grid.step()
    }

    pub fn light_position(&self) -> Vec3 {
        self.light
    }

    /// Height range of the last full generation
    pub fn height_stats(&self) -> Option<HeightStats> {
        self.stats
    }

    pub fn geometry_revision(&self) -> u64 {
        self.snapshot.geometry_revision()
    }

    pub fn shadow_revision(&self) -> u64 {
        self.snapshot.shadow_revision()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn height_field(&self) -> &H {
        &self.field
    }
}
