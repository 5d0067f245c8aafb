//! Error types for terrain generation

use thiserror::Error;

/// Main error type for the terrain engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid step must be positive and finite, got {0}")]
    InvalidGridStep(f32),

    #[error("terrain domain must be positive and finite, got {width} x {depth}")]
    InvalidDomain { width: f32, depth: f32 },

    #[error("grid step {step} does not evenly divide {axis} extent {extent}")]
    UnevenGrid {
        axis: &'static str,
        extent: f32,
        step: f32,
    },

    #[error("mesh of {0} vertices exceeds 32-bit index range")]
    MeshTooLarge(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
