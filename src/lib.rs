//! Terrashade - procedural heightfield terrain with ray-marched self-shadowing
//!
//! A [`TerrainEngine`] tessellates a band-passed fractal noise heightfield
//! into flat position/normal/index buffers and estimates a per-vertex shadow
//! factor by marching toward the light through the same heightfield.

pub mod core;
pub mod math;
pub mod terrain;
pub mod mesh;
pub mod lighting;
pub mod engine;

pub use crate::core::{Error, Result};
pub use engine::{EngineConfig, TerrainEngine, TerrainSnapshot, DEFAULT_LIGHT_POSITION};
