//! Procedural heightfield: noise, elevation, normals

pub mod noise_field;
pub use noise_field::NoiseField;

pub mod height;
pub use height::{HeightField, HeightFunction, HeightParams};

pub mod normal;
pub use normal::{NormalEstimator, DEFAULT_NORMAL_EPSILON};

pub mod stats;
pub use stats::HeightStats;
