//! Terrain self-shadowing

pub mod shadow;
pub use shadow::{ShadowMarcher, ShadowParams};

pub mod field;
pub use field::ShadowField;
