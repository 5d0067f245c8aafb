//! Height range statistics over generated geometry

/// Running extrema of vertex heights. Informational only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
}

impl HeightStats {
    /// Scan flattened `[x, y, z, w]` positions. `None` for an empty mesh.
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        positions
            .chunks_exact(4)
            .map(|p| p[1])
            .fold(None, |stats, y| match stats {
                None => Some(Self { min: y, max: y }),
                Some(Self { min, max }) => Some(Self {
                    min: min.min(y),
                    max: max.max(y),
                }),
            })
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}
