//! Validated tessellation grid over the terrain domain

use crate::core::{Error, Result};

/// Allowed deviation, in cells, when checking that a step tiles an extent
const TILING_TOLERANCE: f64 = 1e-4;

/// Extra deviation per cell, covering `f32` rounding of step and extent
const TILING_TOLERANCE_PER_CELL: f64 = 2.5e-7;

/// Domain rectangle plus grid step, checked to tile evenly.
///
/// The domain spans x in [-width/2, width/2) and z in [0, depth).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    width: f32,
    depth: f32,
    step: f32,
    columns: u32,
    rows: u32,
}

impl GridSpec {
    pub fn new(width: f32, depth: f32, step: f32) -> Result<Self> {
        if !(width.is_finite() && depth.is_finite()) || width <= 0.0 || depth <= 0.0 {
            return Err(Error::InvalidDomain { width, depth });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidGridStep(step));
        }

        let columns = cells_along("x", width, step)?;
        let rows = cells_along("z", depth, step)?;

        let vertices = 4 * columns as u128 * rows as u128;
        if vertices > u32::MAX as u128 {
            return Err(Error::MeshTooLarge(usize::try_from(vertices).unwrap_or(usize::MAX)));
        }

        Ok(Self { width, depth, step, columns, rows })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Cells along x
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Cells along z
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn vertex_count(&self) -> usize {
        4 * self.cell_count()
    }

    pub fn index_count(&self) -> usize {
        6 * self.cell_count()
    }

    /// World x of grid column `i` (may be `columns` for the far edge)
    pub fn x_at(&self, i: u32) -> f64 {
        -(self.width as f64) / 2.0 + i as f64 * self.step as f64
    }

    /// World z of grid row `j`
    pub fn z_at(&self, j: u32) -> f64 {
        j as f64 * self.step as f64
    }

    /// Column and row of the `cell`-th cell in traversal order (x outer, z inner)
    pub fn cell_coords(&self, cell: usize) -> (u32, u32) {
        let rows = self.rows as usize;
        ((cell / rows) as u32, (cell % rows) as u32)
    }
}

fn cells_along(axis: &'static str, extent: f32, step: f32) -> Result<u32> {
    let cells = extent as f64 / step as f64;
    let rounded = cells.round();
    let tolerance = TILING_TOLERANCE.max(rounded * TILING_TOLERANCE_PER_CELL);
    if rounded < 1.0 || (cells - rounded).abs() > tolerance {
        return Err(Error::UnevenGrid { axis, extent, step });
    }
    if rounded > u32::MAX as f64 {
        return Err(Error::MeshTooLarge(usize::MAX));
    }
    Ok(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain_step_4() {
        let grid = GridSpec::new(600.0, 500.0, 4.0).unwrap();
        assert_eq!(grid.columns(), 150);
        assert_eq!(grid.rows(), 125);
        assert_eq!(grid.cell_count(), 18750);
        assert_eq!(grid.vertex_count(), 75000);
        assert_eq!(grid.index_count(), 112500);
    }

    #[test]
    fn test_coordinates() {
        let grid = GridSpec::new(600.0, 500.0, 4.0).unwrap();
        assert_eq!(grid.x_at(0), -300.0);
        assert_eq!(grid.x_at(150), 300.0);
        assert_eq!(grid.z_at(0), 0.0);
        assert_eq!(grid.z_at(125), 500.0);
    }

    #[test]
    fn test_cell_coords_row_major() {
        let grid = GridSpec::new(600.0, 500.0, 4.0).unwrap();
        assert_eq!(grid.cell_coords(0), (0, 0));
        assert_eq!(grid.cell_coords(124), (0, 124));
        assert_eq!(grid.cell_coords(125), (1, 0));
        assert_eq!(grid.cell_coords(18749), (149, 124));
    }

    #[test]
    fn test_fractional_step_that_tiles() {
        let grid = GridSpec::new(600.0, 500.0, 2.5).unwrap();
        assert_eq!(grid.columns(), 240);
        assert_eq!(grid.rows(), 200);
    }

    #[test]
    fn test_uneven_step_rejected() {
        let err = GridSpec::new(600.0, 500.0, 7.0).unwrap_err();
        assert!(matches!(err, Error::UnevenGrid { axis: "x", .. }), "got {:?}", err);

        let err = GridSpec::new(600.0, 500.0, 3.0).unwrap_err();
        assert!(matches!(err, Error::UnevenGrid { axis: "z", .. }), "got {:?}", err);
    }

    #[test]
    fn test_fine_step_that_tiles() {
        // 0.05 is not exact in f32; the count drifts by ~2e-4 cells over 12000
        let grid = GridSpec::new(600.0, 20.0, 0.05).unwrap();
        assert_eq!(grid.columns(), 12000);
        assert_eq!(grid.rows(), 400);
    }

    #[test]
    fn test_fine_step_slightly_off_rejected() {
        assert!(matches!(
            GridSpec::new(600.0, 20.0, 0.0501),
            Err(Error::UnevenGrid { axis: "x", .. })
        ));
    }

    #[test]
    fn test_step_larger_than_domain_rejected() {
        assert!(matches!(
            GridSpec::new(600.0, 500.0, 1000.0),
            Err(Error::UnevenGrid { .. })
        ));
    }

    #[test]
    fn test_invalid_step_rejected() {
        for step in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                GridSpec::new(600.0, 500.0, step),
                Err(Error::InvalidGridStep(_))
            ));
        }
    }

    #[test]
    fn test_invalid_domain_rejected() {
        assert!(matches!(
            GridSpec::new(0.0, 500.0, 4.0),
            Err(Error::InvalidDomain { .. })
        ));
        assert!(matches!(
            GridSpec::new(600.0, f32::NAN, 4.0),
            Err(Error::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_oversized_mesh_rejected() {
        assert!(matches!(
            GridSpec::new(600_000.0, 500_000.0, 1.0),
            Err(Error::MeshTooLarge(_))
        ));
    }
}
