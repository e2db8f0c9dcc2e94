//! Pure sizing math that maps viewports onto grid dimensions and pixel sizes.

use crate::{CellCoord, GridDimensions, LayoutError, TargetCellSize, Viewport};

/// Seconds added to the animation delay per step along the diagonal.
pub const WAVE_DELAY_STEP_SECONDS: f64 = 0.07;

/// Upper bound on the number of cells a single grid may hold.
pub const MAX_CELLS: u64 = 1 << 22;

/// Derives how many cells of roughly `target` pixels fit the viewport.
///
/// Each axis is floored independently and clamped to at least one cell, so the
/// result is never an empty grid however small the viewport becomes.
#[must_use]
pub fn compute_dimensions(viewport: Viewport, target: TargetCellSize) -> GridDimensions {
    GridDimensions::new(
        cells_along(viewport.width(), target.get()),
        cells_along(viewport.height(), target.get()),
    )
}

/// Rejects dimensions holding more than [`MAX_CELLS`] cells.
pub fn ensure_buildable(dimensions: GridDimensions) -> Result<GridDimensions, LayoutError> {
    if dimensions.cell_count() > MAX_CELLS {
        return Err(LayoutError::GridTooLarge {
            dimensions,
            limit: MAX_CELLS,
        });
    }
    Ok(dimensions)
}

fn cells_along(extent: f64, cell: f64) -> u32 {
    // Float-to-int casts saturate and map NaN to zero.
    ((extent / cell).floor() as u32).max(1)
}

/// Largest square cell size that lets the whole grid fit the viewport.
///
/// Whichever axis is the tighter constraint decides the size.
#[must_use]
pub fn cell_size(viewport: Viewport, dimensions: GridDimensions) -> f64 {
    let horizontal = viewport.width() / f64::from(dimensions.width());
    let vertical = viewport.height() / f64::from(dimensions.height());
    horizontal.min(vertical)
}

/// Animation delay in seconds for the cell at `coord`.
///
/// Cells further from the top-left corner start later; cells on the same
/// anti-diagonal share a delay.
#[must_use]
pub fn wave_delay(coord: CellCoord) -> f64 {
    (f64::from(coord.x()) + f64::from(coord.y())) * WAVE_DELAY_STEP_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_for_common_desktop_viewport() {
        let dimensions =
            compute_dimensions(Viewport::new(1280.0, 720.0), TargetCellSize::DEFAULT);
        assert_eq!(dimensions, GridDimensions::new(20, 11));
    }

    #[test]
    fn dimensions_never_collapse_below_one_cell() {
        let dimensions = compute_dimensions(Viewport::new(10.0, 10.0), TargetCellSize::DEFAULT);
        assert_eq!(dimensions, GridDimensions::new(1, 1));

        let dimensions = compute_dimensions(Viewport::new(0.0, -5.0), TargetCellSize::DEFAULT);
        assert_eq!(dimensions, GridDimensions::new(1, 1));
    }

    #[test]
    fn oversized_grids_are_not_buildable() {
        let desktop = compute_dimensions(Viewport::new(1280.0, 720.0), TargetCellSize::DEFAULT);
        assert_eq!(ensure_buildable(desktop), Ok(desktop));

        let smallest = TargetCellSize::new(TargetCellSize::MIN_PIXELS).expect("minimum size");
        let huge = compute_dimensions(Viewport::new(1.0e9, 1.0e9), smallest);
        assert!(matches!(
            ensure_buildable(huge),
            Err(LayoutError::GridTooLarge { limit: MAX_CELLS, .. })
        ));
    }

    #[test]
    fn cell_size_follows_the_tighter_axis() {
        let dimensions = GridDimensions::new(20, 11);
        let size = cell_size(Viewport::new(1280.0, 720.0), dimensions);
        assert!((size - 720.0 / 11.0).abs() < 1e-9);

        let size = cell_size(Viewport::new(600.0, 900.0), GridDimensions::new(3, 2));
        assert!((size - 200.0).abs() < 1e-9);
    }

    #[test]
    fn cell_size_fits_grid_inside_viewport() {
        let viewport = Viewport::new(1023.0, 677.0);
        let dimensions = compute_dimensions(viewport, TargetCellSize::DEFAULT);
        let size = cell_size(viewport, dimensions);

        assert!(size * f64::from(dimensions.width()) <= viewport.width() + 1e-9);
        assert!(size * f64::from(dimensions.height()) <= viewport.height() + 1e-9);
    }

    #[test]
    fn wave_delay_grows_along_the_diagonal() {
        assert_eq!(wave_delay(CellCoord::new(0, 0)), 0.0);
        assert!((wave_delay(CellCoord::new(2, 1)) - 0.21).abs() < 1e-12);
        assert_eq!(
            wave_delay(CellCoord::new(3, 0)),
            wave_delay(CellCoord::new(1, 2))
        );

        let (width, height) = (5_u32, 4_u32);
        let corner = wave_delay(CellCoord::new(width - 1, height - 1));
        for y in 0..height {
            for x in 0..width {
                assert!(wave_delay(CellCoord::new(x, y)) <= corner);
            }
        }
    }
}
