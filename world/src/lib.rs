#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state for Pulse Matrix.
//!
//! A [`Matrix`] owns a `height × width` grid of [`Cell`] values drawn from a
//! palette and knows how to lay itself out into a document. Matrices are never
//! resized: the composition root builds a fresh one whenever the viewport
//! changes.

mod cell;

use std::{any::Any, fmt};

use pulse_matrix_core::{
    layout,
    visual::{AnimationParameters, CELL_SIZE_PROPERTY, MATRIX_CLASS, ROW_CLASS},
    CellCoord, Document, DocumentError, GridDimensions, Palette, RandomSource, RandomSourceExt,
    Renderable,
};
use tracing::{debug, trace};

pub use cell::Cell;

/// Name reported by matrices registered in a scene.
pub const MATRIX_NAME: &str = "Matrix";

/// Grid of cells populated from a palette.
pub struct Matrix<E> {
    dimensions: GridDimensions,
    palette: Palette,
    grid: Vec<Vec<Cell<E>>>,
    element: E,
}

impl<E> Matrix<E> {
    /// Builds the root element and a grid of valueless cells, then fills every
    /// cell with a palette value.
    pub fn new<D, R>(
        document: &mut D,
        dimensions: GridDimensions,
        palette: Palette,
        random: &mut R,
    ) -> Result<Self, DocumentError>
    where
        D: Document<Element = E>,
        R: RandomSource + ?Sized,
    {
        let element = document.create_element("div")?;
        document.set_class_name(&element, MATRIX_CLASS)?;

        let grid = (0..dimensions.height())
            .map(|_| (0..dimensions.width()).map(|_| Cell::new()).collect())
            .collect();

        let mut matrix = Self {
            dimensions,
            palette,
            grid,
            element,
        };
        let _ = matrix.generate(random);

        debug!(
            dimensions = %dimensions,
            palette_size = matrix.palette.len(),
            "matrix initialised"
        );
        Ok(matrix)
    }

    /// Assigns every cell an independent, uniformly drawn palette value.
    ///
    /// The grid keeps its shape; only the values change.
    pub fn generate<R>(&mut self, random: &mut R) -> &mut Self
    where
        R: RandomSource + ?Sized,
    {
        let codes = self.palette.codes();
        for row in &mut self.grid {
            for cell in row {
                cell.set_value(random.pick(codes).copied());
            }
        }
        self
    }

    /// Lays the grid out into the root element.
    ///
    /// Sizes cells so the grid fits the viewport, rebuilds one row element per
    /// grid row in top-to-bottom order, and gives every cell its wave delay
    /// plus a fresh set of animation parameters.
    pub fn render<D, R>(
        &mut self,
        document: &mut D,
        random: &mut R,
    ) -> Result<&mut Self, DocumentError>
    where
        D: Document<Element = E>,
        R: RandomSource + ?Sized,
    {
        let cell_size = layout::cell_size(document.viewport(), self.dimensions);
        document.set_style_property(&self.element, CELL_SIZE_PROPERTY, &format!("{cell_size}px"))?;
        document.clear_children(&self.element)?;

        for (y, row) in (0_u32..).zip(self.grid.iter_mut()) {
            let row_element = document.create_element("div")?;
            document.set_class_name(&row_element, ROW_CLASS)?;

            for (x, cell) in (0_u32..).zip(row.iter_mut()) {
                let rendered = cell.render(document, Some(&row_element))?;
                if let Some(element) = rendered.element() {
                    let parameters = AnimationParameters::draw(CellCoord::new(x, y), random);
                    for (name, value) in parameters.css_properties() {
                        document.set_style_property(element, name, &value)?;
                    }
                }
            }

            document.append_child(&self.element, &row_element)?;
        }

        trace!(dimensions = %self.dimensions, cell_size, "matrix rendered");
        Ok(self)
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Palette the cell values are drawn from.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Rows of cells, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell<E>>] {
        &self.grid
    }

    /// Cell at `coord`, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell<E>> {
        let row = self.grid.get(usize::try_from(coord.y()).ok()?)?;
        row.get(usize::try_from(coord.x()).ok()?)
    }

    /// Root container element.
    #[must_use]
    pub const fn element(&self) -> &E {
        &self.element
    }
}

impl<E> fmt::Debug for Matrix<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("dimensions", &self.dimensions)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

impl<D> Renderable<D> for Matrix<D::Element>
where
    D: Document,
    D::Element: 'static,
{
    fn name(&self) -> &'static str {
        MATRIX_NAME
    }

    fn render(
        &mut self,
        document: &mut D,
        random: &mut dyn RandomSource,
    ) -> Result<(), DocumentError> {
        Matrix::render(self, document, random).map(|_| ())
    }

    fn element(&self) -> Option<&D::Element> {
        Some(&self.element)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Read-only views over a [`Matrix`].
pub mod query {
    use std::collections::BTreeMap;

    use pulse_matrix_core::{CellCoord, PaletteCode};

    use crate::Matrix;

    /// Value of the cell at `coord`.
    #[must_use]
    pub fn value_at<E>(matrix: &Matrix<E>, coord: CellCoord) -> Option<PaletteCode> {
        matrix.cell(coord)?.value()
    }

    /// Every cell value, row by row.
    #[must_use]
    pub fn values<E>(matrix: &Matrix<E>) -> Vec<Vec<Option<PaletteCode>>> {
        matrix
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect()
    }

    /// Number of cells holding each code; unassigned cells are not counted.
    #[must_use]
    pub fn palette_histogram<E>(matrix: &Matrix<E>) -> BTreeMap<PaletteCode, u64> {
        let mut histogram = BTreeMap::new();
        for value in matrix.rows().iter().flatten().filter_map(|cell| cell.value()) {
            *histogram.entry(value).or_insert(0) += 1;
        }
        histogram
    }
}
