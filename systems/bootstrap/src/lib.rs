#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Composition root that sizes, builds and shows the Pulse Matrix.
//!
//! [`Bootstrap`] holds the validated configuration and knows how to derive
//! grid dimensions from a viewport. [`App`] owns the document, the scene and
//! the randomness provider, and rebuilds the whole matrix on every resize.
//! Resizes are deliberately not debounced: each event triggers one complete,
//! synchronous rebuild.

pub mod config;

use pulse_matrix_core::{
    layout, Document, DocumentError, GridDimensions, LayoutError, Palette, RandomSource,
    TargetCellSize, Viewport,
};
use pulse_matrix_rendering::Scene;
use pulse_matrix_world::Matrix;
use thiserror::Error;
use tracing::info;

pub use config::{Config, ConfigError, DEFAULT_PALETTE};

/// Scene key the matrix is registered under.
pub const MATRIX_KEY: &str = "matrix";

/// Errors that abort a rebuild before the new matrix is shown.
#[derive(Debug, Error)]
pub enum RebuildError {
    /// The viewport yields a grid too large to build.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The document rejected an element operation.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Validated inputs of the rebuild pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Bootstrap {
    target_cell_size: TargetCellSize,
    palette: Palette,
}

impl Bootstrap {
    /// Creates a bootstrap from already validated parts.
    #[must_use]
    pub const fn new(target_cell_size: TargetCellSize, palette: Palette) -> Self {
        Self {
            target_cell_size,
            palette,
        }
    }

    /// Validates `config` and creates a bootstrap from it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let target_cell_size = TargetCellSize::new(config.target_cell_size)?;
        let palette = Palette::from_values(config.palette.iter().copied())?;
        Ok(Self::new(target_cell_size, palette))
    }

    /// Target cell size used to derive grid dimensions.
    #[must_use]
    pub const fn target_cell_size(&self) -> TargetCellSize {
        self.target_cell_size
    }

    /// Palette every new matrix is populated from.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Grid dimensions for `viewport`, never smaller than 1×1.
    #[must_use]
    pub fn compute_dimensions(&self, viewport: Viewport) -> GridDimensions {
        layout::compute_dimensions(viewport, self.target_cell_size)
    }

    /// Builds a fresh, populated matrix sized for the document's viewport.
    ///
    /// Fails without allocating when the grid would exceed
    /// [`layout::MAX_CELLS`].
    pub fn create_matrix<D, R>(
        &self,
        document: &mut D,
        random: &mut R,
    ) -> Result<Matrix<D::Element>, RebuildError>
    where
        D: Document,
        R: RandomSource + ?Sized,
    {
        let dimensions = layout::ensure_buildable(self.compute_dimensions(document.viewport()))?;
        Ok(Matrix::new(document, dimensions, self.palette.clone(), random)?)
    }

    /// Replaces the scene's matrix with a fresh one and renders the scene.
    pub fn rebuild_and_show<D>(
        &self,
        scene: &mut Scene<D>,
        document: &mut D,
        random: &mut dyn RandomSource,
    ) -> Result<GridDimensions, RebuildError>
    where
        D: Document,
        D::Element: 'static,
    {
        let matrix = self.create_matrix(document, random)?;
        let dimensions = matrix.dimensions();
        let _ = scene
            .append(MATRIX_KEY, matrix)
            .render(document, random)?;
        Ok(dimensions)
    }
}

/// Resize-reactive pipeline owning everything a rebuild touches.
pub struct App<D: Document, R> {
    bootstrap: Bootstrap,
    document: D,
    scene: Scene<D>,
    random: R,
    rebuilds: u64,
}

impl<D, R> App<D, R>
where
    D: Document,
    D::Element: 'static,
    R: RandomSource,
{
    /// Attaches an empty scene to `document`. Nothing is shown until
    /// [`App::start`] runs.
    pub fn new(bootstrap: Bootstrap, mut document: D, random: R) -> Result<Self, DocumentError> {
        let scene = Scene::attach(&mut document)?;
        Ok(Self {
            bootstrap,
            document,
            scene,
            random,
            rebuilds: 0,
        })
    }

    /// Builds and shows the first matrix.
    pub fn start(&mut self) -> Result<GridDimensions, RebuildError> {
        self.rebuild()
    }

    /// Discards the current matrix and shows one sized for the new viewport.
    ///
    /// A viewport too large to build for leaves the previous matrix shown.
    pub fn handle_resize(&mut self) -> Result<GridDimensions, RebuildError> {
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<GridDimensions, RebuildError> {
        let viewport = self.document.viewport();
        let dimensions =
            self.bootstrap
                .rebuild_and_show(&mut self.scene, &mut self.document, &mut self.random)?;
        self.rebuilds += 1;

        info!(
            rebuild = self.rebuilds,
            viewport_width = viewport.width(),
            viewport_height = viewport.height(),
            dimensions = %dimensions,
            "matrix rebuilt"
        );
        Ok(dimensions)
    }

    /// Matrix currently registered in the scene.
    #[must_use]
    pub fn matrix(&self) -> Option<&Matrix<D::Element>> {
        self.scene.get_as::<Matrix<D::Element>>(MATRIX_KEY)
    }

    /// Scene holding the matrix.
    #[must_use]
    pub const fn scene(&self) -> &Scene<D> {
        &self.scene
    }

    /// Document the scene is mounted into.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, e.g. to simulate a resize.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Randomness provider feeding every rebuild.
    #[must_use]
    pub const fn random(&self) -> &R {
        &self.random
    }

    /// Configuration the pipeline was built from.
    #[must_use]
    pub const fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    /// Number of completed rebuilds, including the initial one.
    #[must_use]
    pub const fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> Bootstrap {
        Bootstrap::from_config(&Config::default()).expect("default config is valid")
    }

    #[test]
    fn desktop_viewport_yields_twenty_by_eleven() {
        let dimensions = bootstrap().compute_dimensions(Viewport::new(1280.0, 720.0));
        assert_eq!(dimensions, GridDimensions::new(20, 11));
    }

    #[test]
    fn tiny_viewport_yields_single_cell() {
        let dimensions = bootstrap().compute_dimensions(Viewport::new(10.0, 10.0));
        assert_eq!(dimensions, GridDimensions::new(1, 1));
    }

    #[test]
    fn from_config_rejects_empty_palette() {
        let config = Config {
            palette: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(
            Bootstrap::from_config(&config),
            Err(ConfigError::Palette(_))
        ));
    }

    #[test]
    fn from_config_rejects_sub_pixel_cell_size() {
        let config = Config {
            target_cell_size: 0.001,
            ..Config::default()
        };
        assert!(matches!(
            Bootstrap::from_config(&config),
            Err(ConfigError::Layout(LayoutError::InvalidTargetCellSize { .. }))
        ));
    }

    #[test]
    fn from_config_rejects_zero_cell_size() {
        let config = Config {
            target_cell_size: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            Bootstrap::from_config(&config),
            Err(ConfigError::Layout(_))
        ));
    }

    #[test]
    fn from_config_deduplicates_palette() {
        let config = Config {
            palette: vec![4, 4, 2],
            ..Config::default()
        };
        let bootstrap = Bootstrap::from_config(&config).expect("valid config");
        assert_eq!(bootstrap.palette().len(), 2);
    }
}
