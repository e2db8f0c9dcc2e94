#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pulse Matrix crates.
//!
//! This crate defines the vocabulary that connects the authoritative grid
//! state, the composition root and the platform adapters. Value types describe
//! palettes, grid dimensions and viewports; [`layout`] holds the pure sizing
//! math; [`visual`] derives per-cell presentation state; [`Document`] and
//! [`RandomSource`] are the two seams through which the platform and the
//! randomness provider are injected. [`Renderable`] is what state crates
//! implement so adapters can mount them without depending on each other.

pub mod document;
pub mod layout;
pub mod random;
pub mod visual;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use document::{Document, DocumentError, Renderable};
pub use random::{RandomSource, RandomSourceExt};

/// Integer value code assigned to a cell and drawn from a [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteCode(i32);

impl PaletteCode {
    /// Creates a new palette code wrapper.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying integer code.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PaletteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deduplicated, non-empty set of codes that cells may be assigned.
///
/// The first occurrence of each code is kept so iteration order is stable,
/// but membership is the only property callers should rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    codes: Vec<PaletteCode>,
}

impl Palette {
    /// Builds a palette from the provided codes, discarding duplicates.
    ///
    /// Returns [`PaletteError::Empty`] when no codes are supplied.
    pub fn new<I>(codes: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = PaletteCode>,
    {
        let mut unique: Vec<PaletteCode> = Vec::new();
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }

        if unique.is_empty() {
            return Err(PaletteError::Empty);
        }

        Ok(Self { codes: unique })
    }

    /// Builds a palette from raw integer values.
    pub fn from_values<I>(values: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = i32>,
    {
        Self::new(values.into_iter().map(PaletteCode::new))
    }

    /// Unique codes contained in the palette.
    #[must_use]
    pub fn codes(&self) -> &[PaletteCode] {
        &self.codes
    }

    /// Number of unique codes in the palette. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always `false`; an empty palette cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Reports whether the palette contains the provided code.
    #[must_use]
    pub fn contains(&self, code: PaletteCode) -> bool {
        self.codes.contains(&code)
    }
}

/// Errors raised while building a [`Palette`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// At least one code is required to populate cells.
    #[error("palette must contain at least one value")]
    Empty,
}

/// Number of columns and rows composing a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl GridDimensions {
    /// Creates a new dimension pair.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Visible area of the host surface, measured in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a new viewport descriptor.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width of the viewport in pixels.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Height of the viewport in pixels.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}

/// Zero-based position of a cell; `x` grows rightwards and `y` downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column index.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Row index.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Designer-chosen ideal pixel size of a cell, used to derive grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetCellSize(f64);

impl TargetCellSize {
    /// Target size used when no configuration overrides it.
    pub const DEFAULT: Self = Self(64.0);

    /// Smallest accepted target size; sub-pixel cells are never useful.
    pub const MIN_PIXELS: f64 = 1.0;

    /// Creates a target size, rejecting values that are not finite or are
    /// below [`TargetCellSize::MIN_PIXELS`].
    pub fn new(pixels: f64) -> Result<Self, LayoutError> {
        if !pixels.is_finite() || pixels < Self::MIN_PIXELS {
            return Err(LayoutError::InvalidTargetCellSize { pixels });
        }
        Ok(Self(pixels))
    }

    /// Size in pixels.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

impl Default for TargetCellSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors raised while validating layout inputs.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Target cell size must be a finite pixel count of at least one pixel.
    #[error("target cell size must be a finite number of pixels, at least 1 (received {pixels})")]
    InvalidTargetCellSize {
        /// Rejected size.
        pixels: f64,
    },
    /// The viewport would be split into more cells than can be built.
    #[error("a {dimensions} grid exceeds the limit of {limit} cells")]
    GridTooLarge {
        /// Dimensions derived from the viewport.
        dimensions: GridDimensions,
        /// Maximum number of cells a grid may hold.
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_discards_duplicates_keeping_first_occurrence() {
        let palette = Palette::from_values([3, 1, 3, 2, 1]).expect("non-empty palette");

        assert_eq!(
            palette.codes(),
            &[
                PaletteCode::new(3),
                PaletteCode::new(1),
                PaletteCode::new(2)
            ]
        );
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
    }

    #[test]
    fn palette_rejects_empty_input() {
        let error = Palette::from_values(Vec::new()).expect_err("empty palette must fail");
        assert_eq!(error, PaletteError::Empty);
    }

    #[test]
    fn palette_membership_ignores_order() {
        let palette = Palette::from_values([9, 4]).expect("non-empty palette");
        assert!(palette.contains(PaletteCode::new(4)));
        assert!(palette.contains(PaletteCode::new(9)));
        assert!(!palette.contains(PaletteCode::new(5)));
    }

    #[test]
    fn target_cell_size_rejects_non_positive_and_non_finite_values() {
        assert!(TargetCellSize::new(0.0).is_err());
        assert!(TargetCellSize::new(-4.0).is_err());
        assert!(TargetCellSize::new(f64::NAN).is_err());
        assert!(TargetCellSize::new(f64::INFINITY).is_err());
        assert_eq!(TargetCellSize::new(32.0).map(|size| size.get()), Ok(32.0));
    }

    #[test]
    fn target_cell_size_rejects_sub_pixel_values() {
        assert_eq!(
            TargetCellSize::new(0.001),
            Err(LayoutError::InvalidTargetCellSize { pixels: 0.001 })
        );
        assert!(TargetCellSize::new(0.999).is_err());
        assert_eq!(TargetCellSize::new(1.0).map(|size| size.get()), Ok(1.0));
    }

    #[test]
    fn palette_code_serializes_as_plain_integer() {
        let json = serde_json::to_string(&PaletteCode::new(7)).expect("serialize");
        assert_eq!(json, "7");
        let restored: PaletteCode = serde_json::from_str("12").expect("deserialize");
        assert_eq!(restored, PaletteCode::new(12));
    }

    #[test]
    fn grid_dimensions_report_cell_count() {
        let dimensions = GridDimensions::new(20, 11);
        assert_eq!(dimensions.cell_count(), 220);
        assert_eq!(dimensions.to_string(), "20x11");
    }
}
