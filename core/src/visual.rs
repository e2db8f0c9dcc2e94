//! Presentation state derived from cell values and per-cell animation draws.
//!
//! Nothing here touches elements. [`compute_visual_state`] is a pure function
//! of a cell value, and [`AnimationParameters`] captures one render pass's
//! random draws as CSS custom property values consumed by the stylesheet.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{layout, CellCoord, PaletteCode, RandomSource};

/// Class applied to the matrix root container.
pub const MATRIX_CLASS: &str = "matrix";
/// Class applied to every row container.
pub const ROW_CLASS: &str = "matrix__row";
/// Base class applied to every cell element.
pub const CELL_CLASS: &str = "matrix__cell";

/// Custom property carrying the computed cell size on the matrix root.
pub const CELL_SIZE_PROPERTY: &str = "--cell-size";
/// Custom property carrying the wave delay of a cell.
pub const CELL_DELAY_PROPERTY: &str = "--cell-delay";
/// Custom property carrying the lower bound of the pulse scale.
pub const SCALE_MIN_PROPERTY: &str = "--cell-animation-scale-min";
/// Custom property carrying the upper bound of the pulse scale.
pub const SCALE_MAX_PROPERTY: &str = "--cell-animation-scale-max";
/// Custom property carrying the peak opacity of the pulse.
pub const OPACITY_MAX_PROPERTY: &str = "--cell-animation-opacity-max";
/// Custom property carrying the peak blur radius of the pulse.
pub const BLUR_MAX_PROPERTY: &str = "--cell-animation-blur-max";
/// Custom property carrying the pulse duration.
pub const DURATION_PROPERTY: &str = "--cell-duration";

const MODIFIER_INFIX: &str = "--m-";

const SCALE_MIN_DIGITS: RangeInclusive<u32> = 1..=99;
const SCALE_MAX_DIGITS: RangeInclusive<u32> = 1..=99;
const OPACITY_MAX_DIGITS: RangeInclusive<u32> = 1..=99;
const BLUR_MAX_PIXELS: RangeInclusive<u32> = 1..=30;
const DURATION_DIGITS: RangeInclusive<u32> = 4..=8;

/// Value-dependent styling of a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CellVisualState {
    modifier: Option<String>,
}

impl CellVisualState {
    /// Modifier class to apply on top of [`CELL_CLASS`], if any.
    #[must_use]
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    /// Whether the cell shows no value at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.modifier.is_none()
    }
}

/// Derives the visual state for a cell holding `value`.
///
/// Any code yields exactly one modifier, whether or not it belongs to a
/// palette; a missing value yields a blank cell.
#[must_use]
pub fn compute_visual_state(value: Option<PaletteCode>) -> CellVisualState {
    CellVisualState {
        modifier: value.map(modifier_class),
    }
}

/// Modifier class that tags a cell with `code`.
#[must_use]
pub fn modifier_class(code: PaletteCode) -> String {
    format!("{CELL_CLASS}{MODIFIER_INFIX}{code}")
}

/// Recovers the code embedded in a modifier class produced by [`modifier_class`].
#[must_use]
pub fn parse_modifier_class(class: &str) -> Option<PaletteCode> {
    class
        .strip_prefix(CELL_CLASS)?
        .strip_prefix(MODIFIER_INFIX)?
        .parse()
        .ok()
        .map(PaletteCode::new)
}

/// Per-cell animation parameters drawn during a render pass.
///
/// The fractional parameters keep the raw draw and append it after the decimal
/// point, so a draw of `5` reads as `0.5` and a draw of `50` as `0.50`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationParameters {
    delay_seconds: f64,
    scale_min_digits: u32,
    scale_max_digits: u32,
    opacity_max_digits: u32,
    blur_max_pixels: u32,
    duration_digits: u32,
}

impl AnimationParameters {
    /// Computes the wave delay for `coord` and draws the remaining parameters.
    ///
    /// The draws happen in a fixed order: scale minimum, scale maximum,
    /// opacity, blur, duration.
    pub fn draw<R>(coord: CellCoord, random: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        Self {
            delay_seconds: layout::wave_delay(coord),
            scale_min_digits: draw_in(random, SCALE_MIN_DIGITS),
            scale_max_digits: draw_in(random, SCALE_MAX_DIGITS),
            opacity_max_digits: draw_in(random, OPACITY_MAX_DIGITS),
            blur_max_pixels: draw_in(random, BLUR_MAX_PIXELS),
            duration_digits: draw_in(random, DURATION_DIGITS),
        }
    }

    /// Animation delay in seconds.
    #[must_use]
    pub const fn delay_seconds(&self) -> f64 {
        self.delay_seconds
    }

    /// Smallest scale reached by the pulse, within `(0, 1)`.
    #[must_use]
    pub fn scale_min(&self) -> f64 {
        append_fraction(0, self.scale_min_digits)
    }

    /// Largest scale reached by the pulse, within `(2, 3)`.
    #[must_use]
    pub fn scale_max(&self) -> f64 {
        append_fraction(2, self.scale_max_digits)
    }

    /// Peak opacity of the pulse, within `(0, 1)`.
    #[must_use]
    pub fn opacity_max(&self) -> f64 {
        append_fraction(0, self.opacity_max_digits)
    }

    /// Peak blur radius in pixels.
    #[must_use]
    pub const fn blur_max_pixels(&self) -> u32 {
        self.blur_max_pixels
    }

    /// Pulse duration in seconds, within `[2.4, 2.8]`.
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        append_fraction(2, self.duration_digits)
    }

    /// Custom property assignments for the cell element, in application order.
    #[must_use]
    pub fn css_properties(&self) -> [(&'static str, String); 6] {
        [
            (CELL_DELAY_PROPERTY, format!("{}s", self.delay_seconds)),
            (SCALE_MIN_PROPERTY, format!("0.{}", self.scale_min_digits)),
            (SCALE_MAX_PROPERTY, format!("2.{}", self.scale_max_digits)),
            (OPACITY_MAX_PROPERTY, format!("0.{}", self.opacity_max_digits)),
            (BLUR_MAX_PROPERTY, format!("{}px", self.blur_max_pixels)),
            (DURATION_PROPERTY, format!("2.{}s", self.duration_digits)),
        ]
    }
}

fn draw_in<R>(random: &mut R, range: RangeInclusive<u32>) -> u32
where
    R: RandomSource + ?Sized,
{
    let (min, max) = range.into_inner();
    let drawn = random.uniform_int(i64::from(min), i64::from(max));
    u32::try_from(drawn).map_or(min, |value| value.clamp(min, max))
}

fn append_fraction(whole: u32, digits: u32) -> f64 {
    let mut scale = 1.0;
    let mut remaining = digits;
    while remaining > 0 {
        scale *= 10.0;
        remaining /= 10;
    }
    f64::from(whole) + f64::from(digits) / scale
}
