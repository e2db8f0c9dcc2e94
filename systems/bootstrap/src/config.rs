//! Tunable inputs of the composition root.

use pulse_matrix_core::{LayoutError, PaletteError, TargetCellSize};
use serde::Deserialize;
use thiserror::Error;

/// Palette used when no configuration overrides it.
pub const DEFAULT_PALETTE: [i32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Settings controlling how the matrix is sized and populated.
///
/// Every field is optional in the TOML representation:
///
/// ```toml
/// target_cell_size = 48
/// palette = [1, 2, 3]
/// seed = 7
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ideal cell edge length in pixels.
    pub target_cell_size: f64,
    /// Codes cells may be assigned; duplicates are ignored.
    pub palette: Vec<i32>,
    /// Seed for reproducible output. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_cell_size: TargetCellSize::DEFAULT.get(),
            palette: DEFAULT_PALETTE.to_vec(),
            seed: None,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML, filling omitted keys with defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialised.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The palette is unusable.
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// The target cell size is unusable.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.target_cell_size, 64.0);
        assert_eq!(config.palette, DEFAULT_PALETTE.to_vec());
    }

    #[test]
    fn explicit_keys_override_defaults() {
        let contents = "target_cell_size = 48.0\npalette = [1, 2, 3]\nseed = 7\n";
        let config = Config::from_toml_str(contents).expect("config parses");

        assert_eq!(config.target_cell_size, 48.0);
        assert_eq!(config.palette, vec![1, 2, 3]);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Config::from_toml_str("cell_size = 10.0").expect_err("unknown key");
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
