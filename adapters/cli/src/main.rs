#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that renders the Pulse Matrix headlessly.
//!
//! The matrix is built into an in-memory document sized to `--viewport`,
//! rebuilt once per `--resize` and finally written out as a standalone HTML
//! page, a JSON element tree or a short textual summary.

mod output;

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pulse_matrix_core::Viewport;
use pulse_matrix_rendering::MemoryDocument;
use pulse_matrix_system_bootstrap::{App, Bootstrap, Config};
use pulse_matrix_system_randomness::SeededRandom;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::output::Report;

/// Renders a Pulse Matrix for a simulated viewport.
#[derive(Debug, Parser)]
#[command(name = "pulse-matrix", version, about)]
struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial viewport size.
    #[arg(long, value_name = "WxH", default_value = "1280x720")]
    viewport: Extent,

    /// Viewport sizes applied as successive resize events.
    #[arg(long, value_name = "WxH", num_args = 1..)]
    resize: Vec<Extent>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Ideal cell edge length in pixels.
    #[arg(long, value_name = "PIXELS")]
    target_cell_size: Option<f64>,

    /// Comma-separated palette codes.
    #[arg(long, value_delimiter = ',', value_name = "CODES")]
    palette: Option<Vec<i32>>,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Destination file; stdout when omitted.
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Output representation selected with `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Standalone HTML page including the matrix stylesheet.
    Html,
    /// Serialized element tree and grid metadata.
    Json,
    /// Dimensions, cell size and value histogram.
    Summary,
}

/// Viewport extent parsed from `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Extent(Viewport);

impl FromStr for Extent {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (width, height) = raw
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
        let parse = |part: &str| -> Result<f64, String> {
            let value: f64 = part
                .trim()
                .parse()
                .map_err(|_| format!("`{part}` is not a number"))?;
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(format!("`{part}` must be a non-negative extent"))
            }
        };
        Ok(Self(Viewport::new(parse(width)?, parse(height)?)))
    }
}

/// Entry point for the Pulse Matrix command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let rendered = run(&cli)?;

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn init_tracing() {
    // RUST_LOG=pulse_matrix_system_bootstrap=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Config::from_toml_str(&contents)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(pixels) = cli.target_cell_size {
        config.target_cell_size = pixels;
    }
    if let Some(palette) = &cli.palette {
        config.palette.clone_from(palette);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;
    debug!(?config, "configuration resolved");

    let bootstrap = Bootstrap::from_config(&config)?;
    let random = config.seed.map_or_else(SeededRandom::from_entropy, SeededRandom::new);
    let document = MemoryDocument::new(cli.viewport.0);
    let mut app = App::new(bootstrap, document, random)?;

    let _ = app.start()?;
    for extent in &cli.resize {
        app.document_mut().set_viewport(extent.0);
        let _ = app.handle_resize()?;
    }
    info!(rebuilds = app.rebuilds(), format = ?cli.format, "rendering output");

    let report = Report::capture(&app)?;
    Ok(match cli.format {
        Format::Html => report.to_html_page(),
        Format::Json => report.to_json()?,
        Format::Summary => report.to_summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pulse-matrix").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn extent_parses_width_and_height() {
        let extent: Extent = "640x480".parse().expect("valid extent");
        assert_eq!(extent.0, Viewport::new(640.0, 480.0));
    }

    #[test]
    fn extent_rejects_missing_separator_and_negative_values() {
        assert!("640".parse::<Extent>().is_err());
        assert!("-1x20".parse::<Extent>().is_err());
        assert!("axb".parse::<Extent>().is_err());
    }

    #[test]
    fn flags_override_configuration_defaults() {
        let cli = cli(&["--seed", "9", "--palette", "3,1", "--target-cell-size", "32"]);
        let config = load_config(&cli).expect("config");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.palette, vec![3, 1]);
        assert_eq!(config.target_cell_size, 32.0);
    }

    #[test]
    fn resizes_are_applied_in_order() {
        let cli = cli(&[
            "--seed",
            "1",
            "--resize",
            "640x480",
            "--resize",
            "300x900",
            "--format",
            "summary",
        ]);
        let summary = run(&cli).expect("run");
        assert!(summary.contains("grid: 4x14"), "{summary}");
        assert!(summary.contains("rebuilds: 3"), "{summary}");
    }

    #[test]
    fn empty_palette_is_rejected() {
        let cli = Cli {
            palette: Some(Vec::new()),
            ..cli(&[])
        };
        assert!(run(&cli).is_err());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let args = ["--seed", "42", "--viewport", "320x200", "--format", "json"];
        assert_eq!(run(&cli(&args)).expect("first"), run(&cli(&args)).expect("second"));
    }
}
