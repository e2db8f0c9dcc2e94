//! Output representations of a rendered matrix.

use std::{collections::BTreeMap, fmt::Write as _};

use anyhow::{anyhow, Result};
use pulse_matrix_core::{layout, Document, GridDimensions, PaletteCode, Viewport};
use pulse_matrix_rendering::{stylesheet::matrix_stylesheet, ElementSnapshot, MemoryDocument};
use pulse_matrix_system_bootstrap::App;
use pulse_matrix_system_randomness::SeededRandom;
use pulse_matrix_world::query;
use serde::Serialize;

/// Everything the output formats need, captured after the last rebuild.
#[derive(Debug, Serialize)]
pub(crate) struct Report {
    viewport: Viewport,
    dimensions: GridDimensions,
    target_cell_size: f64,
    cell_size: f64,
    rebuilds: u64,
    seed: Option<u64>,
    histogram: BTreeMap<PaletteCode, u64>,
    tree: ElementSnapshot,
}

impl Report {
    pub(crate) fn capture(app: &App<MemoryDocument, SeededRandom>) -> Result<Self> {
        let matrix = app
            .matrix()
            .ok_or_else(|| anyhow!("no matrix has been rendered"))?;
        let document = app.document();
        let viewport = document.viewport();
        let tree = document
            .snapshot(*app.scene().container())
            .ok_or_else(|| anyhow!("scene container is missing from the document"))?;

        Ok(Self {
            viewport,
            dimensions: matrix.dimensions(),
            target_cell_size: app.bootstrap().target_cell_size().get(),
            cell_size: layout::cell_size(viewport, matrix.dimensions()),
            rebuilds: app.rebuilds(),
            seed: app.random().seed(),
            histogram: query::palette_histogram(matrix),
            tree,
        })
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub(crate) fn to_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "viewport: {}x{}",
            self.viewport.width(),
            self.viewport.height()
        );
        let _ = writeln!(out, "grid: {}", self.dimensions);
        let _ = writeln!(
            out,
            "cell size: {:.2}px (target {}px)",
            self.cell_size, self.target_cell_size
        );
        let _ = writeln!(out, "rebuilds: {}", self.rebuilds);
        if let Some(seed) = self.seed {
            let _ = writeln!(out, "seed: {seed}");
        }
        out.push_str("values:\n");
        for (code, count) in &self.histogram {
            let _ = writeln!(out, "  {code}: {count}");
        }
        out
    }

    pub(crate) fn to_html_page(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Pulse Matrix</title>\n<style>\n{css}</style>\n</head>\n\
             <body>\n{body}</body>\n</html>\n",
            css = matrix_stylesheet(),
            body = self.tree.to_html(),
        )
    }
}
