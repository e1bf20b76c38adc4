//! Mirror command implementation.
//!
//! Reads a JSON grid description, derives the symmetric grid, renders
//! every cell to a PNG, and writes the substituted layer sequences back
//! out as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;

use crate::assets::DirectoryStore;
use crate::error::{BlazonError, Result};
use crate::mirror::{mirror_grid, Axis, MirrorMap};
use crate::output::Printer;
use crate::render::{write_png, Compositor};
use crate::types::{Grid, Layer, Palette, WireLayer};

/// Mirror a grid of banners from a JSON description
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Directory of primitive mask PNGs
    #[arg(long, default_value = "banner_cropped")]
    pub assets: PathBuf,

    /// Grid description file (JSON: width, height, row-major cells)
    #[arg(required = true)]
    pub grid: PathBuf,

    /// Mirror axis (overrides the file's axis if given)
    #[arg(long)]
    pub axis: Option<String>,

    /// Output directory
    #[arg(long, short, default_value = "mirrored")]
    pub output: PathBuf,
}

/// On-disk grid description. Layers with missing fields are dropped,
/// matching the service boundary.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GridFile {
    axis: String,
    width: i64,
    height: i64,
    cells: Vec<Vec<WireLayer>>,
}

pub fn run(args: MirrorArgs) -> Result<()> {
    let printer = Printer::new();

    let text = fs::read_to_string(&args.grid).map_err(|e| BlazonError::Io {
        path: args.grid.clone(),
        message: format!("Failed to read grid file: {}", e),
    })?;
    let file: GridFile = serde_json::from_str(&text).map_err(|e| BlazonError::Parse {
        message: format!("Invalid grid file {}: {}", args.grid.display(), e),
        help: Some("Expected JSON with width, height, and row-major cells".to_string()),
    })?;

    if file.cells.is_empty() {
        printer.warning("Skipped", "grid file has no cells");
        return Ok(());
    }

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| BlazonError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let axis = Axis::parse_lenient(args.axis.as_deref().unwrap_or(&file.axis));
    let cells: Vec<Vec<Layer>> = file
        .cells
        .into_iter()
        .map(|cell| cell.into_iter().filter_map(WireLayer::into_layer).collect())
        .collect();

    let grid = Grid::from_cells(file.width.max(1) as usize, file.height.max(1) as usize, cells);
    let map = MirrorMap::builtin();
    let mirrored = mirror_grid(&grid, axis, &map);

    let store = DirectoryStore::new(&args.assets);
    let palette = Palette::dyes();
    let compositor = Compositor::new(&store, &palette);

    for row in 0..mirrored.height() {
        for col in 0..mirrored.width() {
            let layers = mirrored.cell(row, col);
            let filename = format!("cell_r{}_c{}.png", row, col);
            match compositor.render_cell(layers) {
                Ok(image) => {
                    write_png(&image, &args.output.join(&filename))?;
                    printer.status("Rendered", &filename);
                }
                // One broken cell never takes down the rest of the grid.
                Err(e) => printer.warning("Skipped", &format!("{}: {}", filename, e)),
            }
        }
    }

    let layers_path = args.output.join("grid.json");
    let layers_json = serde_json::json!({
        "width": mirrored.width(),
        "height": mirrored.height(),
        "cells": mirrored.cells().collect::<Vec<_>>(),
    });
    fs::write(&layers_path, serde_json::to_string_pretty(&layers_json).unwrap_or_default())
        .map_err(|e| BlazonError::Io {
            path: layers_path.clone(),
            message: format!("Failed to write grid layers: {}", e),
        })?;

    printer.status(
        "Finished",
        &format!(
            "{}x{} grid in {}",
            mirrored.width(),
            mirrored.height(),
            args.output.display()
        ),
    );

    Ok(())
}
