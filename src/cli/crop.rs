//! Crop command implementation.
//!
//! Extracts the front-panel region from raw banner textures to produce
//! the primitive masks the rest of the pipeline consumes. Raw textures
//! carry the panel at a one-pixel inset; the panel itself is the same
//! 20x40 region every banner renders to.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use image::RgbaImage;

use crate::error::{BlazonError, Result};
use crate::output::Printer;
use crate::render::{write_png, EMPTY_CELL_SIZE};

/// Offset of the front panel within a raw banner texture.
const FRONT_OFFSET: (u32, u32) = (1, 1);

/// Crop primitive masks out of raw banner textures
#[derive(Args, Debug)]
pub struct CropArgs {
    /// Directory of raw banner textures
    #[arg(long, default_value = "banner")]
    pub input: PathBuf,

    /// Output directory for cropped primitive masks
    #[arg(long, short, default_value = "banner_cropped")]
    pub output: PathBuf,
}

pub fn run(args: CropArgs) -> Result<()> {
    let printer = Printer::new();

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| BlazonError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let entries = fs::read_dir(&args.input).map_err(|e| BlazonError::Io {
        path: args.input.clone(),
        message: format!("Failed to read texture directory: {}", e),
    })?;

    let mut cropped = 0;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let is_png = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        let texture = image::open(entry.path())
            .map_err(|e| BlazonError::asset(name, format!("{}: {}", entry.path().display(), e)))?
            .to_rgba8();

        match crop_front(&texture) {
            Some(panel) => {
                write_png(&panel, &args.output.join(name))?;
                printer.status("Cropped", name);
                cropped += 1;
            }
            None => printer.warning(
                "Skipped",
                &format!("{}: smaller than the front panel", name),
            ),
        }
    }

    printer.status(
        "Finished",
        &format!("{} mask(s) in {}", cropped, args.output.display()),
    );

    Ok(())
}

/// Crop the front panel out of a raw texture.
///
/// Returns `None` when the texture is too small to contain the panel.
pub fn crop_front(texture: &RgbaImage) -> Option<RgbaImage> {
    let (x, y) = FRONT_OFFSET;
    let (width, height) = EMPTY_CELL_SIZE;
    if texture.width() < x + width || texture.height() < y + height {
        return None;
    }
    Some(image::imageops::crop_imm(texture, x, y, width, height).to_image())
}
