//! List command implementation.
//!
//! Prints the available pattern identities and dye colour names.

use std::path::PathBuf;

use clap::Args;

use crate::assets::{DirectoryStore, PrimitiveStore};
use crate::error::Result;
use crate::output::Printer;
use crate::types::Palette;

/// List available patterns and dye colours
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory of primitive mask PNGs
    #[arg(long, default_value = "banner_cropped")]
    pub assets: PathBuf,
}

pub fn run(args: ListArgs) -> Result<()> {
    let printer = Printer::new();

    let store = DirectoryStore::new(&args.assets);
    let patterns = store.list_patterns()?;
    if patterns.is_empty() {
        printer.warning("Patterns", "none found");
    } else {
        printer.info("Patterns", &patterns.join(", "));
    }

    let palette = Palette::dyes();
    let colours: Vec<&str> = palette.names().collect();
    printer.info("Colours", &colours.join(", "));

    Ok(())
}
