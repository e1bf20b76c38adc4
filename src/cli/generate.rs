//! Generate command implementation.
//!
//! The offline counterpart of the generation endpoint: draws random
//! banners and writes them to a directory as PNG files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::assets::DirectoryStore;
use crate::error::{BlazonError, Result};
use crate::generate::{Generator, GeneratorConfig, MAX_PATTERN_LAYERS};
use crate::output::Printer;
use crate::render::write_png;
use crate::types::Palette;

/// Generate random banners as PNG files
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory of primitive mask PNGs
    #[arg(long, default_value = "banner_cropped")]
    pub assets: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "generated")]
    pub output: PathBuf,

    /// Number of banners to generate
    #[arg(long, short, default_value = "1")]
    pub count: usize,

    /// Pattern identities to exclude from the draw pool
    #[arg(long = "exclude-pattern")]
    pub exclude_patterns: Vec<String>,

    /// Colour names to exclude from the draw pool
    #[arg(long = "exclude-color")]
    pub exclude_colors: Vec<String>,

    /// Maximum pattern layers per banner
    #[arg(long, default_value_t = MAX_PATTERN_LAYERS)]
    pub layers: usize,

    /// Always emit exactly --layers pattern layers instead of a random count
    #[arg(long)]
    pub fixed_layers: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let printer = Printer::new();

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| BlazonError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let store = DirectoryStore::new(&args.assets);
    let palette = Palette::dyes();
    let generator = Generator::new(&store, &palette);

    let allowed_colors: Vec<String> = palette
        .names()
        .filter(|name| !args.exclude_colors.iter().any(|c| c == name))
        .map(str::to_string)
        .collect();
    let config = GeneratorConfig {
        exclude_patterns: args.exclude_patterns.clone(),
        allowed_colors,
        max_pattern_layers: args.layers,
        fixed_layer_count: args.fixed_layers,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..args.count {
        let (image, layers) = generator.generate(&config, &mut rng)?;

        let id = Uuid::new_v4().simple().to_string();
        let filename = format!("banner_{}.png", &id[..8]);
        write_png(&image, &args.output.join(&filename))?;

        printer.status("Generated", &format!("{} ({} layers)", filename, layers.len()));
        for layer in &layers {
            let label = if layer.is_base() { "base" } else { "pattern" };
            printer.info(label, &format!("{} ({})", layer.pattern, layer.color));
        }
    }

    printer.status(
        "Finished",
        &format!("{} banner(s) in {}", args.count, args.output.display()),
    );

    Ok(())
}
