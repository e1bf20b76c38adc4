pub mod crop;
pub mod generate;
pub mod list;
pub mod mirror;

use clap::{Parser, Subcommand};

/// blazon - layered banner compositor
#[derive(Parser, Debug)]
#[command(name = "blazon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate random banners as PNG files
    Generate(generate::GenerateArgs),

    /// Mirror a grid of banners from a JSON description
    Mirror(mirror::MirrorArgs),

    /// List available patterns and dye colours
    List(list::ListArgs),

    /// Crop primitive masks out of raw banner textures
    Crop(crop::CropArgs),
}
