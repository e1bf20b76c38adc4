//! blazon - layered banner compositor
//!
//! Composes small banner images from alpha-mask primitives and a fixed
//! dye palette, generates random banners, and derives bilaterally
//! symmetric banner grids by substituting pattern identities from
//! static per-axis, per-role mapping tables.

pub mod api;
pub mod assets;
pub mod cli;
pub mod error;
pub mod generate;
pub mod mirror;
pub mod output;
pub mod render;
pub mod types;

pub use api::{
    clamp_grid_dimensions, BannerDto, GenerateRequest, GenerateResponse, GridRequest,
    GridResponse, MirrorRequest, Service,
};
pub use assets::{DirectoryStore, MemoryStore, PrimitiveStore};
pub use error::{BlazonError, Result};
pub use generate::{Generator, GeneratorConfig, MAX_PATTERN_LAYERS};
pub use mirror::{apply_role, mirror_grid, Axis, MirrorMap, Role};
pub use render::{encode_png, to_data_url, write_png, Compositor, EMPTY_CELL_SIZE};
pub use types::{Colour, Grid, Layer, LayerKind, Palette, WireLayer, BASE_ID};
