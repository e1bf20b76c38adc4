//! Core data types for blazon.

mod colour;
mod grid;
mod layer;
mod palette;

pub use colour::Colour;
pub use grid::Grid;
pub use layer::{Layer, LayerKind, WireLayer, BASE_ID};
pub use palette::Palette;
