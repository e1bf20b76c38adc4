//! Rendering module for blazon.
//!
//! Composites layer sequences into banner images and encodes them for
//! transport or disk.

mod compositor;
mod encode;

pub use compositor::{colorize_mask, composite_over, Compositor, EMPTY_CELL_SIZE};
pub use encode::{encode_png, to_data_url, write_png};
