//! Layer compositor - turns a layer sequence into a banner image.
//!
//! Each layer is a colorized copy of its primitive mask: a solid-colour
//! image whose alpha channel is replaced by the mask's own alpha. Layers
//! are then source-over composited bottom to top. Rendering is a pure
//! function of the layer sequence, the palette, and the store contents.

use image::RgbaImage;

use crate::assets::PrimitiveStore;
use crate::error::Result;
use crate::types::{Colour, Layer, Palette};

/// Canvas size used when a cell has no layers at all (the cropped front
/// panel of a banner).
pub const EMPTY_CELL_SIZE: (u32, u32) = (20, 40);

/// Renders layer sequences against a primitive store and palette.
pub struct Compositor<'a> {
    store: &'a dyn PrimitiveStore,
    palette: &'a Palette,
}

impl<'a> Compositor<'a> {
    /// Create a compositor over a store and palette.
    pub fn new(store: &'a dyn PrimitiveStore, palette: &'a Palette) -> Self {
        Self { store, palette }
    }

    /// Render a layer sequence to an image.
    ///
    /// The canvas takes the base primitive's natural dimensions. A
    /// sequence with no base layer gets a synthesized white base rather
    /// than failing; a base primitive that cannot be resolved is a hard
    /// error. Pattern layers whose assets are missing are skipped, and
    /// unknown colour names fall back to white.
    pub fn render(&self, layers: &[Layer]) -> Result<RgbaImage> {
        let base = layers
            .iter()
            .find(|l| l.is_base())
            .cloned()
            .unwrap_or_else(|| Layer::base("white"));

        // The base asset determines the canvas size, so this one failure
        // is fatal for the banner.
        let base_mask = self.store.resolve(&base.pattern)?;
        let (width, height) = base_mask.dimensions();

        let mut canvas = RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 0]));

        let base_colour = self.palette.get_or_white(&base.color);
        composite_over(&mut canvas, &colorize_mask(&base_mask, base_colour));

        // Any base-kind layer beyond the first is ignored; pattern layers
        // keep their original order.
        for layer in layers.iter().filter(|l| !l.is_base()) {
            let Ok(mask) = self.store.resolve(&layer.pattern) else {
                continue;
            };
            let colour = self.palette.get_or_white(&layer.color);
            composite_over(&mut canvas, &colorize_mask(&mask, colour));
        }

        Ok(canvas)
    }

    /// Render a grid cell: like [`render`](Self::render), but an empty
    /// sequence yields a fixed-size fully-transparent image instead of a
    /// synthesized banner.
    pub fn render_cell(&self, layers: &[Layer]) -> Result<RgbaImage> {
        if layers.is_empty() {
            let (w, h) = EMPTY_CELL_SIZE;
            return Ok(RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 0, 0])));
        }
        self.render(layers)
    }
}

/// Build a solid-colour image carrying the mask's alpha channel.
///
/// This is a pointwise alpha substitution, not a multiply: pixels where
/// the mask is transparent stay transparent regardless of the colour.
pub fn colorize_mask(mask: &RgbaImage, colour: Colour) -> RgbaImage {
    let (width, height) = mask.dimensions();
    let mut out = RgbaImage::new(width, height);
    for (src, dst) in mask.pixels().zip(out.pixels_mut()) {
        dst.0 = [colour.r, colour.g, colour.b, src.0[3]];
    }
    out
}

/// Source-over composite `top` onto `canvas` at the origin.
///
/// Standard unpremultiplied painter's blend. Masks are expected to share
/// the canvas size; a differently-sized layer is clipped to the overlap.
pub fn composite_over(canvas: &mut RgbaImage, top: &RgbaImage) {
    let width = canvas.width().min(top.width());
    let height = canvas.height().min(top.height());

    for y in 0..height {
        for x in 0..width {
            let fg = top.get_pixel(x, y).0;
            let bg = canvas.get_pixel(x, y).0;

            let fa = fg[3] as f32 / 255.0;
            let ba = bg[3] as f32 / 255.0;
            let oa = fa + ba * (1.0 - fa);

            let blend = if oa == 0.0 {
                [0, 0, 0, 0]
            } else {
                let channel = |f: u8, b: u8| {
                    let c = (f as f32 * fa + b as f32 * ba * (1.0 - fa)) / oa;
                    c.round() as u8
                };
                [
                    channel(fg[0], bg[0]),
                    channel(fg[1], bg[1]),
                    channel(fg[2], bg[2]),
                    (oa * 255.0).round() as u8,
                ]
            };

            canvas.put_pixel(x, y, image::Rgba(blend));
        }
    }
}
