//! Random banner generation.
//!
//! Draws a base colour and a handful of pattern layers from constrained
//! pools, then renders the result. The random source is injected so
//! callers (and tests) control reproducibility with a seeded rng.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::PrimitiveStore;
use crate::error::Result;
use crate::render::Compositor;
use crate::types::{Layer, Palette};

use image::RgbaImage;

/// Default upper bound on pattern layers per banner.
pub const MAX_PATTERN_LAYERS: usize = 6;

/// Constraints and policy for random generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Pattern identities removed from the draw pool.
    pub exclude_patterns: Vec<String>,

    /// Colour names to draw from. Unknown names are ignored; an empty
    /// result falls back to the full palette.
    pub allowed_colors: Vec<String>,

    /// Upper bound on pattern layers per banner.
    pub max_pattern_layers: usize,

    /// When set, always emit exactly `max_pattern_layers` pattern layers
    /// (subject to pool availability) instead of a random count.
    pub fixed_layer_count: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            allowed_colors: Vec::new(),
            max_pattern_layers: MAX_PATTERN_LAYERS,
            fixed_layer_count: false,
        }
    }
}

/// Random banner generator over a store and palette.
pub struct Generator<'a> {
    store: &'a dyn PrimitiveStore,
    palette: &'a Palette,
}

impl<'a> Generator<'a> {
    /// Create a generator.
    pub fn new(store: &'a dyn PrimitiveStore, palette: &'a Palette) -> Self {
        Self { store, palette }
    }

    /// Generate one random banner: a rendered image plus the layer
    /// sequence that produced it.
    ///
    /// The sequence is the canonical, replayable representation; callers
    /// keep it to re-render deterministically later (for instance after
    /// a mirror transform). Generation itself only fails when the base
    /// primitive cannot be resolved during rendering.
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        rng: &mut impl Rng,
    ) -> Result<(RgbaImage, Vec<Layer>)> {
        let patterns = self.pattern_pool(config)?;
        let colors = self.colour_pool(config);

        let mut layers = Vec::new();
        layers.push(Layer::base(draw_colour(&colors, rng)));

        // An empty pattern pool simply means no pattern layers; the base
        // alone is a valid banner.
        if !patterns.is_empty() {
            let count = if config.fixed_layer_count {
                config.max_pattern_layers
            } else {
                rng.gen_range(0..=config.max_pattern_layers)
            };

            for _ in 0..count {
                if let Some(pattern) = patterns.choose(rng) {
                    layers.push(Layer::pattern(pattern.clone(), draw_colour(&colors, rng)));
                }
            }
        }

        let compositor = Compositor::new(self.store, self.palette);
        let image = compositor.render(&layers)?;

        Ok((image, layers))
    }

    fn pattern_pool(&self, config: &GeneratorConfig) -> Result<Vec<String>> {
        let mut patterns = self.store.list_patterns()?;
        patterns.retain(|p| !config.exclude_patterns.contains(p));
        Ok(patterns)
    }

    fn colour_pool(&self, config: &GeneratorConfig) -> Vec<String> {
        let allowed: Vec<String> = config
            .allowed_colors
            .iter()
            .filter(|c| self.palette.contains(c))
            .cloned()
            .collect();

        if allowed.is_empty() {
            self.palette.names().map(str::to_string).collect()
        } else {
            allowed
        }
    }
}

/// Draw one colour name from the pool.
///
/// The pool falls back to the full palette when constraints empty it, so
/// the white default only applies if the palette itself had no entries.
fn draw_colour(colors: &[String], rng: &mut impl Rng) -> String {
    colors
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "white".to_string())
}
