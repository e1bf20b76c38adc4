//! The fixed dye palette.
//!
//! Sixteen named dye colours, constructed once at startup and never
//! mutated. Lookup order is the declaration order below, which is also
//! the order colour names are reported to clients.

use super::Colour;

/// The sixteen dye colours, in canonical listing order.
const DYES: &[(&str, Colour)] = &[
    ("white", Colour::rgb(255, 255, 255)),
    ("orange", Colour::rgb(216, 127, 51)),
    ("magenta", Colour::rgb(178, 76, 216)),
    ("light_blue", Colour::rgb(102, 153, 216)),
    ("yellow", Colour::rgb(229, 229, 51)),
    ("lime", Colour::rgb(127, 204, 25)),
    ("pink", Colour::rgb(242, 127, 165)),
    ("gray", Colour::rgb(76, 76, 76)),
    ("light_gray", Colour::rgb(153, 153, 153)),
    ("cyan", Colour::rgb(76, 127, 153)),
    ("purple", Colour::rgb(127, 63, 178)),
    ("blue", Colour::rgb(51, 76, 178)),
    ("brown", Colour::rgb(102, 76, 51)),
    ("green", Colour::rgb(102, 127, 51)),
    ("red", Colour::rgb(153, 51, 51)),
    ("black", Colour::rgb(25, 25, 25)),
];

/// A collection of named dye colours.
///
/// Insertion order is preserved so `names()` reports colours in a stable
/// order for clients.
#[derive(Debug, Clone)]
pub struct Palette {
    colours: Vec<(String, Colour)>,
}

impl Palette {
    /// Create the builtin dye palette.
    pub fn dyes() -> Self {
        Self {
            colours: DYES
                .iter()
                .map(|(name, colour)| (name.to_string(), *colour))
                .collect(),
        }
    }

    /// Get a colour by name.
    pub fn get(&self, name: &str) -> Option<Colour> {
        self.colours
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    /// Get a colour by name, falling back to white for unknown names.
    pub fn get_or_white(&self, name: &str) -> Colour {
        self.get(name).unwrap_or(Colour::WHITE)
    }

    /// Check whether a colour name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.colours.iter().any(|(n, _)| n == name)
    }

    /// Get all colour names in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colours.iter().map(|(n, _)| n.as_str())
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dyes()
    }
}
