//! Layer and banner types.
//!
//! A banner is an ordered layer sequence: one base layer at the bottom,
//! zero or more pattern layers above it. The sequence is the source of
//! truth; the rendered image is always derived from it.

use serde::{Deserialize, Serialize};

/// Primitive identity of the foundational shield shape.
pub const BASE_ID: &str = "base.png";

/// Whether a layer is the foundational base or a decorative pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Base,
    Pattern,
}

/// One coloring of one primitive.
///
/// Order within a sequence is the compositing order, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    /// Primitive identity (an opaque mask asset key, e.g. `border.png`).
    pub pattern: String,
    /// Dye colour name from the palette.
    pub color: String,
}

impl Layer {
    /// Create a base layer.
    pub fn base(color: impl Into<String>) -> Self {
        Self {
            kind: LayerKind::Base,
            pattern: BASE_ID.to_string(),
            color: color.into(),
        }
    }

    /// Create a pattern layer.
    pub fn pattern(pattern: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            kind: LayerKind::Pattern,
            pattern: pattern.into(),
            color: color.into(),
        }
    }

    /// Check whether this is a base-kind layer.
    pub fn is_base(&self) -> bool {
        self.kind == LayerKind::Base
    }
}

/// Lenient wire form of a layer.
///
/// Clients may send layers with fields missing; such layers are dropped
/// rather than rejecting the whole request. A missing `kind` defaults to
/// `pattern`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireLayer {
    pub kind: Option<LayerKind>,
    pub pattern: Option<String>,
    pub color: Option<String>,
}

impl WireLayer {
    /// Convert to a well-formed layer, or `None` if required fields are
    /// missing.
    pub fn into_layer(self) -> Option<Layer> {
        Some(Layer {
            kind: self.kind.unwrap_or(LayerKind::Pattern),
            pattern: self.pattern?,
            color: self.color?,
        })
    }
}
