//! Symmetric grid mirroring.
//!
//! Symmetry is enforced at the semantic layer, not by flipping pixels:
//! the mirrored half of a grid is regenerated from the canonical half's
//! layer sequences with pattern identities substituted per role, so a
//! directional pattern gets its true mirrored counterpart instead of a
//! pixel-flip artifact.
//!
//! The substitution tables are static configuration, loaded once from
//! the embedded `config/mirror.yaml` and immutable thereafter. They are
//! overrides: any identity without an entry maps to itself.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{BlazonError, Result};
use crate::types::{Grid, Layer};

/// The axis a grid is mirrored across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mirror across the row midline (top and bottom halves).
    Horizontal,
    /// Mirror across the column midline (left and right halves).
    Vertical,
}

impl Axis {
    /// Parse an axis name, defaulting to horizontal for anything
    /// unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "vertical" => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

/// Grid-position category selecting which substitution table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Top,
    Bottom,
    Left,
    Right,
    Middle,
}

impl Role {
    /// All roles, for exhaustive property checks.
    pub const ALL: [Role; 5] = [Role::Top, Role::Bottom, Role::Left, Role::Right, Role::Middle];
}

#[derive(Debug, Default, Deserialize)]
struct HorizontalTables {
    #[serde(default)]
    top: HashMap<String, String>,
    #[serde(default)]
    bottom: HashMap<String, String>,
    #[serde(default)]
    middle: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct VerticalTables {
    #[serde(default)]
    left: HashMap<String, String>,
    #[serde(default)]
    right: HashMap<String, String>,
    #[serde(default)]
    middle: HashMap<String, String>,
}

/// Per-axis, per-role pattern substitution tables.
#[derive(Debug, Default, Deserialize)]
pub struct MirrorMap {
    #[serde(default)]
    horizontal: HorizontalTables,
    #[serde(default)]
    vertical: VerticalTables,
}

/// The embedded substitution tables.
const BUILTIN_CONFIG: &str = include_str!("../../config/mirror.yaml");

impl MirrorMap {
    /// Load the builtin tables embedded in the binary.
    ///
    /// The embedded config is validated by the test suite, so a parse
    /// failure here means a broken build, not bad user input.
    pub fn builtin() -> Self {
        Self::from_yaml(BUILTIN_CONFIG).expect("embedded mirror config is valid")
    }

    /// Parse substitution tables from YAML.
    ///
    /// Duplicate keys within a table are rejected at parse time; the
    /// tables themselves never resolve conflicts.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| BlazonError::Parse {
            message: format!("Invalid mirror map config: {}", e),
            help: Some("Expected horizontal/vertical sections with per-role tables".to_string()),
        })
    }

    /// Substitute a pattern identity for the given axis and role.
    ///
    /// Unmapped identities (and axis/role combinations with no table)
    /// pass through unchanged.
    pub fn substitute<'a>(&'a self, axis: Axis, role: Role, id: &'a str) -> &'a str {
        let table = match (axis, role) {
            (Axis::Horizontal, Role::Top) => &self.horizontal.top,
            (Axis::Horizontal, Role::Bottom) => &self.horizontal.bottom,
            (Axis::Horizontal, Role::Middle) => &self.horizontal.middle,
            (Axis::Vertical, Role::Left) => &self.vertical.left,
            (Axis::Vertical, Role::Right) => &self.vertical.right,
            (Axis::Vertical, Role::Middle) => &self.vertical.middle,
            _ => return id,
        };
        table.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// Apply a role's substitutions to a layer sequence.
///
/// Base layers pass through untouched (the base is never mirrored);
/// every other layer keeps its colour and position but may have its
/// pattern identity replaced.
pub fn apply_role(layers: &[Layer], axis: Axis, role: Role, map: &MirrorMap) -> Vec<Layer> {
    layers
        .iter()
        .map(|layer| {
            if layer.is_base() {
                layer.clone()
            } else {
                Layer {
                    kind: layer.kind,
                    pattern: map.substitute(axis, role, &layer.pattern).to_string(),
                    color: layer.color.clone(),
                }
            }
        })
        .collect()
}

/// Derive a bilaterally symmetric grid from `grid`.
///
/// For each mirrored pair the lower-index row (or column) is canonical:
/// its sequence produces both sides of the pair, and whatever occupied
/// the far side is discarded. The unique middle row/column of an
/// odd-sized axis is transformed in place with [`Role::Middle`]. The
/// output grid always has the input's dimensions.
pub fn mirror_grid(grid: &Grid, axis: Axis, map: &MirrorMap) -> Grid {
    let mut out = grid.clone();

    match axis {
        Axis::Horizontal => {
            let height = grid.height();
            for r in 0..height.div_ceil(2) {
                let mr = height - 1 - r;
                for c in 0..grid.width() {
                    let src = grid.cell(r, c);
                    if r == mr {
                        out.set_cell(r, c, apply_role(src, axis, Role::Middle, map));
                    } else {
                        out.set_cell(r, c, apply_role(src, axis, Role::Top, map));
                        out.set_cell(mr, c, apply_role(src, axis, Role::Bottom, map));
                    }
                }
            }
        }
        Axis::Vertical => {
            let width = grid.width();
            for c in 0..width.div_ceil(2) {
                let mc = width - 1 - c;
                for r in 0..grid.height() {
                    let src = grid.cell(r, c);
                    if c == mc {
                        out.set_cell(r, c, apply_role(src, axis, Role::Middle, map));
                    } else {
                        out.set_cell(r, c, apply_role(src, axis, Role::Left, map));
                        out.set_cell(r, mc, apply_role(src, axis, Role::Right, map));
                    }
                }
            }
        }
    }

    out
}
