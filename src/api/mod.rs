//! Boundary operations: the request/response contracts a serving layer
//! marshals to and from JSON.
//!
//! The transport itself (HTTP routing, headers) stays outside this
//! crate; these functions take already-decoded requests and produce
//! serializable responses. Out-of-range options are clamped or given
//! documented defaults rather than rejected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::PrimitiveStore;
use crate::error::Result;
use crate::generate::{Generator, GeneratorConfig};
use crate::mirror::{mirror_grid, Axis, MirrorMap};
use crate::render::{to_data_url, Compositor};
use crate::types::{Grid, Layer, Palette, WireLayer};

/// Hard cap on banners per generation request.
pub const MAX_COUNT: i64 = 1000;

/// Hard cap on a grid dimension.
pub const MAX_DIMENSION: i64 = 32;

/// Hard cap on total cells in a generated grid.
pub const MAX_GRID_CELLS: i64 = 400;

/// Options for a banner generation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub count: i64,
    pub exclude_patterns: Vec<String>,
    pub exclude_colors: Vec<String>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            count: 1,
            exclude_patterns: Vec::new(),
            exclude_colors: Vec::new(),
        }
    }
}

/// Options for a grid generation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridRequest {
    pub width: i64,
    pub height: i64,
    pub exclude_patterns: Vec<String>,
    pub exclude_colors: Vec<String>,
}

impl Default for GridRequest {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            exclude_patterns: Vec::new(),
            exclude_colors: Vec::new(),
        }
    }
}

/// Options for a grid mirror request. Cells are row-major, flattened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MirrorRequest {
    /// Axis name; anything other than `vertical` means horizontal.
    pub axis: String,
    pub width: i64,
    pub height: i64,
    pub cells: Vec<Vec<WireLayer>>,
}

/// One banner in a response: an opaque slug for client bookkeeping, the
/// rendered image as a data URL, and the canonical layer sequence.
#[derive(Debug, Serialize)]
pub struct BannerDto {
    pub slug: String,
    /// Absent when this banner's render failed (missing base asset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub layers: Vec<Layer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to a generation request.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub banners: Vec<BannerDto>,
}

/// Response to a grid generation or mirror request, row-major.
#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub width: usize,
    pub height: usize,
    pub banners: Vec<BannerDto>,
}

/// The banner service: every boundary operation over one store, palette,
/// and mirror map.
pub struct Service<'a> {
    store: &'a dyn PrimitiveStore,
    palette: &'a Palette,
    mirror_map: &'a MirrorMap,
}

impl<'a> Service<'a> {
    /// Create a service over shared process-wide state.
    pub fn new(
        store: &'a dyn PrimitiveStore,
        palette: &'a Palette,
        mirror_map: &'a MirrorMap,
    ) -> Self {
        Self {
            store,
            palette,
            mirror_map,
        }
    }

    /// List available pattern identities (excluding the base).
    pub fn patterns(&self) -> Result<Vec<String>> {
        self.store.list_patterns()
    }

    /// List dye colour names in canonical order.
    pub fn colors(&self) -> Vec<String> {
        self.palette.names().map(str::to_string).collect()
    }

    /// Generate `count` independent random banners.
    pub fn generate(
        &self,
        req: &GenerateRequest,
        rng: &mut impl Rng,
    ) -> Result<GenerateResponse> {
        let count = req.count.clamp(1, MAX_COUNT) as usize;
        let config = self.generator_config(&req.exclude_patterns, &req.exclude_colors);
        let generator = Generator::new(self.store, self.palette);

        let mut banners = Vec::with_capacity(count);
        for _ in 0..count {
            let (image, layers) = generator.generate(&config, rng)?;
            banners.push(BannerDto {
                slug: new_slug(),
                src: Some(to_data_url(&image)?),
                layers,
                error: None,
            });
        }

        Ok(GenerateResponse { banners })
    }

    /// Generate a width x height grid of random banners, row-major.
    ///
    /// Dimensions are clamped to `[1, 32]`; if the total exceeds 400
    /// cells, height is reduced (width never is).
    pub fn generate_grid(&self, req: &GridRequest, rng: &mut impl Rng) -> Result<GridResponse> {
        let (width, height) = clamp_grid_dimensions(req.width, req.height);

        let generate = GenerateRequest {
            count: (width * height) as i64,
            exclude_patterns: req.exclude_patterns.clone(),
            exclude_colors: req.exclude_colors.clone(),
        };
        let banners = self.generate(&generate, rng)?.banners;

        Ok(GridResponse {
            width,
            height,
            banners,
        })
    }

    /// Mirror a client-supplied grid of layer sequences and re-render
    /// every cell.
    ///
    /// Dimensions are clamped exactly like grid generation. Malformed
    /// layers are dropped, short cell lists are padded and long ones
    /// truncated, and a request with no cells at all yields an empty
    /// grid without running the mirror algorithm. A cell whose render
    /// fails (missing base asset) is reported in place; it never aborts
    /// the rest of the grid.
    pub fn mirror(&self, req: &MirrorRequest) -> Result<GridResponse> {
        let (width, height) = clamp_grid_dimensions(req.width, req.height);

        if req.cells.is_empty() {
            return Ok(GridResponse {
                width,
                height,
                banners: Vec::new(),
            });
        }

        let cells: Vec<Vec<Layer>> = req
            .cells
            .iter()
            .map(|cell| {
                cell.iter()
                    .cloned()
                    .filter_map(WireLayer::into_layer)
                    .collect()
            })
            .collect();

        let axis = Axis::parse_lenient(&req.axis);
        let grid = Grid::from_cells(width, height, cells);
        let mirrored = mirror_grid(&grid, axis, self.mirror_map);

        let compositor = Compositor::new(self.store, self.palette);
        let mut banners = Vec::with_capacity(mirrored.width() * mirrored.height());
        for layers in mirrored.cells() {
            let dto = match compositor.render_cell(layers).and_then(|img| to_data_url(&img)) {
                Ok(src) => BannerDto {
                    slug: new_slug(),
                    src: Some(src),
                    layers: layers.clone(),
                    error: None,
                },
                Err(e) => BannerDto {
                    slug: new_slug(),
                    src: None,
                    layers: layers.clone(),
                    error: Some(e.to_string()),
                },
            };
            banners.push(dto);
        }

        Ok(GridResponse {
            width: mirrored.width(),
            height: mirrored.height(),
            banners,
        })
    }

    fn generator_config(
        &self,
        exclude_patterns: &[String],
        exclude_colors: &[String],
    ) -> GeneratorConfig {
        // Colour exclusions invert into an allow-list; excluding every
        // colour falls back to the full palette.
        let allowed_colors: Vec<String> = self
            .palette
            .names()
            .filter(|name| !exclude_colors.iter().any(|c| c == name))
            .map(str::to_string)
            .collect();

        GeneratorConfig {
            exclude_patterns: exclude_patterns.to_vec(),
            allowed_colors,
            ..Default::default()
        }
    }
}

/// Clamp grid dimensions to the documented limits.
///
/// Each dimension lands in `[1, 32]`; when the product still exceeds 400
/// cells, height is reduced to fit and width left alone.
pub fn clamp_grid_dimensions(width: i64, height: i64) -> (usize, usize) {
    let width = width.clamp(1, MAX_DIMENSION);
    let mut height = height.clamp(1, MAX_DIMENSION);

    if width * height > MAX_GRID_CELLS {
        height = (MAX_GRID_CELLS / width).max(1);
    }

    (width as usize, height as usize)
}

/// A short opaque identifier for client bookkeeping. Practically unique;
/// no collision guarantee beyond that.
fn new_slug() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryStore;
    use crate::types::BASE_ID;
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let mask = RgbaImage::from_pixel(2, 4, Rgba([0, 0, 0, 255]));
        store.insert(BASE_ID, mask.clone());
        store.insert("stripe_top.png", mask.clone());
        store.insert("stripe_bottom.png", mask);
        store
    }

    fn with_service<T>(f: impl FnOnce(&Service) -> T) -> T {
        let store = store();
        let palette = Palette::dyes();
        let map = MirrorMap::builtin();
        f(&Service::new(&store, &palette, &map))
    }

    #[test]
    fn test_listings() {
        with_service(|service| {
            assert_eq!(
                service.patterns().unwrap(),
                vec!["stripe_bottom.png", "stripe_top.png"]
            );
            assert_eq!(service.colors().len(), 16);
        });
    }

    #[test]
    fn test_generate_count_clamped() {
        with_service(|service| {
            let mut rng = StdRng::seed_from_u64(1);
            let req = GenerateRequest {
                count: -5,
                ..Default::default()
            };
            assert_eq!(service.generate(&req, &mut rng).unwrap().banners.len(), 1);

            let req = GenerateRequest {
                count: 5000,
                ..Default::default()
            };
            assert_eq!(
                service.generate(&req, &mut rng).unwrap().banners.len(),
                1000
            );
        });
    }

    #[test]
    fn test_generate_banner_shape() {
        with_service(|service| {
            let mut rng = StdRng::seed_from_u64(2);
            let req = GenerateRequest {
                count: 3,
                ..Default::default()
            };
            let res = service.generate(&req, &mut rng).unwrap();
            assert_eq!(res.banners.len(), 3);
            for banner in &res.banners {
                assert_eq!(banner.slug.len(), 8);
                assert!(banner.src.as_deref().unwrap().starts_with("data:image/png;base64,"));
                assert!(banner.layers[0].is_base());
                assert!(banner.error.is_none());
            }
        });
    }

    #[test]
    fn test_exclude_colors_inverts_to_allow_list() {
        with_service(|service| {
            let mut rng = StdRng::seed_from_u64(3);
            let all_but_red: Vec<String> = Palette::dyes()
                .names()
                .filter(|n| *n != "red")
                .map(str::to_string)
                .collect();
            let req = GenerateRequest {
                count: 10,
                exclude_colors: all_but_red,
                ..Default::default()
            };
            let res = service.generate(&req, &mut rng).unwrap();
            for banner in &res.banners {
                assert!(banner.layers.iter().all(|l| l.color == "red"));
            }
        });
    }

    #[test]
    fn test_excluding_every_color_falls_back_to_full_palette() {
        with_service(|service| {
            let mut rng = StdRng::seed_from_u64(4);
            let req = GenerateRequest {
                count: 1,
                exclude_colors: service.colors(),
                ..Default::default()
            };
            let res = service.generate(&req, &mut rng).unwrap();
            assert!(!res.banners.is_empty());
        });
    }

    #[test]
    fn test_clamp_grid_dimensions() {
        assert_eq!(clamp_grid_dimensions(0, 0), (1, 1));
        assert_eq!(clamp_grid_dimensions(10, 10), (10, 10));
        // 50x50 clamps to 32x32, then height shrinks so the total fits.
        assert_eq!(clamp_grid_dimensions(50, 50), (32, 12));
        assert_eq!(clamp_grid_dimensions(32, 32), (32, 12));
        // Width is never reduced.
        assert_eq!(clamp_grid_dimensions(20, 32), (20, 20));
    }

    #[test]
    fn test_generate_grid_row_major_count() {
        with_service(|service| {
            let mut rng = StdRng::seed_from_u64(5);
            let req = GridRequest {
                width: 3,
                height: 2,
                ..Default::default()
            };
            let res = service.generate_grid(&req, &mut rng).unwrap();
            assert_eq!((res.width, res.height), (3, 2));
            assert_eq!(res.banners.len(), 6);
        });
    }

    #[test]
    fn test_mirror_request_end_to_end() {
        with_service(|service| {
            let req = MirrorRequest {
                axis: "horizontal".to_string(),
                width: 1,
                height: 4,
                cells: vec![
                    vec![
                        WireLayer {
                            kind: Some(crate::types::LayerKind::Base),
                            pattern: Some(BASE_ID.to_string()),
                            color: Some("white".to_string()),
                        },
                        WireLayer {
                            kind: None,
                            pattern: Some("stripe_top.png".to_string()),
                            color: Some("red".to_string()),
                        },
                    ],
                    vec![],
                    vec![],
                    vec![WireLayer {
                        kind: Some(crate::types::LayerKind::Base),
                        pattern: Some(BASE_ID.to_string()),
                        color: Some("black".to_string()),
                    }],
                ],
            };

            let res = service.mirror(&req).unwrap();
            assert_eq!((res.width, res.height), (1, 4));
            assert_eq!(res.banners.len(), 4);

            // Row 3 derives from row 0 with the bottom role applied.
            assert_eq!(
                res.banners[3].layers,
                vec![Layer::base("white"), Layer::pattern("stripe_bottom.png", "red")]
            );
            assert_eq!(
                res.banners[0].layers,
                vec![Layer::base("white"), Layer::pattern("stripe_top.png", "red")]
            );
            assert!(res.banners.iter().all(|b| b.src.is_some()));
        });
    }

    #[test]
    fn test_mirror_invalid_axis_defaults_to_horizontal() {
        with_service(|service| {
            let req = MirrorRequest {
                axis: "sideways".to_string(),
                width: 1,
                height: 2,
                cells: vec![
                    vec![WireLayer {
                        kind: None,
                        pattern: Some("stripe_top.png".to_string()),
                        color: Some("lime".to_string()),
                    }],
                    vec![],
                ],
            };

            let res = service.mirror(&req).unwrap();
            // Horizontal bottom role produced the mirrored stripe.
            assert_eq!(
                res.banners[1].layers,
                vec![Layer::pattern("stripe_bottom.png", "lime")]
            );
        });
    }

    #[test]
    fn test_mirror_no_cells_yields_empty_grid() {
        with_service(|service| {
            let req = MirrorRequest {
                axis: "vertical".to_string(),
                width: 4,
                height: 4,
                cells: vec![],
            };
            let res = service.mirror(&req).unwrap();
            assert!(res.banners.is_empty());

            // The empty path reports the same clamped dimensions as a
            // populated request would.
            let req = MirrorRequest {
                axis: "vertical".to_string(),
                width: 500,
                height: -3,
                cells: vec![],
            };
            let res = service.mirror(&req).unwrap();
            assert_eq!((res.width, res.height), (32, 1));
            assert!(res.banners.is_empty());
        });
    }

    #[test]
    fn test_mirror_oversized_dimensions_clamped() {
        with_service(|service| {
            let req = MirrorRequest {
                axis: "horizontal".to_string(),
                width: i64::MAX,
                height: 2,
                cells: vec![vec![WireLayer {
                    kind: None,
                    pattern: Some("stripe_top.png".to_string()),
                    color: Some("red".to_string()),
                }]],
            };

            let res = service.mirror(&req).unwrap();
            assert_eq!((res.width, res.height), (32, 2));
            assert_eq!(res.banners.len(), 64);

            // The one supplied cell still mirrors onto the far row.
            assert_eq!(
                res.banners[0].layers,
                vec![Layer::pattern("stripe_top.png", "red")]
            );
            assert_eq!(
                res.banners[32].layers,
                vec![Layer::pattern("stripe_bottom.png", "red")]
            );
        });
    }

    #[test]
    fn test_mirror_cell_failure_isolated() {
        // A store with no base primitive: every non-empty cell fails to
        // render, but the grid itself still comes back whole.
        let mut store = MemoryStore::new();
        store.insert("stripe_top.png", RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        let palette = Palette::dyes();
        let map = MirrorMap::builtin();
        let service = Service::new(&store, &palette, &map);

        let req = MirrorRequest {
            axis: "horizontal".to_string(),
            width: 1,
            height: 2,
            cells: vec![
                vec![WireLayer {
                    kind: None,
                    pattern: Some("stripe_top.png".to_string()),
                    color: Some("red".to_string()),
                }],
                vec![],
            ],
        };

        let res = service.mirror(&req).unwrap();
        assert_eq!(res.banners.len(), 2);
        assert!(res.banners[0].src.is_none());
        assert!(res.banners[0].error.is_some());
        assert!(res.banners[1].src.is_none());
        assert!(res.banners[1].error.is_some());
    }

    #[test]
    fn test_malformed_wire_layers_skipped() {
        with_service(|service| {
            let req = MirrorRequest {
                axis: "horizontal".to_string(),
                width: 1,
                height: 1,
                cells: vec![vec![
                    WireLayer {
                        kind: None,
                        pattern: None,
                        color: Some("red".to_string()),
                    },
                    WireLayer {
                        kind: None,
                        pattern: Some("stripe_top.png".to_string()),
                        color: Some("blue".to_string()),
                    },
                ]],
            };

            let res = service.mirror(&req).unwrap();
            assert_eq!(
                res.banners[0].layers,
                vec![Layer::pattern("stripe_top.png", "blue")]
            );
        });
    }
}
