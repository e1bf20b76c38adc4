//! Primitive stores - resolving pattern identities to alpha-mask images.
//!
//! A primitive is a named mask asset (the base shield or a decorative
//! pattern). Stores resolve identities to RGBA images and list the
//! available pattern identities. Resolved images are immutable, so they
//! are cached by identity and shared by reference.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use image::RgbaImage;

use crate::error::{BlazonError, Result};
use crate::types::BASE_ID;

/// Source of primitive mask images.
///
/// Implementations must be safe to share across concurrent renders; the
/// compositor and generators only ever read resolved images.
pub trait PrimitiveStore: Send + Sync {
    /// List available pattern identities, sorted, excluding the base.
    fn list_patterns(&self) -> Result<Vec<String>>;

    /// Resolve an identity to its mask image.
    ///
    /// Fails with an `Asset` error when the identity is unknown.
    fn resolve(&self, id: &str) -> Result<Arc<RgbaImage>>;
}

/// A store backed by a flat directory of PNG masks.
///
/// Images are loaded on first touch and cached for the lifetime of the
/// store. Cache entries are never invalidated, so concurrent readers
/// never observe a partial value; two threads racing to populate the
/// same entry duplicate the load but not the stored image.
pub struct DirectoryStore {
    root: PathBuf,
    cache: RwLock<HashMap<String, Arc<RgbaImage>>>,
}

impl DirectoryStore {
    /// Create a store over a directory of `.png` mask files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, id: &str) -> Result<RgbaImage> {
        let path = self.root.join(id);
        let img = image::open(&path)
            .map_err(|e| BlazonError::asset(id, format!("{}: {}", path.display(), e)))?;
        Ok(img.to_rgba8())
    }
}

impl PrimitiveStore for DirectoryStore {
    fn list_patterns(&self) -> Result<Vec<String>> {
        let mut patterns = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(|e| BlazonError::Io {
            path: self.root.clone(),
            message: format!("Failed to read primitive directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let is_png = Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if is_png && name != BASE_ID {
                patterns.push(name.to_string());
            }
        }

        patterns.sort();
        Ok(patterns)
    }

    fn resolve(&self, id: &str) -> Result<Arc<RgbaImage>> {
        if let Some(img) = self.cache.read().expect("cache lock").get(id) {
            return Ok(Arc::clone(img));
        }

        let img = Arc::new(self.load(id)?);

        let mut cache = self.cache.write().expect("cache lock");
        // A racing loader may have beaten us here; keep the first entry
        // so every caller shares one image.
        let entry = cache.entry(id.to_string()).or_insert_with(|| Arc::clone(&img));
        Ok(Arc::clone(entry))
    }
}

/// An in-memory store.
///
/// Useful for embedding primitives directly in a binary, and as the
/// substitute store in tests.
#[derive(Default)]
pub struct MemoryStore {
    primitives: HashMap<String, Arc<RgbaImage>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive image under the given identity.
    pub fn insert(&mut self, id: impl Into<String>, image: RgbaImage) {
        self.primitives.insert(id.into(), Arc::new(image));
    }
}

impl PrimitiveStore for MemoryStore {
    fn list_patterns(&self) -> Result<Vec<String>> {
        let mut patterns: Vec<String> = self
            .primitives
            .keys()
            .filter(|id| id.as_str() != BASE_ID)
            .cloned()
            .collect();
        patterns.sort();
        Ok(patterns)
    }

    fn resolve(&self, id: &str) -> Result<Arc<RgbaImage>> {
        self.primitives
            .get(id)
            .map(Arc::clone)
            .ok_or_else(|| BlazonError::asset(id, "not present in store"))
    }
}
