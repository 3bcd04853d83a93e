//! Image loading and caching
//!
//! Images are scaled at load time, so the cache key includes the target size:
//! the same file at two sizes is two entries.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::AssetError;

/// Loads and scales an image into a backend handle
pub trait ImageLoader {
    type Handle: Clone;

    fn load(&mut self, path: &str, width: u32, height: u32) -> Result<Self::Handle, AssetError>;
}

/// Cache key: resolved path plus scaled size
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// Owns a loader and the handles it produced
pub struct ImageCache<L: ImageLoader> {
    loader: L,
    asset_dir: String,
    images: HashMap<ImageKey, L::Handle>,
}

impl<L: ImageLoader> ImageCache<L> {
    pub fn new(loader: L, asset_dir: impl Into<String>) -> Self {
        Self {
            loader,
            asset_dir: asset_dir.into(),
            images: HashMap::new(),
        }
    }

    fn key(&self, name: &str, width: u32, height: u32) -> ImageKey {
        let path = Path::new(&self.asset_dir).join(name.trim());
        ImageKey {
            path: path.to_string_lossy().into_owned(),
            width,
            height,
        }
    }

    /// Handle for `name` scaled to `width`x`height`, loading it on first use
    pub fn get(&mut self, name: &str, width: u32, height: u32) -> Result<L::Handle, AssetError> {
        let key = self.key(name, width, height);
        if let Some(handle) = self.images.get(&key) {
            return Ok(handle.clone());
        }
        let handle = self.loader.load(&key.path, width, height)?;
        log::debug!("Loaded image {} at {}x{}", key.path, width, height);
        self.images.insert(key, handle.clone());
        Ok(handle)
    }

    /// Load every `(name, width, height)` up front; the first failure is returned
    pub fn preload(&mut self, images: &[(&str, u32, u32)]) -> Result<(), AssetError> {
        for &(name, width, height) in images {
            self.get(name, width, height)?;
        }
        log::info!("Preloaded {} images", images.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

/// Loader backed by a fixed set of known file names; handles are sequence numbers
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    known: HashSet<String>,
    loads: u32,
}

impl MemoryLoader {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
            loads: 0,
        }
    }

    /// How many times `load` produced a handle
    pub fn loads(&self) -> u32 {
        self.loads
    }
}

impl ImageLoader for MemoryLoader {
    type Handle = u32;

    fn load(&mut self, path: &str, _width: u32, _height: u32) -> Result<u32, AssetError> {
        let file = Path::new(path)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.known.contains(&file) {
            return Err(AssetError::NotFound(path.to_string()));
        }
        self.loads += 1;
        Ok(self.loads)
    }
}
