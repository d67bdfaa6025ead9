//! Image memoization for one load call.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AssetError;

use super::types::{ColorSpace, Image};

/// Deduplicates images by a content key within a single load call.
///
/// Keys are either source URIs (including data URIs, decoded once) or
/// synthesized strings combining a color-space prefix with stringified
/// material factors, so two materials declaring the same flat color share
/// one physical 1x1 image.
///
/// Not thread-safe and not meant to outlive the load call that owns it.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Arc<Image>>,
}

impl ImageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct images created so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no image has been created yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the image for `key`, creating it with `create` on first use.
    ///
    /// A failed `create` is not cached, so a later retry with the same key
    /// runs again.
    pub fn get_or_create(
        &mut self,
        key: &str,
        create: impl FnOnce() -> Result<Image, AssetError>,
    ) -> Result<Arc<Image>, AssetError> {
        if let Some(existing) = self.entries.get(key) {
            return Ok(Arc::clone(existing));
        }
        let image = Arc::new(create()?);
        self.entries.insert(key.to_string(), Arc::clone(&image));
        Ok(image)
    }

    /// Get or create the 1x1 image for a flat color factor.
    ///
    /// The key embeds the color-space prefix and the raw factor values, so
    /// the same factor in a different color space yields a distinct image.
    pub fn solid_color(
        &mut self,
        factors: &[f32],
        color_space: ColorSpace,
    ) -> Result<Arc<Image>, AssetError> {
        let mut key = String::from(color_space.key_prefix());
        for f in factors {
            key.push(' ');
            key.push_str(&f.to_string());
        }

        let mut rgba = [0u8, 0, 0, 255];
        for (dst, src) in rgba.iter_mut().zip(factors.iter()) {
            *dst = (255.0 * src).round() as u8;
        }
        self.get_or_create(&key, || Ok(Image::solid_color(rgba, color_space)))
    }
}
