//! Image loading and memoization.
//!
//! Decoding of PNG/JPEG/TGA/BMP/GIF bytes is delegated to the `image`
//! codec and normalized to 8-bit RGBA. The [`ImageCache`] deduplicates
//! images by content key within one load call.

mod cache;
mod types;

pub use cache::ImageCache;
pub use types::{ColorSpace, Image, ImageFormat};

use std::path::Path;

use crate::error::AssetError;

/// Decode an image file into RGBA8 pixels.
///
/// The color space is reported as [`ColorSpace::Linear`]; callers that know
/// better (diffuse/emissive material slots) retag the result as sRGB.
pub fn load_image_file(path: &Path) -> Result<Image, AssetError> {
    let bytes =
        std::fs::read(path).map_err(|e| AssetError::file_not_found(path, e))?;
    load_image_memory(&bytes)
}

/// Decode in-memory image bytes into RGBA8 pixels.
pub fn load_image_memory(bytes: &[u8]) -> Result<Image, AssetError> {
    let decoded = image_dep::load_from_memory(bytes)
        .map_err(|e| AssetError::DecodeFailure(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Image {
        width,
        height,
        format: ImageFormat::R8G8B8A8,
        color_space: ColorSpace::Linear,
        data: rgba.into_raw(),
    })
}
