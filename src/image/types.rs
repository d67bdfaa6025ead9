//! CPU-side image data types.

/// Pixel format of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Single 8-bit channel (font atlases).
    R8,
    /// 8-bit RGBA, the normalized output of the image codec.
    #[default]
    R8G8B8A8,
}

impl ImageFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::R8 => 1,
            Self::R8G8B8A8 => 4,
        }
    }
}

/// Color space tag.
///
/// Load-bearing for rendering: diffuse/emissive textures and their flat
/// color fallbacks are sRGB, every other texture kind is linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Linear color values.
    #[default]
    Linear,
    /// sRGB-encoded color values.
    Srgb,
}

impl ColorSpace {
    /// The key prefix used by the image cache for factor-derived images.
    pub(crate) fn key_prefix(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Srgb => "srgb",
        }
    }
}

/// A decoded image: dimensions, format, color space, and raw bytes.
#[derive(Debug, Clone, Default)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: ImageFormat,
    /// Color space of the pixel values.
    pub color_space: ColorSpace,
    /// Raw pixel bytes, `width * height * bytes_per_pixel` long.
    pub data: Vec<u8>,
}

impl Image {
    /// Create a 1x1 RGBA image from a single color, for flat material factors.
    pub fn solid_color(rgba: [u8; 4], color_space: ColorSpace) -> Self {
        Self {
            width: 1,
            height: 1,
            format: ImageFormat::R8G8B8A8,
            color_space,
            data: rgba.to_vec(),
        }
    }

    /// True when no pixel data was loaded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_is_one_pixel() {
        let img = Image::solid_color([255, 0, 0, 255], ColorSpace::Srgb);
        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
        assert_eq!(img.data, vec![255, 0, 0, 255]);
        assert_eq!(img.color_space, ColorSpace::Srgb);
    }

    #[test]
    fn default_image_is_empty() {
        assert!(Image::default().is_empty());
    }
}
