//! Material data types.

use std::sync::Arc;

use crate::image::Image;
use crate::sampler::ImageSampler;

/// One material texture slot: a shared image plus its sampler descriptor.
///
/// Images are shared via `Arc` because the memoizer may hand the same
/// physical image to several slots (metalness and roughness pack their
/// channels into one texture) or several materials (identical flat
/// factors).
#[derive(Debug, Clone)]
pub struct MaterialTexture {
    /// The image sampled by this slot.
    pub image: Arc<Image>,
    /// How the image is sampled.
    pub sampler: ImageSampler,
}

impl MaterialTexture {
    /// Create a slot from an image and sampler.
    pub fn new(image: Arc<Image>, sampler: ImageSampler) -> Self {
        Self { image, sampler }
    }
}

/// A PBR material with up to six texture slots and scalar factors.
///
/// Slots left unset (no texture and no factor in the source) stay `None`.
/// Diffuse and emissive images are sRGB; all other slots are linear.
#[derive(Debug, Clone)]
pub struct Material {
    /// Base color / diffuse texture (sRGB).
    pub diffuse_texture: Option<MaterialTexture>,
    /// Metalness texture (linear). May alias the roughness image.
    pub metalness_texture: Option<MaterialTexture>,
    /// Roughness texture (linear). May alias the metalness image.
    pub roughness_texture: Option<MaterialTexture>,
    /// Normal map texture (linear).
    pub normal_texture: Option<MaterialTexture>,
    /// Emissive texture (sRGB).
    pub emissive_texture: Option<MaterialTexture>,
    /// Occlusion texture (linear).
    pub occlusion_texture: Option<MaterialTexture>,
    /// Emissive strength multiplier.
    pub emissive_factor: f32,
    /// Alpha cutoff threshold, only meaningful for masked materials.
    pub alpha_cutoff: f32,
    /// Index of refraction.
    pub index_of_refraction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_texture: None,
            metalness_texture: None,
            roughness_texture: None,
            normal_texture: None,
            emissive_texture: None,
            occlusion_texture: None,
            emissive_factor: 1.0,
            alpha_cutoff: 0.5,
            index_of_refraction: 1.5,
        }
    }
}

impl Material {
    /// Create a material with default factors and no textures.
    pub fn new() -> Self {
        Self::default()
    }
}
