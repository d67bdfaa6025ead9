//! glTF 2.0 model loading.
//!
//! Loads `.gltf`/`.glb` files into a flat [`Model`]: the scene graph is
//! walked depth-first with accumulated world transforms, every mesh
//! primitive becomes one [`ModelPrimitive`](crate::model::ModelPrimitive),
//! skins are re-addressed into a dense joint index space shared across the
//! whole load, and animation channels are bound to those joints afterwards.
//!
//! Buffers come from the GLB binary chunk, base64 data URIs, or external
//! files next to the model. Textures are deduplicated per load through the
//! [`ImageCache`](crate::image::ImageCache).

mod accessor;
mod animation;
mod loader;
mod skin;
#[cfg(test)]
mod tests;

use std::path::Path;

use crate::error::AssetError;
use crate::math::Mat4;
use crate::model::Model;

/// Load a glTF or GLB model file.
pub fn load_model(path: &Path) -> Result<Model, AssetError> {
    let data = std::fs::read(path).map_err(|e| AssetError::file_not_found(path, e))?;
    load_model_slice(&data, path.parent())
}

/// Load a glTF or GLB model from bytes already in memory.
///
/// `base_dir` anchors external buffer and image URIs; without it only
/// embedded and data-URI resources resolve.
pub fn load_model_slice(data: &[u8], base_dir: Option<&Path>) -> Result<Model, AssetError> {
    let gltf_dep::Gltf { document, blob } =
        gltf_dep::Gltf::from_slice(data).map_err(|e| AssetError::DecodeFailure(e.to_string()))?;

    let buffers = loader::resolve_buffers(&document, blob, base_dir)?;
    let mut ctx = loader::LoadContext::new(&document, buffers, base_dir);

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::DecodeFailure("model declares no scene".into()))?;

    let identity = Mat4::identity();
    for node in scene.nodes() {
        ctx.walk_node(&node, &identity)?;
    }
    for anim in document.animations() {
        ctx.bind_animation(&anim)?;
    }

    Ok(ctx.into_model())
}
