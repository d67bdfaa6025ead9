//! Asset loading for the engine: sounds, images, models, and fonts.
//!
//! On-disk formats are converted into CPU-side data structures the engine
//! can upload or play back:
//!
//! - WAV and Ogg Vorbis files become [`sound::Sound`] (interleaved PCM).
//! - PNG/JPEG/TGA/BMP/GIF files become [`image::Image`] (RGBA8).
//! - OBJ (with companion MTL) and glTF/GLB files become [`model::Model`],
//!   with the glTF path flattening the scene graph and resolving skins and
//!   animations.
//! - TrueType files become [`font::Font`] (a baked glyph atlas).
//!
//! The `load_*` entry points dispatch on the file extension and never
//! panic on malformed input: failures are logged and an empty asset comes
//! back, so loading a batch of files survives any one of them being bad.
//! Format backends expose `Result`-returning functions for callers that
//! want the precise error.

pub mod animation;
pub mod error;
pub mod font;
pub mod gltf;
pub mod image;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod sampler;
pub mod sound;

use std::path::Path;

use error::AssetError;
use font::Font;
use image::Image;
use model::Model;
use sound::Sound;

/// Load a sound file (`.wav`, `.ogg`).
///
/// Returns an empty sound and logs a warning on any failure.
pub fn load_sound(path: &Path) -> Sound {
    let result = match extension(path).as_deref() {
        Some("wav") => sound::load_wav(path),
        Some("ogg") => sound::load_ogg(path),
        other => Err(unsupported(other)),
    };
    result.unwrap_or_else(|e| {
        log::warn!("could not load sound \"{}\": {e}", path.display());
        Sound::default()
    })
}

/// Load an image file (`.png`, `.jpg`, `.jpeg`, `.tga`, `.bmp`, `.gif`).
///
/// Returns an empty image and logs a warning on any failure.
pub fn load_image(path: &Path) -> Image {
    let result = match extension(path).as_deref() {
        Some("png" | "jpg" | "jpeg" | "tga" | "bmp" | "gif") => image::load_image_file(path),
        other => Err(unsupported(other)),
    };
    result.unwrap_or_else(|e| {
        log::warn!("could not load image \"{}\": {e}", path.display());
        Image::default()
    })
}

/// Load a model file (`.obj`, `.gltf`, `.glb`).
///
/// Returns an empty model and logs a warning on any failure.
pub fn load_model(path: &Path) -> Model {
    let result = match extension(path).as_deref() {
        Some("obj") => model::load_obj(path),
        Some("gltf" | "glb") => gltf::load_model(path),
        other => Err(unsupported(other)),
    };
    result.unwrap_or_else(|e| {
        log::warn!("could not load model \"{}\": {e}", path.display());
        Model::default()
    })
}

/// Load a font file (`.ttf`) baked at the given pixel height.
///
/// Returns an empty font and logs a warning on any failure.
pub fn load_font(path: &Path, height_px: f32) -> Font {
    let result = match extension(path).as_deref() {
        Some("ttf") => font::load_ttf(path, height_px),
        other => Err(unsupported(other)),
    };
    result.unwrap_or_else(|e| {
        log::warn!("could not load font \"{}\": {e}", path.display());
        Font::default()
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn unsupported(extension: Option<&str>) -> AssetError {
    AssetError::UnsupportedExtension {
        extension: extension.unwrap_or_default().to_string(),
    }
}
