//! Baked font data types.

use std::collections::HashMap;
use std::sync::Arc;

use crate::image::Image;
use crate::sampler::FilterMode;

/// Placement and atlas coordinates for one baked glyph.
///
/// Positions are in pixels relative to the pen position on the baseline,
/// with y growing downwards. UVs are normalized atlas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontGlyph {
    /// Top-left corner of the glyph quad.
    pub position_top_left: [f32; 2],
    /// Bottom-right corner of the glyph quad.
    pub position_bottom_right: [f32; 2],
    /// Horizontal pen advance after this glyph.
    pub position_advance: f32,
    /// Top-left atlas UV.
    pub uv_top_left: [f32; 2],
    /// Bottom-right atlas UV.
    pub uv_bottom_right: [f32; 2],
}

/// A font baked to a single-channel glyph atlas.
#[derive(Debug, Clone, Default)]
pub struct Font {
    /// The glyph atlas (R8, linear).
    pub image: Arc<Image>,
    /// Filter the atlas should be sampled with.
    pub image_sampler_filter: FilterMode,
    /// Per-character glyph metrics.
    pub glyphs: HashMap<char, FontGlyph>,
}

impl Font {
    /// True when no glyphs were baked.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
