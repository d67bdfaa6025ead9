//! TrueType baking through the font rasterizer collaborator.

use std::path::Path;
use std::sync::Arc;

use crate::error::AssetError;
use crate::image::{ColorSpace, Image, ImageFormat};
use crate::sampler::FilterMode;

use super::types::{Font, FontGlyph};

/// Atlas dimensions, fixed like the baking buffer of the rasterizer API.
const ATLAS_WIDTH: usize = 512;
const ATLAS_HEIGHT: usize = 512;

/// First baked character (space) and character count (printable ASCII).
const FIRST_CHAR: u8 = 32;
const CHAR_COUNT: u8 = 96;

/// Load a TrueType font and bake printable ASCII into a 512x512 atlas.
pub fn load_ttf(path: &Path, height_px: f32) -> Result<Font, AssetError> {
    let bytes =
        std::fs::read(path).map_err(|e| AssetError::file_not_found(path, e))?;
    bake_ttf(&bytes, height_px)
}

/// Bake TrueType bytes at the given pixel height.
pub fn bake_ttf(bytes: &[u8], height_px: f32) -> Result<Font, AssetError> {
    let rasterizer = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| AssetError::DecodeFailure(e.to_string()))?;

    let mut atlas = vec![0u8; ATLAS_WIDTH * ATLAS_HEIGHT];
    let mut glyphs = std::collections::HashMap::new();

    // Shelf packer over the atlas: left to right, a new row when full.
    let mut pen_x = 0usize;
    let mut pen_y = 0usize;
    let mut row_height = 0usize;

    for code in FIRST_CHAR..FIRST_CHAR + CHAR_COUNT {
        let c = code as char;
        let (metrics, bitmap) = rasterizer.rasterize(c, height_px);

        if pen_x + metrics.width + 1 > ATLAS_WIDTH {
            pen_x = 0;
            pen_y += row_height + 1;
            row_height = 0;
        }
        if pen_y + metrics.height + 1 > ATLAS_HEIGHT {
            return Err(AssetError::DecodeFailure(format!(
                "glyph atlas overflow at '{c}' ({height_px}px exceeds {ATLAS_WIDTH}x{ATLAS_HEIGHT})"
            )));
        }

        for (row_index, row) in bitmap.chunks_exact(metrics.width.max(1)).enumerate() {
            let dst = (pen_y + row_index) * ATLAS_WIDTH + pen_x;
            atlas[dst..dst + row.len()].copy_from_slice(row);
        }

        // Quad corners relative to the pen on the baseline, y growing down.
        let left = metrics.xmin as f32;
        let top = -(metrics.ymin as f32 + metrics.height as f32);
        glyphs.insert(
            c,
            FontGlyph {
                position_top_left: [left, top],
                position_bottom_right: [
                    left + metrics.width as f32,
                    top + metrics.height as f32,
                ],
                position_advance: metrics.advance_width,
                uv_top_left: [
                    pen_x as f32 / ATLAS_WIDTH as f32,
                    pen_y as f32 / ATLAS_HEIGHT as f32,
                ],
                uv_bottom_right: [
                    (pen_x + metrics.width) as f32 / ATLAS_WIDTH as f32,
                    (pen_y + metrics.height) as f32 / ATLAS_HEIGHT as f32,
                ],
            },
        );

        pen_x += metrics.width + 1;
        row_height = row_height.max(metrics.height);
    }

    let image = Arc::new(Image {
        width: ATLAS_WIDTH as u32,
        height: ATLAS_HEIGHT as u32,
        format: ImageFormat::R8,
        color_space: ColorSpace::Linear,
        data: atlas,
    });

    Ok(Font {
        image,
        image_sampler_filter: FilterMode::Linear,
        glyphs,
    })
}
