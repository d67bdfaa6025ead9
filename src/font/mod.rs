//! Font loading: TrueType files baked to a glyph atlas.

mod ttf;
mod types;

pub use ttf::{bake_ttf, load_ttf};
pub use types::{Font, FontGlyph};
