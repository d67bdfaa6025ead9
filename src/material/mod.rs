//! PBR material data.

mod types;

pub use types::{Material, MaterialTexture};
