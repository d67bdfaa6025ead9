//! Model loading: OBJ (with companion MTL) and glTF.

mod obj;
mod types;

pub use obj::{load_mtl, load_obj, parse_mtl, parse_obj};
pub use types::{Model, ModelPrimitive};
