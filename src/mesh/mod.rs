//! CPU-side mesh data and geometry helpers.

mod tangent;
mod types;

pub use tangent::calculate_tangents;
pub use types::{Joint, Mesh, MeshTopology, Skin, Vertex};
