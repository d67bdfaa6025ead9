//! Model data types.

use crate::material::Material;
use crate::mesh::Mesh;

/// One drawable unit: a mesh plus the material bound to it.
#[derive(Debug, Clone, Default)]
pub struct ModelPrimitive {
    /// The geometry.
    pub mesh: Mesh,
    /// The material. Default (textureless) when the source bound none.
    pub material: Material,
}

/// A loaded model: the flattened list of primitives from the scene graph.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// All primitives in scene-graph traversal order.
    pub primitives: Vec<ModelPrimitive>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no primitive was loaded.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
