//! CPU-side mesh, vertex, and skin data structures.

use crate::animation::Animation;
use crate::math::Mat4;

/// How vertices are assembled into primitives.
///
/// The loaders only emit triangle lists; the enum exists so the engine can
/// keep the tag alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeshTopology {
    /// Every three indices form a triangle.
    #[default]
    TriangleList,
}

/// A single mesh vertex.
///
/// Plain arrays and a `repr(C)` layout so vertex slices can be uploaded
/// byte-wise via `bytemuck`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position, world-space for non-skinned meshes.
    pub position: [f32; 3],
    /// Normal, transformed by the inverse-transpose of the world matrix and
    /// renormalized. Zero when the source declared no normals.
    pub normal: [f32; 3],
    /// Texture coordinates. Defaults to the center of the texture.
    pub uv: [f32; 2],
    /// Vertex color. Defaults to black.
    pub color: [f32; 3],
    /// Tangent direction (xyz) and handedness sign (w).
    pub tangent: [f32; 4],
    /// Up to four joint indices into the mesh's skin.
    pub joints: [u32; 4],
    /// Up to four joint weights matching [`joints`](Self::joints).
    pub weights: [f32; 4],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0; 3],
            uv: [0.5, 0.5],
            color: [0.0; 3],
            tangent: [0.5, 0.5, 0.5, 1.0],
            joints: [0; 4],
            weights: [0.0; 4],
        }
    }
}

/// A joint in a skin's skeletal hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Maps mesh-space to joint-space at bind time.
    pub inverse_bind_matrix: Mat4,
    /// Local transform relative to the parent joint.
    pub local_transform: Mat4,
    /// Child joints as dense joint indices.
    pub children: Vec<u32>,
}

impl Default for Joint {
    fn default() -> Self {
        Self {
            inverse_bind_matrix: Mat4::identity(),
            local_transform: Mat4::identity(),
            children: Vec::new(),
        }
    }
}

/// A skin binding a mesh to a joint hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    /// Joints addressed by dense joint index. A dense index registered by
    /// another skin but not declared by this one holds a default entry.
    pub joints: Vec<Joint>,
    /// Dense index of the root joint.
    pub root_joint: u32,
    /// Product of the ancestor local transforms above the root joint:
    /// everything the joint-local transforms are expressed relative to.
    pub base_matrix: Mat4,
    /// Inverse of the skinned node's world transform.
    pub inverse_global_transform: Mat4,
}

impl Skin {
    /// Create an empty skin with identity matrices.
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            root_joint: 0,
            base_matrix: Mat4::identity(),
            inverse_global_transform: Mat4::identity(),
        }
    }
}

/// A CPU-side triangle mesh with optional skin and animations.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Primitive topology.
    pub topology: MeshTopology,
    /// Ordered vertex list.
    pub vertices: Vec<Vertex>,
    /// Ordered triangle-list index list. Every value must be below
    /// `vertices.len()`.
    pub indices: Vec<u32>,
    /// The skin deforming this mesh, if any.
    pub skin: Option<Skin>,
    /// Animations targeting the skin's joints.
    pub animations: Vec<Animation>,
}

impl Mesh {
    /// Create an empty triangle-list mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}
