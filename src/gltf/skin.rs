//! Skin resolution and the joint index space.

use std::collections::HashMap;

use crate::error::AssetError;
use crate::math::Mat4;
use crate::mesh::{Joint, Skin};

use super::accessor;

/// Bijection between dense joint indices and glTF node indices.
///
/// Node indices are opaque to the engine and unstable across files, so
/// skeletal data is re-addressed by dense indices 0..N assigned in
/// first-seen order across every skin of one load. Two skins sharing a
/// joint node therefore see the same dense index, and animation channels
/// resolve their targets through the same space after all skins are built.
#[derive(Debug, Default)]
pub(crate) struct JointIndexSpace {
    by_node: HashMap<usize, u32>,
    by_joint: Vec<usize>,
}

impl JointIndexSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dense index for `node_index`, assigning the next free one on first
    /// sight.
    pub fn get_or_assign(&mut self, node_index: usize) -> u32 {
        if let Some(&existing) = self.by_node.get(&node_index) {
            return existing;
        }
        let assigned = self.by_joint.len() as u32;
        self.by_node.insert(node_index, assigned);
        self.by_joint.push(node_index);
        assigned
    }

    /// Dense index for a node already registered as a joint.
    pub fn index_of(&self, node_index: usize) -> Option<u32> {
        self.by_node.get(&node_index).copied()
    }

    /// Node index backing a dense joint index.
    pub fn node_of(&self, joint_index: u32) -> Option<usize> {
        self.by_joint.get(joint_index as usize).copied()
    }

    /// Number of joints registered so far.
    pub fn len(&self) -> usize {
        self.by_joint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_joint.is_empty()
    }
}

/// Resolve one skin against the node tables built at load start.
///
/// `locals` and `parents` are indexed by glTF node index; `world` is the
/// world transform of the node carrying the skin. Joints are registered in
/// the skin's declared order, but the resolved vec is addressed by dense
/// joint index, matching `root_joint` and the `children` links. Inverse-bind
/// matrices are read from the skin's accessor block-wise (identity when the
/// skin declares none); child links are translated into dense indices,
/// skipping children that are not joints of any skin seen so far. A dense
/// index registered by an earlier skin but not declared here keeps a
/// default joint entry.
pub(crate) fn resolve_skin(
    skin: &gltf_dep::Skin,
    buffers: &[Vec<u8>],
    locals: &[Mat4],
    parents: &[Option<usize>],
    world: &Mat4,
    joint_space: &mut JointIndexSpace,
) -> Result<Skin, AssetError> {
    let mut resolved = Skin::new();
    resolved.inverse_global_transform = world.try_inverse().unwrap_or_else(Mat4::identity);

    let joint_nodes: Vec<usize> = skin.joints().map(|j| j.index()).collect();
    if joint_nodes.is_empty() {
        return Ok(resolved);
    }

    let inverse_bind_matrices = match skin.inverse_bind_matrices() {
        Some(accessor) => accessor::read_mat4s(&accessor, buffers, "inverse bind matrices")?,
        None => vec![Mat4::identity(); joint_nodes.len()],
    };

    for &node_index in &joint_nodes {
        joint_space.get_or_assign(node_index);
    }

    // Declared order decides dense assignment, but the vec itself is laid
    // out by dense index so `root_joint` and `children` address into it.
    resolved.joints = vec![Joint::default(); joint_space.len()];
    for (i, &node_index) in joint_nodes.iter().enumerate() {
        let Some(dense) = joint_space.index_of(node_index) else {
            continue;
        };
        let joint = &mut resolved.joints[dense as usize];
        joint.inverse_bind_matrix = inverse_bind_matrices
            .get(i)
            .copied()
            .unwrap_or_else(Mat4::identity);
        joint.local_transform = locals[node_index];
    }

    // Root joint: the explicit skeleton reference when it is a known joint,
    // otherwise the first joint in declared order.
    let mut root_node = joint_nodes[0];
    if let Some(skeleton) = skin.skeleton() {
        if joint_space.index_of(skeleton.index()).is_some() {
            root_node = skeleton.index();
        }
    }
    resolved.root_joint = joint_space.index_of(root_node).unwrap_or(0);

    for joint_node in skin.joints() {
        let Some(dense) = joint_space.index_of(joint_node.index()) else {
            continue;
        };
        for child in joint_node.children() {
            if let Some(child_dense) = joint_space.index_of(child.index()) {
                resolved.joints[dense as usize].children.push(child_dense);
            }
        }
    }

    // Everything the joint-local transforms are relative to: the product of
    // ancestor local transforms above the root joint.
    let mut base = Mat4::identity();
    let mut ancestor = parents[root_node];
    while let Some(parent) = ancestor {
        base = locals[parent] * base;
        ancestor = parents[parent];
    }
    resolved.base_matrix = base;

    Ok(resolved)
}
