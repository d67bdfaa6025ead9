//! Per-vertex tangent generation from triangle geometry.

use crate::math::Vec3;

use super::types::Mesh;

/// Compute per-vertex tangents for a triangle mesh with positions, normals,
/// UVs, and a triangle-list index buffer.
///
/// For each triangle the edge vectors and UV deltas give a tangent and
/// bitangent direction, accumulated into per-vertex running sums. After all
/// triangles, each accumulated tangent is Gram-Schmidt-orthogonalized
/// against the vertex normal and the handedness sign is derived from the
/// bitangent accumulator.
///
/// Degenerate UV triangles (zero UV-area denominator) produce `inf`/`nan`
/// tangents; they are not clamped here, callers must pre-filter such
/// triangles if they care. Triangles referencing vertices past the end of
/// the vertex list are skipped.
pub fn calculate_tangents(mesh: &mut Mesh) {
    let vertex_count = mesh.vertices.len();
    let mut tan1 = vec![Vec3::zeros(); vertex_count];
    let mut tan2 = vec![Vec3::zeros(); vertex_count];

    for triangle in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let (Some(v0), Some(v1), Some(v2)) = (
            mesh.vertices.get(i0),
            mesh.vertices.get(i1),
            mesh.vertices.get(i2),
        ) else {
            continue;
        };

        let d_pos1 = Vec3::from(v1.position) - Vec3::from(v0.position);
        let d_pos2 = Vec3::from(v2.position) - Vec3::from(v0.position);

        let d_uv1 = [v1.uv[0] - v0.uv[0], v1.uv[1] - v0.uv[1]];
        let d_uv2 = [v2.uv[0] - v0.uv[0], v2.uv[1] - v0.uv[1]];

        let r = 1.0 / (d_uv1[0] * d_uv2[1] - d_uv1[1] * d_uv2[0]);
        let tangent = (d_pos1 * d_uv2[1] - d_pos2 * d_uv1[1]) * r;
        let bitangent = (d_pos2 * d_uv1[0] - d_pos1 * d_uv2[0]) * r;

        for &i in &[i0, i1, i2] {
            tan1[i] += tangent;
            tan2[i] += bitangent;
        }
    }

    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        let n = Vec3::from(vertex.normal);
        let t = tan1[i];

        // Gram-Schmidt orthogonalization against the normal.
        let tangent = (t - n * n.dot(&t)).normalize();

        let handedness = if n.cross(&tangent).dot(&tan2[i]) < 0.0 {
            -1.0
        } else {
            1.0
        };

        vertex.tangent = [tangent.x, tangent.y, tangent.z, handedness];
    }
}
