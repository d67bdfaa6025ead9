//! Skin resolution and animation binding scenarios.

use crate::animation::{AnimationInterpolation, AnimationTransform};
use crate::gltf::load_model_slice;
use crate::math::Mat4;

use super::{buffer_uri, f32_bytes, init_logging};

/// Two skinned mesh nodes sharing one skeleton, plus two animations.
///
/// Node layout: node 4 (translation (0,5,0)) parents the joint root node 0
/// (translation (0,1,0)), which parents joint node 1. Nodes 2 and 3 carry
/// the same mesh with skins 0 and 1, both declaring joints [0, 1]. Node 3
/// is translated by (10,0,0).
fn skinned_document() -> String {
    let mut buffer = Vec::new();

    // Positions.
    buffer.extend(f32_bytes(&[
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ]));
    // Weights.
    buffer.extend(f32_bytes(&[
        0.25, 0.25, 0.25, 0.25, //
        1.0, 0.0, 0.0, 0.0, //
        0.5, 0.5, 0.0, 0.0,
    ]));
    // Inverse bind matrices: identity, then translation by (0,-1,0).
    buffer.extend(f32_bytes(&[
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]));
    buffer.extend(f32_bytes(&[
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 1.0,
    ]));
    // Joints, 8-bit: distinct values per slot catch misread offsets.
    buffer.extend([3u8, 2, 1, 0]);
    buffer.extend([0u8, 1, 2, 3]);
    buffer.extend([1u8, 1, 1, 1]);
    // Rotation/translation keyframe times, declared max 2.5.
    buffer.extend(f32_bytes(&[0.0, 1.0, 2.0]));
    // Rotation quaternions (x, y, z, w).
    buffer.extend(f32_bytes(&[
        0.1, 0.2, 0.3, 0.9, //
        0.0, 0.0, 0.0, 1.0, //
        0.0, 0.7071068, 0.0, 0.7071068,
    ]));
    // Translations.
    buffer.extend(f32_bytes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]));
    // Scale keyframe times without a declared max.
    buffer.extend(f32_bytes(&[0.25, 0.75]));
    // Scales.
    buffer.extend(f32_bytes(&[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]));

    format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "scene": 0,
            "scenes": [{{"nodes": [4, 2, 3]}}],
            "nodes": [
                {{"translation": [0.0, 1.0, 0.0], "children": [1]}},
                {{}},
                {{"mesh": 0, "skin": 0}},
                {{"mesh": 0, "skin": 1, "translation": [10.0, 0.0, 0.0]}},
                {{"translation": [0.0, 5.0, 0.0], "children": [0]}}
            ],
            "skins": [
                {{"joints": [0, 1], "inverseBindMatrices": 3, "skeleton": 0}},
                {{"joints": [0, 1], "inverseBindMatrices": 3}}
            ],
            "meshes": [{{"primitives": [{{"attributes": {{
                "POSITION": 0, "WEIGHTS_0": 1, "JOINTS_0": 2
            }}}}]}}],
            "animations": [
                {{
                    "channels": [
                        {{"sampler": 0, "target": {{"node": 1, "path": "rotation"}}}},
                        {{"sampler": 1, "target": {{"node": 3, "path": "translation"}}}},
                        {{"sampler": 2, "target": {{"node": 0, "path": "translation"}}}}
                    ],
                    "samplers": [
                        {{"input": 4, "output": 5, "interpolation": "LINEAR"}},
                        {{"input": 4, "output": 6, "interpolation": "STEP"}},
                        {{"input": 4, "output": 6, "interpolation": "LINEAR"}}
                    ]
                }},
                {{
                    "channels": [
                        {{"sampler": 0, "target": {{"node": 0, "path": "scale"}}}}
                    ],
                    "samplers": [
                        {{"input": 7, "output": 8, "interpolation": "STEP"}}
                    ]
                }}
            ],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}},
                {{"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC4"}},
                {{"bufferView": 3, "componentType": 5121, "count": 3, "type": "VEC4"}},
                {{"bufferView": 2, "componentType": 5126, "count": 2, "type": "MAT4"}},
                {{"bufferView": 4, "componentType": 5126, "count": 3, "type": "SCALAR",
                  "min": [0.0], "max": [2.5]}},
                {{"bufferView": 5, "componentType": 5126, "count": 3, "type": "VEC4"}},
                {{"bufferView": 6, "componentType": 5126, "count": 3, "type": "VEC3"}},
                {{"bufferView": 7, "componentType": 5126, "count": 2, "type": "SCALAR"}},
                {{"bufferView": 8, "componentType": 5126, "count": 2, "type": "VEC3"}}
            ],
            "bufferViews": [
                {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
                {{"buffer": 0, "byteOffset": 36, "byteLength": 48}},
                {{"buffer": 0, "byteOffset": 84, "byteLength": 128}},
                {{"buffer": 0, "byteOffset": 212, "byteLength": 12}},
                {{"buffer": 0, "byteOffset": 224, "byteLength": 12}},
                {{"buffer": 0, "byteOffset": 236, "byteLength": 48}},
                {{"buffer": 0, "byteOffset": 284, "byteLength": 36}},
                {{"buffer": 0, "byteOffset": 320, "byteLength": 8}},
                {{"buffer": 0, "byteOffset": 328, "byteLength": 24}}
            ],
            "buffers": [{{"byteLength": 352, "uri": "{}"}}]
        }}"#,
        buffer_uri(&buffer)
    )
}

#[test]
fn shared_skeleton_resolves_to_identical_dense_indices() {
    let model = load_model_slice(skinned_document().as_bytes(), None).unwrap();
    assert_eq!(model.primitives.len(), 2);

    for primitive in &model.primitives {
        let skin = primitive.mesh.skin.as_ref().expect("skinned primitive");
        assert_eq!(skin.joints.len(), 2);
        // First-seen assignment: node 0 -> 0, node 1 -> 1, reused by skin 1.
        assert_eq!(skin.root_joint, 0);
        assert_eq!(skin.joints[0].children, vec![1]);
        assert!(skin.joints[1].children.is_empty());
    }
}

#[test]
fn skin_matrices() {
    let model = load_model_slice(skinned_document().as_bytes(), None).unwrap();
    // The last resolved skin (node 3's) is attached to every primitive.
    let skin = model.primitives[0].mesh.skin.as_ref().unwrap();

    // Everything above the root joint: node 4's translation.
    let expected_base = Mat4::new_translation(&[0.0, 5.0, 0.0].into());
    assert!((skin.base_matrix - expected_base).norm() < 1e-6);

    // Joint locals are raw node transforms.
    let expected_local = Mat4::new_translation(&[0.0, 1.0, 0.0].into());
    assert!((skin.joints[0].local_transform - expected_local).norm() < 1e-6);
    assert!((skin.joints[1].local_transform - Mat4::identity()).norm() < 1e-6);

    // Second inverse-bind block read at the 16-float boundary.
    let expected_ibm = Mat4::new_translation(&[0.0, -1.0, 0.0].into());
    assert!((skin.joints[1].inverse_bind_matrix - expected_ibm).norm() < 1e-6);
    assert!((skin.joints[0].inverse_bind_matrix - Mat4::identity()).norm() < 1e-6);

    // Inverse of the skinned node's world transform (node 3).
    let expected_inverse = Mat4::new_translation(&[-10.0, 0.0, 0.0].into());
    assert!((skin.inverse_global_transform - expected_inverse).norm() < 1e-6);
}

#[test]
fn skinned_vertices_stay_in_mesh_space() {
    let model = load_model_slice(skinned_document().as_bytes(), None).unwrap();
    // Node 3 is translated, but its skinned vertices keep raw positions.
    let mesh = &model.primitives[1].mesh;
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);

    // Joint quadruples read with component offsets 0 through 3.
    assert_eq!(mesh.vertices[0].joints, [3, 2, 1, 0]);
    assert_eq!(mesh.vertices[1].joints, [0, 1, 2, 3]);
    assert_eq!(mesh.vertices[0].weights, [0.25, 0.25, 0.25, 0.25]);
}

#[test]
fn opposite_declaration_orders_share_dense_addressing() {
    // Skin 0 declares joints [0, 1], skin 1 declares the same nodes as
    // [1, 0]. Dense assignment is first-seen, so the resolved joint vecs
    // must line up by dense index either way, with each inverse-bind block
    // following its declared joint.
    let mut buffer = f32_bytes(&[
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ]);
    let identity = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];
    let lowered = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 1.0,
    ];
    // Skin 0 order: node 0, node 1.
    buffer.extend(f32_bytes(&identity));
    buffer.extend(f32_bytes(&lowered));
    // Skin 1 order: node 1, node 0.
    buffer.extend(f32_bytes(&lowered));
    buffer.extend(f32_bytes(&identity));

    let document = format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "scene": 0,
            "scenes": [{{"nodes": [0, 2, 3]}}],
            "nodes": [
                {{"translation": [0.0, 1.0, 0.0], "children": [1]}},
                {{}},
                {{"mesh": 0, "skin": 0}},
                {{"mesh": 0, "skin": 1}}
            ],
            "skins": [
                {{"joints": [0, 1], "inverseBindMatrices": 1}},
                {{"joints": [1, 0], "inverseBindMatrices": 2}}
            ],
            "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}}}]}}],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}},
                {{"bufferView": 1, "componentType": 5126, "count": 2, "type": "MAT4"}},
                {{"bufferView": 2, "componentType": 5126, "count": 2, "type": "MAT4"}}
            ],
            "bufferViews": [
                {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
                {{"buffer": 0, "byteOffset": 36, "byteLength": 128}},
                {{"buffer": 0, "byteOffset": 164, "byteLength": 128}}
            ],
            "buffers": [{{"byteLength": 292, "uri": "{}"}}]
        }}"#,
        buffer_uri(&buffer)
    );

    let model = load_model_slice(document.as_bytes(), None).unwrap();
    // The last resolved skin (skin 1, declared [1, 0]) is the one attached.
    let skin = model.primitives[0].mesh.skin.as_ref().unwrap();

    assert_eq!(skin.joints.len(), 2);
    // Dense 0 is still node 0: its local transform, children, and the
    // inverse-bind block at declared position 1.
    let expected_local = Mat4::new_translation(&[0.0, 1.0, 0.0].into());
    assert!((skin.joints[0].local_transform - expected_local).norm() < 1e-6);
    assert_eq!(skin.joints[0].children, vec![1]);
    assert!((skin.joints[0].inverse_bind_matrix - Mat4::identity()).norm() < 1e-6);

    let expected_ibm = Mat4::new_translation(&[0.0, -1.0, 0.0].into());
    assert!((skin.joints[1].inverse_bind_matrix - expected_ibm).norm() < 1e-6);
    assert!(skin.joints[1].children.is_empty());

    // No skeleton reference: the root is skin 1's first declared joint,
    // node 1, which is dense index 1.
    assert_eq!(skin.root_joint, 1);
    // Base matrix accumulates the ancestors above that root: node 0.
    assert!((skin.base_matrix - expected_local).norm() < 1e-6);
}

#[test]
fn float_joint_stream_falls_back_to_zeroed_joints() {
    init_logging();

    // JOINTS_0 declared as floats is outside the recognized component set;
    // the mesh still loads, with joint indices zeroed.
    let mut buffer = f32_bytes(&[
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ]);
    buffer.extend(f32_bytes(&[
        3.0, 2.0, 1.0, 0.0, //
        0.0, 1.0, 2.0, 3.0, //
        1.0, 1.0, 1.0, 1.0,
    ]));

    let document = format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "scene": 0,
            "scenes": [{{"nodes": [0]}}],
            "nodes": [{{"mesh": 0}}],
            "meshes": [{{"primitives": [{{"attributes": {{
                "POSITION": 0, "JOINTS_0": 1
            }}}}]}}],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}},
                {{"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC4"}}
            ],
            "bufferViews": [
                {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
                {{"buffer": 0, "byteOffset": 36, "byteLength": 48}}
            ],
            "buffers": [{{"byteLength": 84, "uri": "{}"}}]
        }}"#,
        buffer_uri(&buffer)
    );

    let model = load_model_slice(document.as_bytes(), None).unwrap();
    let mesh = &model.primitives[0].mesh;
    assert_eq!(mesh.vertex_count(), 3);
    for vertex in &mesh.vertices {
        assert_eq!(vertex.joints, [0, 0, 0, 0]);
    }
}

#[test]
fn animation_channels_bind_to_dense_joints() {
    let model = load_model_slice(skinned_document().as_bytes(), None).unwrap();
    let mesh = &model.primitives[0].mesh;
    assert_eq!(mesh.animations.len(), 2);

    let first = &mesh.animations[0];
    // Duration comes from the input accessor's declared max.
    assert!((first.duration - 2.5).abs() < 1e-6);
    // The channel targeting the non-joint mesh node was skipped.
    assert_eq!(first.channel_count(), 2);

    let rotation = &first.joint_channels[&1][0];
    assert_eq!(rotation.interpolation, AnimationInterpolation::Linear);
    assert_eq!(rotation.transform, AnimationTransform::Rotation);
    assert_eq!(rotation.keyframes.len(), 3);
    // Source (x,y,z,w) reordered to (w,x,y,z).
    assert_eq!(rotation.keyframes[0].value, [0.9, 0.1, 0.2, 0.3]);
    assert_eq!(rotation.keyframes[1].timestamp, 1.0);

    let translation = &first.joint_channels[&0][0];
    assert_eq!(translation.transform, AnimationTransform::Translation);
    // 3-vectors padded with a trailing zero.
    assert_eq!(translation.keyframes[1].value, [4.0, 5.0, 6.0, 0.0]);

    let second = &mesh.animations[1];
    // No declared max: the last keyframe timestamp decides.
    assert!((second.duration - 0.75).abs() < 1e-6);
    let scale = &second.joint_channels[&0][0];
    assert_eq!(scale.interpolation, AnimationInterpolation::Step);
    assert_eq!(scale.transform, AnimationTransform::Scale);
    assert_eq!(scale.keyframes[1].value, [2.0, 2.0, 2.0, 0.0]);
}
