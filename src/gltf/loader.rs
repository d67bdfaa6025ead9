//! Internal glTF loading logic.
//!
//! The [`LoadContext`] holds all state spanning one load call: resolved
//! buffer data, the per-node local-transform and parent tables, the joint
//! index space, the image memoizer, and the primitives flattened out of
//! the scene graph so far.

use std::path::{Path, PathBuf};

use gltf_dep::texture::{MagFilter, MinFilter, WrappingMode};

use crate::error::AssetError;
use crate::image::{load_image_file, load_image_memory, ColorSpace, ImageCache};
use crate::material::{Material, MaterialTexture};
use crate::math::{
    mat4_from_column_slice, mat4_from_scale_rotation_translation, normal_matrix, quat_from_array,
    transform_point, transform_vector, Mat4, Vec3,
};
use crate::mesh::{calculate_tangents, Mesh, Vertex};
use crate::model::{Model, ModelPrimitive};
use crate::sampler::{AddressMode, BorderColor, FilterMode, ImageSampler};

use super::accessor;
use super::animation;
use super::skin::{self, JointIndexSpace};

pub(crate) struct LoadContext<'a> {
    /// Resolved buffer data, one byte vector per glTF buffer.
    buffers: Vec<Vec<u8>>,
    /// Directory external URIs resolve against.
    base_dir: Option<&'a Path>,

    /// Local transform per glTF node index.
    locals: Vec<Mat4>,
    /// Parent node index per glTF node index, `None` for roots.
    parents: Vec<Option<usize>>,

    joint_space: JointIndexSpace,
    image_cache: ImageCache,

    /// Primitives flattened out of the scene graph, in traversal order.
    primitives: Vec<ModelPrimitive>,
}

impl<'a> LoadContext<'a> {
    /// Build the per-node tables and an empty context.
    pub fn new(
        document: &gltf_dep::Document,
        buffers: Vec<Vec<u8>>,
        base_dir: Option<&'a Path>,
    ) -> Self {
        let node_count = document.nodes().len();
        let mut locals = vec![Mat4::identity(); node_count];
        let mut parents = vec![None; node_count];
        for node in document.nodes() {
            locals[node.index()] = local_matrix(&node);
            for child in node.children() {
                parents[child.index()] = Some(node.index());
            }
        }

        Self {
            buffers,
            base_dir,
            locals,
            parents,
            joint_space: JointIndexSpace::new(),
            image_cache: ImageCache::new(),
            primitives: Vec::new(),
        }
    }

    /// Pre-order walk: extract primitives at mesh nodes, resolve skins at
    /// skinned nodes, then recurse with the accumulated world transform.
    pub fn walk_node(
        &mut self,
        node: &gltf_dep::Node,
        parent_world: &Mat4,
    ) -> Result<(), AssetError> {
        let world = parent_world * self.locals[node.index()];

        if let Some(mesh) = node.mesh() {
            let skinned = node.skin().is_some();
            for primitive in mesh.primitives() {
                let extracted = self.extract_primitive(&primitive, &world, skinned)?;
                self.primitives.push(extracted);
            }
        }

        if let Some(node_skin) = node.skin() {
            let resolved = skin::resolve_skin(
                &node_skin,
                &self.buffers,
                &self.locals,
                &self.parents,
                &world,
                &mut self.joint_space,
            )?;
            for primitive in &mut self.primitives {
                primitive.mesh.skin = Some(resolved.clone());
            }
        }

        for child in node.children() {
            self.walk_node(&child, &world)?;
        }
        Ok(())
    }

    /// Bind one animation and append it to every primitive's mesh.
    pub fn bind_animation(&mut self, anim: &gltf_dep::Animation) -> Result<(), AssetError> {
        let bound = animation::bind_animation(anim, &self.buffers, &self.joint_space)?;
        for primitive in &mut self.primitives {
            primitive.mesh.animations.push(bound.clone());
        }
        Ok(())
    }

    pub fn into_model(self) -> Model {
        Model {
            primitives: self.primitives,
        }
    }

    /// Read one primitive's attribute streams into a mesh and resolve its
    /// material.
    ///
    /// Non-skinned vertices are baked into world space (normals via the
    /// inverse-transpose); skinned vertices stay in mesh space, compensated
    /// at runtime by the skin's inverse global transform.
    fn extract_primitive(
        &mut self,
        primitive: &gltf_dep::Primitive,
        world: &Mat4,
        skinned: bool,
    ) -> Result<ModelPrimitive, AssetError> {
        use gltf_dep::Semantic;

        let position_accessor = primitive.get(&Semantic::Positions).ok_or_else(|| {
            AssetError::DecodeFailure("mesh primitive declares no POSITION attribute".into())
        })?;
        let vertex_count = position_accessor.count();
        let positions = accessor::read_f32(&position_accessor, &self.buffers, "POSITION")?;

        let normals = primitive
            .get(&Semantic::Normals)
            .map(|a| accessor::read_f32(&a, &self.buffers, "NORMAL"))
            .transpose()?;
        let uvs = primitive
            .get(&Semantic::TexCoords(0))
            .map(|a| accessor::read_f32(&a, &self.buffers, "TEXCOORD_0"))
            .transpose()?;
        let colors = primitive
            .get(&Semantic::Colors(0))
            .map(|a| {
                let width = a.dimensions().multiplicity();
                accessor::read_f32(&a, &self.buffers, "COLOR_0").map(|v| (v, width))
            })
            .transpose()?;
        let tangents = primitive
            .get(&Semantic::Tangents)
            .map(|a| accessor::read_f32(&a, &self.buffers, "TANGENT"))
            .transpose()?;
        let weights = primitive
            .get(&Semantic::Weights(0))
            .map(|a| accessor::read_f32(&a, &self.buffers, "WEIGHTS_0"))
            .transpose()?;
        let joints = match primitive.get(&Semantic::Joints(0)) {
            Some(a) => match accessor::read_joints(&a, &self.buffers) {
                Ok(j) => Some(j),
                Err(e @ AssetError::UnsupportedComponentType { .. }) => {
                    log::warn!("{e}, leaving joint indices zeroed");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        let normal_transform = normal_matrix(world);

        let mut mesh = Mesh::new();
        mesh.vertices.reserve(vertex_count);
        for i in 0..vertex_count {
            let mut vertex = Vertex::default();

            let position = Vec3::new(
                fetch(&positions, 3 * i),
                fetch(&positions, 3 * i + 1),
                fetch(&positions, 3 * i + 2),
            );
            vertex.position = if skinned {
                position.into()
            } else {
                transform_point(world, position).into()
            };

            if let Some(normals) = &normals {
                let normal = Vec3::new(
                    fetch(normals, 3 * i),
                    fetch(normals, 3 * i + 1),
                    fetch(normals, 3 * i + 2),
                );
                vertex.normal = if skinned {
                    normal.into()
                } else {
                    transform_vector(&normal_transform, normal).normalize().into()
                };
            } else {
                vertex.normal = [0.0; 3];
            }

            if let Some(uvs) = &uvs {
                vertex.uv = [fetch(uvs, 2 * i), fetch(uvs, 2 * i + 1)];
            }
            if let Some((colors, width)) = &colors {
                vertex.color = [
                    fetch(colors, width * i),
                    fetch(colors, width * i + 1),
                    fetch(colors, width * i + 2),
                ];
            }
            if let Some(tangents) = &tangents {
                vertex.tangent = [
                    fetch(tangents, 4 * i),
                    fetch(tangents, 4 * i + 1),
                    fetch(tangents, 4 * i + 2),
                    fetch(tangents, 4 * i + 3),
                ];
            }
            if let Some(joints) = &joints {
                vertex.joints = joints.get(i).copied().unwrap_or([0; 4]);
            }
            if let Some(weights) = &weights {
                vertex.weights = [
                    fetch(weights, 4 * i),
                    fetch(weights, 4 * i + 1),
                    fetch(weights, 4 * i + 2),
                    fetch(weights, 4 * i + 3),
                ];
            }

            mesh.vertices.push(vertex);
        }

        match primitive.indices() {
            Some(index_accessor) => match accessor::read_indices(&index_accessor, &self.buffers) {
                Ok(indices) => mesh.indices = indices,
                Err(e @ AssetError::UnsupportedComponentType { .. }) => {
                    // Non-fatal, but the geometry silently degrades.
                    log::warn!("{e}, primitive keeps an empty index list");
                }
                Err(e) => return Err(e),
            },
            // Unindexed triangle list.
            None => mesh.indices = (0..vertex_count as u32).collect(),
        }

        let limit = vertex_count as u32;
        if mesh.indices.iter().any(|&i| i >= limit) {
            log::warn!("primitive index list references vertices past the end, dropping out-of-range triangles");
            mesh.indices = mesh
                .indices
                .chunks_exact(3)
                .filter(|triangle| triangle.iter().all(|&i| i < limit))
                .flatten()
                .copied()
                .collect();
        }

        if tangents.is_none() && uvs.is_some() && normals.is_some() && !mesh.indices.is_empty() {
            calculate_tangents(&mut mesh);
            // Supplied tangents use the opposite winding convention.
            for vertex in &mut mesh.vertices {
                vertex.tangent[3] *= -1.0;
            }
        }

        let material = self.resolve_material(&primitive.material())?;

        Ok(ModelPrimitive { mesh, material })
    }

    /// Resolve a glTF material into texture slots, synthesizing 1x1 factor
    /// images through the memoizer where no texture is bound.
    fn resolve_material(
        &mut self,
        material: &gltf_dep::Material,
    ) -> Result<Material, AssetError> {
        let mut resolved = Material::new();
        // The implicit default material binds nothing.
        if material.index().is_none() {
            return Ok(resolved);
        }

        let pbr = material.pbr_metallic_roughness();

        if let Some(info) = pbr.base_color_texture() {
            resolved.diffuse_texture = Some(self.texture_slot(&info.texture(), ColorSpace::Srgb)?);
        } else {
            let image = self
                .image_cache
                .solid_color(&pbr.base_color_factor(), ColorSpace::Srgb)?;
            resolved.diffuse_texture =
                Some(MaterialTexture::new(image, ImageSampler::nearest()));
        }

        if let Some(info) = pbr.metallic_roughness_texture() {
            let slot = self.texture_slot(&info.texture(), ColorSpace::Linear)?;
            resolved.metalness_texture = Some(slot.clone());
            resolved.roughness_texture = Some(slot);
        } else {
            // Packed layout: roughness in green, metalness in blue.
            let factors = [0.0, pbr.roughness_factor(), pbr.metallic_factor(), 0.0];
            let image = self.image_cache.solid_color(&factors, ColorSpace::Linear)?;
            let slot = MaterialTexture::new(image, ImageSampler::nearest());
            resolved.metalness_texture = Some(slot.clone());
            resolved.roughness_texture = Some(slot);
        }

        if let Some(normal) = material.normal_texture() {
            resolved.normal_texture =
                Some(self.texture_slot(&normal.texture(), ColorSpace::Linear)?);
        }

        if let Some(info) = material.emissive_texture() {
            resolved.emissive_texture =
                Some(self.texture_slot(&info.texture(), ColorSpace::Srgb)?);
        } else {
            let image = self
                .image_cache
                .solid_color(&material.emissive_factor(), ColorSpace::Srgb)?;
            resolved.emissive_texture =
                Some(MaterialTexture::new(image, ImageSampler::nearest()));
        }
        if let Some(strength) = material.emissive_strength() {
            resolved.emissive_factor = strength;
        }

        if let Some(occlusion) = material.occlusion_texture() {
            resolved.occlusion_texture =
                Some(self.texture_slot(&occlusion.texture(), ColorSpace::Linear)?);
        }

        if material.alpha_mode() == gltf_dep::material::AlphaMode::Mask {
            resolved.alpha_cutoff = material.alpha_cutoff().unwrap_or(0.5);
        }
        if let Some(ior) = material.ior() {
            resolved.index_of_refraction = ior;
        }

        Ok(resolved)
    }

    /// One texture slot: the memoized image plus the translated sampler.
    fn texture_slot(
        &mut self,
        texture: &gltf_dep::Texture,
        color_space: ColorSpace,
    ) -> Result<MaterialTexture, AssetError> {
        let image = match texture.source().source() {
            gltf_dep::image::Source::Uri { uri, .. } => {
                if let Some(encoded) = strip_data_uri(uri) {
                    let encoded = encoded.to_string();
                    self.image_cache.get_or_create(uri, move || {
                        let bytes = base64_decode(&encoded).ok_or_else(|| {
                            AssetError::DecodeFailure("invalid base64 in image data URI".into())
                        })?;
                        let mut image = load_image_memory(&bytes)?;
                        image.color_space = color_space;
                        Ok(image)
                    })?
                } else {
                    let path = match self.base_dir {
                        Some(dir) => dir.join(uri),
                        None => PathBuf::from(uri),
                    };
                    self.image_cache.get_or_create(uri, || {
                        let mut image = load_image_file(&path)?;
                        image.color_space = color_space;
                        Ok(image)
                    })?
                }
            }
            gltf_dep::image::Source::View { view, .. } => {
                let key = format!("view:{}", view.index());
                let buffers = &self.buffers;
                self.image_cache.get_or_create(&key, || {
                    let data = buffers.get(view.buffer().index()).ok_or_else(|| {
                        AssetError::DecodeFailure("image buffer view not resolved".into())
                    })?;
                    let bytes =
                        data.get(view.offset()..view.offset() + view.length()).ok_or_else(
                            || AssetError::DecodeFailure("image buffer view out of range".into()),
                        )?;
                    let mut image = load_image_memory(bytes)?;
                    image.color_space = color_space;
                    Ok(image)
                })?
            }
        };

        let sampler = texture.sampler();
        let sampler = if sampler.index().is_some() {
            ImageSampler {
                mag_filter: sampler
                    .mag_filter()
                    .map(map_mag_filter)
                    .unwrap_or(FilterMode::Linear),
                min_filter: sampler
                    .min_filter()
                    .map(map_min_filter)
                    .unwrap_or(FilterMode::Linear),
                mipmap_filter: sampler
                    .min_filter()
                    .map(map_mipmap_filter)
                    .unwrap_or(FilterMode::Linear),
                address_mode_u: map_wrap(sampler.wrap_s()),
                address_mode_v: map_wrap(sampler.wrap_t()),
                address_mode_w: AddressMode::ClampToEdge,
                border_color: BorderColor::OpaqueBlack,
                anisotropy_level: 16.0,
            }
        } else {
            ImageSampler::trilinear()
        };

        Ok(MaterialTexture::new(image, sampler))
    }
}

/// The node's local transform: an explicit matrix verbatim, else `T * R * S`.
fn local_matrix(node: &gltf_dep::Node) -> Mat4 {
    match node.transform() {
        gltf_dep::scene::Transform::Matrix { matrix } => {
            let mut flat = [0.0f32; 16];
            for (c, column) in matrix.iter().enumerate() {
                flat[c * 4..c * 4 + 4].copy_from_slice(column);
            }
            mat4_from_column_slice(&flat)
        }
        gltf_dep::scene::Transform::Decomposed {
            translation,
            rotation,
            scale,
        } => mat4_from_scale_rotation_translation(
            Vec3::from(scale),
            quat_from_array(rotation),
            Vec3::from(translation),
        ),
    }
}

fn fetch(values: &[f32], index: usize) -> f32 {
    values.get(index).copied().unwrap_or(0.0)
}

fn map_mag_filter(filter: MagFilter) -> FilterMode {
    match filter {
        MagFilter::Nearest => FilterMode::Nearest,
        MagFilter::Linear => FilterMode::Linear,
    }
}

/// Minification filter with the mipmap variants collapsed away.
fn map_min_filter(filter: MinFilter) -> FilterMode {
    match filter {
        MinFilter::Nearest
        | MinFilter::NearestMipmapNearest
        | MinFilter::NearestMipmapLinear => FilterMode::Nearest,
        MinFilter::Linear | MinFilter::LinearMipmapNearest | MinFilter::LinearMipmapLinear => {
            FilterMode::Linear
        }
    }
}

/// Mipmap filter taken from the min filter's mipmap variant.
fn map_mipmap_filter(filter: MinFilter) -> FilterMode {
    match filter {
        MinFilter::NearestMipmapLinear | MinFilter::LinearMipmapLinear => FilterMode::Linear,
        _ => FilterMode::Nearest,
    }
}

fn map_wrap(wrap: WrappingMode) -> AddressMode {
    match wrap {
        WrappingMode::ClampToEdge => AddressMode::ClampToEdge,
        WrappingMode::MirroredRepeat => AddressMode::MirrorRepeat,
        WrappingMode::Repeat => AddressMode::Repeat,
    }
}

/// Resolve all buffer data for a parsed document.
///
/// GLB files carry their first buffer as the binary chunk; `.gltf` buffers
/// are either base64 data URIs or external files relative to `base_dir`.
pub(crate) fn resolve_buffers(
    document: &gltf_dep::Document,
    mut blob: Option<Vec<u8>>,
    base_dir: Option<&Path>,
) -> Result<Vec<Vec<u8>>, AssetError> {
    let mut buffers = Vec::new();
    for buffer in document.buffers() {
        match buffer.source() {
            gltf_dep::buffer::Source::Bin => {
                let data = blob.take().ok_or_else(|| {
                    AssetError::DecodeFailure(
                        "buffer references the binary chunk, but the file has none".into(),
                    )
                })?;
                buffers.push(data);
            }
            gltf_dep::buffer::Source::Uri(uri) => {
                if let Some(encoded) = strip_data_uri(uri) {
                    let data = base64_decode(encoded).ok_or_else(|| {
                        AssetError::DecodeFailure("invalid base64 in buffer data URI".into())
                    })?;
                    buffers.push(data);
                } else {
                    let path = match base_dir {
                        Some(dir) => dir.join(uri),
                        None => PathBuf::from(uri),
                    };
                    buffers
                        .push(std::fs::read(&path).map_err(|e| AssetError::file_not_found(&path, e))?);
                }
            }
        }
    }
    Ok(buffers)
}

/// The base64 payload of a `data:` URI, if `uri` is one.
fn strip_data_uri(uri: &str) -> Option<&str> {
    let rest = uri.strip_prefix("data:")?;
    let payload_start = rest.find(";base64,")?;
    Some(&rest[payload_start + ";base64,".len()..])
}

fn base64_sextet(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Standard-alphabet base64 decoder for data URIs.
fn base64_decode(input: &str) -> Option<Vec<u8>> {
    let input: Vec<u8> = input
        .bytes()
        .filter(|b| !b" \r\n".contains(b))
        .collect();
    let mut result = Vec::with_capacity(input.len() / 4 * 3);

    for chunk in input.chunks(4) {
        let mut bits = 0u32;
        let mut padding = 0usize;
        for (i, &byte) in chunk.iter().enumerate() {
            let sextet = if byte == b'=' {
                padding += 1;
                0
            } else {
                base64_sextet(byte)? as u32
            };
            bits |= sextet << (18 - 6 * i);
        }

        result.push((bits >> 16) as u8);
        if padding < 2 && chunk.len() > 2 {
            result.push((bits >> 8) as u8);
        }
        if padding < 1 && chunk.len() > 3 {
            result.push(bits as u8);
        }
    }

    Some(result)
}
