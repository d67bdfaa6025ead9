//! OBJ and companion MTL parsing.
//!
//! Line-oriented ASCII with space-delimited tokens. Recognized directives:
//! `v`, `vn`, `vt`, `f` (triangle/quad/n-gon, fan-triangulated), `o` and
//! `usemtl` (primitive splits), `mtllib`, and `#` comments. Face vertex
//! references are 1-based and of the form `v`, `v/vt`, `v/vt/vn` or
//! `v//vn`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::AssetError;
use crate::image::{load_image_file, ColorSpace, ImageCache};
use crate::material::{Material, MaterialTexture};
use crate::mesh::{calculate_tangents, Vertex};
use crate::sampler::ImageSampler;

use super::types::{Model, ModelPrimitive};

/// Load an OBJ file, resolving any `mtllib` relative to its directory.
pub fn load_obj(path: &Path) -> Result<Model, AssetError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| AssetError::file_not_found(path, e))?;
    let mut cache = ImageCache::new();
    parse_obj(&source, path.parent(), &mut cache)
}

/// Parse OBJ text. `base_dir` anchors `mtllib`/`map_Kd` path resolution.
pub fn parse_obj(
    source: &str,
    base_dir: Option<&Path>,
    cache: &mut ImageCache,
) -> Result<Model, AssetError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();

    let mut model = Model::new();
    model.primitives.push(ModelPrimitive::default());

    let mut unique_vertices: HashMap<String, u32> = HashMap::new();
    let mut mtl_materials: HashMap<String, Material> = HashMap::new();
    let mut has_normals = false;
    let mut has_uvs = false;

    for line in source.lines() {
        let tokens: Vec<&str> = line.split(' ').filter(|t| !t.is_empty()).collect();
        let Some(&directive) = tokens.first() else {
            continue;
        };
        if directive.starts_with('#') {
            continue;
        }

        match directive {
            "v" => positions.push(parse_vec3(&tokens)),
            "vn" => normals.push(parse_vec3(&tokens)),
            "vt" => uvs.push(parse_vec2(&tokens)),
            "o" => {
                split_primitive(
                    &mut model,
                    &mut unique_vertices,
                    &mut has_normals,
                    &mut has_uvs,
                );
            }
            "mtllib" => {
                if let (Some(dir), Some(name)) = (base_dir, tokens.get(1)) {
                    let mtl_path = dir.join(name);
                    match load_mtl(&mtl_path, cache) {
                        Ok(materials) => mtl_materials = materials,
                        Err(e) => log::warn!("{e}"),
                    }
                }
            }
            "usemtl" => {
                split_primitive(
                    &mut model,
                    &mut unique_vertices,
                    &mut has_normals,
                    &mut has_uvs,
                );
                if let Some(material) = tokens.get(1).and_then(|n| mtl_materials.get(*n)) {
                    model.primitives.last_mut().unwrap().material = material.clone();
                }
            }
            "f" => {
                parse_face(
                    &tokens,
                    &positions,
                    &normals,
                    &uvs,
                    &mut unique_vertices,
                    model.primitives.last_mut().unwrap(),
                    &mut has_normals,
                    &mut has_uvs,
                );
            }
            _ => {}
        }
    }

    finish_primitive(model.primitives.last_mut().unwrap(), has_normals, has_uvs);

    Ok(model)
}

/// Close out the current primitive and open a fresh one.
fn split_primitive(
    model: &mut Model,
    unique_vertices: &mut HashMap<String, u32>,
    has_normals: &mut bool,
    has_uvs: &mut bool,
) {
    let current = model.primitives.last_mut().unwrap();
    if current.mesh.indices.is_empty() {
        return;
    }
    finish_primitive(current, *has_normals, *has_uvs);
    model.primitives.push(ModelPrimitive::default());
    unique_vertices.clear();
    *has_normals = false;
    *has_uvs = false;
}

fn finish_primitive(primitive: &mut ModelPrimitive, has_normals: bool, has_uvs: bool) {
    if has_normals && has_uvs && !primitive.mesh.indices.is_empty() {
        calculate_tangents(&mut primitive.mesh);
    }
}

fn parse_vec3(tokens: &[&str]) -> [f32; 3] {
    [
        parse_float(tokens.get(1)),
        parse_float(tokens.get(2)),
        parse_float(tokens.get(3)),
    ]
}

fn parse_vec2(tokens: &[&str]) -> [f32; 2] {
    [parse_float(tokens.get(1)), parse_float(tokens.get(2))]
}

fn parse_float(token: Option<&&str>) -> f32 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

/// Parse one `f` directive: dedup vertices by reference token, then
/// fan-triangulate the face.
#[allow(clippy::too_many_arguments)]
fn parse_face(
    tokens: &[&str],
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    uvs: &[[f32; 2]],
    unique_vertices: &mut HashMap<String, u32>,
    primitive: &mut ModelPrimitive,
    has_normals: &mut bool,
    has_uvs: &mut bool,
) {
    let mesh = &mut primitive.mesh;
    let mut face_indices: Vec<u32> = Vec::with_capacity(tokens.len() - 1);

    for reference in &tokens[1..] {
        if let Some(&known) = unique_vertices.get(*reference) {
            face_indices.push(known);
            continue;
        }

        let mut vertex = Vertex::default();
        for (slot, value) in reference.split('/').enumerate() {
            if value.is_empty() {
                continue;
            }
            let Ok(one_based) = value.parse::<usize>() else {
                log::warn!("Invalid face reference \"{reference}\", skipping face.");
                return;
            };
            // References are 1-based, so 0 is malformed input.
            let Some(index) = one_based.checked_sub(1) else {
                log::warn!("Invalid face reference \"{reference}\", skipping face.");
                return;
            };
            match slot {
                0 => match positions.get(index) {
                    Some(p) => vertex.position = *p,
                    None => {
                        log::warn!("Face position index {one_based} out of range, skipping face.");
                        return;
                    }
                },
                1 => {
                    if let Some(uv) = uvs.get(index) {
                        *has_uvs = true;
                        vertex.uv = *uv;
                    }
                }
                2 => {
                    if let Some(n) = normals.get(index) {
                        *has_normals = true;
                        vertex.normal = *n;
                    }
                }
                _ => {}
            }
        }

        let new_index = mesh.vertices.len() as u32;
        unique_vertices.insert(reference.to_string(), new_index);
        mesh.vertices.push(vertex);
        face_indices.push(new_index);
    }

    // Triangle, quad, or n-gon: triangulated as a fan around vertex 0.
    match face_indices.len() {
        0..=2 => {}
        3 => mesh.indices.extend_from_slice(&face_indices),
        _ => {
            for i in 2..face_indices.len() {
                mesh.indices.push(face_indices[0]);
                mesh.indices.push(face_indices[i - 1]);
                mesh.indices.push(face_indices[i]);
            }
        }
    }
}

/// Load a companion MTL file into named materials.
///
/// Recognized directives: `newmtl`, `Kd` (flat diffuse color), `map_Kd`,
/// `Ke` (flat emissive color), `map_Ke`.
pub fn load_mtl(
    path: &Path,
    cache: &mut ImageCache,
) -> Result<HashMap<String, Material>, AssetError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| AssetError::file_not_found(path, e))?;
    Ok(parse_mtl(&source, path.parent(), cache))
}

/// Parse MTL text. Unresolvable texture paths are warned about and leave
/// the slot unset.
pub fn parse_mtl(
    source: &str,
    base_dir: Option<&Path>,
    cache: &mut ImageCache,
) -> HashMap<String, Material> {
    let mut materials: HashMap<String, Material> = HashMap::new();
    let mut current: Option<String> = None;

    for line in source.lines() {
        let tokens: Vec<&str> = line.split(' ').filter(|t| !t.is_empty()).collect();
        let Some(&directive) = tokens.first() else {
            continue;
        };
        if directive.starts_with('#') {
            continue;
        }

        match directive {
            "newmtl" => {
                if let Some(name) = tokens.get(1) {
                    materials.insert(name.to_string(), Material::new());
                    current = Some(name.to_string());
                }
            }
            "Kd" => {
                let factors = [
                    parse_float(tokens.get(1)),
                    parse_float(tokens.get(2)),
                    parse_float(tokens.get(3)),
                ];
                if let (Some(name), Ok(image)) = (
                    current.as_ref(),
                    cache.solid_color(&factors, ColorSpace::Srgb),
                ) {
                    materials.get_mut(name).unwrap().diffuse_texture =
                        Some(MaterialTexture::new(image, ImageSampler::nearest()));
                }
            }
            "map_Kd" => {
                if let (Some(name), Some(texture)) = (
                    current.as_ref(),
                    file_texture(base_dir, tokens.get(1), ColorSpace::Srgb, cache),
                ) {
                    materials.get_mut(name).unwrap().diffuse_texture = Some(texture);
                }
            }
            "Ke" => {
                let factors = [
                    parse_float(tokens.get(1)),
                    parse_float(tokens.get(2)),
                    parse_float(tokens.get(3)),
                ];
                if let (Some(name), Ok(image)) = (
                    current.as_ref(),
                    cache.solid_color(&factors, ColorSpace::Srgb),
                ) {
                    materials.get_mut(name).unwrap().emissive_texture =
                        Some(MaterialTexture::new(image, ImageSampler::nearest()));
                }
            }
            "map_Ke" => {
                if let (Some(name), Some(texture)) = (
                    current.as_ref(),
                    file_texture(base_dir, tokens.get(1), ColorSpace::Srgb, cache),
                ) {
                    materials.get_mut(name).unwrap().emissive_texture = Some(texture);
                }
            }
            _ => {}
        }
    }

    materials
}

/// Memoized texture slot from an on-disk image referenced by an MTL file.
fn file_texture(
    base_dir: Option<&Path>,
    name: Option<&&str>,
    color_space: ColorSpace,
    cache: &mut ImageCache,
) -> Option<MaterialTexture> {
    let name = name?;
    let path = match base_dir {
        Some(dir) => dir.join(name),
        None => Path::new(name).to_path_buf(),
    };
    let key = path.to_string_lossy().into_owned();
    match cache.get_or_create(&key, || {
        let mut image = load_image_file(&path)?;
        image.color_space = color_space;
        Ok(image)
    }) {
        Ok(image) => Some(MaterialTexture::new(image, ImageSampler::trilinear())),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}
