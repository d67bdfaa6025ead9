//! Strided binary accessor reads against resolved buffer data.
//!
//! Every value is canonicalized on read: attribute streams to `f32`,
//! index and joint streams to `u32`, whatever the declared component
//! type. A declared stride of zero means tightly packed, so the default
//! stride is always the element size.

use gltf_dep::accessor::DataType;

use crate::error::AssetError;
use crate::math::Mat4;

/// A bounds-checked window over one accessor's bytes.
struct RawAccessor<'a> {
    data: &'a [u8],
    start: usize,
    stride: usize,
    count: usize,
    components: usize,
    component_size: usize,
    data_type: DataType,
}

impl<'a> RawAccessor<'a> {
    fn new(
        accessor: &gltf_dep::Accessor,
        buffers: &'a [Vec<u8>],
        context: &str,
    ) -> Result<Self, AssetError> {
        let view = accessor.view().ok_or_else(|| {
            AssetError::DecodeFailure(format!("accessor for {context} has no buffer view"))
        })?;
        let buffer_index = view.buffer().index();
        let data = buffers.get(buffer_index).ok_or_else(|| {
            AssetError::DecodeFailure(format!(
                "accessor for {context} references buffer {buffer_index} which was not resolved"
            ))
        })?;

        let components = accessor.dimensions().multiplicity();
        let component_size = accessor.data_type().size();
        Ok(Self {
            data,
            start: view.offset() + accessor.offset(),
            // Absent stride means tightly packed elements.
            stride: view.stride().unwrap_or(components * component_size),
            count: accessor.count(),
            components,
            component_size,
            data_type: accessor.data_type(),
        })
    }

    fn component_bytes(
        &self,
        element: usize,
        component: usize,
        context: &str,
    ) -> Result<&'a [u8], AssetError> {
        let offset = self.start + element * self.stride + component * self.component_size;
        self.data
            .get(offset..offset + self.component_size)
            .ok_or_else(|| {
                AssetError::DecodeFailure(format!(
                    "accessor for {context} reads past the end of its buffer"
                ))
            })
    }

    fn component_f32(
        &self,
        element: usize,
        component: usize,
        context: &str,
    ) -> Result<f32, AssetError> {
        let b = self.component_bytes(element, component, context)?;
        Ok(match self.data_type {
            DataType::I8 => b[0] as i8 as f32,
            DataType::U8 => b[0] as f32,
            DataType::I16 => i16::from_le_bytes([b[0], b[1]]) as f32,
            DataType::U16 => u16::from_le_bytes([b[0], b[1]]) as f32,
            DataType::U32 => u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f32,
            DataType::F32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        })
    }

    fn component_u32(
        &self,
        element: usize,
        component: usize,
        context: &str,
    ) -> Result<u32, AssetError> {
        let b = self.component_bytes(element, component, context)?;
        Ok(match self.data_type {
            DataType::I8 => b[0] as i8 as u32,
            DataType::U8 => b[0] as u32,
            DataType::I16 => i16::from_le_bytes([b[0], b[1]]) as u32,
            DataType::U16 => u16::from_le_bytes([b[0], b[1]]) as u32,
            DataType::U32 => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            DataType::F32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u32,
        })
    }
}

/// Read all components of all elements as a flat `f32` sequence.
pub(crate) fn read_f32(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
    context: &str,
) -> Result<Vec<f32>, AssetError> {
    let raw = RawAccessor::new(accessor, buffers, context)?;
    let mut result = Vec::with_capacity(raw.count * raw.components);
    for element in 0..raw.count {
        for component in 0..raw.components {
            result.push(raw.component_f32(element, component, context)?);
        }
    }
    Ok(result)
}

/// Read a scalar index stream as `u32` values.
pub(crate) fn read_indices(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
) -> Result<Vec<u32>, AssetError> {
    let raw = RawAccessor::new(accessor, buffers, "indices")?;
    let mut result = Vec::with_capacity(raw.count);
    for element in 0..raw.count {
        result.push(raw.component_u32(element, 0, "indices")?);
    }
    Ok(result)
}

/// Read a per-vertex joint stream as `[u32; 4]` quadruples.
///
/// Joints are declared as 8- or 16-bit unsigned (occasionally 32-bit)
/// integers; a float declaration is rejected with
/// [`AssetError::UnsupportedComponentType`] so the caller can fall back to
/// unskinned vertices.
pub(crate) fn read_joints(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
) -> Result<Vec<[u32; 4]>, AssetError> {
    if accessor.data_type() == DataType::F32 {
        return Err(AssetError::UnsupportedComponentType {
            context: "JOINTS_0".into(),
        });
    }
    let raw = RawAccessor::new(accessor, buffers, "JOINTS_0")?;
    let mut result = Vec::with_capacity(raw.count);
    for element in 0..raw.count {
        result.push([
            raw.component_u32(element, 0, "JOINTS_0")?,
            raw.component_u32(element, 1, "JOINTS_0")?,
            raw.component_u32(element, 2, "JOINTS_0")?,
            raw.component_u32(element, 3, "JOINTS_0")?,
        ]);
    }
    Ok(result)
}

/// Read an accessor of MAT4 elements as column-major matrices.
pub(crate) fn read_mat4s(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
    context: &str,
) -> Result<Vec<Mat4>, AssetError> {
    let values = read_f32(accessor, buffers, context)?;
    Ok(values
        .chunks_exact(16)
        .map(Mat4::from_column_slice)
        .collect())
}

/// The accessor's declared per-component maximum, first component only.
pub(crate) fn declared_max(accessor: &gltf_dep::Accessor) -> Option<f32> {
    accessor
        .max()
        .and_then(|max| max.get(0).and_then(|v| v.as_f64()))
        .map(|v| v as f32)
}
