//! CPU-side sampler descriptor and filter/address mode definitions.

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest neighbor filtering.
    #[default]
    Nearest,
    /// Linear filtering.
    Linear,
}

/// Texture address mode (wrapping behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Clamp to edge.
    #[default]
    ClampToEdge,
    /// Repeat.
    Repeat,
    /// Mirrored repeat.
    MirrorRepeat,
    /// Clamp to border color.
    ClampToBorder,
}

/// Border color used with [`AddressMode::ClampToBorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderColor {
    /// Opaque black border.
    #[default]
    OpaqueBlack,
    /// Opaque white border.
    OpaqueWhite,
    /// Transparent black border.
    TransparentBlack,
}

/// CPU-side sampler configuration attached to a material texture slot.
///
/// This is a format-agnostic descriptor separate from any GPU resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSampler {
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Mipmap filter.
    pub mipmap_filter: FilterMode,
    /// Address mode for U coordinate.
    pub address_mode_u: AddressMode,
    /// Address mode for V coordinate.
    pub address_mode_v: AddressMode,
    /// Address mode for W coordinate.
    pub address_mode_w: AddressMode,
    /// Border color for clamp-to-border addressing.
    pub border_color: BorderColor,
    /// Maximum anisotropy level.
    pub anisotropy_level: f32,
}

impl ImageSampler {
    /// Trilinear sampler: the default for textures loaded from files when
    /// the source declares no sampler of its own.
    pub fn trilinear() -> Self {
        Self {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Linear,
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            address_mode_w: AddressMode::Repeat,
            border_color: BorderColor::OpaqueBlack,
            anisotropy_level: 16.0,
        }
    }

    /// Nearest sampler: the default for 1x1 images synthesized from flat
    /// material factors, where filtering is meaningless.
    pub fn nearest() -> Self {
        Self {
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            border_color: BorderColor::OpaqueBlack,
            anisotropy_level: 1.0,
        }
    }
}

impl Default for ImageSampler {
    fn default() -> Self {
        Self::nearest()
    }
}
