//! Keyed animation data targeting skin joints.

use std::collections::HashMap;

/// How keyframe values are interpolated between timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationInterpolation {
    /// Linear interpolation.
    Linear,
    /// Constant until the next keyframe.
    Step,
    /// Cubic spline with in/out tangents.
    CubicSpline,
    /// Interpolation the source declared but this loader does not map.
    #[default]
    Unknown,
}

/// Which transform component a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationTransform {
    /// Joint translation; values are 3-vectors padded to 4.
    Translation,
    /// Joint rotation; values are quaternions stored (w, x, y, z).
    Rotation,
    /// Joint scale; values are 3-vectors padded to 4.
    Scale,
    /// A target this loader does not animate (e.g. morph weights).
    #[default]
    Unknown,
}

/// One keyframe: a timestamp in seconds and a packed value.
///
/// The value encoding depends on the channel's [`AnimationTransform`]:
/// translation/scale carry (x, y, z, 0), rotation carries (w, x, y, z)
/// reordered from the source's (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationKeyframe {
    /// Time of this keyframe in seconds.
    pub timestamp: f32,
    /// Packed value, encoding per the channel transform kind.
    pub value: [f32; 4],
}

/// An ordered keyframe stream for one joint transform component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationChannel {
    /// Interpolation declared by the source.
    pub interpolation: AnimationInterpolation,
    /// Which transform component the channel drives.
    pub transform: AnimationTransform,
    /// Keyframes in timestamp order.
    pub keyframes: Vec<AnimationKeyframe>,
}

/// A named animation clip: duration plus channels grouped by joint.
///
/// Joint keys are dense joint indices from the load's joint index space,
/// the same space the mesh's [`Skin`](crate::mesh::Skin) is addressed by.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    /// Clip duration in seconds: the maximum over all channels of the input
    /// accessor's declared maximum, falling back to the last keyframe's
    /// timestamp.
    pub duration: f32,
    /// Channels per dense joint index.
    pub joint_channels: HashMap<u32, Vec<AnimationChannel>>,
}

impl Animation {
    /// Create an empty animation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of channels across all joints.
    pub fn channel_count(&self) -> usize {
        self.joint_channels.values().map(Vec::len).sum()
    }
}
