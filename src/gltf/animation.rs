//! Animation channel binding against the joint index space.

use gltf_dep::animation::{Interpolation, Property};

use crate::animation::{
    Animation, AnimationChannel, AnimationInterpolation, AnimationKeyframe, AnimationTransform,
};
use crate::error::AssetError;

use super::accessor;
use super::skin::JointIndexSpace;

/// Bind one animation's channels to dense joint indices.
///
/// Channels targeting nodes that never appeared as a joint in any skin are
/// skipped: they animate plain scene nodes, which this loader does not
/// carry. Cubic-spline output is read as plain keyframe values, so its
/// in/out tangent triplets land in the keyframe stream untouched.
pub(crate) fn bind_animation(
    animation: &gltf_dep::Animation,
    buffers: &[Vec<u8>],
    joint_space: &JointIndexSpace,
) -> Result<Animation, AssetError> {
    let mut result = Animation::new();

    for channel in animation.channels() {
        let target = channel.target();
        let Some(joint_index) = joint_space.index_of(target.node().index()) else {
            continue;
        };

        let sampler = channel.sampler();
        let interpolation = match sampler.interpolation() {
            Interpolation::Linear => AnimationInterpolation::Linear,
            Interpolation::Step => AnimationInterpolation::Step,
            Interpolation::CubicSpline => AnimationInterpolation::CubicSpline,
        };
        let transform = match target.property() {
            Property::Translation => AnimationTransform::Translation,
            Property::Rotation => AnimationTransform::Rotation,
            Property::Scale => AnimationTransform::Scale,
            Property::MorphTargetWeights => AnimationTransform::Unknown,
        };

        let input = sampler.input();
        let timestamps = accessor::read_f32(&input, buffers, "animation input")?;
        let values = accessor::read_f32(&sampler.output(), buffers, "animation output")?;

        let mut keyframes = Vec::with_capacity(timestamps.len());
        let mut cursor = 0usize;
        for &timestamp in &timestamps {
            let mut value = [0.0f32; 4];
            match transform {
                AnimationTransform::Translation | AnimationTransform::Scale => {
                    if let Some(v) = values.get(cursor..cursor + 3) {
                        value[..3].copy_from_slice(v);
                    }
                    cursor += 3;
                }
                AnimationTransform::Rotation => {
                    // Source quaternions are (x, y, z, w), stored (w, x, y, z).
                    if let Some(v) = values.get(cursor..cursor + 4) {
                        value = [v[3], v[0], v[1], v[2]];
                    }
                    cursor += 4;
                }
                AnimationTransform::Unknown => {}
            }
            keyframes.push(AnimationKeyframe { timestamp, value });
        }

        // Channel end: the input accessor's declared maximum, falling back
        // to the last keyframe's timestamp.
        let channel_end = accessor::declared_max(&input)
            .or_else(|| keyframes.last().map(|k| k.timestamp))
            .unwrap_or(0.0);
        result.duration = result.duration.max(channel_end);

        result
            .joint_channels
            .entry(joint_index)
            .or_default()
            .push(AnimationChannel {
                interpolation,
                transform,
                keyframes,
            });
    }

    Ok(result)
}
