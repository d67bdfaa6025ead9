//! CPU-side sampler descriptors.

mod types;

pub use types::{AddressMode, BorderColor, FilterMode, ImageSampler};
