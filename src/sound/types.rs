//! CPU-side sound data.

/// Decoded PCM sound data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sound {
    /// Number of interleaved channels.
    pub channels: u8,
    /// Samples per second.
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32 for typical files).
    pub bits_per_sample: u8,
    /// Raw interleaved PCM bytes.
    pub data: Vec<u8>,
}

impl Sound {
    /// Size of the PCM payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True when nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
