//! Ogg Vorbis decoding through the PCM decode collaborator.

use std::io::Cursor;
use std::path::Path;

use rodio::Source;

use crate::error::AssetError;

use super::types::Sound;

/// Load and fully decode an Ogg Vorbis file to interleaved 16-bit PCM.
pub fn load_ogg(path: &Path) -> Result<Sound, AssetError> {
    let bytes =
        std::fs::read(path).map_err(|e| AssetError::file_not_found(path, e))?;
    decode_ogg(bytes)
}

/// Decode Ogg Vorbis bytes to interleaved 16-bit PCM.
pub fn decode_ogg(bytes: Vec<u8>) -> Result<Sound, AssetError> {
    let decoder = rodio::Decoder::new(Cursor::new(bytes))
        .map_err(|e| AssetError::DecodeFailure(e.to_string()))?;

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();

    let mut data = Vec::new();
    for sample in decoder {
        data.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(Sound {
        channels: channels as u8,
        sample_rate,
        bits_per_sample: 16,
        data,
    })
}
