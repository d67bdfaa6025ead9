//! WAV (RIFF/WAVE) parsing.
//!
//! The fixed chunk layout is read in this exact order: "RIFF" magic + size,
//! "WAVE" magic, "fmt " subchunk (id, size, audio format, channels, sample
//! rate, byte rate, block align, bits per sample), then the "data" chunk
//! (id, size, payload). Any short read or magic mismatch is a hard failure
//! with no partial sound returned.

use std::path::Path;

use crate::error::AssetError;

use super::types::Sound;

/// Load a WAV file.
pub fn load_wav(path: &Path) -> Result<Sound, AssetError> {
    let bytes =
        std::fs::read(path).map_err(|e| AssetError::file_not_found(path, e))?;
    parse_wav(&bytes, path)
}

/// Parse WAV bytes. `path` is only used for error reporting.
pub fn parse_wav(bytes: &[u8], path: &Path) -> Result<Sound, AssetError> {
    let mut reader = ChunkReader::new(bytes, path);

    reader.expect_magic(b"RIFF", "RIFF header missing")?;
    reader.read_u32("RIFF size")?;
    reader.expect_magic(b"WAVE", "WAVE header missing")?;

    reader.read_exact(4, "fmt subchunk id")?;
    reader.read_u32("fmt subchunk size")?;
    reader.read_u16("audio format")?;
    let channels = reader.read_u16("channel count")?;
    let sample_rate = reader.read_u32("sample rate")?;
    reader.read_u32("byte rate")?;
    reader.read_u16("block align")?;
    let bits_per_sample = reader.read_u16("bits per sample")?;

    reader.expect_magic(b"data", "data header missing")?;
    let data_size = reader.read_u32("data size")? as usize;
    let data = reader.read_exact(data_size, "PCM payload")?.to_vec();

    Ok(Sound {
        channels: channels as u8,
        sample_rate,
        bits_per_sample: bits_per_sample as u8,
        data,
    })
}

/// Cursor over a byte slice with error-reporting reads.
struct ChunkReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    path: &'a Path,
}

impl<'a> ChunkReader<'a> {
    fn new(bytes: &'a [u8], path: &'a Path) -> Self {
        Self {
            bytes,
            offset: 0,
            path,
        }
    }

    fn read_exact(&mut self, len: usize, what: &str) -> Result<&'a [u8], AssetError> {
        let end = self.offset.checked_add(len).filter(|&e| e <= self.bytes.len());
        let Some(end) = end else {
            return Err(AssetError::truncated(
                self.path,
                format!("could not read {what}"),
            ));
        };
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn expect_magic(&mut self, magic: &[u8; 4], reason: &str) -> Result<(), AssetError> {
        let got = self.read_exact(4, std::str::from_utf8(magic).unwrap_or("magic"))?;
        if got != magic {
            return Err(AssetError::malformed(self.path, reason));
        }
        Ok(())
    }

    fn read_u16(&mut self, what: &str) -> Result<u16, AssetError> {
        let b = self.read_exact(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32, AssetError> {
        let b = self.read_exact(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
