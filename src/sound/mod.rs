//! Sound loading: direct WAV parsing and delegated Ogg Vorbis decoding.

mod ogg;
mod types;
mod wav;

pub use ogg::{decode_ogg, load_ogg};
pub use types::Sound;
pub use wav::{load_wav, parse_wav};
