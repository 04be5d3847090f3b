//! Song, preset and WAV formats for the AHX tracker.
//!
//! Loads THX/AHX songs into the IR, reads and writes `.ahxp` instrument
//! presets, and writes rendered audio as WAV.

mod error;
pub mod preset;
mod thx_format;
mod wav_format;

pub use error::{FormatError, Result};
pub use preset::{builtin, builtin_count, import_from_ahx, Preset, BUILTIN_NAMES};
pub use thx_format::{instrument_count, instrument_name, load_ahx};
pub use wav_format::{frames_to_wav, save_wav, write_wav};
