//! Synthesis and playback engine for the AHX tracker.
//!
//! Holds the tracker primitives (periods, modulators, sequences, waveform
//! tables), the single synth voice with its polyphonic instrument wrapper,
//! and the four-channel song player.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod adsr;
mod frame;
pub mod modulator;
pub mod noise;
pub mod period;
mod player;
pub mod plist;
pub mod sequence;
mod synth;
mod synth_voice;
pub mod tracker_voice;
pub mod waves;

pub use adsr::{AdsrState, AdsrStep};
pub use frame::{interleave, Frame};
pub use modulator::TrackerModulator;
pub use player::{Player, PositionCallback, PositionEvent, MAX_BOOST};
pub use plist::{PlistCommand, VolumeTarget};
pub use sequence::TrackerSequence;
pub use synth::{SynthInstrument, DEFAULT_POLYPHONY, MAX_POLYPHONY};
pub use synth_voice::{SynthVoice, FRAME_RATE};
pub use tracker_voice::{TrackerVoice, WaveRef};
pub use waves::Waves;

/// Run `f` on the audio path. With `alloc_check` any heap allocation inside panics.
#[inline]
pub fn realtime<T>(f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "alloc_check")]
    {
        assert_no_alloc::assert_no_alloc(f)
    }
    #[cfg(not(feature = "alloc_check"))]
    {
        f()
    }
}
