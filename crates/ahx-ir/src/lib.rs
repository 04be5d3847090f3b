//! Core song and instrument types for the AHX tracker engine.
//!
//! This crate defines the data model shared by the song loader, the
//! preset layer and the playback engine. Song data is parsed once and
//! then read by the player; instrument parameters are edited by the
//! synth façade and converted into the same `Instrument` type.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod instrument;
mod params;
mod song;

pub use instrument::{fit_str, Envelope, Instrument, PList, PListEntry, Waveform, NAME_LEN};
pub use params::{InstrumentParams, ParamId, PARAM_COUNT};
pub use song::{Position, Song, Step, NUM_CHANNELS};
