//! Instrument, envelope and performance list types.

use alloc::vec::Vec;
use arrayvec::ArrayString;

/// Longest instrument name kept in memory.
pub const NAME_LEN: usize = 64;

/// Base oscillator shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Waveform {
    Triangle = 0,
    #[default]
    Sawtooth = 1,
    Square = 2,
    Noise = 3,
}

impl Waveform {
    /// Map a raw waveform number (0-3) to a waveform. Larger values select noise.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Waveform::Triangle,
            1 => Waveform::Sawtooth,
            2 => Waveform::Square,
            _ => Waveform::Noise,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Frame-quantized ADSR envelope. Volumes are 0-64, frames are 50 Hz ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    pub attack_frames: u8,
    pub attack_volume: u8,
    pub decay_frames: u8,
    pub decay_volume: u8,
    /// Frames to hold the decay level (0 = no sustain stage)
    pub sustain_frames: u8,
    pub release_frames: u8,
    pub release_volume: u8,
}

/// One step of a performance list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PListEntry {
    /// Note index (0 = no change, 1-60)
    pub note: u8,
    /// Note ignores track transpose
    pub fixed: bool,
    /// 0 = no change, 1-4 = triangle/saw/square/noise
    pub waveform: u8,
    /// Two commands (0-7)
    pub fx: [u8; 2],
    pub fx_param: [u8; 2],
}

/// Per-instrument micro-sequence run once per note.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PList {
    /// Frames per entry
    pub speed: u8,
    pub entries: Vec<PListEntry>,
}

impl PList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Static instrument definition shared by the song player and the synth voice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instrument {
    pub name: ArrayString<NAME_LEN>,
    /// Instrument volume (0-64)
    pub volume: u8,
    /// Wave length exponent (0-5, table length = 4 << wave_length)
    pub wave_length: u8,
    /// Oscillator used by the synth voice. Song playback takes the waveform from the PList.
    pub waveform: Waveform,
    pub envelope: Envelope,
    pub filter_lower: u8,
    pub filter_upper: u8,
    pub filter_speed: u8,
    pub square_lower: u8,
    pub square_upper: u8,
    pub square_speed: u8,
    pub vibrato_delay: u8,
    /// Vibrato depth (0-15)
    pub vibrato_depth: u8,
    pub vibrato_speed: u8,
    pub hard_cut_release: bool,
    /// Hard cut length in frames (0-7)
    pub hard_cut_frames: u8,
    pub plist: PList,
}

impl Default for Instrument {
    fn default() -> Self {
        Self {
            name: ArrayString::new(),
            volume: 64,
            wave_length: 3,
            waveform: Waveform::Sawtooth,
            envelope: Envelope::default(),
            filter_lower: 0,
            filter_upper: 0,
            filter_speed: 0,
            square_lower: 0,
            square_upper: 0,
            square_speed: 0,
            vibrato_delay: 0,
            vibrato_depth: 0,
            vibrato_speed: 0,
            hard_cut_release: false,
            hard_cut_frames: 0,
            plist: PList::default(),
        }
    }
}

impl Instrument {
    /// Create a new instrument with default settings.
    pub fn new(name: &str) -> Self {
        Self {
            name: fit_str(name),
            ..Self::default()
        }
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
pub fn fit_str<const N: usize>(s: &str) -> ArrayString<N> {
    let mut out = ArrayString::new();
    for c in s.chars() {
        if out.try_push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_index_round_trips() {
        for i in 0..4 {
            assert_eq!(Waveform::from_index(i).index(), i);
        }
        assert_eq!(Waveform::from_index(9), Waveform::Noise);
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(100);
        let inst = Instrument::new(&long);
        assert_eq!(inst.name.len(), NAME_LEN);
    }

    #[test]
    fn fit_str_keeps_short_strings() {
        let s: ArrayString<8> = fit_str("bass");
        assert_eq!(s.as_str(), "bass");
    }
}
