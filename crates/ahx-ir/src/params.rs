//! Editable synth instrument parameters.
//!
//! `InstrumentParams` is the host-facing view of an instrument: every field
//! can be read and written by index, and filter/square sweeps carry an
//! explicit enable flag. `Instrument::from(&params)` produces the static
//! definition the synth voice plays.

use crate::instrument::{fit_str, Envelope, Instrument, PList, Waveform};

/// Number of indexed parameters.
pub const PARAM_COUNT: usize = 23;

/// Parameter indices exposed to hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamId {
    Waveform = 0,
    WaveLength,
    Volume,
    AttackFrames,
    AttackVolume,
    DecayFrames,
    DecayVolume,
    SustainFrames,
    ReleaseFrames,
    ReleaseVolume,
    FilterLower,
    FilterUpper,
    FilterSpeed,
    FilterEnable,
    SquareLower,
    SquareUpper,
    SquareSpeed,
    SquareEnable,
    VibratoDelay,
    VibratoDepth,
    VibratoSpeed,
    HardCutRelease,
    HardCutFrames,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Waveform,
        ParamId::WaveLength,
        ParamId::Volume,
        ParamId::AttackFrames,
        ParamId::AttackVolume,
        ParamId::DecayFrames,
        ParamId::DecayVolume,
        ParamId::SustainFrames,
        ParamId::ReleaseFrames,
        ParamId::ReleaseVolume,
        ParamId::FilterLower,
        ParamId::FilterUpper,
        ParamId::FilterSpeed,
        ParamId::FilterEnable,
        ParamId::SquareLower,
        ParamId::SquareUpper,
        ParamId::SquareSpeed,
        ParamId::SquareEnable,
        ParamId::VibratoDelay,
        ParamId::VibratoDepth,
        ParamId::VibratoSpeed,
        ParamId::HardCutRelease,
        ParamId::HardCutFrames,
    ];

    /// Look up a parameter by host index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// True for parameters that change the ADSR deltas.
    pub fn affects_envelope(self) -> bool {
        matches!(
            self,
            ParamId::AttackFrames
                | ParamId::AttackVolume
                | ParamId::DecayFrames
                | ParamId::DecayVolume
                | ParamId::SustainFrames
                | ParamId::ReleaseFrames
                | ParamId::ReleaseVolume
        )
    }

    /// True for parameters that change the generated wavetable.
    pub fn affects_waveform(self) -> bool {
        matches!(self, ParamId::Waveform | ParamId::WaveLength)
    }
}

/// Full parameter set of a synth instrument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentParams {
    pub waveform: Waveform,
    /// 0-5
    pub wave_length: u8,
    /// 0-64
    pub volume: u8,
    pub envelope: Envelope,
    pub filter_lower: u8,
    pub filter_upper: u8,
    pub filter_speed: u8,
    pub filter_enabled: bool,
    pub square_lower: u8,
    pub square_upper: u8,
    pub square_speed: u8,
    pub square_enabled: bool,
    pub vibrato_delay: u8,
    pub vibrato_depth: u8,
    pub vibrato_speed: u8,
    pub hard_cut_release: bool,
    pub hard_cut_frames: u8,
    pub plist: Option<PList>,
}

impl Default for InstrumentParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sawtooth,
            wave_length: 3,
            volume: 64,
            envelope: Envelope {
                attack_frames: 1,
                attack_volume: 64,
                decay_frames: 10,
                decay_volume: 48,
                sustain_frames: 0,
                release_frames: 20,
                release_volume: 0,
            },
            filter_lower: 0,
            filter_upper: 63,
            filter_speed: 4,
            filter_enabled: false,
            square_lower: 64,
            square_upper: 192,
            square_speed: 4,
            square_enabled: false,
            vibrato_delay: 0,
            vibrato_depth: 0,
            vibrato_speed: 0,
            hard_cut_release: false,
            hard_cut_frames: 2,
            plist: None,
        }
    }
}

impl InstrumentParams {
    /// Read a parameter as a host value.
    pub fn get(&self, id: ParamId) -> f32 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let env = &self.envelope;
        match id {
            ParamId::Waveform => self.waveform.index() as f32,
            ParamId::WaveLength => self.wave_length as f32,
            ParamId::Volume => self.volume as f32,
            ParamId::AttackFrames => env.attack_frames as f32,
            ParamId::AttackVolume => env.attack_volume as f32,
            ParamId::DecayFrames => env.decay_frames as f32,
            ParamId::DecayVolume => env.decay_volume as f32,
            ParamId::SustainFrames => env.sustain_frames as f32,
            ParamId::ReleaseFrames => env.release_frames as f32,
            ParamId::ReleaseVolume => env.release_volume as f32,
            ParamId::FilterLower => self.filter_lower as f32,
            ParamId::FilterUpper => self.filter_upper as f32,
            ParamId::FilterSpeed => self.filter_speed as f32,
            ParamId::FilterEnable => flag(self.filter_enabled),
            ParamId::SquareLower => self.square_lower as f32,
            ParamId::SquareUpper => self.square_upper as f32,
            ParamId::SquareSpeed => self.square_speed as f32,
            ParamId::SquareEnable => flag(self.square_enabled),
            ParamId::VibratoDelay => self.vibrato_delay as f32,
            ParamId::VibratoDepth => self.vibrato_depth as f32,
            ParamId::VibratoSpeed => self.vibrato_speed as f32,
            ParamId::HardCutRelease => flag(self.hard_cut_release),
            ParamId::HardCutFrames => self.hard_cut_frames as f32,
        }
    }

    /// Write a parameter from a host value. Values are clamped to the field's range.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let byte = |max: u8| (value.max(0.0) as u8).min(max);
        let flag = value > 0.5;
        let env = &mut self.envelope;
        match id {
            ParamId::Waveform => self.waveform = Waveform::from_index(byte(3)),
            ParamId::WaveLength => self.wave_length = byte(5),
            ParamId::Volume => self.volume = byte(64),
            ParamId::AttackFrames => env.attack_frames = byte(255),
            ParamId::AttackVolume => env.attack_volume = byte(64),
            ParamId::DecayFrames => env.decay_frames = byte(255),
            ParamId::DecayVolume => env.decay_volume = byte(64),
            ParamId::SustainFrames => env.sustain_frames = byte(255),
            ParamId::ReleaseFrames => env.release_frames = byte(255),
            ParamId::ReleaseVolume => env.release_volume = byte(64),
            ParamId::FilterLower => self.filter_lower = byte(63),
            ParamId::FilterUpper => self.filter_upper = byte(63),
            ParamId::FilterSpeed => self.filter_speed = byte(63),
            ParamId::FilterEnable => self.filter_enabled = flag,
            ParamId::SquareLower => self.square_lower = byte(255),
            ParamId::SquareUpper => self.square_upper = byte(255),
            ParamId::SquareSpeed => self.square_speed = byte(255),
            ParamId::SquareEnable => self.square_enabled = flag,
            ParamId::VibratoDelay => self.vibrato_delay = byte(255),
            ParamId::VibratoDepth => self.vibrato_depth = byte(15),
            ParamId::VibratoSpeed => self.vibrato_speed = byte(255),
            ParamId::HardCutRelease => self.hard_cut_release = flag,
            ParamId::HardCutFrames => self.hard_cut_frames = byte(7),
        }
    }
}

impl From<&InstrumentParams> for Instrument {
    /// Disabled sweeps become equal limits so note-on leaves the modulator idle.
    fn from(p: &InstrumentParams) -> Self {
        let (filter_lower, filter_upper) = if p.filter_enabled {
            (p.filter_lower, p.filter_upper)
        } else {
            (0, 0)
        };
        let (square_lower, square_upper) = if p.square_enabled {
            (p.square_lower, p.square_upper)
        } else {
            (0, 0)
        };
        Instrument {
            name: fit_str(""),
            volume: p.volume.min(64),
            wave_length: p.wave_length.min(5),
            waveform: p.waveform,
            envelope: p.envelope,
            filter_lower,
            filter_upper,
            filter_speed: p.filter_speed,
            square_lower,
            square_upper,
            square_speed: p.square_speed,
            vibrato_delay: p.vibrato_delay,
            vibrato_depth: p.vibrato_depth,
            vibrato_speed: p.vibrato_speed,
            hard_cut_release: p.hard_cut_release,
            hard_cut_frames: p.hard_cut_frames,
            plist: p.plist.clone().unwrap_or_default(),
        }
    }
}
