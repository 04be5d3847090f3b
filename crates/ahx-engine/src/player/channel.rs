//! Runtime state of one song channel.

use crate::adsr::AdsrState;
use crate::modulator::TrackerModulator;
use crate::noise::NOISE_SEED;
use crate::period::VOICE_BUFFER_LEN;
use crate::sequence::TrackerSequence;
use crate::waves::UNFILTERED;

/// Where the next wavetable copy comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum WaveSource {
    #[default]
    None,
    /// The channel's assembled square cycle
    Square,
    Triangle { filter_pos: i32 },
    Sawtooth { filter_pos: i32 },
    /// 0x280 bytes of noise starting at `offset`
    Noise { filter_pos: i32, offset: usize },
}

/// Per-channel playback state for the song player.
#[derive(Clone, Debug)]
pub(crate) struct ChannelState {
    /// Channel accepts steps and frames
    pub track_on: bool,

    // Position data
    pub track: u8,
    pub transpose: i32,
    pub next_track: u8,
    pub next_transpose: i32,

    /// Current instrument number (0 = none)
    pub instrument: u8,

    // Volume
    pub adsr: AdsrState,
    /// 8.8 fixed point
    pub adsr_volume: i32,
    pub note_max_volume: i32,
    pub perf_sub_volume: i32,
    pub track_master_volume: i32,
    pub volume_slide_up: i32,
    pub volume_slide_down: i32,

    // Pitch
    /// Note index from the track
    pub track_period: i32,
    /// Note index from the PList
    pub instr_period: i32,
    /// PList note ignores transpose and track note
    pub fixed_note: bool,
    pub plant_period: bool,
    pub period_slide_speed: i32,
    pub period_slide_period: i32,
    pub period_slide_limit: i32,
    pub period_slide_on: bool,
    pub period_slide_with_limit: bool,
    pub perf_slide_speed: i32,
    pub perf_slide_period: i32,
    pub perf_slide_on: bool,

    // Vibrato
    pub vibrato_delay: i32,
    pub vibrato_depth: i32,
    pub vibrato_speed: i32,
    pub vibrato_current: i32,
    pub vibrato_period: i32,

    // Note cut, note delay and hard cut
    pub hard_cut_release: bool,
    /// Frames before the next note at which the hard cut starts
    pub hard_cut: i32,
    pub hard_cut_release_frames: i32,
    pub note_cut_on: bool,
    pub note_cut_wait: i32,
    pub note_delay_on: bool,
    pub note_delay_wait: i32,

    // Waveform
    pub wave_length: u8,
    /// 0-3, triangle/sawtooth/square/noise
    pub waveform: u8,
    pub new_waveform: bool,
    pub wave_source: WaveSource,
    pub noise_seed: i32,

    // Square sweep
    pub square_mod: TrackerModulator,
    pub square_pos: i32,
    pub square_wait: i32,
    pub plant_square: bool,
    /// Set by track command 9, swallows the next PList square init
    pub ignore_square: bool,
    pub square_temp: [i8; 0x80],

    // Filter sweep
    pub filter_mod: TrackerModulator,
    pub filter_pos: i32,
    pub filter_wait: i32,
    pub filter_speed: i32,

    // Performance list
    pub plist: TrackerSequence,

    // Output
    pub audio_period: i32,
    pub audio_volume: i32,
    pub voice_period: i32,
    pub voice_volume: i32,
    /// 16.16 step through `buffer`
    pub delta: u32,
    /// 16.16 position in `buffer`
    pub sample_pos: u32,
    pub pan_left: i32,
    pub pan_right: i32,
    pub buffer: [i8; VOICE_BUFFER_LEN + 1],
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelState {
    pub fn new() -> Self {
        Self {
            track_on: true,
            track: 0,
            transpose: 0,
            next_track: 0,
            next_transpose: 0,
            instrument: 0,
            adsr: AdsrState::default(),
            adsr_volume: 0,
            note_max_volume: 0,
            perf_sub_volume: 0,
            track_master_volume: 0x40,
            volume_slide_up: 0,
            volume_slide_down: 0,
            track_period: 0,
            instr_period: 0,
            fixed_note: false,
            plant_period: false,
            period_slide_speed: 0,
            period_slide_period: 0,
            period_slide_limit: 0,
            period_slide_on: false,
            period_slide_with_limit: false,
            perf_slide_speed: 0,
            perf_slide_period: 0,
            perf_slide_on: false,
            vibrato_delay: 0,
            vibrato_depth: 0,
            vibrato_speed: 0,
            vibrato_current: 0,
            vibrato_period: 0,
            hard_cut_release: false,
            hard_cut: 0,
            hard_cut_release_frames: 0,
            note_cut_on: false,
            note_cut_wait: 0,
            note_delay_on: false,
            note_delay_wait: 0,
            wave_length: 0,
            waveform: 0,
            new_waveform: false,
            wave_source: WaveSource::None,
            noise_seed: NOISE_SEED,
            square_mod: TrackerModulator::new(),
            square_pos: 0,
            square_wait: 0,
            plant_square: false,
            ignore_square: false,
            square_temp: [0; 0x80],
            filter_mod: TrackerModulator::new(),
            filter_pos: UNFILTERED,
            filter_wait: 0,
            filter_speed: 0,
            plist: TrackerSequence::new(),
            audio_period: 0,
            audio_volume: 0,
            voice_period: 0,
            voice_volume: 0,
            delta: 1,
            sample_pos: 0,
            pan_left: 0,
            pan_right: 0,
            buffer: [0; VOICE_BUFFER_LEN + 1],
        }
    }
}
