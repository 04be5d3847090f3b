//! Four-channel AHX song player.
//!
//! The player runs the song at 50 Hz times the song's speed multiplier.
//! Each tick (a vertical-blank "IRQ" on the Amiga) runs the step logic when
//! a row is due, then the per-frame logic for every channel, then copies
//! pitch, volume and wavetable changes into the mixer state.

mod channel;
mod mixer;
mod step;
mod tick;

use alloc::boxed::Box;
use alloc::sync::Arc;

use ahx_ir::{Song, NUM_CHANNELS};

use crate::waves::Waves;
use channel::ChannelState;

/// Default mix gain in percent.
const DEFAULT_GAIN_PERCENT: i32 = 76;

/// Largest mix gain multiplier accepted by [`Player::set_boost`].
pub const MAX_BOOST: u32 = 16;

/// Pan table index of the left-leaning channels (0 and 3).
const PAN_LEFT_INDEX: usize = 64;
/// Pan table index of the right-leaning channels (1 and 2).
const PAN_RIGHT_INDEX: usize = 193;

/// Song position reported to the position callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionEvent {
    pub position: usize,
    pub row: usize,
}

/// Callback fired from the audio thread when the position or row changes.
pub type PositionCallback = Box<dyn FnMut(PositionEvent) + Send>;

/// The song player.
pub struct Player {
    /// The song being played
    song: Song,
    /// Shared waveform tables
    waves: Arc<Waves>,
    /// Channel states
    channels: [ChannelState; NUM_CHANNELS],
    /// Output sample rate
    sample_rate: u32,

    // Sequencer
    pos_nr: i32,
    pos_jump: i32,
    pos_jump_note: i32,
    note_nr: i32,
    pattern_break: bool,
    /// Frames per row
    tempo: i32,
    step_wait_frames: i32,
    get_new_position: bool,
    main_volume: i32,
    playing: bool,
    song_end_reached: bool,
    /// Frames played since the subsong started
    playing_time: u32,
    disable_looping: bool,

    // Mixer
    muted: [bool; NUM_CHANNELS],
    pan_left: [i32; 256],
    pan_right: [i32; 256],
    mix_gain: i32,
    /// Samples until the next tick
    frame_counter: i32,

    last_position: Option<(i32, i32)>,
    position_callback: Option<PositionCallback>,
}

impl Player {
    /// Create a player for `song` and start its main subsong.
    pub fn new(song: Song, waves: Arc<Waves>, sample_rate: u32) -> Self {
        let (pan_left, pan_right) = mixer::panning_tables();
        let mut player = Self {
            song,
            waves,
            channels: core::array::from_fn(|_| ChannelState::new()),
            sample_rate,
            pos_nr: 0,
            pos_jump: 0,
            pos_jump_note: 0,
            note_nr: 0,
            pattern_break: false,
            tempo: 6,
            step_wait_frames: 0,
            get_new_position: true,
            main_volume: 0x40,
            playing: false,
            song_end_reached: false,
            playing_time: 0,
            disable_looping: false,
            muted: [false; NUM_CHANNELS],
            pan_left,
            pan_right,
            mix_gain: DEFAULT_GAIN_PERCENT * 256 / 100,
            frame_counter: 0,
            last_position: None,
            position_callback: None,
        };
        player.init_subsong(0);
        log::debug!(
            "player ready: \"{}\", {} positions, {} subsongs",
            player.song.title,
            player.song.position_count(),
            player.song.subsong_count()
        );
        player
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    /// Reset playback state and jump to subsong `nr` (0 = main song).
    ///
    /// Returns false and leaves the player untouched if `nr` is out of range.
    pub fn init_subsong(&mut self, nr: usize) -> bool {
        if nr > self.song.subsong_count() {
            log::warn!("subsong {} out of range", nr);
            return false;
        }

        self.pos_nr = if nr == 0 {
            0
        } else {
            self.song.subsongs[nr - 1] as i32
        };
        self.pos_jump = 0;
        self.pattern_break = false;
        self.main_volume = 0x40;
        self.playing = true;
        self.note_nr = 0;
        self.pos_jump_note = 0;
        self.tempo = 6;
        self.step_wait_frames = 0;
        self.get_new_position = true;
        self.song_end_reached = false;
        self.playing_time = 0;
        self.frame_counter = 0;
        self.last_position = None;

        for (i, ch) in self.channels.iter_mut().enumerate() {
            *ch = ChannelState::new();
            let pan = if i == 0 || i == 3 {
                PAN_LEFT_INDEX
            } else {
                PAN_RIGHT_INDEX
            };
            ch.pan_left = self.pan_left[pan];
            ch.pan_right = self.pan_right[pan];
        }
        true
    }

    pub fn subsong_count(&self) -> usize {
        self.song.subsong_count()
    }

    /// Subsong whose start position is the current position, or 0.
    pub fn current_subsong(&self) -> usize {
        self.song
            .subsongs
            .iter()
            .position(|&p| p as i32 == self.pos_nr)
            .map_or(0, |i| i + 1)
    }

    pub fn title(&self) -> &str {
        self.song.title.as_str()
    }

    /// Name of instrument `number` (1-based).
    pub fn instrument_name(&self, number: u8) -> Option<&str> {
        self.song.instrument(number).map(|i| i.name.as_str())
    }

    pub fn start(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current (position, row).
    pub fn position(&self) -> (usize, usize) {
        (self.pos_nr.max(0) as usize, self.note_nr.max(0) as usize)
    }

    pub fn song_end_reached(&self) -> bool {
        self.song_end_reached
    }

    /// Frames played since the subsong started.
    pub fn playing_time(&self) -> u32 {
        self.playing_time
    }

    /// Stop at the end of the song instead of jumping to the restart position.
    pub fn set_disable_looping(&mut self, disable: bool) {
        self.disable_looping = disable;
    }

    pub fn set_channel_mute(&mut self, channel: usize, muted: bool) {
        if let Some(m) = self.muted.get_mut(channel) {
            *m = muted;
        }
    }

    pub fn channel_muted(&self, channel: usize) -> bool {
        self.muted.get(channel).copied().unwrap_or(false)
    }

    /// Scale the mix gain. 1 is the default 76% gain; values are clamped
    /// to `1..=MAX_BOOST`.
    pub fn set_boost(&mut self, boost: u32) {
        self.mix_gain = DEFAULT_GAIN_PERCENT * 256 * boost.clamp(1, MAX_BOOST) as i32 / 100;
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    pub fn set_position_callback(&mut self, callback: PositionCallback) {
        self.position_callback = Some(callback);
    }

    pub fn clear_position_callback(&mut self) {
        self.position_callback = None;
    }

    fn notify_position(&mut self) {
        let current = (self.pos_nr, self.note_nr);
        if self.last_position == Some(current) {
            return;
        }
        self.last_position = Some(current);
        if let Some(callback) = self.position_callback.as_mut() {
            callback(PositionEvent {
                position: current.0.max(0) as usize,
                row: current.1.max(0) as usize,
            });
        }
    }
}
