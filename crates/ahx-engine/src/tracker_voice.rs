//! Fixed-point wavetable playback.
//!
//! A `TrackerVoice` holds playback state only. The waveform itself is
//! owned elsewhere and passed in as a [`WaveRef`] on every read so the
//! owner can regenerate it between samples without fighting the borrow
//! checker.

/// Highest loop point in samples a 16.16 position can hold.
const MAX_LOOP_POINT: u32 = 0xffff;

/// Borrowed waveform data of either bit depth.
#[derive(Clone, Copy, Debug)]
pub enum WaveRef<'a> {
    Bits8(&'a [i8]),
    Bits16(&'a [i16]),
}

impl<'a> WaveRef<'a> {
    /// Length in samples.
    pub fn len(&self) -> usize {
        match self {
            WaveRef::Bits8(w) => w.len(),
            WaveRef::Bits16(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bit_depth(&self) -> u8 {
        match self {
            WaveRef::Bits8(_) => 8,
            WaveRef::Bits16(_) => 16,
        }
    }

    #[inline]
    fn get(&self, index: usize) -> i32 {
        match self {
            WaveRef::Bits8(w) => w.get(index).map_or(0, |&s| s as i32),
            WaveRef::Bits16(w) => w.get(index).map_or(0, |&s| s as i32),
        }
    }
}

/// Playback state for one wavetable voice.
#[derive(Clone, Debug)]
pub struct TrackerVoice {
    /// Playback position (16.16)
    sample_pos: u32,
    /// Position increment per output sample (16.16)
    delta: u32,
    /// Waveform length (16.16), 0 when no waveform is set
    length: u32,
    bit_depth: u8,
    /// Loop start (16.16)
    loop_start: u32,
    /// Loop end, exclusive (16.16)
    loop_end: u32,
    loop_enabled: bool,
    /// 0-64
    volume: i32,
    /// 0-255
    pan_left: i32,
    /// 0-255
    pan_right: i32,
}

impl Default for TrackerVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerVoice {
    pub fn new() -> Self {
        Self {
            sample_pos: 0,
            delta: 1,
            length: 0,
            bit_depth: 8,
            loop_start: 0,
            loop_end: 0,
            loop_enabled: true,
            volume: 64,
            pan_left: 255,
            pan_right: 255,
        }
    }

    /// Install a waveform. The loop is reset to the whole buffer.
    pub fn set_waveform(&mut self, wave: &WaveRef<'_>) {
        self.length = (wave.len() as u32) << 16;
        self.bit_depth = wave.bit_depth();
        self.loop_start = 0;
        self.loop_end = self.length;
        self.loop_enabled = true;
    }

    /// Convert an Amiga period into a step. Period 0 parks the voice.
    pub fn set_period(&mut self, period: u32, clock_rate: u32, sample_rate: u32) {
        if period == 0 || sample_rate == 0 {
            self.delta = 0;
            return;
        }
        let delta = (clock_rate as u64 * 65536) / (period as u64 * sample_rate as u64);
        let mut delta = delta.min(u32::MAX as u64) as u32;
        if self.length > 0 && delta > self.length {
            delta = (delta - 1) % self.length + 1;
        }
        self.delta = delta.max(1);
    }

    pub fn set_delta(&mut self, delta: u32) {
        self.delta = delta.max(1);
    }

    /// Current step, never 0.
    pub fn delta(&self) -> u32 {
        self.delta.max(1)
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, 64);
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn set_panning(&mut self, pan_left: i32, pan_right: i32) {
        self.pan_left = pan_left.clamp(0, 255);
        self.pan_right = pan_right.clamp(0, 255);
    }

    /// Set the loop region in samples. Loops of `one_shot_threshold`
    /// samples or fewer play the waveform once instead. Loop points are
    /// clamped to what a 16.16 position can hold.
    pub fn set_loop(&mut self, start: u32, length: u32, one_shot_threshold: u32) {
        let start = start.min(MAX_LOOP_POINT);
        self.loop_start = start << 16;
        if length <= one_shot_threshold {
            self.loop_enabled = false;
            self.loop_end = self.length;
        } else {
            self.loop_enabled = true;
            self.loop_end = start.saturating_add(length).min(MAX_LOOP_POINT) << 16;
        }
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn reset_position(&mut self) {
        self.sample_pos = 0;
    }

    pub fn position(&self) -> u32 {
        self.sample_pos
    }

    pub fn set_position(&mut self, pos: u32) {
        self.sample_pos = pos;
    }

    /// Read the sample under the playhead and advance.
    pub fn get_sample(&mut self, wave: &WaveRef<'_>) -> i32 {
        if self.length == 0 || wave.is_empty() {
            return 0;
        }
        if self.sample_pos >= self.loop_end {
            if !self.loop_enabled {
                return 0;
            }
            self.wrap();
        }

        let sample = wave.get((self.sample_pos >> 16) as usize);
        self.sample_pos = self.sample_pos.wrapping_add(self.delta());
        if self.loop_enabled && self.sample_pos >= self.loop_end {
            self.wrap();
        }
        sample
    }

    /// Sample scaled by volume (0-64).
    pub fn get_sample_scaled(&mut self, wave: &WaveRef<'_>) -> i32 {
        self.get_sample(wave) * self.volume
    }

    /// Sample scaled by volume and the two pan multipliers.
    pub fn get_stereo_sample(&mut self, wave: &WaveRef<'_>) -> (i32, i32) {
        let scaled = self.get_sample_scaled(wave);
        ((scaled * self.pan_left) >> 7, (scaled * self.pan_right) >> 7)
    }

    /// Fold the position back into the loop, however far past it lies.
    fn wrap(&mut self) {
        let loop_len = self.loop_end.saturating_sub(self.loop_start);
        if loop_len == 0 {
            self.sample_pos = self.loop_start;
            return;
        }
        while self.sample_pos >= self.loop_end {
            self.sample_pos -= loop_len;
        }
    }
}
