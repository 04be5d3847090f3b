//! Single playable AHX voice for the synth instrument.
//!
//! Runs the 50 Hz frame logic (ADSR, vibrato, filter and square sweeps,
//! performance list) underneath an arbitrary audio rate and renders mono
//! float samples through a [`TrackerVoice`].

use alloc::sync::Arc;

use ahx_ir::{Instrument, Waveform};

use crate::adsr::{AdsrState, AdsrStep};
use crate::modulator::TrackerModulator;
use crate::noise::{next_noise_seed, noise_offset, NOISE_SEED};
use crate::period::{
    midi_to_note_index, note_period, NOTE_MAX, PAULA_CLOCK, VOICE_BUFFER_LEN,
};
use crate::plist::{PlistCommand, VolumeTarget};
use crate::sequence::TrackerSequence;
use crate::tracker_voice::{TrackerVoice, WaveRef};
use crate::waves::{wave_len, Waves, MAX_WAVE_LENGTH, NOISE_LEN, UNFILTERED};

/// Logical frames per second before the speed multiplier.
pub const FRAME_RATE: u32 = 50;

/// Lowest and highest period a synth voice plays.
const SYNTH_PERIOD_MIN: i32 = 113;
const SYNTH_PERIOD_MAX: i32 = 6848;

/// Revision used when decoding PList commands for the synth.
const PLIST_REVISION: u8 = 1;

/// One synth voice.
pub struct SynthVoice {
    waves: Arc<Waves>,
    instrument: Option<Arc<Instrument>>,
    playback: TrackerVoice,
    /// Current wavetable, 8-bit samples stored in the high byte
    buffer: [i16; VOICE_BUFFER_LEN + 1],
    square_temp: [i8; 0x80],

    track_on: bool,
    released: bool,

    adsr: AdsrState,
    /// 8.8 fixed point
    adsr_volume: i32,
    /// Velocity scaled to 0-64
    note_max_volume: i32,
    /// PList volume (0-64)
    perf_sub_volume: i32,
    /// Final volume (0-64)
    voice_volume: i32,

    /// Note index (1-60) of the played MIDI note
    instr_period: i32,
    voice_period: i32,
    plant_period: bool,

    vibrato_delay: i32,
    vibrato_depth: i32,
    vibrato_speed: i32,
    vibrato_current: i32,
    vibrato_period: i32,

    hard_cut_release: bool,
    hard_cut_frames: i32,
    note_cut_on: bool,
    note_cut_wait: i32,

    waveform: Waveform,
    wave_length: u8,
    new_waveform: bool,
    noise_seed: i32,

    filter_mod: TrackerModulator,
    filter_pos: i32,
    filter_wait: i32,
    square_mod: TrackerModulator,
    square_pos: i32,
    square_wait: i32,

    plist: TrackerSequence,
    plist_active: bool,
    /// Note set by the PList (0 = none)
    plist_note: i32,
    plist_fixed: bool,
    perf_slide_on: bool,
    perf_slide_speed: i32,
    perf_slide_period: i32,

    speed_multiplier: u32,
    samples_per_frame: u32,
    samples_in_frame: u32,
}

impl SynthVoice {
    pub fn new(waves: Arc<Waves>) -> Self {
        Self {
            waves,
            instrument: None,
            playback: TrackerVoice::new(),
            buffer: [0; VOICE_BUFFER_LEN + 1],
            square_temp: [0; 0x80],
            track_on: false,
            released: false,
            adsr: AdsrState::default(),
            adsr_volume: 0,
            note_max_volume: 0x40,
            perf_sub_volume: 0x40,
            voice_volume: 0,
            instr_period: 0,
            voice_period: 0,
            plant_period: false,
            vibrato_delay: 0,
            vibrato_depth: 0,
            vibrato_speed: 0,
            vibrato_current: 0,
            vibrato_period: 0,
            hard_cut_release: false,
            hard_cut_frames: 0,
            note_cut_on: false,
            note_cut_wait: 0,
            waveform: Waveform::Sawtooth,
            wave_length: 0,
            new_waveform: false,
            noise_seed: NOISE_SEED,
            filter_mod: TrackerModulator::new(),
            filter_pos: UNFILTERED,
            filter_wait: 0,
            square_mod: TrackerModulator::new(),
            square_pos: 0,
            square_wait: 0,
            plist: TrackerSequence::new(),
            plist_active: false,
            plist_note: 0,
            plist_fixed: false,
            perf_slide_on: false,
            perf_slide_speed: 0,
            perf_slide_period: 0,
            speed_multiplier: 1,
            samples_per_frame: 1,
            samples_in_frame: 0,
        }
    }

    /// Attach the instrument played by the next note-on.
    ///
    /// A sounding note keeps its runtime state; call [`recalc_adsr`](Self::recalc_adsr)
    /// or [`regenerate_waveform`](Self::regenerate_waveform) to apply the change.
    pub fn set_instrument(&mut self, instrument: Arc<Instrument>) {
        self.instrument = Some(instrument);
    }

    pub fn instrument(&self) -> Option<&Arc<Instrument>> {
        self.instrument.as_ref()
    }

    /// Frames per 50 Hz tick (1-4).
    pub fn set_speed_multiplier(&mut self, multiplier: u32) {
        self.speed_multiplier = multiplier.clamp(1, 4);
    }

    /// Start a note. Does nothing without an instrument.
    pub fn note_on(&mut self, note: u8, velocity: u8, sample_rate: u32) {
        let Some(inst) = self.instrument.clone() else {
            return;
        };

        self.released = false;
        self.track_on = true;
        self.samples_per_frame = (sample_rate / FRAME_RATE / self.speed_multiplier).max(1);
        // First frame runs on the first rendered sample
        self.samples_in_frame = self.samples_per_frame;

        self.instr_period = midi_to_note_index(note);
        self.plant_period = true;
        self.voice_period = note_period(self.instr_period);

        self.note_max_volume = (velocity as i32 * 64 / 127).min(64);
        self.perf_sub_volume = 0x40;
        self.adsr_volume = 0;
        self.adsr = AdsrState::from_envelope_min_one(&inst.envelope);

        self.vibrato_delay = inst.vibrato_delay as i32;
        self.vibrato_depth = inst.vibrato_depth as i32;
        self.vibrato_speed = inst.vibrato_speed as i32;
        self.vibrato_current = 0;
        self.vibrato_period = 0;

        self.wave_length = inst.wave_length.min(MAX_WAVE_LENGTH);
        self.waveform = inst.waveform;

        self.filter_mod = TrackerModulator::new();
        self.filter_pos = UNFILTERED;
        if inst.filter_lower != inst.filter_upper {
            self.filter_mod
                .set_limits(inst.filter_lower as i32, inst.filter_upper as i32);
            self.filter_mod.set_speed(inst.filter_speed as i32);
            self.filter_mod.set_position(UNFILTERED);
            self.filter_mod.set_active(true);
        }
        self.filter_wait = (inst.filter_speed as i32 - 3).max(1);

        self.square_mod = TrackerModulator::new();
        self.square_pos = 0;
        let shift = 5 - self.wave_length;
        let (sq_lower, sq_upper) = (
            (inst.square_lower >> shift) as i32,
            (inst.square_upper >> shift) as i32,
        );
        if sq_lower != sq_upper {
            self.square_mod.set_limits(sq_lower, sq_upper);
            self.square_mod.set_speed(inst.square_speed as i32);
            self.square_mod.set_position(0);
            self.square_mod.set_active(true);
        }
        self.square_wait = inst.square_speed as i32;

        self.hard_cut_release = inst.hard_cut_release;
        self.hard_cut_frames = inst.hard_cut_frames as i32;
        self.note_cut_on = false;
        self.note_cut_wait = 0;

        if inst.plist.is_empty() {
            self.plist.stop();
            self.plist.clear();
        } else {
            self.plist.set_data(inst.plist.len(), inst.plist.speed as i32);
            self.plist.start();
        }
        self.plist_active = self.plist.is_active();
        self.plist_note = 0;
        self.plist_fixed = false;
        self.perf_slide_on = false;
        self.perf_slide_speed = 0;
        self.perf_slide_period = 0;

        self.generate_waveform();
        self.new_waveform = false;
        self.playback
            .set_waveform(&WaveRef::Bits16(&self.buffer[..VOICE_BUFFER_LEN]));
        self.playback
            .set_period(self.voice_period as u32, PAULA_CLOCK, sample_rate);
        self.playback.reset_position();
    }

    /// Release the note. Calling it again has no further effect.
    pub fn note_off(&mut self) {
        if self.instrument.is_none() || self.released {
            return;
        }
        self.released = true;
        if self.hard_cut_release {
            self.note_cut_on = true;
            self.note_cut_wait = 0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.track_on
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Silence the voice and clear all runtime state. The instrument is kept.
    pub fn reset(&mut self) {
        let instrument = self.instrument.take();
        let speed_multiplier = self.speed_multiplier;
        *self = Self::new(Arc::clone(&self.waves));
        self.instrument = instrument;
        self.speed_multiplier = speed_multiplier;
    }

    /// Final volume (0-64).
    pub fn volume(&self) -> i32 {
        self.voice_volume
    }

    /// ADSR level, 8.8 fixed point.
    pub fn envelope_volume(&self) -> i32 {
        self.adsr_volume
    }

    pub fn period(&self) -> i32 {
        self.voice_period
    }

    /// Recompute ADSR deltas after an envelope change. Restarts the envelope stages.
    pub fn recalc_adsr(&mut self) {
        if let Some(inst) = &self.instrument {
            self.adsr = AdsrState::from_envelope_min_one(&inst.envelope);
        }
    }

    /// Pick up waveform and wave length from the instrument and rebuild the table.
    pub fn regenerate_waveform(&mut self) {
        let Some(inst) = &self.instrument else {
            return;
        };
        self.waveform = inst.waveform;
        self.wave_length = inst.wave_length.min(MAX_WAVE_LENGTH);
        if self.track_on {
            self.new_waveform = true;
        }
    }

    /// Advance the voice by one logical frame.
    pub fn process_frame(&mut self) {
        if !self.track_on {
            return;
        }
        let Some(inst) = self.instrument.clone() else {
            return;
        };
        let env = &inst.envelope;

        if self.hard_cut_release && self.note_cut_on {
            if self.note_cut_wait <= 0 {
                self.note_cut_on = false;
                let frames = if self.hard_cut_frames > 0 { self.hard_cut_frames } else { 1 };
                self.adsr
                    .hard_cut(self.adsr_volume, env.release_volume, frames);
            } else {
                self.note_cut_wait -= 1;
            }
        }

        match self.adsr.advance(&mut self.adsr_volume, env) {
            AdsrStep::Decay { done: true } if env.sustain_frames == 0 => {
                self.adsr.restart_release(env);
            }
            AdsrStep::Sustain { done: true } => {
                self.adsr.s_frames = 0;
                self.adsr.restart_release(env);
            }
            AdsrStep::Release { done: true } | AdsrStep::Idle => {
                if !self.plist_active {
                    self.track_on = false;
                }
            }
            _ => {}
        }

        if self.vibrato_delay > 0 {
            self.vibrato_delay -= 1;
        } else if self.vibrato_depth != 0 {
            self.vibrato_current = (self.vibrato_current + self.vibrato_speed) & 0xff;
            let phase = self.vibrato_current as f32 * core::f32::consts::PI / 128.0;
            self.vibrato_period = (libm::sinf(phase) * self.vibrato_depth as f32 * 8.0) as i32;
            self.plant_period = true;
        }

        self.run_plist(&inst);

        if self.perf_slide_on {
            self.perf_slide_period -= self.perf_slide_speed;
            if self.perf_slide_period != 0 {
                self.plant_period = true;
            }
        }

        if self.filter_mod.is_active() {
            self.filter_wait -= 1;
            if self.filter_wait <= 0 {
                let speed = inst.filter_speed as i32;
                let updates = if speed < 4 { 5 - speed } else { 1 };
                for _ in 0..updates {
                    self.filter_mod.update();
                }
                let pos = self.filter_mod.position().clamp(1, 63);
                self.filter_mod.set_position(pos);
                self.filter_pos = pos;
                self.filter_wait = (speed - 3).max(1);
                self.new_waveform = true;
            }
        }

        if self.waveform == Waveform::Square && self.square_mod.is_active() {
            self.square_wait -= 1;
            if self.square_wait <= 0 {
                self.square_mod.update();
                self.square_pos = self.square_mod.position();
                self.square_wait = inst.square_speed as i32;
                self.new_waveform = true;
            }
        }

        if self.new_waveform {
            self.generate_waveform();
            self.playback
                .set_waveform(&WaveRef::Bits16(&self.buffer[..VOICE_BUFFER_LEN]));
            self.new_waveform = false;
        }

        let level = (self.note_max_volume * (self.adsr_volume >> 8) * inst.volume as i32) >> 12;
        self.voice_volume = (level.clamp(0, 64) * self.perf_sub_volume) >> 6;

        if self.plant_period {
            self.plant_period = false;
            let note = if self.plist_note == 0 {
                self.instr_period
            } else if self.plist_fixed {
                self.plist_note
            } else {
                self.plist_note + self.instr_period - 1
            };
            let period =
                note_period(note.clamp(0, NOTE_MAX)) + self.vibrato_period + self.perf_slide_period;
            self.voice_period = period.clamp(SYNTH_PERIOD_MIN, SYNTH_PERIOD_MAX);
        }
    }

    /// Render mono samples into `output`.
    ///
    /// Returns the number of samples generated before the voice stopped; the
    /// rest of `output` is zeroed.
    pub fn process(&mut self, output: &mut [f32], sample_rate: u32) -> usize {
        if !self.track_on {
            output.fill(0.0);
            return 0;
        }

        for i in 0..output.len() {
            if self.samples_in_frame >= self.samples_per_frame {
                self.process_frame();
                self.samples_in_frame = 0;
                self.playback
                    .set_period(self.voice_period as u32, PAULA_CLOCK, sample_rate);
            }
            self.samples_in_frame += 1;

            let wave = WaveRef::Bits16(&self.buffer[..VOICE_BUFFER_LEN]);
            let sample = self.playback.get_sample(&wave) as f32 / 32768.0;
            output[i] = sample * (self.voice_volume as f32 / 64.0) * 0.5;

            if !self.track_on {
                output[i + 1..].fill(0.0);
                return i + 1;
            }
        }
        output.len()
    }

    fn run_plist(&mut self, inst: &Instrument) {
        if let Some(index) = self.plist.update() {
            if let Some(entry) = inst.plist.entries.get(index) {
                if (1..=4).contains(&entry.waveform) {
                    self.waveform = Waveform::from_index(entry.waveform - 1);
                    self.new_waveform = true;
                    self.perf_slide_speed = 0;
                    self.perf_slide_period = 0;
                }
                self.perf_slide_on = false;
                for (&fx, &param) in entry.fx.iter().zip(entry.fx_param.iter()) {
                    if let Some(cmd) = PlistCommand::decode(fx, param, PLIST_REVISION) {
                        self.apply_plist_command(cmd);
                    }
                }
                if entry.note != 0 {
                    self.plist_note = entry.note as i32;
                    self.plist_fixed = entry.fixed;
                    self.plant_period = true;
                }
            }
        }
        self.plist_active = self.plist.is_active() && !self.plist.is_finished();
    }

    fn apply_plist_command(&mut self, cmd: PlistCommand) {
        match cmd {
            PlistCommand::SetFilter(pos) => {
                self.filter_pos = pos;
                self.filter_mod.set_position(pos);
                self.new_waveform = true;
            }
            PlistCommand::SlideUp(speed) => {
                self.perf_slide_speed = speed;
                self.perf_slide_on = true;
            }
            PlistCommand::SlideDown(speed) => {
                self.perf_slide_speed = -speed;
                self.perf_slide_on = true;
            }
            PlistCommand::InitSquare(pos) => {
                self.square_pos = pos >> (5 - self.wave_length);
                self.square_mod.set_position(self.square_pos);
                self.new_waveform = true;
            }
            PlistCommand::ToggleModulation { square, filter } => {
                if square.is_some() {
                    let on = !self.square_mod.is_active();
                    self.square_mod.set_active(on);
                }
                if let Some(sign) = filter {
                    let on = !self.filter_mod.is_active();
                    self.filter_mod.set_direction(sign);
                    self.filter_mod.set_active(on);
                }
            }
            PlistCommand::Jump(step) => {
                if !self.released {
                    self.plist.jump(step);
                }
            }
            PlistCommand::Volume(VolumeTarget::Note, v) => self.note_max_volume = v,
            PlistCommand::Volume(VolumeTarget::PerfSub, v) => self.perf_sub_volume = v,
            PlistCommand::Volume(VolumeTarget::TrackMaster, _) => {}
            PlistCommand::Speed(speed) => self.plist.set_speed(speed),
        }
    }

    /// Fill the playback buffer from the current waveform, wave length and filter.
    fn generate_waveform(&mut self) {
        let waves = Arc::clone(&self.waves);
        let filter_pos = self.filter_pos.clamp(UNFILTERED, 63);
        let wl = self.wave_length;
        let cycle = wave_len(wl);

        match self.waveform {
            Waveform::Noise => {
                let noise = waves.noise(filter_pos);
                let offset = noise_offset(self.noise_seed);
                for (i, out) in self.buffer[..VOICE_BUFFER_LEN].iter_mut().enumerate() {
                    *out = (noise[(offset + i) % NOISE_LEN] as i16) << 8;
                }
                self.noise_seed = next_noise_seed(self.noise_seed);
            }
            Waveform::Square => {
                waves.build_square(filter_pos, self.square_pos, wl, &mut self.square_temp);
                fill_repeated(&mut self.buffer, &self.square_temp[..cycle]);
            }
            Waveform::Triangle => fill_repeated(&mut self.buffer, waves.triangle(filter_pos, wl)),
            Waveform::Sawtooth => fill_repeated(&mut self.buffer, waves.sawtooth(filter_pos, wl)),
        }
        self.buffer[VOICE_BUFFER_LEN] = self.buffer[0];
    }
}

/// Tile one waveform cycle across the playback buffer.
fn fill_repeated(buffer: &mut [i16; VOICE_BUFFER_LEN + 1], cycle: &[i8]) {
    if cycle.is_empty() {
        buffer.fill(0);
        return;
    }
    for (out, &s) in buffer[..VOICE_BUFFER_LEN]
        .iter_mut()
        .zip(cycle.iter().cycle())
    {
        *out = (s as i16) << 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahx_ir::{Envelope, PList, PListEntry};
    use alloc::vec;
    use alloc::vec::Vec;

    const RATE: u32 = 48000;

    fn waves() -> Arc<Waves> {
        Arc::new(Waves::new())
    }

    fn instrument(envelope: Envelope) -> Arc<Instrument> {
        Arc::new(Instrument {
            envelope,
            ..Instrument::new("test")
        })
    }

    fn plain_envelope() -> Envelope {
        Envelope {
            attack_frames: 4,
            attack_volume: 64,
            decay_frames: 4,
            decay_volume: 32,
            sustain_frames: 10,
            release_frames: 4,
            release_volume: 0,
        }
    }

    fn voice_with(inst: Arc<Instrument>) -> SynthVoice {
        let mut v = SynthVoice::new(waves());
        v.set_instrument(inst);
        v
    }

    #[test]
    fn new_voice_is_silent() {
        let mut v = SynthVoice::new(waves());
        assert!(!v.is_active());
        let mut out = [1.0f32; 64];
        assert_eq!(v.process(&mut out, RATE), 0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn note_on_without_instrument_is_ignored() {
        let mut v = SynthVoice::new(waves());
        v.note_on(60, 127, RATE);
        v.note_off();
        assert!(!v.is_active());
    }

    #[test]
    fn attack_reaches_its_volume() {
        for frames in [1u8, 3, 7, 20] {
            let env = Envelope {
                attack_frames: frames,
                attack_volume: 48,
                ..plain_envelope()
            };
            let mut v = voice_with(instrument(env));
            v.note_on(60, 127, RATE);
            for _ in 0..frames {
                v.process_frame();
            }
            assert_eq!(v.envelope_volume() >> 8, 48);
        }
    }

    #[test]
    fn hard_cut_release_stops_after_two_frames() {
        let inst = Arc::new(Instrument {
            envelope: plain_envelope(),
            hard_cut_release: true,
            hard_cut_frames: 2,
            ..Instrument::new("cut")
        });
        let mut v = voice_with(inst);
        v.note_on(60, 127, RATE);
        v.note_off();
        v.process_frame();
        v.process_frame();
        assert!(!v.is_active());
    }

    #[test]
    fn note_off_twice_matches_once() {
        let inst = Arc::new(Instrument {
            envelope: plain_envelope(),
            hard_cut_release: true,
            hard_cut_frames: 3,
            ..Instrument::new("cut")
        });
        let mut once = voice_with(Arc::clone(&inst));
        let mut twice = voice_with(inst);
        once.note_on(48, 100, RATE);
        twice.note_on(48, 100, RATE);
        for _ in 0..3 {
            once.process_frame();
            twice.process_frame();
        }
        once.note_off();
        twice.note_off();
        twice.note_off();
        for _ in 0..6 {
            once.process_frame();
            twice.process_frame();
            assert_eq!(once.envelope_volume(), twice.envelope_volume());
            assert_eq!(once.is_active(), twice.is_active());
        }
    }

    #[test]
    fn envelope_runs_out_and_deactivates() {
        let mut v = voice_with(instrument(plain_envelope()));
        v.note_on(60, 127, RATE);
        let mut frames = 0;
        while v.is_active() && frames < 100 {
            v.process_frame();
            frames += 1;
        }
        assert!(!v.is_active());
        assert_eq!(frames, 4 + 4 + 10 + 4);
    }

    #[test]
    fn process_produces_sound_then_stops_early() {
        let env = Envelope {
            attack_frames: 1,
            attack_volume: 64,
            decay_frames: 1,
            decay_volume: 64,
            sustain_frames: 1,
            release_frames: 1,
            release_volume: 0,
        };
        let mut v = voice_with(instrument(env));
        v.note_on(60, 127, RATE);
        let mut out = vec![0.0f32; RATE as usize];
        let written = v.process(&mut out, RATE);
        assert!(written < out.len());
        assert!(out[..written].iter().any(|&s| s != 0.0));
        assert!(out[written..].iter().all(|&s| s == 0.0));
        assert!(out.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn velocity_scales_volume() {
        let mut loud = voice_with(instrument(plain_envelope()));
        let mut quiet = voice_with(instrument(plain_envelope()));
        loud.note_on(60, 127, RATE);
        quiet.note_on(60, 40, RATE);
        for _ in 0..4 {
            loud.process_frame();
            quiet.process_frame();
        }
        assert_eq!(loud.volume(), 64);
        assert!(quiet.volume() < loud.volume());
    }

    #[test]
    fn higher_notes_have_shorter_periods() {
        let mut v = voice_with(instrument(plain_envelope()));
        v.note_on(40, 127, RATE);
        v.process_frame();
        let low = v.period();
        v.note_on(70, 127, RATE);
        v.process_frame();
        assert!(v.period() < low);
    }

    #[test]
    fn vibrato_moves_the_period() {
        let inst = Arc::new(Instrument {
            envelope: plain_envelope(),
            vibrato_depth: 8,
            vibrato_speed: 16,
            ..Instrument::new("vib")
        });
        let mut v = voice_with(inst);
        v.note_on(60, 127, RATE);
        let periods: Vec<i32> = (0..16)
            .map(|_| {
                v.process_frame();
                v.period()
            })
            .collect();
        assert!(periods.iter().any(|&p| p != periods[0]));
    }

    #[test]
    fn plist_keeps_voice_alive_and_sets_notes() {
        let entry = PListEntry {
            note: 13,
            fixed: true,
            waveform: 3,
            ..Default::default()
        };
        let inst = Arc::new(Instrument {
            envelope: Envelope {
                attack_frames: 1,
                attack_volume: 64,
                decay_frames: 1,
                decay_volume: 64,
                sustain_frames: 0,
                release_frames: 1,
                release_volume: 0,
            },
            plist: PList {
                speed: 6,
                entries: vec![PListEntry::default(), entry],
            },
            ..Instrument::new("plist")
        });
        let mut v = voice_with(inst);
        v.note_on(60, 127, RATE);
        for _ in 0..6 {
            v.process_frame();
        }
        assert!(v.is_active());
        for _ in 0..6 {
            v.process_frame();
        }
        assert_eq!(v.period(), note_period(13));
        assert_eq!(v.waveform, Waveform::Square);
    }

    #[test]
    fn reset_silences_but_keeps_instrument() {
        let mut v = voice_with(instrument(plain_envelope()));
        v.note_on(60, 127, RATE);
        v.reset();
        assert!(!v.is_active());
        assert!(v.instrument().is_some());
        v.note_on(60, 127, RATE);
        assert!(v.is_active());
    }

    #[test]
    fn square_sweep_regenerates_buffer() {
        let inst = Arc::new(Instrument {
            envelope: plain_envelope(),
            waveform: Waveform::Square,
            wave_length: 5,
            square_lower: 0x10,
            square_upper: 0x30,
            square_speed: 1,
            ..Instrument::new("pwm")
        });
        let mut v = voice_with(inst);
        v.note_on(60, 127, RATE);
        v.process_frame();
        let before = v.buffer;
        for _ in 0..4 {
            v.process_frame();
        }
        assert_ne!(before[..], v.buffer[..]);
    }
}
