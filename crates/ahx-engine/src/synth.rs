//! Polyphonic synth instrument built on [`SynthVoice`].

use alloc::sync::Arc;

use ahx_ir::{Instrument, InstrumentParams, ParamId};

use crate::synth_voice::SynthVoice;
use crate::waves::Waves;

/// Voices allocated by [`SynthInstrument::new`].
pub const DEFAULT_POLYPHONY: usize = 8;

/// Upper bound on voices per instrument.
pub const MAX_POLYPHONY: usize = 16;

/// Samples rendered per voice pass.
const MIX_CHUNK: usize = 256;

struct VoiceSlot {
    voice: SynthVoice,
    /// MIDI note the voice was started with
    note: u8,
    /// Note-on stamp, higher is newer
    age: u64,
}

/// A playable instrument: one parameter set shared by a pool of voices.
pub struct SynthInstrument {
    params: InstrumentParams,
    instrument: Arc<Instrument>,
    slots: heapless::Vec<VoiceSlot, MAX_POLYPHONY>,
    sample_rate: u32,
    next_age: u64,
    scratch: [f32; MIX_CHUNK],
}

impl SynthInstrument {
    /// Create an instrument with default parameters and [`DEFAULT_POLYPHONY`] voices.
    pub fn new(waves: Arc<Waves>, sample_rate: u32) -> Self {
        Self::with_polyphony(waves, sample_rate, DEFAULT_POLYPHONY)
    }

    /// Create an instrument with `polyphony` voices (1 to [`MAX_POLYPHONY`]).
    pub fn with_polyphony(waves: Arc<Waves>, sample_rate: u32, polyphony: usize) -> Self {
        let params = InstrumentParams::default();
        let instrument = Arc::new(Instrument::from(&params));
        let mut slots = heapless::Vec::new();
        for _ in 0..polyphony.clamp(1, MAX_POLYPHONY) {
            let mut voice = SynthVoice::new(Arc::clone(&waves));
            voice.set_instrument(Arc::clone(&instrument));
            if slots.push(VoiceSlot { voice, note: 0, age: 0 }).is_err() {
                break;
            }
        }
        Self {
            params,
            instrument,
            slots,
            sample_rate,
            next_age: 0,
            scratch: [0.0; MIX_CHUNK],
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Takes effect on the next note-on.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    pub fn polyphony(&self) -> usize {
        self.slots.len()
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        if velocity == 0 {
            self.note_off(note);
            return;
        }
        let index = self.allocate(note);
        self.next_age += 1;
        let sample_rate = self.sample_rate;
        if let Some(slot) = self.slots.get_mut(index) {
            slot.note = note;
            slot.age = self.next_age;
            slot.voice.note_on(note, velocity, sample_rate);
        }
    }

    /// Release every held voice playing `note`.
    pub fn note_off(&mut self, note: u8) {
        for slot in self.slots.iter_mut() {
            if slot.note == note && slot.voice.is_active() && !slot.voice.is_released() {
                slot.voice.note_off();
            }
        }
    }

    pub fn all_notes_off(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.voice.note_off();
        }
    }

    /// Silence all voices immediately.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.voice.reset();
            slot.note = 0;
            slot.age = 0;
        }
        self.next_age = 0;
    }

    pub fn is_active(&self) -> bool {
        self.slots.iter().any(|s| s.voice.is_active())
    }

    pub fn active_voices(&self) -> usize {
        self.slots.iter().filter(|s| s.voice.is_active()).count()
    }

    /// Render all voices mixed to mono into both channels.
    ///
    /// Renders `min(left.len(), right.len())` frames and returns that count.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) -> usize {
        crate::realtime(|| self.mix_voices(left, right))
    }

    fn mix_voices(&mut self, left: &mut [f32], right: &mut [f32]) -> usize {
        let frames = left.len().min(right.len());
        left[..frames].fill(0.0);

        let sample_rate = self.sample_rate;
        let mut start = 0;
        while start < frames {
            let len = (frames - start).min(MIX_CHUNK);
            let out = &mut left[start..start + len];
            for slot in self.slots.iter_mut() {
                if !slot.voice.is_active() {
                    continue;
                }
                let scratch = &mut self.scratch[..len];
                slot.voice.process(scratch, sample_rate);
                for (o, s) in out.iter_mut().zip(scratch.iter()) {
                    *o += *s;
                }
            }
            start += len;
        }

        right[..frames].copy_from_slice(&left[..frames]);
        frames
    }

    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Replace every parameter. Live voices pick up the new envelope and waveform.
    pub fn set_params(&mut self, params: InstrumentParams) {
        self.params = params;
        self.rebuild_instrument(true, true);
    }

    /// Read one parameter.
    pub fn param(&self, id: ParamId) -> f32 {
        self.params.get(id)
    }

    /// Write one parameter.
    pub fn set_param(&mut self, id: ParamId, value: f32) {
        self.params.set(id, value);
        self.rebuild_instrument(id.affects_envelope(), id.affects_waveform());
    }

    /// Parameter by host index, `None` for an unknown index.
    pub fn param_by_index(&self, index: usize) -> Option<f32> {
        ParamId::from_index(index).map(|id| self.param(id))
    }

    pub fn set_param_by_index(&mut self, index: usize, value: f32) {
        match ParamId::from_index(index) {
            Some(id) => self.set_param(id, value),
            None => log::warn!("ignoring unknown parameter index {}", index),
        }
    }

    fn rebuild_instrument(&mut self, envelope: bool, waveform: bool) {
        self.instrument = Arc::new(Instrument::from(&self.params));
        for slot in self.slots.iter_mut() {
            slot.voice.set_instrument(Arc::clone(&self.instrument));
            if !slot.voice.is_active() {
                continue;
            }
            if envelope {
                slot.voice.recalc_adsr();
            }
            if waveform {
                slot.voice.regenerate_waveform();
            }
        }
    }

    /// Pick a slot for `note`: same note, then a free voice, then steal.
    fn allocate(&self, note: u8) -> usize {
        if let Some(i) = self
            .slots
            .iter()
            .position(|s| s.voice.is_active() && s.note == note)
        {
            return i;
        }
        if let Some(i) = self.slots.iter().position(|s| !s.voice.is_active()) {
            return i;
        }
        self.find_steal_candidate()
    }

    /// Oldest released voice, else the oldest voice.
    fn find_steal_candidate(&self) -> usize {
        let priority = |slot: &VoiceSlot| if slot.voice.is_released() { 0 } else { 1 };
        self.slots
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| (priority(s), s.age))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahx_ir::Envelope;
    use alloc::vec;

    const RATE: u32 = 48000;

    fn synth(polyphony: usize) -> SynthInstrument {
        SynthInstrument::with_polyphony(Arc::new(Waves::new()), RATE, polyphony)
    }

    fn long_notes() -> InstrumentParams {
        InstrumentParams {
            envelope: Envelope {
                attack_frames: 1,
                attack_volume: 64,
                decay_frames: 1,
                decay_volume: 64,
                sustain_frames: 200,
                release_frames: 20,
                release_volume: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn note_on_activates_a_voice() {
        let mut s = synth(4);
        assert!(!s.is_active());
        s.note_on(60, 100);
        assert_eq!(s.active_voices(), 1);
    }

    #[test]
    fn same_note_retriggers_same_voice() {
        let mut s = synth(4);
        s.note_on(60, 100);
        s.note_on(60, 100);
        assert_eq!(s.active_voices(), 1);
    }

    #[test]
    fn steals_oldest_when_full() {
        let mut s = synth(2);
        s.set_params(long_notes());
        s.note_on(60, 100);
        s.note_on(62, 100);
        s.note_on(64, 100);
        assert_eq!(s.active_voices(), 2);
        let notes: vec::Vec<u8> = s.slots.iter().map(|v| v.note).collect();
        assert!(!notes.contains(&60));
        assert!(notes.contains(&62) && notes.contains(&64));
    }

    #[test]
    fn released_voice_is_stolen_first() {
        let mut s = synth(2);
        s.set_params(long_notes());
        s.note_on(60, 100);
        s.note_on(62, 100);
        s.note_off(62);
        s.note_on(64, 100);
        let notes: vec::Vec<u8> = s.slots.iter().map(|v| v.note).collect();
        assert!(notes.contains(&60));
        assert!(notes.contains(&64));
    }

    #[test]
    fn process_mixes_into_both_channels() {
        let mut s = synth(4);
        s.set_params(long_notes());
        s.note_on(60, 127);
        s.note_on(67, 127);
        let mut left = vec![0.0f32; 1000];
        let mut right = vec![0.0f32; 1000];
        assert_eq!(s.process(&mut left, &mut right), 1000);
        assert!(left.iter().any(|&x| x != 0.0));
        assert_eq!(left, right);
    }

    #[test]
    fn reset_silences_everything() {
        let mut s = synth(4);
        s.note_on(60, 100);
        s.note_on(64, 100);
        s.reset();
        assert!(!s.is_active());
    }

    #[test]
    fn velocity_zero_is_note_off() {
        let mut s = synth(4);
        s.set_params(long_notes());
        s.note_on(60, 100);
        s.note_on(60, 0);
        assert!(s.slots.iter().any(|v| v.voice.is_released()));
    }

    #[test]
    fn params_round_trip_by_index() {
        let mut s = synth(1);
        s.set_param_by_index(ParamId::AttackFrames.index(), 12.0);
        assert_eq!(s.param(ParamId::AttackFrames), 12.0);
        assert_eq!(s.param_by_index(99), None);
        assert_eq!(s.instrument.envelope.attack_frames, 12);
    }

    #[test]
    fn polyphony_is_clamped() {
        assert_eq!(synth(0).polyphony(), 1);
        assert_eq!(synth(64).polyphony(), MAX_POLYPHONY);
        assert_eq!(
            SynthInstrument::new(Arc::new(Waves::new()), RATE).polyphony(),
            DEFAULT_POLYPHONY
        );
    }
}
