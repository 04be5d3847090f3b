//! Frame processing: envelopes, slides, sweeps, performance lists and
//! the 50 Hz tick that drives them.

use ahx_ir::{Envelope, NUM_CHANNELS};

use crate::noise::{next_noise_seed, noise_offset};
use crate::period::{
    note_period, period_to_delta, NOTE_MAX, PERIOD_MAX, PERIOD_MIN, VIBRATO_TABLE,
    VOICE_BUFFER_LEN,
};
use crate::plist::{PlistCommand, VolumeTarget};
use crate::waves::wave_len;

use super::channel::{ChannelState, WaveSource};
use super::Player;

impl Player {
    /// One tick: row processing when due, frame processing, then audio update.
    pub(super) fn play_irq(&mut self) {
        if self.step_wait_frames <= 0 {
            if self.get_new_position {
                let count = self.song.position_count() as i32;
                let next = if self.pos_nr + 1 >= count { 0 } else { self.pos_nr + 1 };
                let current = self.song.position(self.pos_nr.max(0) as usize);
                let upcoming = self.song.position(next as usize);
                for (i, ch) in self.channels.iter_mut().enumerate() {
                    ch.track = current.track[i];
                    ch.transpose = current.transpose[i] as i32;
                    ch.next_track = upcoming.track[i];
                    ch.next_transpose = upcoming.transpose[i] as i32;
                }
                self.get_new_position = false;
            }
            for v in 0..NUM_CHANNELS {
                self.process_step(v);
            }
            self.step_wait_frames = self.tempo;
        }

        for v in 0..NUM_CHANNELS {
            self.process_frame(v);
        }
        self.playing_time = self.playing_time.wrapping_add(1);

        if self.tempo > 0 {
            self.step_wait_frames -= 1;
            if self.step_wait_frames <= 0 {
                self.advance_row();
            }
        }

        for v in 0..NUM_CHANNELS {
            self.set_audio(v);
        }
        self.notify_position();
    }

    fn advance_row(&mut self) {
        if !self.pattern_break {
            self.note_nr += 1;
            if self.note_nr >= self.song.track_length as i32 {
                self.pos_jump = self.pos_nr + 1;
                self.pos_jump_note = 0;
                self.pattern_break = true;
            }
        }
        if !self.pattern_break {
            return;
        }

        self.pattern_break = false;
        self.note_nr = self.pos_jump_note;
        self.pos_jump_note = 0;
        self.pos_nr = self.pos_jump;
        self.pos_jump = 0;

        let count = self.song.position_count() as i32;
        if self.pos_nr >= count {
            self.song_end_reached = true;
            let restart = self.song.restart as i32;
            self.pos_nr = if restart < count { restart } else { 0 };
            if self.disable_looping {
                self.playing = false;
            }
        }
        self.get_new_position = true;
    }

    /// Per-frame update of channel `v`.
    pub(super) fn process_frame(&mut self, v: usize) {
        if !self.channels[v].track_on {
            return;
        }

        if self.channels[v].note_delay_on {
            if self.channels[v].note_delay_wait <= 0 {
                self.process_step(v);
            } else {
                self.channels[v].note_delay_wait -= 1;
            }
        }

        let Self {
            song,
            waves,
            channels,
            tempo,
            note_nr,
            main_volume,
            ..
        } = self;
        let ch = &mut channels[v];
        let inst = song.instrument(ch.instrument);
        let env: Envelope = inst.map(|i| i.envelope).unwrap_or_default();

        if ch.hard_cut != 0 {
            let next_row = *note_nr + 1;
            let next_instrument = if next_row < song.track_length as i32 {
                song.step(ch.track, next_row as usize).instrument
            } else {
                song.step(ch.next_track, 0).instrument
            };
            if next_instrument != 0 {
                let start = (*tempo - ch.hard_cut).max(0);
                if !ch.note_cut_on {
                    ch.note_cut_on = true;
                    ch.note_cut_wait = start;
                    ch.hard_cut_release_frames = *tempo - start;
                } else {
                    ch.hard_cut = 0;
                }
            }
        }

        if ch.note_cut_on {
            if ch.note_cut_wait <= 0 {
                ch.note_cut_on = false;
                if ch.hard_cut_release {
                    ch.adsr.hard_cut(
                        ch.adsr_volume,
                        env.release_volume,
                        ch.hard_cut_release_frames,
                    );
                } else {
                    ch.note_max_volume = 0;
                }
            } else {
                ch.note_cut_wait -= 1;
            }
        }

        ch.adsr.advance(&mut ch.adsr_volume, &env);

        ch.note_max_volume =
            (ch.note_max_volume + ch.volume_slide_up - ch.volume_slide_down).clamp(0, 0x40);

        if ch.period_slide_on {
            if ch.period_slide_with_limit {
                let distance = ch.period_slide_period - ch.period_slide_limit;
                let speed = if distance > 0 {
                    -ch.period_slide_speed
                } else {
                    ch.period_slide_speed
                };
                if distance != 0 {
                    // Snap to the limit once the step would overshoot it
                    ch.period_slide_period = if (distance + speed) ^ distance >= 0 {
                        ch.period_slide_period + speed
                    } else {
                        ch.period_slide_limit
                    };
                    ch.plant_period = true;
                }
            } else {
                ch.period_slide_period += ch.period_slide_speed;
                ch.plant_period = true;
            }
        }

        if ch.vibrato_depth != 0 {
            if ch.vibrato_delay <= 0 {
                let sine = VIBRATO_TABLE[(ch.vibrato_current & 0x3f) as usize] as i32;
                ch.vibrato_period = (sine * ch.vibrato_depth) >> 7;
                ch.plant_period = true;
                ch.vibrato_current = (ch.vibrato_current + ch.vibrato_speed) & 0x3f;
            } else {
                ch.vibrato_delay -= 1;
            }
        }

        let prev_wait = ch.plist.wait();
        match ch.plist.update() {
            Some(index) => {
                if let Some(entry) = inst.and_then(|i| i.plist.entries.get(index)) {
                    if entry.waveform != 0 {
                        ch.waveform = (entry.waveform - 1).min(3);
                        ch.new_waveform = true;
                        ch.perf_slide_speed = 0;
                        ch.perf_slide_period = 0;
                    }
                    ch.perf_slide_on = false;
                    for (&fx, &param) in entry.fx.iter().zip(entry.fx_param.iter()) {
                        if let Some(cmd) = PlistCommand::decode(fx, param, song.revision) {
                            apply_plist_command(ch, cmd);
                        }
                    }
                    if entry.note != 0 {
                        ch.instr_period = entry.note as i32;
                        ch.plant_period = true;
                        ch.fixed_note = entry.fixed;
                    }
                }
            }
            None => {
                if ch.plist.is_exhausted() && prev_wait == 0 {
                    ch.perf_slide_speed = 0;
                }
            }
        }

        if ch.perf_slide_on {
            ch.perf_slide_period -= ch.perf_slide_speed;
            if ch.perf_slide_period != 0 {
                ch.plant_period = true;
            }
        }

        if ch.waveform == 2 && ch.square_mod.is_active() {
            ch.square_wait -= 1;
            if ch.square_wait <= 0 {
                ch.square_mod.update();
                ch.square_pos = ch.square_mod.position();
                ch.plant_square = true;
                ch.square_wait = inst.map_or(0, |i| i.square_speed as i32);
            }
        }

        if ch.filter_mod.is_active() {
            ch.filter_wait -= 1;
            if ch.filter_wait <= 0 {
                let updates = if ch.filter_speed < 4 { 5 - ch.filter_speed } else { 1 };
                for _ in 0..updates {
                    ch.filter_mod.update();
                }
                let pos = ch.filter_mod.position().clamp(1, 63);
                ch.filter_mod.set_position(pos);
                ch.filter_pos = pos;
                ch.new_waveform = true;
                ch.filter_wait = (ch.filter_speed - 3).max(1);
            }
        }

        if ch.waveform == 2 || ch.plant_square {
            waves.build_square(ch.filter_pos, ch.square_pos, ch.wave_length, &mut ch.square_temp);
            ch.new_waveform = true;
            ch.waveform = 2;
            ch.plant_square = false;
        }

        if ch.waveform == 3 {
            ch.new_waveform = true;
        }

        if ch.new_waveform {
            let filter_pos = ch.filter_pos;
            ch.wave_source = match ch.waveform {
                0 => WaveSource::Triangle { filter_pos },
                1 => WaveSource::Sawtooth { filter_pos },
                2 => WaveSource::Square,
                _ => {
                    let offset = noise_offset(ch.noise_seed);
                    ch.noise_seed = next_noise_seed(ch.noise_seed);
                    WaveSource::Noise { filter_pos, offset }
                }
            };
        }

        let mut note = ch.instr_period;
        if !ch.fixed_note {
            note += ch.transpose + ch.track_period - 1;
        }
        let mut period = note_period(note.clamp(0, NOTE_MAX));
        if !ch.fixed_note {
            period += ch.period_slide_period;
        }
        period += ch.perf_slide_period + ch.vibrato_period;
        ch.audio_period = period.clamp(PERIOD_MIN, PERIOD_MAX);

        let mut volume = ((ch.adsr_volume >> 8) * ch.note_max_volume) >> 6;
        volume = (volume * ch.perf_sub_volume) >> 6;
        volume = (volume * ch.track_master_volume) >> 6;
        ch.audio_volume = (volume * *main_volume) >> 6;
    }

    /// Copy frame results into the mixer state of channel `v`.
    pub(super) fn set_audio(&mut self, v: usize) {
        let sample_rate = self.sample_rate;
        let waves = &self.waves;
        let ch = &mut self.channels[v];
        if !ch.track_on {
            ch.voice_volume = 0;
            return;
        }

        ch.voice_volume = ch.audio_volume;
        if ch.plant_period {
            ch.plant_period = false;
            ch.voice_period = ch.audio_period;
        }
        if ch.voice_period != 0 {
            ch.delta = period_to_delta(ch.voice_period, sample_rate);
        }

        if ch.new_waveform {
            let wl = ch.wave_length;
            match ch.wave_source {
                WaveSource::None => {}
                WaveSource::Square => tile(&mut ch.buffer, &ch.square_temp[..wave_len(wl)]),
                WaveSource::Triangle { filter_pos } => {
                    tile(&mut ch.buffer, waves.triangle(filter_pos, wl))
                }
                WaveSource::Sawtooth { filter_pos } => {
                    tile(&mut ch.buffer, waves.sawtooth(filter_pos, wl))
                }
                WaveSource::Noise { filter_pos, offset } => {
                    if let Some(noise) = waves.noise(filter_pos).get(offset..offset + VOICE_BUFFER_LEN) {
                        ch.buffer[..VOICE_BUFFER_LEN].copy_from_slice(noise);
                    }
                }
            }
            ch.buffer[VOICE_BUFFER_LEN] = ch.buffer[0];
            ch.new_waveform = false;
        }
    }
}

/// Run one decoded PList command against a channel.
fn apply_plist_command(ch: &mut ChannelState, cmd: PlistCommand) {
    match cmd {
        PlistCommand::SetFilter(pos) => {
            ch.filter_pos = pos;
            ch.new_waveform = true;
            ch.filter_mod.set_position(pos);
        }
        PlistCommand::SlideUp(speed) => {
            ch.perf_slide_speed = speed;
            ch.perf_slide_on = true;
        }
        PlistCommand::SlideDown(speed) => {
            ch.perf_slide_speed = -speed;
            ch.perf_slide_on = true;
        }
        PlistCommand::InitSquare(pos) => {
            if ch.ignore_square {
                ch.ignore_square = false;
            } else {
                ch.square_pos = pos >> (5 - ch.wave_length);
                ch.square_mod.set_position(ch.square_pos);
            }
        }
        PlistCommand::ToggleModulation { square, filter } => {
            if square.is_some() {
                let on = !ch.square_mod.is_active();
                ch.square_mod.set_active(on);
            }
            if let Some(sign) = filter {
                let on = !ch.filter_mod.is_active();
                ch.filter_mod.set_active(on);
                ch.filter_mod.set_direction(sign);
            }
        }
        PlistCommand::Jump(step) => ch.plist.jump(step),
        PlistCommand::Volume(VolumeTarget::Note, v) => ch.note_max_volume = v,
        PlistCommand::Volume(VolumeTarget::PerfSub, v) => ch.perf_sub_volume = v,
        PlistCommand::Volume(VolumeTarget::TrackMaster, v) => ch.track_master_volume = v,
        PlistCommand::Speed(speed) => ch.plist.set_speed(speed),
    }
}

/// Repeat one waveform cycle across the whole voice buffer.
fn tile(buffer: &mut [i8; VOICE_BUFFER_LEN + 1], cycle: &[i8]) {
    if cycle.is_empty() {
        return;
    }
    for (out, &s) in buffer[..VOICE_BUFFER_LEN].iter_mut().zip(cycle.iter().cycle()) {
        *out = s;
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{one_note_song, player, saw_instrument};
    use super::*;
    use ahx_ir::{PList, PListEntry, Step};
    use alloc::vec;

    #[test]
    fn first_tick_triggers_note() {
        let mut p = player(one_note_song(1));
        p.play_irq();
        let ch = &p.channels[0];
        assert_eq!(ch.instrument, 1);
        assert_eq!(ch.waveform, 1);
        // Track note 25 with no PList note plays table entry 24
        assert_eq!(ch.voice_period, note_period(24));
        assert!(ch.voice_volume > 0);
        assert!(ch.buffer.iter().any(|&s| s != 0));
    }

    #[test]
    fn song_end_loops_to_restart() {
        let mut p = player(one_note_song(1));
        for _ in 0..6 {
            p.play_irq();
        }
        assert!(p.song_end_reached());
        assert!(p.is_playing());
        assert_eq!(p.position(), (0, 0));
    }

    #[test]
    fn song_end_stops_without_looping() {
        let mut p = player(one_note_song(1));
        p.set_disable_looping(true);
        for _ in 0..6 {
            p.play_irq();
        }
        assert!(p.song_end_reached());
        assert!(!p.is_playing());
    }

    #[test]
    fn rows_advance_every_tempo_frames() {
        let mut p = player(one_note_song(8));
        for _ in 0..6 {
            p.play_irq();
        }
        assert_eq!(p.position(), (0, 1));
        for _ in 0..6 {
            p.play_irq();
        }
        assert_eq!(p.position(), (0, 2));
        assert_eq!(p.playing_time(), 12);
    }

    #[test]
    fn portamento_slides_to_limit() {
        let mut song = one_note_song(8);
        song.tracks[1][1] = Step {
            note: 37,
            instrument: 0,
            fx: 0x3,
            fx_param: 0xff,
        };
        let mut p = player(song);
        for _ in 0..20 {
            p.play_irq();
        }
        let ch = &p.channels[0];
        assert_eq!(ch.period_slide_period, ch.period_slide_limit);
        assert_eq!(ch.audio_period, note_period(24) + ch.period_slide_limit);
    }

    #[test]
    fn vibrato_modulates_period() {
        let mut song = one_note_song(8);
        song.instruments[0].vibrato_depth = 8;
        song.instruments[0].vibrato_speed = 8;
        song.instruments[0].envelope.sustain_frames = 50;
        let mut p = player(song);
        let mut periods = vec![];
        for _ in 0..10 {
            p.play_irq();
            periods.push(p.channels[0].audio_period);
        }
        assert!(periods.iter().any(|&x| x != periods[0]));
    }

    #[test]
    fn noise_refreshes_every_frame() {
        let mut song = one_note_song(8);
        song.instruments[0].plist.entries[0].waveform = 4;
        song.instruments[0].envelope.sustain_frames = 50;
        let mut p = player(song);
        p.play_irq();
        let first = p.channels[0].buffer;
        p.play_irq();
        assert_ne!(first[..], p.channels[0].buffer[..]);
    }

    #[test]
    fn plist_fixed_note_ignores_track_note() {
        let mut song = one_note_song(8);
        song.instruments[0].plist = PList {
            speed: 1,
            entries: vec![PListEntry {
                note: 5,
                fixed: true,
                waveform: 1,
                ..Default::default()
            }],
        };
        let mut p = player(song);
        p.play_irq();
        assert_eq!(p.channels[0].audio_period, note_period(5));
    }

    #[test]
    fn hard_cut_releases_before_next_instrument() {
        let mut song = one_note_song(2);
        let mut inst = saw_instrument(ahx_ir::Envelope {
            attack_frames: 1,
            attack_volume: 64,
            decay_frames: 1,
            decay_volume: 64,
            sustain_frames: 100,
            release_frames: 1,
            release_volume: 0,
        });
        inst.hard_cut_release = true;
        inst.hard_cut_frames = 2;
        song.instruments[0] = inst;
        song.tracks[1][1] = Step {
            note: 30,
            instrument: 1,
            fx: 0,
            fx_param: 0,
        };
        let mut p = player(song);
        for _ in 0..6 {
            p.play_irq();
        }
        assert_eq!(p.channels[0].adsr_volume, 0);
    }

    #[test]
    fn tile_repeats_cycle() {
        let mut buffer = [0i8; VOICE_BUFFER_LEN + 1];
        tile(&mut buffer, &[1, 2, 3, 4]);
        assert_eq!(&buffer[..8], &[1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(buffer[VOICE_BUFFER_LEN - 1], 4);
    }
}
