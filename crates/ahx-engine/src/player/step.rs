//! Row processing: track effects and instrument triggers.

use crate::adsr::AdsrState;
use crate::period::note_period;
use crate::waves::{MAX_WAVE_LENGTH, UNFILTERED};

use super::Player;

impl Player {
    /// Run the current row of channel `v`.
    pub(super) fn process_step(&mut self, v: usize) {
        if !self.channels[v].track_on {
            return;
        }
        self.channels[v].volume_slide_up = 0;
        self.channels[v].volume_slide_down = 0;

        let track = self.song.position(self.pos_nr.max(0) as usize).track[v];
        let step = self.song.step(track, self.note_nr.max(0) as usize);
        let note = step.note as i32;
        let fx = step.fx;
        let param = step.fx_param as i32;
        let (lo, hi) = (param & 0x0f, param >> 4);

        match fx {
            0x0 => {
                if (1..=9).contains(&lo) {
                    self.pos_jump = lo;
                }
            }
            0x5 | 0xa => {
                let ch = &mut self.channels[v];
                ch.volume_slide_down = lo;
                ch.volume_slide_up = hi;
            }
            0xb => {
                self.pos_jump = self.pos_jump * 100 + lo + hi * 10;
                self.pattern_break = true;
            }
            0xd => {
                self.pos_jump = self.pos_nr + 1;
                self.pos_jump_note = lo + hi * 10;
                if self.pos_jump_note > self.song.track_length as i32 {
                    self.pos_jump_note = 0;
                }
                self.pattern_break = true;
            }
            0xe => match hi {
                0xc => {
                    if lo < self.tempo {
                        let ch = &mut self.channels[v];
                        ch.note_cut_wait = lo;
                        if lo != 0 {
                            ch.note_cut_on = true;
                            ch.hard_cut_release = false;
                        }
                    }
                }
                0xd => {
                    let ch = &mut self.channels[v];
                    if ch.note_delay_on {
                        ch.note_delay_on = false;
                    } else if lo < self.tempo {
                        ch.note_delay_wait = lo;
                        if lo != 0 {
                            ch.note_delay_on = true;
                            return;
                        }
                    }
                }
                _ => {}
            },
            0xf => self.tempo = param,
            _ => {}
        }

        if step.instrument != 0 {
            self.trigger_instrument(v, step.instrument);
        }

        let ch = &mut self.channels[v];
        ch.period_slide_on = false;

        let mut portamento = false;
        match fx {
            0x9 => {
                ch.square_pos = param >> (5 - ch.wave_length);
                ch.plant_square = true;
                ch.ignore_square = true;
                ch.square_mod.set_position(ch.square_pos);
            }
            0x3 | 0x5 => {
                if param != 0 {
                    ch.period_slide_speed = param;
                }
                if note != 0 {
                    let target = note_period(note);
                    let distance = note_period(ch.track_period) - target;
                    if distance + ch.period_slide_period != 0 {
                        ch.period_slide_limit = -distance;
                    }
                }
                ch.period_slide_on = true;
                ch.period_slide_with_limit = true;
                portamento = true;
            }
            _ => {}
        }

        if !portamento && note != 0 {
            ch.track_period = note;
            ch.plant_period = true;
        }

        match fx {
            0x1 => {
                ch.period_slide_speed = -param;
                ch.period_slide_on = true;
                ch.period_slide_with_limit = false;
            }
            0x2 => {
                ch.period_slide_speed = param;
                ch.period_slide_on = true;
                ch.period_slide_with_limit = false;
            }
            0xc => self.set_volume_command(v, param),
            0xe => match hi {
                0x1 => {
                    ch.period_slide_period = -lo;
                    ch.plant_period = true;
                }
                0x2 => {
                    ch.period_slide_period = lo;
                    ch.plant_period = true;
                }
                0x4 => ch.vibrato_depth = lo,
                0xa => ch.note_max_volume = (ch.note_max_volume + lo).min(0x40),
                0xb => ch.note_max_volume = (ch.note_max_volume - lo).max(0),
                _ => {}
            },
            _ => {}
        }
    }

    /// Reset channel `v` for a new note of instrument `number`.
    fn trigger_instrument(&mut self, v: usize, number: u8) {
        let Some(inst) = self.song.instrument(number) else {
            log::warn!("step references missing instrument {}", number);
            return;
        };
        let ch = &mut self.channels[v];

        ch.instrument = number;
        ch.perf_sub_volume = 0x40;
        ch.period_slide_speed = 0;
        ch.period_slide_period = 0;
        ch.period_slide_limit = 0;
        ch.adsr_volume = 0;
        ch.adsr = AdsrState::from_envelope(&inst.envelope);

        ch.wave_length = inst.wave_length.min(MAX_WAVE_LENGTH);
        ch.note_max_volume = inst.volume as i32;

        ch.vibrato_current = 0;
        ch.vibrato_delay = inst.vibrato_delay as i32;
        ch.vibrato_depth = inst.vibrato_depth as i32;
        ch.vibrato_speed = inst.vibrato_speed as i32;
        ch.vibrato_period = 0;

        ch.hard_cut_release = inst.hard_cut_release;
        ch.hard_cut = inst.hard_cut_frames as i32;

        ch.ignore_square = false;
        ch.square_wait = 0;
        let shift = 5 - ch.wave_length;
        ch.square_mod.set_limits(
            (inst.square_lower >> shift) as i32,
            (inst.square_upper >> shift) as i32,
        );
        ch.square_mod.set_position(0);
        ch.square_mod.set_active(false);

        ch.filter_wait = 0;
        ch.filter_speed = inst.filter_speed as i32;
        ch.filter_pos = UNFILTERED;
        ch.filter_mod.set_limits(
            (inst.filter_lower & 0x7f) as i32,
            (inst.filter_upper & 0x7f) as i32,
        );
        ch.filter_mod.set_position(UNFILTERED);
        ch.filter_mod.set_active(false);

        ch.plist.set_data(inst.plist.len(), inst.plist.speed as i32);
        ch.plist.start();
    }

    /// Track command C: note, global track or channel track volume.
    fn set_volume_command(&mut self, v: usize, param: i32) {
        if param <= 0x40 {
            self.channels[v].note_max_volume = param;
            return;
        }
        let all = param - 0x50;
        if all <= 0x40 {
            let volume = all.max(0);
            for ch in self.channels.iter_mut() {
                ch.track_master_volume = volume;
            }
            return;
        }
        let own = param - 0xa0;
        if own <= 0x40 {
            self.channels[v].track_master_volume = own;
        }
    }
}
