//! Four-voice stereo mixer.

use ahx_ir::NUM_CHANNELS;

use crate::period::VOICE_BUFFER_LEN;
use crate::synth_voice::FRAME_RATE;

use super::Player;

/// One lap of the voice buffer in 16.16.
const BUFFER_SPAN: u32 = (VOICE_BUFFER_LEN as u32) << 16;

/// Left and right pan multipliers (0-255) for the 256 pan positions.
pub(super) fn panning_tables() -> ([i32; 256], [i32; 256]) {
    let mut left = [0; 256];
    let mut right = [0; 256];
    let step = core::f64::consts::FRAC_PI_2 / 256.0;
    let mut a = core::f64::consts::FRAC_PI_2;
    let mut b = 0.0f64;
    for i in 0..256 {
        left[i] = (libm::sin(a) * 255.0) as i32;
        right[i] = (libm::sin(b) * 255.0) as i32;
        a -= step;
        b += step;
    }
    left[255] = 0;
    right[0] = 0;
    (left, right)
}

/// Scale a channel sum by the 8.8 mix gain and clip to 16 bits.
#[inline]
fn apply_gain(sum: i32, mix_gain: i32) -> i32 {
    ((sum as i64 * mix_gain as i64) >> 8).clamp(-32768, 32767) as i32
}

impl Player {
    /// Samples between ticks at the current rate and speed multiplier.
    fn samples_per_frame(&self) -> i32 {
        let multiplier = self.song.speed_multiplier.max(1) as u32;
        (self.sample_rate / FRAME_RATE / multiplier).max(1) as i32
    }

    /// Render stereo output into `left` and `right`.
    ///
    /// Renders `min(left.len(), right.len())` frames. A stopped player
    /// writes silence.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.process_channels(left, right, [None, None, None, None]);
    }

    /// Like [`Player::process`], also writing each channel's pre-pan
    /// signal into its tap buffer when one is given.
    pub fn process_channels(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        mut taps: [Option<&mut [f32]>; NUM_CHANNELS],
    ) {
        crate::realtime(|| {
            let frames = left.len().min(right.len());
            left[..frames].fill(0.0);
            right[..frames].fill(0.0);
            for tap in taps.iter_mut().flatten() {
                tap.fill(0.0);
            }
            if !self.playing {
                return;
            }

            let samples_per_frame = self.samples_per_frame();
            let mut out = 0;
            while out < frames {
                if self.frame_counter <= 0 {
                    self.play_irq();
                    self.frame_counter = samples_per_frame;
                }
                let chunk = (frames - out).min(self.frame_counter as usize);
                self.mix_chunk(
                    &mut left[out..out + chunk],
                    &mut right[out..out + chunk],
                    &mut taps,
                    out,
                );
                out += chunk;
                self.frame_counter -= chunk as i32;
            }
        });
    }

    /// Mix one stretch with no tick inside it.
    fn mix_chunk(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        taps: &mut [Option<&mut [f32]>; NUM_CHANNELS],
        tap_offset: usize,
    ) {
        let audible: [bool; NUM_CHANNELS] =
            core::array::from_fn(|i| !self.muted[i] && self.channels[i].voice_volume != 0);
        let mix_gain = self.mix_gain;

        let mut done = 0;
        while done < left.len() {
            // Largest batch in which no voice wraps its buffer
            let mut batch = left.len() - done;
            for (ch, _) in self.channels.iter_mut().zip(audible).filter(|(_, a)| *a) {
                if ch.sample_pos >= BUFFER_SPAN {
                    ch.sample_pos -= BUFFER_SPAN;
                }
                if ch.delta > 0 {
                    let count = ((BUFFER_SPAN - ch.sample_pos - 1) / ch.delta + 1) as usize;
                    batch = batch.min(count);
                }
            }

            for n in done..done + batch {
                let mut a = 0i32;
                let mut b = 0i32;
                for (i, ch) in self.channels.iter_mut().enumerate() {
                    if !audible[i] {
                        continue;
                    }
                    let sample = ch.buffer.get((ch.sample_pos >> 16) as usize).copied().unwrap_or(0);
                    let j = sample as i32 * ch.voice_volume;
                    a += (j * ch.pan_left) >> 7;
                    b += (j * ch.pan_right) >> 7;
                    ch.sample_pos = ch.sample_pos.wrapping_add(ch.delta);
                    if let Some(tap) = taps[i].as_deref_mut().and_then(|t| t.get_mut(tap_offset + n)) {
                        *tap = j as f32 / 8192.0;
                    }
                }
                left[n] = apply_gain(a, mix_gain) as f32 / 32768.0;
                right[n] = apply_gain(b, mix_gain) as f32 / 32768.0;
            }
            done += batch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{one_note_song, player, RATE};
    use super::super::MAX_BOOST;
    use super::*;
    use alloc::vec;

    #[test]
    fn pan_tables_cross_fade() {
        let (left, right) = panning_tables();
        assert_eq!(left[0], 255);
        assert_eq!(right[0], 0);
        assert_eq!(left[255], 0);
        assert!(right[255] >= 254);
        assert!(left[64] > right[64]);
        assert!(left[193] < right[193]);
    }

    #[test]
    fn first_frame_is_audible() {
        let mut p = player(one_note_song(4));
        let frame = (RATE / FRAME_RATE) as usize;
        let mut left = vec![0.0f32; frame];
        let mut right = vec![0.0f32; frame];
        p.process(&mut left, &mut right);
        assert!(left.iter().any(|&s| s != 0.0));
        assert!(left.iter().chain(right.iter()).all(|s| (-1.0..=1.0).contains(s)));
        // Channel 0 pans left
        let energy = |buf: &[f32]| buf.iter().map(|s| s * s).sum::<f32>();
        assert!(energy(&left) > energy(&right));
    }

    #[test]
    fn stopped_player_is_silent() {
        let mut p = player(one_note_song(4));
        p.stop();
        let mut left = vec![1.0f32; 256];
        let mut right = vec![1.0f32; 256];
        p.process(&mut left, &mut right);
        assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
        assert_eq!(p.playing_time(), 0);
    }

    #[test]
    fn muted_channel_is_silent() {
        let mut p = player(one_note_song(4));
        p.set_channel_mute(0, true);
        let mut left = vec![0.0f32; 960];
        let mut right = vec![0.0f32; 960];
        p.process(&mut left, &mut right);
        assert!(left.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn tap_carries_channel_signal() {
        let mut p = player(one_note_song(4));
        let mut left = vec![0.0f32; 960];
        let mut right = vec![0.0f32; 960];
        let mut tap0 = vec![0.0f32; 960];
        let mut tap1 = vec![1.0f32; 960];
        p.process_channels(
            &mut left,
            &mut right,
            [Some(&mut tap0), Some(&mut tap1), None, None],
        );
        assert!(tap0.iter().any(|&s| s != 0.0));
        assert!(tap1.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn ticks_follow_speed_multiplier() {
        let mut song = one_note_song(4);
        song.speed_multiplier = 2;
        let mut p = player(song);
        let mut left = vec![0.0f32; RATE as usize / 50];
        let mut right = left.clone();
        p.process(&mut left, &mut right);
        assert_eq!(p.playing_time(), 2);
    }

    /// Peak (left, right) over the first two ticks at `boost`.
    fn peaks(boost: u32) -> (f32, f32) {
        let mut p = player(one_note_song(4));
        p.set_boost(boost);
        let mut left = vec![0.0f32; 2 * 960];
        let mut right = vec![0.0f32; 2 * 960];
        p.process(&mut left, &mut right);
        let peak = |buf: &[f32]| buf.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        (peak(&left), peak(&right))
    }

    #[test]
    fn full_volume_saw_hits_expected_level() {
        // -128 * 64, panned by 235/97 (>> 7), then * 194 (>> 8)
        let (left, right) = peaks(1);
        approx::assert_abs_diff_eq!(left, 11398.0 / 32768.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(right, 4705.0 / 32768.0, epsilon = 1e-6);
    }

    #[test]
    fn boost_raises_level() {
        let (one, _) = peaks(1);
        let (two, _) = peaks(2);
        approx::assert_abs_diff_eq!(two, 22854.0 / 32768.0, epsilon = 1e-6);
        assert!((two / one - 2.0).abs() < 0.01);
    }

    #[test]
    fn largest_boost_clips_without_overflow() {
        let (left, right) = peaks(MAX_BOOST);
        assert_eq!(left, 1.0);
        assert!(right <= 1.0);
        // Anything larger behaves like the maximum
        assert_eq!(peaks(u32::MAX), (left, right));
        assert_eq!(peaks(1000), (left, right));
    }

    #[test]
    fn gain_clips_to_sixteen_bits() {
        assert_eq!(apply_gain(i32::MAX, 194 * 16), 32767);
        assert_eq!(apply_gain(i32::MIN, 194 * 16), -32768);
        assert_eq!(apply_gain(-15040, 194), -11398);
    }
}
