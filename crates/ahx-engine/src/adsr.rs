//! Frame-quantized ADSR runtime state.

use ahx_ir::Envelope;

/// Per-note envelope counters and per-frame deltas.
///
/// Volumes are 8.8 fixed point. A stage with a frame count of 0 is skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdsrState {
    pub a_frames: i32,
    pub a_delta: i32,
    pub d_frames: i32,
    pub d_delta: i32,
    pub s_frames: i32,
    pub r_frames: i32,
    pub r_delta: i32,
}

/// What one `advance` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdsrStep {
    Attack { done: bool },
    Decay { done: bool },
    Sustain { done: bool },
    Release { done: bool },
    /// Every stage has run out
    Idle,
}

/// `(to - from) * 256 / frames`, or the whole jump when frames is 0.
fn stage_delta(from: u8, to: u8, frames: i32) -> i32 {
    let span = (to as i32 - from as i32) * 256;
    if frames > 0 {
        span / frames
    } else {
        span
    }
}

impl AdsrState {
    /// Deltas used by the song player. Zero-frame stages are skipped.
    pub fn from_envelope(env: &Envelope) -> Self {
        let a_frames = env.attack_frames as i32;
        let d_frames = env.decay_frames as i32;
        let r_frames = env.release_frames as i32;
        Self {
            a_frames,
            a_delta: stage_delta(0, env.attack_volume, a_frames),
            d_frames,
            d_delta: stage_delta(env.attack_volume, env.decay_volume, d_frames),
            s_frames: env.sustain_frames as i32,
            r_frames,
            r_delta: stage_delta(env.decay_volume, env.release_volume, r_frames),
        }
    }

    /// Deltas used by the synth voice. Zero-frame stages take one frame.
    pub fn from_envelope_min_one(env: &Envelope) -> Self {
        let mut adsr = Self::from_envelope(env);
        adsr.a_frames = adsr.a_frames.max(1);
        adsr.d_frames = adsr.d_frames.max(1);
        adsr.r_frames = adsr.r_frames.max(1);
        adsr
    }

    /// Re-arm the release stage from the instrument (decay level to release level).
    pub fn restart_release(&mut self, env: &Envelope) {
        let frames = (env.release_frames as i32).max(1);
        self.r_frames = frames;
        self.r_delta = stage_delta(env.decay_volume, env.release_volume, frames);
    }

    /// Jump straight to a release from `volume` down to `target` over `frames`.
    pub fn hard_cut(&mut self, volume: i32, target: u8, frames: i32) {
        let frames = frames.max(1);
        self.a_frames = 0;
        self.d_frames = 0;
        self.s_frames = 0;
        self.r_frames = frames;
        self.r_delta = -(volume - ((target as i32) << 8)) / frames;
    }

    /// Run one frame of the envelope against `volume`.
    ///
    /// When a stage finishes the volume snaps to the stage's target level.
    pub fn advance(&mut self, volume: &mut i32, env: &Envelope) -> AdsrStep {
        if self.a_frames != 0 {
            *volume += self.a_delta;
            self.a_frames -= 1;
            let done = self.a_frames <= 0;
            if done {
                *volume = (env.attack_volume as i32) << 8;
            }
            AdsrStep::Attack { done }
        } else if self.d_frames != 0 {
            *volume += self.d_delta;
            self.d_frames -= 1;
            let done = self.d_frames <= 0;
            if done {
                *volume = (env.decay_volume as i32) << 8;
            }
            AdsrStep::Decay { done }
        } else if self.s_frames != 0 {
            self.s_frames -= 1;
            AdsrStep::Sustain { done: self.s_frames <= 0 }
        } else if self.r_frames != 0 {
            *volume += self.r_delta;
            self.r_frames -= 1;
            let done = self.r_frames <= 0;
            if done {
                *volume = (env.release_volume as i32) << 8;
            }
            AdsrStep::Release { done }
        } else {
            AdsrStep::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(a: (u8, u8), d: (u8, u8), s: u8, r: (u8, u8)) -> Envelope {
        Envelope {
            attack_frames: a.0,
            attack_volume: a.1,
            decay_frames: d.0,
            decay_volume: d.1,
            sustain_frames: s,
            release_frames: r.0,
            release_volume: r.1,
        }
    }

    #[test]
    fn attack_reaches_target_after_its_frames() {
        for frames in 1..=20u8 {
            let e = env((frames, 50), (5, 20), 3, (5, 0));
            let mut adsr = AdsrState::from_envelope(&e);
            let mut vol = 0;
            for _ in 0..frames {
                adsr.advance(&mut vol, &e);
            }
            assert_eq!(vol >> 8, 50, "attack of {} frames", frames);
        }
    }

    #[test]
    fn stages_run_in_order() {
        let e = env((1, 64), (1, 32), 1, (1, 0));
        let mut adsr = AdsrState::from_envelope(&e);
        let mut vol = 0;
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Attack { done: true });
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Decay { done: true });
        assert_eq!(vol, 32 << 8);
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Sustain { done: true });
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Release { done: true });
        assert_eq!(vol, 0);
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Idle);
    }

    #[test]
    fn zero_frame_stage_is_skipped_by_player_deltas() {
        let e = env((1, 64), (0, 0), 0, (1, 0));
        let mut adsr = AdsrState::from_envelope(&e);
        let mut vol = 0;
        adsr.advance(&mut vol, &e);
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Release { done: true });
    }

    #[test]
    fn synth_deltas_give_zero_frame_stages_one_frame() {
        let e = env((0, 64), (0, 10), 0, (0, 0));
        let adsr = AdsrState::from_envelope_min_one(&e);
        assert_eq!((adsr.a_frames, adsr.a_delta), (1, 64 * 256));
        assert_eq!((adsr.d_frames, adsr.d_delta), (1, -54 * 256));
        assert_eq!(adsr.r_frames, 1);
    }

    #[test]
    fn hard_cut_ramps_to_release_level() {
        let e = env((1, 64), (1, 64), 10, (30, 0));
        let mut adsr = AdsrState::from_envelope(&e);
        let mut vol = 64 << 8;
        adsr.hard_cut(vol, e.release_volume, 2);
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Release { done: false });
        assert_eq!(vol, 32 << 8);
        assert_eq!(adsr.advance(&mut vol, &e), AdsrStep::Release { done: true });
        assert_eq!(vol, 0);
    }

    #[test]
    fn hard_cut_with_zero_frames_is_one_frame() {
        let e = env((1, 64), (1, 64), 0, (1, 0));
        let mut adsr = AdsrState::default();
        adsr.hard_cut(1 << 8, e.release_volume, 0);
        assert_eq!(adsr.r_frames, 1);
    }
}
