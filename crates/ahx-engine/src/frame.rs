//! Audio frame type.

/// A stereo audio frame (16-bit integer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Convert a float sample pair (nominally -1.0 to 1.0), clamping.
    pub fn from_f32(left: f32, right: f32) -> Self {
        Self {
            left: to_i16(left),
            right: to_i16(right),
        }
    }

    /// Float sample pair in -1.0 to 1.0.
    pub fn to_f32(self) -> (f32, f32) {
        (self.left as f32 / 32768.0, self.right as f32 / 32768.0)
    }

    /// Mix another frame into this one, saturating.
    pub fn mix(&mut self, other: Frame) {
        self.left = self.left.saturating_add(other.left);
        self.right = self.right.saturating_add(other.right);
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample * 32768.0).clamp(-32768.0, 32767.0) as i16
}

/// Interleave planar float buffers into frames. Returns frames written.
pub fn interleave(left: &[f32], right: &[f32], out: &mut [Frame]) -> usize {
    let mut n = 0;
    for ((frame, &l), &r) in out.iter_mut().zip(left).zip(right) {
        *frame = Frame::from_f32(l, r);
        n += 1;
    }
    n
}
