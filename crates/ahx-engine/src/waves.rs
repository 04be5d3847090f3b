//! Precomputed AHX waveform tables.
//!
//! One unfiltered variant plus 31 lowpass and 31 highpass variants of the
//! full wave set. A variant is selected by filter position 1-63: 1-31 are
//! lowpass, 32 is unfiltered, 33-63 are highpass.
//!
//! Layout of a variant:
//!
//! | offset   | contents                                     |
//! |----------|----------------------------------------------|
//! | `0x000`  | triangles of 4, 8, 16, 32, 64 and 128 samples |
//! | `0x0fc`  | sawtooths of the same lengths                |
//! | `0x1f8`  | 32 squares of 0x80 samples, rising width     |
//! | `0x11f8` | 0x780 samples of white noise                 |

use alloc::vec;
use alloc::vec::Vec;

use crate::noise::WHITE_NOISE;

/// Bytes in one filter variant.
pub const VARIANT_LEN: usize = 0xfc + 0xfc + 0x80 * 0x20 + 0x280 * 3;

/// Number of filter variants.
pub const VARIANT_COUNT: usize = 63;

/// Filter position of the unfiltered variant.
pub const UNFILTERED: i32 = 32;

pub const TRIANGLE_OFFSET: usize = 0;
pub const SAWTOOTH_OFFSET: usize = 0xfc;
pub const SQUARE_OFFSET: usize = 0x1f8;
pub const NOISE_OFFSET: usize = 0x11f8;
pub const NOISE_LEN: usize = 0x280 * 3;

/// Start of each wave length inside the triangle and sawtooth sections.
pub const WAVE_LENGTH_OFFSETS: [usize; 6] = [0x00, 0x04, 0x0c, 0x1c, 0x3c, 0x7c];

/// Highest wave length exponent.
pub const MAX_WAVE_LENGTH: u8 = 5;

/// Samples in one cycle at wave length `wl`.
pub fn wave_len(wl: u8) -> usize {
    4 << wl.min(MAX_WAVE_LENGTH)
}

/// Immutable waveform tables, shared by every player and synth voice.
pub struct Waves {
    data: Vec<i8>,
}

impl Default for Waves {
    fn default() -> Self {
        Self::new()
    }
}

impl Waves {
    /// Build all 63 variants.
    pub fn new() -> Self {
        let mut data = vec![0i8; VARIANT_LEN * VARIANT_COUNT];
        let raw_start = (UNFILTERED as usize - 1) * VARIANT_LEN;
        generate_raw(&mut data[raw_start..raw_start + VARIANT_LEN]);

        let raw: Vec<i8> = data[raw_start..raw_start + VARIANT_LEN].to_vec();
        for temp in 0..31 {
            let low_start = temp * VARIANT_LEN;
            let high_start = (UNFILTERED as usize + temp) * VARIANT_LEN;
            let (head, tail) = data.split_at_mut(high_start);
            filter_variant(
                &raw,
                8 + 3 * temp as i32,
                &mut head[low_start..low_start + VARIANT_LEN],
                &mut tail[..VARIANT_LEN],
            );
        }

        log::debug!("generated {} waveform variants", VARIANT_COUNT);
        Self { data }
    }

    /// The variant for a filter position, clamped to 1-63.
    pub fn variant(&self, filter_pos: i32) -> &[i8] {
        let index = (filter_pos.clamp(1, VARIANT_COUNT as i32) - 1) as usize;
        &self.data[index * VARIANT_LEN..(index + 1) * VARIANT_LEN]
    }

    pub fn triangle(&self, filter_pos: i32, wl: u8) -> &[i8] {
        let start = TRIANGLE_OFFSET + WAVE_LENGTH_OFFSETS[wl.min(MAX_WAVE_LENGTH) as usize];
        &self.variant(filter_pos)[start..start + wave_len(wl)]
    }

    pub fn sawtooth(&self, filter_pos: i32, wl: u8) -> &[i8] {
        let start = SAWTOOTH_OFFSET + WAVE_LENGTH_OFFSETS[wl.min(MAX_WAVE_LENGTH) as usize];
        &self.variant(filter_pos)[start..start + wave_len(wl)]
    }

    /// The 32 square widths of a variant.
    pub fn squares(&self, filter_pos: i32) -> &[i8] {
        &self.variant(filter_pos)[SQUARE_OFFSET..SQUARE_OFFSET + 0x80 * 0x20]
    }

    pub fn noise(&self, filter_pos: i32) -> &[i8] {
        &self.variant(filter_pos)[NOISE_OFFSET..NOISE_OFFSET + NOISE_LEN]
    }

    /// Resample the square of width `square_pos` into one cycle of `out`.
    ///
    /// Writes `4 << wl` samples. Widths past the middle mirror back down.
    pub fn build_square(&self, filter_pos: i32, square_pos: i32, wl: u8, out: &mut [i8]) {
        let wl = wl.min(MAX_WAVE_LENGTH);
        let squares = self.squares(filter_pos);
        let mut x = square_pos << (5 - wl);
        if x > 0x20 {
            x = 0x40 - x;
        }
        let mut src = if x > 0 { ((x - 1) as usize) << 7 } else { 0 };
        let step = 32usize >> wl;
        for sample in out.iter_mut().take(wave_len(wl)) {
            *sample = squares.get(src).copied().unwrap_or(0);
            src += step;
        }
    }
}

/// Fill the unfiltered variant.
fn generate_raw(variant: &mut [i8]) {
    for wl in 0..=MAX_WAVE_LENGTH {
        let len = wave_len(wl);
        let tri = TRIANGLE_OFFSET + WAVE_LENGTH_OFFSETS[wl as usize];
        generate_triangle(&mut variant[tri..tri + len]);
        let saw = SAWTOOTH_OFFSET + WAVE_LENGTH_OFFSETS[wl as usize];
        generate_sawtooth(&mut variant[saw..saw + len]);
    }
    generate_squares(&mut variant[SQUARE_OFFSET..NOISE_OFFSET]);
    for (dst, &src) in variant[NOISE_OFFSET..].iter_mut().zip(WHITE_NOISE.iter()) {
        *dst = src as i8;
    }
}

fn generate_triangle(out: &mut [i8]) {
    let len = out.len();
    let quarter = len >> 2;
    let step = 128 / quarter as i32;
    let mut pos = 0;

    let mut value = 0i32;
    for _ in 0..quarter {
        out[pos] = value as i8;
        pos += 1;
        value += step;
    }
    out[pos] = 0x7f;
    pos += 1;
    if quarter != 1 {
        value = 128;
        for _ in 0..quarter - 1 {
            value -= step;
            out[pos] = value as i8;
            pos += 1;
        }
    }

    // Second half is the first half negated, with the peak mapped to -128
    let mut src = pos - (len >> 1);
    for _ in 0..quarter * 2 {
        let s = out[src];
        out[pos] = if s == 0x7f { -128 } else { s.wrapping_neg() };
        src += 1;
        pos += 1;
    }
}

fn generate_sawtooth(out: &mut [i8]) {
    let step = 256 / (out.len() as i32 - 1);
    let mut value = -128i32;
    for sample in out.iter_mut() {
        *sample = value as i8;
        value += step;
    }
}

fn generate_squares(out: &mut [i8]) {
    let mut pos = 0;
    for width in 1..=0x20usize {
        for _ in 0..(0x40 - width) * 2 {
            out[pos] = -128;
            pos += 1;
        }
        for _ in 0..width * 2 {
            out[pos] = 0x7f;
            pos += 1;
        }
    }
}

/// Run the two-pass state-variable filter over every sub-wave of `raw`.
fn filter_variant(raw: &[i8], freq: i32, low: &mut [i8], high: &mut [i8]) {
    let fre = freq as f32 * 1.25 / 100.0;
    let clip = |x: f32| x.clamp(-128.0, 127.0);

    let mut start = 0;
    for len in sub_wave_lengths() {
        let wave = &raw[start..start + len];
        let (mut mid, mut lo) = (0.0f32, 0.0f32);
        for &s in wave {
            let hi = clip(s as f32 - mid - lo);
            mid = clip(mid + hi * fre);
            lo = clip(lo + mid * fre);
        }
        for (i, &s) in wave.iter().enumerate() {
            let hi = clip(s as f32 - mid - lo);
            mid = clip(mid + hi * fre);
            lo = clip(lo + mid * fre);
            low[start + i] = lo as i8;
            high[start + i] = hi as i8;
        }
        start += len;
    }
}

/// Lengths of the contiguous sub-waves making up a variant.
fn sub_wave_lengths() -> impl Iterator<Item = usize> {
    let cycles = (0..=MAX_WAVE_LENGTH).map(wave_len);
    cycles
        .clone()
        .chain(cycles)
        .chain(core::iter::repeat(0x80).take(0x20))
        .chain(core::iter::once(NOISE_LEN))
}
