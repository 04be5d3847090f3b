//! Amiga period tables and period-to-increment conversion.
//!
//! AHX pitches are note indices 1-60 looked up in `PERIOD_TABLE`. The
//! resulting Paula period is converted into a 16.16 fixed-point step
//! through the 0x280-sample voice buffer.

/// PAL Paula clock in Hz.
pub const PAULA_CLOCK: u32 = 3_546_895;

/// Samples in a voice playback buffer.
pub const VOICE_BUFFER_LEN: usize = 0x280;

/// Fixed-point length of a voice playback buffer.
pub const VOICE_BUFFER_FIXED: u32 = (VOICE_BUFFER_LEN as u32) << 16;

/// Shortest legal period (highest pitch).
pub const PERIOD_MIN: i32 = 0x71;

/// Longest legal period (lowest pitch).
pub const PERIOD_MAX: i32 = 0xd60;

/// Highest AHX note index.
pub const NOTE_MAX: i32 = 60;

/// Paula periods for AHX note indices 0-60 (index 0 is unused).
pub const PERIOD_TABLE: [u16; 61] = [
    0x0000, 0x0D60, 0x0CA0, 0x0BE8, 0x0B40, 0x0A98, 0x0A00, 0x0970,
    0x08E8, 0x0868, 0x07F0, 0x0780, 0x0714, 0x06B0, 0x0650, 0x05F4,
    0x05A0, 0x054C, 0x0500, 0x04B8, 0x0474, 0x0434, 0x03F8, 0x03C0,
    0x038A, 0x0358, 0x0328, 0x02FA, 0x02D0, 0x02A6, 0x0280, 0x025C,
    0x023A, 0x021A, 0x01FC, 0x01E0, 0x01C5, 0x01AC, 0x0194, 0x017D,
    0x0168, 0x0153, 0x0140, 0x012E, 0x011D, 0x010D, 0x00FE, 0x00F0,
    0x00E2, 0x00D6, 0x00CA, 0x00BE, 0x00B4, 0x00AA, 0x00A0, 0x0097,
    0x008F, 0x0087, 0x007F, 0x0078, 0x0071,
];

/// One sine cycle for the song player's vibrato, amplitude 255.
pub const VIBRATO_TABLE: [i16; 64] = [
    0, 24, 49, 74, 97, 120, 141, 161, 180, 197, 212, 224, 235, 244, 250, 253,
    255, 253, 250, 244, 235, 224, 212, 197, 180, 161, 141, 120, 97, 74, 49, 24,
    0, -24, -49, -74, -97, -120, -141, -161, -180, -197, -212, -224, -235, -244, -250, -253,
    -255, -253, -250, -244, -235, -224, -212, -197, -180, -161, -141, -120, -97, -74, -49, -24,
];

/// Convert a MIDI note to an AHX note index (1-60). MIDI 24 maps to 1.
pub fn midi_to_note_index(midi: u8) -> i32 {
    (midi as i32 - 23).clamp(1, NOTE_MAX)
}

/// Period for an AHX note index, clamped to 0-60.
pub fn note_period(index: i32) -> i32 {
    PERIOD_TABLE[index.clamp(0, NOTE_MAX) as usize] as i32
}

/// Convert a period to a 16.16 step through the voice buffer.
///
/// Steps longer than the buffer are folded back into it so a single
/// sample advance never crosses the buffer more than once. Never returns 0.
pub fn period_to_delta(period: i32, sample_rate: u32) -> u32 {
    if period <= 0 || sample_rate == 0 {
        return 1;
    }
    let freq = PAULA_CLOCK as f64 * 65536.0 / period as f64;
    let mut delta = (freq / sample_rate as f64) as u32;
    if delta > VOICE_BUFFER_FIXED {
        delta = (delta - 1) % VOICE_BUFFER_FIXED + 1;
    }
    delta.max(1)
}
