//! Song structure: positions, tracks and instruments.

use alloc::vec::Vec;
use arrayvec::ArrayString;

use crate::instrument::{Instrument, NAME_LEN};

/// AHX songs always have four channels.
pub const NUM_CHANNELS: usize = 4;

/// One row of a track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Note index (0 = none, 1-60)
    pub note: u8,
    /// Instrument number (0 = none, 1-based)
    pub instrument: u8,
    pub fx: u8,
    pub fx_param: u8,
}

/// One entry of the position list: a track and transpose per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub track: [u8; NUM_CHANNELS],
    pub transpose: [i8; NUM_CHANNELS],
}

/// A complete song.
#[derive(Clone, Debug, Default)]
pub struct Song {
    pub title: ArrayString<NAME_LEN>,
    /// Format revision (0 or 1)
    pub revision: u8,
    /// Frames per 50 Hz tick multiplier (1-4)
    pub speed_multiplier: u8,
    /// Position to continue from after the last one
    pub restart: u16,
    /// Rows per track
    pub track_length: u8,
    /// Start position of each subsong after the main one
    pub subsongs: Vec<u16>,
    pub positions: Vec<Position>,
    /// Tracks, each `track_length` rows
    pub tracks: Vec<Vec<Step>>,
    /// Instruments; instrument number `n` is `instruments[n - 1]`
    pub instruments: Vec<Instrument>,
}

impl Song {
    /// Create a new empty song.
    pub fn new(title: &str) -> Self {
        Self {
            title: crate::instrument::fit_str(title),
            speed_multiplier: 1,
            ..Default::default()
        }
    }

    /// Position entry, or an all-zero position when out of range.
    pub fn position(&self, index: usize) -> Position {
        self.positions.get(index).copied().unwrap_or_default()
    }

    /// Row `row` of track `track`, or an empty step when out of range.
    pub fn step(&self, track: u8, row: usize) -> Step {
        self.tracks
            .get(track as usize)
            .and_then(|t| t.get(row))
            .copied()
            .unwrap_or_default()
    }

    /// Instrument by 1-based number.
    pub fn instrument(&self, number: u8) -> Option<&Instrument> {
        (number as usize)
            .checked_sub(1)
            .and_then(|i| self.instruments.get(i))
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn subsong_count(&self) -> usize {
        self.subsongs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn song_with_one_track() -> Song {
        let mut song = Song::new("test");
        song.track_length = 2;
        song.tracks.push(vec![
            Step { note: 25, instrument: 1, fx: 0, fx_param: 0 },
            Step::default(),
        ]);
        song.positions.push(Position::default());
        song.instruments.push(Instrument::new("lead"));
        song
    }

    #[test]
    fn step_out_of_range_is_empty() {
        let song = song_with_one_track();
        assert_eq!(song.step(0, 0).note, 25);
        assert_eq!(song.step(0, 5), Step::default());
        assert_eq!(song.step(9, 0), Step::default());
    }

    #[test]
    fn instrument_numbers_are_one_based() {
        let song = song_with_one_track();
        assert!(song.instrument(0).is_none());
        assert_eq!(song.instrument(1).map(|i| i.name.as_str()), Some("lead"));
        assert!(song.instrument(2).is_none());
    }

    #[test]
    fn position_out_of_range_is_default() {
        let song = song_with_one_track();
        assert_eq!(song.position(3), Position::default());
    }
}
