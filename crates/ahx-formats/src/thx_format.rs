//! AHX (THX) song loader.
//!
//! Big-endian container: 14-byte header, subsong table, position list,
//! bit-packed tracks, instruments with their performance lists, and a
//! table of NUL-terminated names (song title first) at the offset given
//! in the header.

use ahx_ir::{fit_str, Envelope, Instrument, PList, PListEntry, Position, Song, Step, Waveform};

use crate::error::{FormatError, Result};

/// Header length in bytes.
const HEADER_LEN: usize = 14;
/// Fixed part of an instrument record.
const INSTRUMENT_LEN: usize = 22;
/// Highest wave length the engine has tables for.
const MAX_WAVE_LENGTH: u8 = 5;

// ---------------------------------------------------------------------------
// ThxReader: big-endian cursor over a byte slice
// ---------------------------------------------------------------------------

struct ThxReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ThxReader<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let v = *self.data.get(self.pos).ok_or(FormatError::UnexpectedEof)?;
        self.pos += 1;
        Ok(v)
    }

    fn read_u16_be(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let slice = self
            .data
            .get(self.pos..self.pos + n)
            .ok_or(FormatError::UnexpectedEof)?;
        self.pos += n;
        Ok(slice)
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Read a NUL-terminated string. A missing terminator ends at the data end.
    fn read_c_string(&mut self) -> Result<String> {
        let rest = self.data.get(self.pos..).ok_or(FormatError::UnexpectedEof)?;
        let len = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        let s = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.pos += (len + 1).min(rest.len());
        Ok(s)
    }
}

/// Decoded 14-byte song header.
struct Header {
    revision: u8,
    names_offset: usize,
    /// Track 0 is implied empty and not stored
    empty_track_zero: bool,
    speed_multiplier: u8,
    position_count: usize,
    restart: u16,
    track_length: u8,
    track_count: usize,
    instrument_count: usize,
    subsong_count: usize,
}

fn parse_header(data: &[u8]) -> Result<Header> {
    if data.len() < HEADER_LEN {
        return Err(FormatError::UnexpectedEof);
    }
    if &data[0..3] != b"THX" {
        return Err(FormatError::InvalidHeader);
    }
    let revision = data[3];
    if revision > 1 {
        return Err(FormatError::UnsupportedVersion(revision as u32));
    }
    Ok(Header {
        revision,
        names_offset: u16::from_be_bytes([data[4], data[5]]) as usize,
        empty_track_zero: data[6] & 0x80 != 0,
        speed_multiplier: ((data[6] >> 5) & 3) + 1,
        position_count: (((data[6] & 0x0f) as usize) << 8) | data[7] as usize,
        restart: u16::from_be_bytes([data[8], data[9]]),
        track_length: data[10],
        // Track numbers run 0..=count
        track_count: data[11] as usize + 1,
        instrument_count: data[12] as usize,
        subsong_count: data[13] as usize,
    })
}

/// Load an AHX song from bytes.
pub fn load_ahx(data: &[u8]) -> Result<Song> {
    let header = parse_header(data)?;
    let mut names = ThxReader::new(data, header.names_offset);
    let title = names.read_c_string()?;

    let mut song = Song::new(&title);
    song.revision = header.revision;
    song.speed_multiplier = header.speed_multiplier;
    song.restart = header.restart;
    song.track_length = header.track_length;

    let mut r = ThxReader::new(data, HEADER_LEN);
    for _ in 0..header.subsong_count {
        song.subsongs.push(r.read_u16_be()?);
    }

    for _ in 0..header.position_count {
        let mut pos = Position::default();
        for ch in 0..4 {
            pos.track[ch] = r.read_u8()?;
            pos.transpose[ch] = r.read_u8()? as i8;
        }
        song.positions.push(pos);
    }

    let rows = header.track_length as usize;
    for i in 0..header.track_count {
        if i == 0 && header.empty_track_zero {
            song.tracks.push(vec![Step::default(); rows]);
            continue;
        }
        let mut track = Vec::with_capacity(rows);
        for _ in 0..rows {
            track.push(decode_step(r.read_bytes(3)?));
        }
        song.tracks.push(track);
    }

    for i in 0..header.instrument_count {
        let name = names.read_c_string()?;
        let inst = read_instrument(&mut r, &name)?;
        if inst.wave_length > MAX_WAVE_LENGTH {
            log::warn!(
                "instrument {} \"{}\": wave length {} clamped to {}",
                i + 1,
                name,
                inst.wave_length,
                MAX_WAVE_LENGTH
            );
        }
        song.instruments.push(Instrument {
            wave_length: inst.wave_length.min(MAX_WAVE_LENGTH),
            ..inst
        });
    }

    log::debug!(
        "loaded \"{}\": rev {}, {} positions, {} tracks x {} rows, {} instruments, {} subsongs",
        song.title,
        song.revision,
        song.position_count(),
        song.tracks.len(),
        song.track_length,
        song.instruments.len(),
        song.subsong_count()
    );
    Ok(song)
}

/// Number of instruments in a song, from the header alone.
pub fn instrument_count(data: &[u8]) -> Result<usize> {
    parse_header(data).map(|h| h.instrument_count)
}

/// Name of instrument `index` (1-based) without loading the song.
pub fn instrument_name(data: &[u8], index: usize) -> Result<String> {
    let header = parse_header(data)?;
    if index == 0 || index > header.instrument_count {
        return Err(FormatError::InvalidInstrument(index));
    }
    let mut names = ThxReader::new(data, header.names_offset);
    names.read_c_string()?;
    for _ in 1..index {
        names.read_c_string()?;
    }
    names.read_c_string()
}

/// Note (6 bits), instrument (6 bits), command (4 bits), parameter (8 bits).
fn decode_step(b: &[u8]) -> Step {
    Step {
        note: (b[0] >> 2) & 0x3f,
        instrument: ((b[0] & 0x3) << 4) | (b[1] >> 4),
        fx: b[1] & 0x0f,
        fx_param: b[2],
    }
}

fn decode_plist_entry(b: &[u8]) -> PListEntry {
    PListEntry {
        note: b[1] & 0x3f,
        fixed: (b[1] >> 6) & 1 != 0,
        waveform: ((b[0] << 1) & 6) | (b[1] >> 7),
        fx: [(b[0] >> 2) & 7, (b[0] >> 5) & 7],
        fx_param: [b[2], b[3]],
    }
}

fn read_instrument(r: &mut ThxReader<'_>, name: &str) -> Result<Instrument> {
    let b = r.read_bytes(INSTRUMENT_LEN)?;
    let plist_speed = b[20];
    let plist_len = b[21] as usize;

    let mut entries = Vec::with_capacity(plist_len);
    for _ in 0..plist_len {
        entries.push(decode_plist_entry(r.read_bytes(4)?));
    }
    // Song playback takes the waveform from the PList; the synth voice
    // uses the first PList waveform as its oscillator
    let waveform = entries
        .first()
        .filter(|e| e.waveform > 0)
        .map_or(Waveform::Sawtooth, |e| Waveform::from_index(e.waveform - 1));

    Ok(Instrument {
        name: fit_str(name),
        volume: b[0],
        wave_length: b[1] & 0x7,
        waveform,
        envelope: Envelope {
            attack_frames: b[2],
            attack_volume: b[3],
            decay_frames: b[4],
            decay_volume: b[5],
            sustain_frames: b[6],
            release_frames: b[7],
            release_volume: b[8],
        },
        filter_speed: ((b[1] >> 3) & 0x1f) | ((b[12] >> 2) & 0x20),
        filter_lower: b[12] & 0x7f,
        filter_upper: b[19] & 0x3f,
        square_lower: b[16],
        square_upper: b[17],
        square_speed: b[18],
        vibrato_delay: b[13],
        vibrato_depth: b[14] & 0x0f,
        vibrato_speed: b[15],
        hard_cut_release: b[14] & 0x80 != 0,
        hard_cut_frames: (b[14] >> 4) & 7,
        plist: PList {
            speed: plist_speed,
            entries,
        },
    })
}
