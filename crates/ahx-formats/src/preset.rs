//! `.ahxp` instrument presets.
//!
//! Layout (little-endian):
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `AHXP` |
//! | 4 | 4 | version (1) |
//! | 8 | 8 | reserved |
//! | 16 | 64 | name, NUL padded |
//! | 80 | 64 | author |
//! | 144 | 256 | description |
//! | 400 | 32 | parameter block |
//! | 432 | 2 + 7n | optional PList: speed, length, entries |

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use ahx_ir::{Envelope, InstrumentParams, PList, PListEntry, Waveform};
use binrw::{binrw, BinRead, BinWrite};

use crate::error::{FormatError, Result};
use crate::thx_format::load_ahx;

pub const PRESET_VERSION: u32 = 1;

/// Field sizes including the terminating NUL.
const NAME_FIELD: usize = 64;
const AUTHOR_FIELD: usize = 64;
const DESCRIPTION_FIELD: usize = 256;

#[binrw]
#[brw(little, magic = b"AHXP")]
struct PresetFile {
    version: u32,
    reserved: [u32; 2],
    name: [u8; NAME_FIELD],
    author: [u8; AUTHOR_FIELD],
    description: [u8; DESCRIPTION_FIELD],
    params: ParamBlock,
    #[br(try)]
    plist: Option<PListBlock>,
}

/// Packed 32-byte parameter block. Bytes 23-31 are reserved.
#[binrw]
#[brw(little)]
struct ParamBlock {
    waveform: u8,
    wave_length: u8,
    volume: u8,
    attack_frames: u8,
    attack_volume: u8,
    decay_frames: u8,
    decay_volume: u8,
    sustain_frames: u8,
    release_frames: u8,
    release_volume: u8,
    filter_lower: u8,
    filter_upper: u8,
    filter_speed: u8,
    filter_enabled: u8,
    square_lower: u8,
    square_upper: u8,
    square_speed: u8,
    square_enabled: u8,
    vibrato_delay: u8,
    vibrato_depth: u8,
    vibrato_speed: u8,
    hard_cut_release: u8,
    hard_cut_frames: u8,
    reserved: [u8; 9],
}

#[binrw]
#[brw(little)]
struct PListBlock {
    speed: u8,
    #[br(temp)]
    #[bw(calc = entries.len() as u8)]
    length: u8,
    #[br(count = length)]
    entries: Vec<PListRecord>,
}

#[binrw]
#[brw(little)]
struct PListRecord {
    note: u8,
    fixed: u8,
    waveform: u8,
    fx0: u8,
    fx_param0: u8,
    fx1: u8,
    fx_param1: u8,
}

/// A named instrument parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub author: String,
    pub description: String,
    pub params: InstrumentParams,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            author: "ahxtracker".into(),
            description: "Default AHX instrument".into(),
            params: InstrumentParams::default(),
        }
    }
}

impl Preset {
    /// Parse a preset. Trailing bytes that do not form a PList are ignored.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let file = PresetFile::read(reader).map_err(binrw_error)?;
        if file.version != PRESET_VERSION {
            return Err(FormatError::UnsupportedVersion(file.version));
        }
        let p = &file.params;
        let params = InstrumentParams {
            waveform: Waveform::from_index(p.waveform),
            wave_length: p.wave_length,
            volume: p.volume,
            envelope: Envelope {
                attack_frames: p.attack_frames,
                attack_volume: p.attack_volume,
                decay_frames: p.decay_frames,
                decay_volume: p.decay_volume,
                sustain_frames: p.sustain_frames,
                release_frames: p.release_frames,
                release_volume: p.release_volume,
            },
            filter_lower: p.filter_lower,
            filter_upper: p.filter_upper,
            filter_speed: p.filter_speed,
            filter_enabled: p.filter_enabled != 0,
            square_lower: p.square_lower,
            square_upper: p.square_upper,
            square_speed: p.square_speed,
            square_enabled: p.square_enabled != 0,
            vibrato_delay: p.vibrato_delay,
            vibrato_depth: p.vibrato_depth,
            vibrato_speed: p.vibrato_speed,
            hard_cut_release: p.hard_cut_release != 0,
            hard_cut_frames: p.hard_cut_frames,
            plist: file
                .plist
                .filter(|b| !b.entries.is_empty())
                .map(|b| PList {
                    speed: b.speed,
                    entries: b.entries.iter().map(PListRecord::to_entry).collect(),
                }),
        };
        Ok(Self {
            name: from_field(&file.name),
            author: from_field(&file.author),
            description: from_field(&file.description),
            params,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read(&mut Cursor::new(data))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        let p = &self.params;
        let env = &p.envelope;
        let file = PresetFile {
            version: PRESET_VERSION,
            reserved: [0; 2],
            name: to_field(&self.name),
            author: to_field(&self.author),
            description: to_field(&self.description),
            params: ParamBlock {
                waveform: p.waveform.index(),
                wave_length: p.wave_length,
                volume: p.volume,
                attack_frames: env.attack_frames,
                attack_volume: env.attack_volume,
                decay_frames: env.decay_frames,
                decay_volume: env.decay_volume,
                sustain_frames: env.sustain_frames,
                release_frames: env.release_frames,
                release_volume: env.release_volume,
                filter_lower: p.filter_lower,
                filter_upper: p.filter_upper,
                filter_speed: p.filter_speed,
                filter_enabled: p.filter_enabled as u8,
                square_lower: p.square_lower,
                square_upper: p.square_upper,
                square_speed: p.square_speed,
                square_enabled: p.square_enabled as u8,
                vibrato_delay: p.vibrato_delay,
                vibrato_depth: p.vibrato_depth,
                vibrato_speed: p.vibrato_speed,
                hard_cut_release: p.hard_cut_release as u8,
                hard_cut_frames: p.hard_cut_frames,
                reserved: [0; 9],
            },
            plist: p.plist.as_ref().filter(|l| !l.is_empty()).map(|l| {
                if l.len() > u8::MAX as usize {
                    log::warn!("PList of {} entries truncated to 255", l.len());
                }
                PListBlock {
                    speed: l.speed,
                    entries: l
                        .entries
                        .iter()
                        .take(u8::MAX as usize)
                        .map(PListRecord::from_entry)
                        .collect(),
                }
            }),
        };
        file.write(writer).map_err(binrw_error)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl PListRecord {
    fn to_entry(&self) -> PListEntry {
        PListEntry {
            note: self.note,
            fixed: self.fixed != 0,
            waveform: self.waveform,
            fx: [self.fx0, self.fx1],
            fx_param: [self.fx_param0, self.fx_param1],
        }
    }

    fn from_entry(e: &PListEntry) -> Self {
        Self {
            note: e.note,
            fixed: e.fixed as u8,
            waveform: e.waveform,
            fx0: e.fx[0],
            fx_param0: e.fx_param[0],
            fx1: e.fx[1],
            fx_param1: e.fx_param[1],
        }
    }
}

fn binrw_error(e: binrw::Error) -> FormatError {
    if e.is_eof() {
        return FormatError::UnexpectedEof;
    }
    let bad_magic = match &e {
        binrw::Error::BadMagic { .. } => true,
        binrw::Error::Backtrace(bt) => matches!(*bt.error, binrw::Error::BadMagic { .. }),
        _ => false,
    };
    if bad_magic {
        FormatError::InvalidHeader
    } else {
        FormatError::Binary(e)
    }
}

/// Text up to the first NUL.
fn from_field(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len]).into_owned()
}

/// NUL-padded copy of `s`, cut on a char boundary so the last byte stays NUL.
fn to_field<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let mut len = 0;
    for c in s.chars() {
        let n = c.len_utf8();
        if len + n >= N {
            break;
        }
        len += n;
    }
    out[..len].copy_from_slice(&s.as_bytes()[..len]);
    out
}

/// Convert instrument `index` (1-based) of an AHX song into a preset.
///
/// Song envelopes count player ticks at the default speed of 3, so frame
/// counts are divided by 3 (rounded up).
pub fn import_from_ahx(data: &[u8], index: usize, source_name: &str) -> Result<Preset> {
    let song = load_ahx(data)?;
    let inst = u8::try_from(index)
        .ok()
        .and_then(|n| song.instrument(n))
        .ok_or(FormatError::InvalidInstrument(index))?;

    let ticks = |frames: u8| ((frames as u16 + 2) / 3) as u8;
    let env = &inst.envelope;
    let params = InstrumentParams {
        waveform: inst.waveform,
        wave_length: inst.wave_length,
        volume: inst.volume,
        envelope: Envelope {
            attack_frames: ticks(env.attack_frames),
            attack_volume: env.attack_volume,
            decay_frames: ticks(env.decay_frames),
            decay_volume: env.decay_volume,
            sustain_frames: ticks(env.sustain_frames),
            release_frames: ticks(env.release_frames),
            release_volume: env.release_volume,
        },
        filter_lower: inst.filter_lower,
        filter_upper: inst.filter_upper,
        filter_speed: inst.filter_speed,
        filter_enabled: inst.filter_speed > 0 || inst.filter_lower > 0 || inst.filter_upper > 0,
        square_lower: inst.square_lower,
        square_upper: inst.square_upper,
        square_speed: inst.square_speed,
        square_enabled: inst.square_speed > 0 || inst.square_lower != inst.square_upper,
        vibrato_delay: inst.vibrato_delay,
        vibrato_depth: inst.vibrato_depth,
        vibrato_speed: inst.vibrato_speed,
        hard_cut_release: inst.hard_cut_release,
        hard_cut_frames: inst.hard_cut_frames,
        plist: (!inst.plist.is_empty()).then(|| inst.plist.clone()),
    };

    log::debug!("imported instrument {} \"{}\" from {}", index, inst.name, source_name);
    Ok(Preset {
        name: inst.name.to_string(),
        author: "Imported from AHX".into(),
        description: format!("Instrument {} from {}", index, source_name),
        params,
    })
}

/// Names of the builtin presets, by index.
pub const BUILTIN_NAMES: [&str; 6] = [
    "Default",
    "Bass - Classic AHX",
    "Lead - Sawtooth",
    "Pad - PWM",
    "Hit - Percussion",
    "Noise - Cymbal",
];

pub fn builtin_count() -> usize {
    BUILTIN_NAMES.len()
}

/// Builtin preset `index`, or the default preset when out of range.
pub fn builtin(index: usize) -> Preset {
    let mut preset = Preset::default();
    let p = &mut preset.params;
    let description = match index {
        0 => "Basic sawtooth synth",
        1 => {
            p.waveform = Waveform::Square;
            p.wave_length = 5;
            set_filter(p, 10, 40, 3);
            set_square(p, 40, 200, 6);
            p.envelope = envelope(1, 64, 20, 50, 0, 10);
            "Thick bass with filter and PWM"
        }
        2 => {
            p.waveform = Waveform::Sawtooth;
            p.wave_length = 4;
            set_filter(p, 25, 55, 5);
            p.vibrato_delay = 10;
            p.vibrato_depth = 4;
            p.vibrato_speed = 30;
            p.envelope = envelope(2, 64, 15, 56, 0, 25);
            "Bright lead with vibrato"
        }
        3 => {
            p.waveform = Waveform::Square;
            p.wave_length = 4;
            set_square(p, 32, 224, 8);
            set_filter(p, 20, 45, 6);
            p.envelope = envelope(50, 64, 30, 52, 0, 60);
            "Evolving pad with pulse width modulation"
        }
        4 => {
            p.waveform = Waveform::Noise;
            p.wave_length = 2;
            p.volume = 64;
            p.hard_cut_release = true;
            p.hard_cut_frames = 3;
            set_filter(p, 5, 50, 1);
            p.envelope = envelope(0, 64, 0, 64, 0, 0);
            "Percussive noise hit"
        }
        5 => {
            p.waveform = Waveform::Noise;
            p.wave_length = 3;
            set_filter(p, 40, 60, 2);
            p.envelope = envelope(0, 64, 30, 40, 0, 40);
            "Cymbal-like noise"
        }
        _ => return Preset::default(),
    };
    preset.name = BUILTIN_NAMES[index].into();
    preset.description = description.into();
    preset
}

fn set_filter(p: &mut InstrumentParams, lower: u8, upper: u8, speed: u8) {
    p.filter_enabled = true;
    p.filter_lower = lower;
    p.filter_upper = upper;
    p.filter_speed = speed;
}

fn set_square(p: &mut InstrumentParams, lower: u8, upper: u8, speed: u8) {
    p.square_enabled = true;
    p.square_lower = lower;
    p.square_upper = upper;
    p.square_speed = speed;
}

/// Envelope with a release to silence.
fn envelope(a_frames: u8, a_vol: u8, d_frames: u8, d_vol: u8, s_frames: u8, r_frames: u8) -> Envelope {
    Envelope {
        attack_frames: a_frames,
        attack_volume: a_vol,
        decay_frames: d_frames,
        decay_volume: d_vol,
        sustain_frames: s_frames,
        release_frames: r_frames,
        release_volume: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thx_format::tests::{build_song, simple_instrument};

    const BASE_LEN: usize = 16 + 64 + 64 + 256 + 32;

    #[test]
    fn default_preset_has_fixed_size() {
        let bytes = Preset::default().to_bytes().unwrap();
        assert_eq!(bytes.len(), BASE_LEN);
        assert_eq!(&bytes[0..4], b"AHXP");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[16..23], b"Default");
        // parameter block starts at 400: waveform, wave length, volume
        assert_eq!(&bytes[400..403], &[1, 3, 64]);
        assert!(bytes[423..432].iter().all(|&b| b == 0));
    }

    #[test]
    fn plist_block_follows_params() {
        let mut preset = builtin(2);
        preset.params.plist = Some(PList {
            speed: 2,
            entries: vec![PListEntry {
                note: 12,
                fixed: true,
                waveform: 3,
                fx: [4, 0],
                fx_param: [0x0f, 0],
            }],
        });
        let bytes = preset.to_bytes().unwrap();
        assert_eq!(bytes.len(), BASE_LEN + 2 + 7);
        assert_eq!(&bytes[BASE_LEN..], &[2, 1, 12, 1, 3, 4, 0x0f, 0, 0]);
        assert_eq!(Preset::from_bytes(&bytes).unwrap(), preset);
    }

    #[test]
    fn rejects_bad_magic_and_version() {
        let mut bytes = Preset::default().to_bytes().unwrap();
        bytes[4] = 2;
        assert!(matches!(
            Preset::from_bytes(&bytes),
            Err(FormatError::UnsupportedVersion(2))
        ));
        bytes[0] = b'X';
        assert!(matches!(Preset::from_bytes(&bytes), Err(FormatError::InvalidHeader)));
    }

    #[test]
    fn rejects_truncated_preset() {
        let bytes = Preset::default().to_bytes().unwrap();
        assert!(matches!(
            Preset::from_bytes(&bytes[..200]),
            Err(FormatError::UnexpectedEof)
        ));
    }

    #[test]
    fn truncated_plist_is_dropped() {
        let mut bytes = Preset::default().to_bytes().unwrap();
        bytes.extend_from_slice(&[1, 3, 0, 0]);
        let preset = Preset::from_bytes(&bytes).unwrap();
        assert_eq!(preset.params.plist, None);
    }

    #[test]
    fn long_text_keeps_terminator() {
        let preset = Preset {
            name: "n".repeat(100),
            ..Preset::default()
        };
        let loaded = Preset::from_bytes(&preset.to_bytes().unwrap()).unwrap();
        assert_eq!(loaded.name.len(), NAME_FIELD - 1);
    }

    #[test]
    fn builtins_cover_all_indices() {
        assert_eq!(builtin_count(), 6);
        for (i, name) in BUILTIN_NAMES.iter().enumerate() {
            assert_eq!(builtin(i).name, *name);
        }
        assert_eq!(builtin(99), Preset::default());
        assert_eq!(builtin(1).params.waveform, Waveform::Square);
        assert!(builtin(4).params.hard_cut_release);
    }

    #[test]
    fn import_rescales_envelope() {
        let mut inst = simple_instrument("bass");
        inst.record[2] = 9;
        inst.record[4] = 1;
        inst.record[7] = 0;
        inst.record[16] = 0x20;
        inst.record[17] = 0x40;
        let data = build_song(0, 1, &[inst]);
        let preset = import_from_ahx(&data, 1, "song.ahx").unwrap();
        assert_eq!(preset.name, "bass");
        assert_eq!(preset.description, "Instrument 1 from song.ahx");
        let env = preset.params.envelope;
        assert_eq!(env.attack_frames, 3);
        assert_eq!(env.decay_frames, 1);
        assert_eq!(env.release_frames, 0);
        assert!(preset.params.square_enabled);
        assert!(!preset.params.filter_enabled);
        assert_eq!(preset.params.waveform, Waveform::Sawtooth);
        assert_eq!(preset.params.plist.as_ref().map(PList::len), Some(1));
    }

    #[test]
    fn import_rejects_missing_instrument() {
        let data = build_song(0, 1, &[simple_instrument("x")]);
        assert!(matches!(
            import_from_ahx(&data, 2, "x.ahx"),
            Err(FormatError::InvalidInstrument(2))
        ));
        assert!(import_from_ahx(&data, 0, "x.ahx").is_err());
    }
}
