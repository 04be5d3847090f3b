//! THX song buffers built in code for the integration tests.

#![allow(dead_code)]

/// One instrument: 22-byte record plus raw 4-byte PList entries.
pub struct RawInstrument {
    pub name: String,
    pub record: [u8; 22],
    pub plist: Vec<[u8; 4]>,
}

impl RawInstrument {
    /// Volume 64, wave length 3, attack 1 frame to 64, release 1 frame,
    /// one PList entry selecting `waveform` (1-4).
    pub fn new(name: &str, waveform: u8) -> Self {
        let mut record = [0u8; 22];
        record[0] = 64;
        record[1] = 3;
        record[2] = 1;
        record[3] = 64;
        record[7] = 1;
        record[20] = 1;
        record[21] = 1;
        Self {
            name: name.to_string(),
            record,
            plist: vec![[(waveform >> 1) & 3, (waveform & 1) << 7, 0, 0]],
        }
    }

    /// Filter sweep between `lower` and `upper` at `speed` (1-31).
    pub fn with_filter(mut self, lower: u8, upper: u8, speed: u8) -> Self {
        self.record[1] = (self.record[1] & 7) | ((speed & 0x1f) << 3);
        self.record[12] = lower & 0x7f;
        self.record[19] = upper & 0x3f;
        self
    }

    pub fn with_square(mut self, lower: u8, upper: u8, speed: u8) -> Self {
        self.record[16] = lower;
        self.record[17] = upper;
        self.record[18] = speed;
        self
    }

    pub fn with_vibrato(mut self, delay: u8, depth: u8, speed: u8) -> Self {
        self.record[13] = delay;
        self.record[14] = (self.record[14] & 0xf0) | (depth & 0x0f);
        self.record[15] = speed;
        self
    }
}

/// Track row: note, instrument, command, parameter.
pub fn step(note: u8, instrument: u8, fx: u8, param: u8) -> [u8; 3] {
    [(note << 2) | (instrument >> 4), (instrument << 4) | (fx & 0x0f), param]
}

/// Builder for a THX (revision 0/1) byte buffer. Track 0 is always the
/// implied empty track; `track()` adds tracks 1, 2, ...
pub struct ThxBuilder {
    title: String,
    revision: u8,
    speed_multiplier: u8,
    restart: u16,
    track_length: u8,
    subsongs: Vec<u16>,
    positions: Vec<[u8; 8]>,
    tracks: Vec<Vec<[u8; 3]>>,
    instruments: Vec<RawInstrument>,
}

impl ThxBuilder {
    pub fn new(title: &str, track_length: u8) -> Self {
        Self {
            title: title.to_string(),
            revision: 1,
            speed_multiplier: 1,
            restart: 0,
            track_length,
            subsongs: Vec::new(),
            positions: Vec::new(),
            tracks: Vec::new(),
            instruments: Vec::new(),
        }
    }

    pub fn revision(mut self, revision: u8) -> Self {
        self.revision = revision;
        self
    }

    pub fn speed_multiplier(mut self, m: u8) -> Self {
        self.speed_multiplier = m;
        self
    }

    pub fn restart(mut self, restart: u16) -> Self {
        self.restart = restart;
        self
    }

    pub fn subsong(mut self, start: u16) -> Self {
        self.subsongs.push(start);
        self
    }

    /// Position with one track number per channel and no transpose.
    pub fn position(mut self, tracks: [u8; 4]) -> Self {
        let mut p = [0u8; 8];
        for (ch, t) in tracks.iter().enumerate() {
            p[ch * 2] = *t;
        }
        self.positions.push(p);
        self
    }

    /// Add a track; rows past the end of `rows` are empty.
    pub fn track(mut self, rows: &[(usize, [u8; 3])]) -> Self {
        let mut track = vec![[0u8; 3]; self.track_length as usize];
        for &(row, s) in rows {
            track[row] = s;
        }
        self.tracks.push(track);
        self
    }

    pub fn instrument(mut self, inst: RawInstrument) -> Self {
        self.instruments.push(inst);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for s in &self.subsongs {
            body.extend_from_slice(&s.to_be_bytes());
        }
        for p in &self.positions {
            body.extend_from_slice(p);
        }
        for t in &self.tracks {
            for s in t {
                body.extend_from_slice(s);
            }
        }
        for inst in &self.instruments {
            body.extend_from_slice(&inst.record);
            for e in &inst.plist {
                body.extend_from_slice(e);
            }
        }

        let names_offset = (14 + body.len()) as u16;
        let positions = self.positions.len() as u16;
        let mut data = Vec::new();
        data.extend_from_slice(b"THX");
        data.push(self.revision);
        data.extend_from_slice(&names_offset.to_be_bytes());
        data.push(0x80 | ((self.speed_multiplier - 1) & 3) << 5 | (positions >> 8) as u8);
        data.push(positions as u8);
        data.extend_from_slice(&self.restart.to_be_bytes());
        data.push(self.track_length);
        data.push(self.tracks.len() as u8);
        data.push(self.instruments.len() as u8);
        data.push(self.subsongs.len() as u8);
        data.extend_from_slice(&body);

        data.extend_from_slice(self.title.as_bytes());
        data.push(0);
        for inst in &self.instruments {
            data.extend_from_slice(inst.name.as_bytes());
            data.push(0);
        }
        data
    }
}

/// Two positions of a 4-row track: a sawtooth note on channel 0 and a
/// filtered square note on channel 1. Subsong 1 starts at position 1.
pub fn demo_song() -> Vec<u8> {
    ThxBuilder::new("demo", 4)
        .subsong(1)
        .position([1, 2, 0, 0])
        .position([1, 0, 0, 0])
        .track(&[(0, step(25, 1, 0, 0))])
        .track(&[(0, step(37, 2, 0, 0)), (2, step(0, 0, 0xc, 0x20))])
        .instrument(RawInstrument::new("saw lead", 2))
        .instrument(
            RawInstrument::new("pwm bass", 3)
                .with_filter(10, 40, 3)
                .with_square(32, 200, 4)
                .with_vibrato(2, 3, 20),
        )
        .build()
}
