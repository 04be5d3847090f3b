//! 16-bit stereo WAV output.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use ahx_engine::Frame;

use crate::error::Result;

fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

pub fn write_wav<W: Write + Seek>(w: W, frames: &[Frame], sample_rate: u32) -> Result<()> {
    let mut writer = hound::WavWriter::new(w, spec(sample_rate))?;
    let mut samples = writer.get_i16_writer(frames.len() as u32 * 2);
    for frame in frames {
        samples.write_sample(frame.left);
        samples.write_sample(frame.right);
    }
    samples.flush()?;
    writer.finalize()?;
    Ok(())
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(&mut cursor, frames, sample_rate)?;
    Ok(cursor.into_inner())
}

pub fn save_wav(path: impl AsRef<Path>, frames: &[Frame], sample_rate: u32) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, spec(sample_rate))?;
    for frame in frames {
        writer.write_sample(frame.left)?;
        writer.write_sample(frame.right)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_riff_header_and_samples() {
        let frames = [Frame { left: 100, right: -100 }, Frame { left: 1, right: 2 }];
        let bytes = frames_to_wav(&frames, 48000).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + frames.len() * 4);

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 48000);
        assert_eq!(reader.spec().channels, 2);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![100, -100, 1, 2]);
    }

    #[test]
    fn empty_render_is_valid() {
        let bytes = frames_to_wav(&[], 44100).unwrap();
        assert_eq!(bytes.len(), 44);
    }
}
