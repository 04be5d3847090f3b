//! Headless controller for the AHX tracker.
//!
//! Provides one API for loading songs, live playback and offline
//! rendering that the CLI and the integration tests share.

mod render;

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use ahx_audio::{AudioOutput, CpalOutput};
use ahx_engine::{interleave, Player, Waves};

pub use ahx_engine::MAX_BOOST;

// Re-export common types so callers don't need ahx-ir/ahx-engine directly.
pub use ahx_engine::Frame;
pub use ahx_formats::FormatError;
pub use ahx_ir::Song;

pub use render::{CHUNK_FRAMES, DEFAULT_SAMPLE_RATE};

/// Every channel audible.
pub const ALL_CHANNELS: u8 = 0b1111;

/// Headless tracker controller: owns a song and manages playback.
pub struct Controller {
    song: Song,
    waves: Arc<Waves>,
    subsong: usize,
    channel_mask: Arc<AtomicU8>,
    boost: u32,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    /// Position in the high 16 bits, row in the low 16
    position: Arc<AtomicU32>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            song: Song::new("Untitled"),
            waves: Arc::new(Waves::new()),
            subsong: 0,
            channel_mask: Arc::new(AtomicU8::new(ALL_CHANNELS)),
            boost: 1,
            playback: None,
        }
    }

    // --- Song management ---

    pub fn song(&self) -> &Song {
        &self.song
    }

    /// Replace the current song, stopping playback.
    pub fn set_song(&mut self, song: Song) {
        self.stop();
        self.song = song;
        self.subsong = 0;
    }

    /// Load a THX/AHX song. On error the current song is kept.
    pub fn load_ahx(&mut self, data: &[u8]) -> Result<(), FormatError> {
        let song = ahx_formats::load_ahx(data)?;
        self.set_song(song);
        Ok(())
    }

    pub fn subsong_count(&self) -> usize {
        self.song.subsong_count()
    }

    pub fn subsong(&self) -> usize {
        self.subsong
    }

    /// Select the subsong for the next play or render. 0 is the main song.
    pub fn set_subsong(&mut self, subsong: usize) -> bool {
        if subsong > self.song.subsong_count() {
            log::warn!("subsong {} out of range (song has {})", subsong, self.song.subsong_count());
            return false;
        }
        self.subsong = subsong;
        true
    }

    /// Bit `n` set means channel `n` is audible. Applies to live playback too.
    pub fn set_channel_mask(&mut self, mask: u8) {
        self.channel_mask.store(mask & ALL_CHANNELS, Ordering::Relaxed);
    }

    pub fn channel_mask(&self) -> u8 {
        self.channel_mask.load(Ordering::Relaxed)
    }

    /// Mix gain multiplier, clamped to `1..=MAX_BOOST`.
    pub fn set_boost(&mut self, boost: u32) {
        self.boost = boost.clamp(1, MAX_BOOST);
    }

    pub fn boost(&self) -> u32 {
        self.boost
    }

    /// A fresh player for the current song, subsong, mask and boost.
    fn player(&self, sample_rate: u32) -> Player {
        let mut player = Player::new(self.song.clone(), Arc::clone(&self.waves), sample_rate);
        player.init_subsong(self.subsong);
        player.set_boost(self.boost);
        player.set_disable_looping(true);
        apply_mask(&mut player, self.channel_mask());
        player
    }

    // --- Real-time playback ---

    pub fn play(&mut self) {
        self.stop();

        let stop_signal = Arc::new(AtomicBool::new(false));
        let position = Arc::new(AtomicU32::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let job = AudioJob {
            song: self.song.clone(),
            waves: Arc::clone(&self.waves),
            subsong: self.subsong,
            boost: self.boost,
            mask: Arc::clone(&self.channel_mask),
            stop: Arc::clone(&stop_signal),
            position: Arc::clone(&position),
            done: Arc::clone(&finished),
        };
        let thread = std::thread::spawn(move || job.run());

        self.playback = Some(PlaybackHandle {
            stop_signal,
            position,
            finished,
            thread: Some(thread),
        });
    }

    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                if handle.join().is_err() {
                    log::warn!("audio thread panicked");
                }
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.finished.load(Ordering::Relaxed))
    }

    /// Current (position, row) of live playback.
    pub fn position(&self) -> Option<(usize, usize)> {
        let pb = self.playback.as_ref()?;
        if pb.finished.load(Ordering::Relaxed) {
            return None;
        }
        let packed = pb.position.load(Ordering::Relaxed);
        Some(((packed >> 16) as usize, (packed & 0xffff) as usize))
    }

    // --- Offline rendering ---

    /// Render until the song ends or `max_frames` frames, whichever is first.
    pub fn render_frames(&self, sample_rate: u32, max_frames: usize) -> Vec<Frame> {
        render::render_frames(self.player(sample_rate), max_frames)
    }

    pub fn render_to_wav(&self, sample_rate: u32, max_seconds: u32) -> Result<Vec<u8>, FormatError> {
        let max_frames = sample_rate as usize * max_seconds as usize;
        let frames = self.render_frames(sample_rate, max_frames);
        ahx_formats::frames_to_wav(&frames, sample_rate)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn apply_mask(player: &mut Player, mask: u8) {
    for ch in 0..4 {
        player.set_channel_mute(ch, mask & (1 << ch) == 0);
    }
}

/// Smallest block worth rendering for the device.
const MIN_WRITE: usize = 256;
/// 5 ms polls while the ring buffer drains at song end.
const DRAIN_POLLS: usize = 100;

/// Everything the audio thread owns.
struct AudioJob {
    song: Song,
    waves: Arc<Waves>,
    subsong: usize,
    boost: u32,
    mask: Arc<AtomicU8>,
    stop: Arc<AtomicBool>,
    position: Arc<AtomicU32>,
    done: Arc<AtomicBool>,
}

impl AudioJob {
    fn run(self) {
        if let Err(e) = self.stream() {
            log::warn!("playback failed: {}", e);
        }
        self.done.store(true, Ordering::Relaxed);
    }

    fn stream(&self) -> Result<(), ahx_audio::AudioError> {
        // The stream lives on this thread; cpal streams are not Send everywhere
        let mut output = CpalOutput::new()?;
        let sample_rate = output.sample_rate();

        let mut player = Player::new(self.song.clone(), Arc::clone(&self.waves), sample_rate);
        player.init_subsong(self.subsong);
        player.set_boost(self.boost);
        player.set_disable_looping(true);
        let position = Arc::clone(&self.position);
        player.set_position_callback(Box::new(move |e| {
            position.store(((e.position as u32) << 16) | (e.row as u32 & 0xffff), Ordering::Relaxed);
        }));

        output.start()?;
        let capacity = output.free_space();

        let mut left = vec![0.0f32; CHUNK_FRAMES];
        let mut right = vec![0.0f32; CHUNK_FRAMES];
        let mut frames = vec![Frame::silence(); CHUNK_FRAMES];
        while player.is_playing() && !self.stop.load(Ordering::Relaxed) {
            let space = output.free_space().min(CHUNK_FRAMES);
            if space < MIN_WRITE {
                std::thread::sleep(Duration::from_millis(2));
                continue;
            }
            apply_mask(&mut player, self.mask.load(Ordering::Relaxed));
            player.process(&mut left[..space], &mut right[..space]);
            let n = interleave(&left[..space], &right[..space], &mut frames);
            output.write(&frames[..n]);
        }

        // Let the tail drain before pausing the device
        for _ in 0..DRAIN_POLLS {
            if self.stop.load(Ordering::Relaxed) || output.free_space() >= capacity {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        output.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahx_ir::{Envelope, Instrument, PList, PListEntry, Position, Step};

    /// Two positions of a 4-row track holding one sawtooth note.
    fn short_song() -> Song {
        let mut song = Song::new("short");
        song.track_length = 4;
        let mut track = vec![Step::default(); 4];
        track[0] = Step {
            note: 25,
            instrument: 1,
            fx: 0,
            fx_param: 0,
        };
        song.tracks = vec![vec![Step::default(); 4], track];
        song.positions = vec![
            Position {
                track: [1, 0, 0, 0],
                transpose: [0; 4],
            };
            2
        ];
        song.subsongs = vec![1];
        song.instruments.push(Instrument {
            volume: 64,
            wave_length: 3,
            envelope: Envelope {
                attack_frames: 1,
                attack_volume: 64,
                decay_frames: 1,
                decay_volume: 64,
                sustain_frames: 0,
                release_frames: 1,
                release_volume: 0,
            },
            plist: PList {
                speed: 1,
                entries: vec![PListEntry {
                    waveform: 2,
                    ..Default::default()
                }],
            },
            ..Instrument::new("saw")
        });
        song
    }

    fn controller() -> Controller {
        let mut c = Controller::new();
        c.set_song(short_song());
        c
    }

    #[test]
    fn render_stops_at_song_end() {
        let c = controller();
        // The end is seen on tick 48 (2 positions * 4 rows * speed 6), which
        // starts 47 ticks of 960 samples in; the chunk holding it is kept
        let frames = c.render_frames(DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_RATE as usize * 10);
        assert!(frames.len() > 47 * 960);
        assert!(frames.len() <= 47 * 960 + CHUNK_FRAMES);
        assert!(frames.iter().any(|f| f.left != 0));
    }

    #[test]
    fn render_respects_frame_cap() {
        let c = controller();
        let frames = c.render_frames(DEFAULT_SAMPLE_RATE, 1000);
        assert_eq!(frames.len(), 1000);
    }

    #[test]
    fn channel_mask_silences_render() {
        let mut c = controller();
        c.set_channel_mask(0b1110);
        assert_eq!(c.channel_mask(), 0b1110);
        let frames = c.render_frames(DEFAULT_SAMPLE_RATE, 9600);
        assert!(frames.iter().all(|f| *f == Frame::silence()));
    }

    #[test]
    fn subsong_selection_is_checked() {
        let mut c = controller();
        assert_eq!(c.subsong_count(), 1);
        assert!(c.set_subsong(1));
        assert_eq!(c.subsong(), 1);
        assert!(!c.set_subsong(2));
        assert_eq!(c.subsong(), 1);

        // Subsong 1 starts at the last position, so it is half as long
        let whole = controller().render_frames(DEFAULT_SAMPLE_RATE, usize::MAX);
        let tail = c.render_frames(DEFAULT_SAMPLE_RATE, usize::MAX);
        assert!(tail.len() < whole.len());
    }

    #[test]
    fn render_to_wav_has_riff_header() {
        let c = controller();
        let wav = c.render_to_wav(22050, 1).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn boost_is_clamped_and_renders() {
        let mut c = controller();
        c.set_boost(0);
        assert_eq!(c.boost(), 1);
        c.set_boost(u32::MAX);
        assert_eq!(c.boost(), MAX_BOOST);

        let frames = c.render_frames(DEFAULT_SAMPLE_RATE, 1920);
        assert_eq!(frames.len(), 1920);
        assert!(frames.iter().any(|f| f.left == i16::MIN || f.left == i16::MAX));
    }

    #[test]
    fn bad_data_keeps_current_song() {
        let mut c = controller();
        assert!(c.load_ahx(b"nope").is_err());
        assert_eq!(c.song().title.as_str(), "short");
    }

    #[test]
    fn idle_controller_reports_no_position() {
        let c = controller();
        assert!(!c.is_playing());
        assert!(!c.is_finished());
        assert_eq!(c.position(), None);
    }
}
