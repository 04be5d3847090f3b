//! Offline rendering.

use ahx_engine::{interleave, Frame, Player};

pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Frames rendered per player call.
pub const CHUNK_FRAMES: usize = 4096;

/// Render `player` until its song ends, capped at `max_frames`.
pub(crate) fn render_frames(mut player: Player, max_frames: usize) -> Vec<Frame> {
    let mut left = vec![0.0f32; CHUNK_FRAMES];
    let mut right = vec![0.0f32; CHUNK_FRAMES];
    let mut chunk = vec![Frame::silence(); CHUNK_FRAMES];
    let mut frames = Vec::new();

    while player.is_playing() && frames.len() < max_frames {
        let len = (max_frames - frames.len()).min(CHUNK_FRAMES);
        player.process(&mut left[..len], &mut right[..len]);
        let n = interleave(&left[..len], &right[..len], &mut chunk);
        frames.extend_from_slice(&chunk[..n]);
    }

    log::debug!(
        "rendered {} frames ({:.1}s), song end {}",
        frames.len(),
        frames.len() as f32 / player.sample_rate() as f32,
        player.song_end_reached()
    );
    frames
}
