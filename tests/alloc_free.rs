//! Allocation-free render path tests.
//!
//! These tests verify that `Player::process()` and `SynthInstrument::process()`
//! do not allocate once playback is set up. Songs are rendered for several
//! seconds so that row changes, PList commands, modulators and song end
//! handling all run inside the check.
//!
//! Runs under plain `cargo test`; debug builds install the checking allocator.

mod common;

use std::sync::Arc;

use ahx_engine::{Player, SynthInstrument, Waves};
use ahx_ir::{InstrumentParams, Waveform};
use assert_no_alloc::{assert_no_alloc, AllocDisabler};
use common::{demo_song, step, RawInstrument, ThxBuilder};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

const RATE: u32 = 48000;
const BLOCK: usize = 512;

/// Render `player` for `seconds`, aborting on any heap allocation.
fn assert_player_alloc_free(mut player: Player, seconds: usize) {
    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];
    let blocks = RATE as usize * seconds / BLOCK;

    assert_no_alloc(|| {
        for _ in 0..blocks {
            player.process(&mut left, &mut right);
        }
    });
}

fn load(data: &[u8]) -> Player {
    let song = ahx_formats::load_ahx(data).unwrap();
    Player::new(song, Arc::new(Waves::new()), RATE)
}

#[test]
fn demo_song_alloc_free() {
    assert_player_alloc_free(load(&demo_song()), 5);
}

#[test]
fn effects_song_alloc_free() {
    let data = ThxBuilder::new("fx", 8)
        .position([1, 2, 0, 0])
        .position([2, 1, 0, 0])
        .track(&[
            (0, step(25, 1, 0x1, 2)),
            (2, step(30, 0, 0x3, 8)),
            (4, step(0, 0, 0xe, 0xc2)),
            (6, step(13, 1, 0xe, 0xd1)),
        ])
        .track(&[
            (0, step(37, 2, 0x9, 0x40)),
            (3, step(0, 0, 0xa, 0x20)),
            (5, step(0, 0, 0xc, 0x60)),
            (7, step(0, 0, 0xd, 0x00)),
        ])
        .instrument(RawInstrument::new("saw", 2).with_vibrato(1, 5, 30))
        .instrument(
            RawInstrument::new("noise", 4)
                .with_filter(5, 50, 8)
                .with_square(16, 240, 2),
        )
        .build();
    assert_player_alloc_free(load(&data), 5);
}

#[test]
fn muted_and_stopped_player_alloc_free() {
    let mut player = load(&demo_song());
    player.set_channel_mute(0, true);
    player.set_disable_looping(true);
    assert_player_alloc_free(player, 3);
}

#[test]
fn synth_instrument_alloc_free() {
    let mut synth = SynthInstrument::new(Arc::new(Waves::new()), RATE);
    let mut params = InstrumentParams::default();
    params.waveform = Waveform::Square;
    params.square_enabled = true;
    params.square_speed = 3;
    params.filter_enabled = true;
    params.filter_speed = 4;
    synth.set_params(params);

    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];

    assert_no_alloc(|| {
        for (i, note) in [36u8, 40, 43, 48, 52, 55].iter().enumerate() {
            synth.note_on(*note, 100);
            for _ in 0..20 {
                synth.process(&mut left, &mut right);
            }
            if i % 2 == 1 {
                synth.note_off(*note);
            }
        }
        synth.all_notes_off();
        for _ in 0..100 {
            synth.process(&mut left, &mut right);
        }
    });
}
