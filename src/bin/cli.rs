//! ahx-cli: headless playback, WAV export and preset tool.
//!
//! Usage:
//!   ahx-cli play song.ahx [-c 13] [-s 1]
//!   ahx-cli render song.ahx -o out.wav
//!   ahx-cli preset extract song.ahx 1 bass.ahxp

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ahx_formats::{builtin, builtin_count, import_from_ahx, instrument_count, instrument_name, Preset};
use ahx_ir::{InstrumentParams, Waveform};
use ahx_master::{Controller, ALL_CHANNELS, DEFAULT_SAMPLE_RATE};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Longest offline render.
const MAX_RENDER_SECONDS: u32 = 300;

#[derive(Parser)]
#[command(name = "ahx-cli", version, about = "AHX tracker player and preset tool")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a song on the default audio device
    Play {
        file: PathBuf,
        /// Audible channels as digits, e.g. 13 for channels 1 and 3
        #[arg(short, long)]
        channels: Option<String>,
        /// Subsong (0 = main song)
        #[arg(short, long, default_value_t = 0)]
        subsong: usize,
    },
    /// Render a song to a 16-bit stereo WAV file
    Render {
        file: PathBuf,
        /// Output path, or - for stdout
        #[arg(short, long, default_value = "output.wav")]
        output: String,
        #[arg(short, long)]
        channels: Option<String>,
        #[arg(short, long, default_value_t = 0)]
        subsong: usize,
    },
    /// Print song information
    Info { file: PathBuf },
    /// Manage .ahxp instrument presets
    Preset {
        #[command(subcommand)]
        command: PresetCommand,
    },
}

#[derive(Subcommand)]
enum PresetCommand {
    /// List the instruments of a song
    List { file: PathBuf },
    /// Save one instrument (1-based) as a preset
    Extract {
        file: PathBuf,
        index: usize,
        output: PathBuf,
    },
    /// Save every instrument as a preset
    ExtractAll {
        file: PathBuf,
        dir: PathBuf,
        /// Name files {prefix}_{number}.ahxp instead of by instrument name
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Describe a preset file
    Info { file: PathBuf },
    /// Write a preset with default parameters
    Create { name: String, output: PathBuf },
    /// Write a builtin preset
    Builtin { index: usize, output: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Play {
            file,
            channels,
            subsong,
        } => {
            let mut ctrl = load(&file, channels.as_deref(), subsong)?;
            print_song(ctrl.song());
            play(&mut ctrl);
            Ok(())
        }
        Command::Render {
            file,
            output,
            channels,
            subsong,
        } => {
            let ctrl = load(&file, channels.as_deref(), subsong)?;
            render(&ctrl, &output)
        }
        Command::Info { file } => {
            let ctrl = load(&file, None, 0)?;
            print_song(ctrl.song());
            Ok(())
        }
        Command::Preset { command } => preset(command),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_song(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load(path: &Path, channels: Option<&str>, subsong: usize) -> Result<Controller> {
    let data = read_song(path)?;
    let mut ctrl = Controller::new();
    ctrl.load_ahx(&data)
        .with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "song loaded");
    if let Some(spec) = channels {
        ctrl.set_channel_mask(parse_channels(spec)?);
    }
    if !ctrl.set_subsong(subsong) {
        bail!("subsong {} out of range (song has {})", subsong, ctrl.subsong_count());
    }
    Ok(ctrl)
}

/// "13" -> channels 1 and 3 audible.
fn parse_channels(spec: &str) -> Result<u8> {
    let mut mask = 0;
    for c in spec.chars() {
        match c.to_digit(10) {
            Some(n @ 1..=4) => mask |= 1 << (n - 1),
            _ => bail!("invalid channel '{}' (expected digits 1-4)", c),
        }
    }
    Ok(mask & ALL_CHANNELS)
}

fn print_song(song: &ahx_ir::Song) {
    println!("Title:       {}", song.title);
    println!("Revision:    {}", song.revision);
    println!("Positions:   {} (restart {})", song.position_count(), song.restart);
    println!("Track len:   {}", song.track_length);
    println!("Tracks:      {}", song.tracks.len());
    println!("Subsongs:    {}", song.subsong_count());
    println!("Speed mult:  {}x", song.speed_multiplier);
    println!("Instruments: {}", song.instruments.len());
    for (i, inst) in song.instruments.iter().enumerate() {
        println!("  {:2}. {}", i + 1, inst.name);
    }
    println!();
}

fn play(ctrl: &mut Controller) {
    ctrl.play();
    println!("Playing...");

    // The thread may not have opened the device yet on the first poll
    std::thread::sleep(Duration::from_millis(50));
    while ctrl.is_playing() {
        if let Some((pos, row)) = ctrl.position() {
            print!("\rPosition {:03} | Row {:02}", pos, row);
            let _ = std::io::stdout().flush();
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    ctrl.stop();

    println!("\rDone.                      ");
}

fn render(ctrl: &Controller, output: &str) -> Result<()> {
    eprintln!("Rendering at {} Hz...", DEFAULT_SAMPLE_RATE);
    let wav = ctrl
        .render_to_wav(DEFAULT_SAMPLE_RATE, MAX_RENDER_SECONDS)
        .context("failed to encode WAV")?;
    let frames = (wav.len() - 44) / 4;
    eprintln!(
        "Rendered {} frames ({:.1} seconds)",
        frames,
        frames as f32 / DEFAULT_SAMPLE_RATE as f32
    );

    if output == "-" {
        std::io::stdout()
            .lock()
            .write_all(&wav)
            .context("failed to write WAV to stdout")?;
    } else {
        fs::write(output, &wav).with_context(|| format!("failed to write {}", output))?;
        eprintln!("Saved to {}", output);
    }
    Ok(())
}

// --- Presets ---

fn preset(command: PresetCommand) -> Result<()> {
    match command {
        PresetCommand::List { file } => {
            let data = read_song(&file)?;
            let count = instrument_count(&data)
                .with_context(|| format!("failed to read {}", file.display()))?;
            println!("Found {} instruments:\n", count);
            for i in 1..=count {
                match instrument_name(&data, i) {
                    Ok(name) => println!("  {:2}. {}", i, name),
                    Err(e) => println!("  {:2}. <{}>", i, e),
                }
            }
            Ok(())
        }
        PresetCommand::Extract {
            file,
            index,
            output,
        } => {
            let data = read_song(&file)?;
            let preset = import_from_ahx(&data, index, &source_name(&file))
                .with_context(|| format!("failed to import instrument {}", index))?;
            println!("  Name: {}", preset.name);
            println!(
                "  Waveform: {}, Volume: {}, Wave Length: {}",
                preset.params.waveform.index(),
                preset.params.volume,
                preset.params.wave_length
            );
            if let Some(plist) = &preset.params.plist {
                println!("  PList: {} entries, speed: {}", plist.len(), plist.speed);
            }
            preset
                .save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            println!("Saved to {}", output.display());
            Ok(())
        }
        PresetCommand::ExtractAll { file, dir, prefix } => extract_all(&file, &dir, prefix.as_deref()),
        PresetCommand::Info { file } => {
            let preset =
                Preset::load(&file).with_context(|| format!("failed to load {}", file.display()))?;
            print_preset(&preset);
            Ok(())
        }
        PresetCommand::Create { name, output } => {
            let preset = Preset {
                name,
                description: "Custom preset".into(),
                ..Preset::default()
            };
            preset
                .save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            println!("Created {}", output.display());
            Ok(())
        }
        PresetCommand::Builtin { index, output } => {
            if index >= builtin_count() {
                bail!("builtin index {} out of range (0-{})", index, builtin_count() - 1);
            }
            let preset = builtin(index);
            preset
                .save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            println!("Saved '{}' to {}", preset.name, output.display());
            Ok(())
        }
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn extract_all(file: &Path, dir: &Path, prefix: Option<&str>) -> Result<()> {
    let data = read_song(file)?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let count =
        instrument_count(&data).with_context(|| format!("failed to read {}", file.display()))?;
    println!("Found {} instruments\n", count);

    let source = source_name(file);
    let mut failed = 0;
    for i in 1..=count {
        let preset = match import_from_ahx(&data, i, &source) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("  {:2}. failed: {}", i, e);
                failed += 1;
                continue;
            }
        };
        let path = dir.join(preset_file_name(i, &preset.name, prefix));
        if let Err(e) = preset.save(&path) {
            eprintln!("  {:2}. failed to save {}: {}", i, path.display(), e);
            failed += 1;
            continue;
        }
        println!("  {:2}. {} -> {}", i, preset.name, path.display());
    }

    println!("\nSummary: {} succeeded, {} failed", count - failed, failed);
    if failed > 0 {
        bail!("{} instruments failed", failed);
    }
    Ok(())
}

/// `{prefix}_{nn}.ahxp`, else `{nn}_{name}.ahxp` with the name reduced to
/// `[A-Za-z0-9_-]` and spaces as underscores.
fn preset_file_name(index: usize, name: &str, prefix: Option<&str>) -> String {
    if let Some(prefix) = prefix {
        return format!("{}_{:02}.ahxp", prefix, index);
    }
    let clean: String = name
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => Some(c),
            _ => None,
        })
        .collect();
    if clean.is_empty() {
        format!("instrument_{:02}.ahxp", index)
    } else {
        format!("{:02}_{}.ahxp", index, clean)
    }
}

fn waveform_name(w: Waveform) -> &'static str {
    match w {
        Waveform::Triangle => "Triangle",
        Waveform::Sawtooth => "Sawtooth",
        Waveform::Square => "Square",
        Waveform::Noise => "Noise",
    }
}

fn print_preset(preset: &Preset) {
    let p: &InstrumentParams = &preset.params;
    let env = &p.envelope;
    println!("Name:        {}", preset.name);
    println!("Author:      {}", preset.author);
    println!("Description: {}\n", preset.description);

    println!("Parameters:");
    println!("  Waveform:    {} ({})", p.waveform.index(), waveform_name(p.waveform));
    println!("  Volume:      {}", p.volume);
    println!("  Wave Length: {}", p.wave_length);

    println!("\nEnvelope:");
    println!("  Attack:  {} frames @ volume {}", env.attack_frames, env.attack_volume);
    println!("  Decay:   {} frames @ volume {}", env.decay_frames, env.decay_volume);
    println!("  Sustain: {} frames", env.sustain_frames);
    println!("  Release: {} frames @ volume {}", env.release_frames, env.release_volume);

    if p.filter_enabled {
        println!("\nFilter Modulation:");
        println!("  Speed: {}, Range: {}-{}", p.filter_speed, p.filter_lower, p.filter_upper);
    }
    if p.square_enabled {
        println!("\nPWM Modulation:");
        println!("  Speed: {}, Range: {}-{}", p.square_speed, p.square_lower, p.square_upper);
    }
    if p.vibrato_depth > 0 {
        println!("\nVibrato:");
        println!(
            "  Delay: {}, Depth: {}, Speed: {}",
            p.vibrato_delay, p.vibrato_depth, p.vibrato_speed
        );
    }
    if p.hard_cut_release {
        println!("\nHard Cut Release: {} frames", p.hard_cut_frames);
    }
    if let Some(plist) = &p.plist {
        println!("\nPerformance List:");
        println!("  Length: {} entries", plist.len());
        println!("  Speed:  {} frames/entry", plist.speed);
        println!("\n  Entries:");
        for (i, e) in plist.entries.iter().take(10).enumerate() {
            println!(
                "    {:2}: Waveform={} Note={:2} Fixed={} FX1={}({:02X}) FX2={}({:02X})",
                i,
                e.waveform,
                e.note,
                e.fixed as u8,
                e.fx[0],
                e.fx_param[0],
                e.fx[1],
                e.fx_param[1]
            );
        }
        if plist.len() > 10 {
            println!("    ... ({} more entries)", plist.len() - 10);
        }
    }
}
