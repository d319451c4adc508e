mod midi;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use thousands::Separable;

use crate::midi::loader::load_midi_file;
use crate::midi::tempo::Tempo;
use crate::midi::utils::{format_duration_ms, parse_bpm};
use crate::midi::decode_midi;

/// Decode a Standard MIDI File into timed JSON events
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to input MIDI file
    input: PathBuf,

    /// Path to output JSON file
    output: PathBuf,

    /// Tempo in BPM, replaces every tempo event in the file
    #[arg(long, value_parser = parse_bpm)]
    bpm: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let bytes = load_midi_file(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let start = Instant::now();
    let decoded = decode_midi(&bytes, cli.bpm.map(Tempo::from_bpm))
        .with_context(|| format!("Failed to decode {}", cli.input.display()))?;
    let parse_time = start.elapsed();

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut writer = BufWriter::new(file);
    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, &decoded)?;
    } else {
        serde_json::to_writer(&mut writer, &decoded)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    let summary = decoded.summary();
    println!(
        "Decoded MIDI Summary:\n\
     - Format: {} ({} ticks per quarter note)\n\
     - Tracks: {}\n\
     - Events: {}\n\
     - Note Count: {}\n\
     - Total Ticks: {}\n\
     - Tempo: {:.2} BPM ({:.4} ms per tick)\n\
     - Total Duration: {}\n\
     - Parse Time: {:.2?}",
        decoded.header.format,
        decoded.header.division,
        decoded.tracks.len(),
        summary.events.separate_with_commas(),
        summary.note_count.separate_with_commas(),
        summary.total_ticks.separate_with_commas(),
        decoded.tempo.bpm(),
        decoded.ms_per_tick,
        format_duration_ms(summary.total_ms),
        parse_time
    );

    Ok(())
}
