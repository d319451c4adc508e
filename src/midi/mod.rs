pub mod channel;
pub mod cursor;
pub mod error;
pub mod event;
pub mod loader;
pub mod meta;
pub mod tempo;
pub mod track_data;
pub mod utils;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::midi::cursor::ByteCursor;
use crate::midi::error::MidiResult;
use crate::midi::event::Track;
use crate::midi::loader::{Header, parse_header, read_track_chunk};
use crate::midi::tempo::{Tempo, TempoState, annotate_times};
use crate::midi::track_data::TrackParser;

/// A fully decoded, time-annotated MIDI file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMidi {
    pub header: Header,
    /// The tempo used for every timestamp in the file.
    pub tempo: Tempo,
    pub ms_per_tick: f64,
    /// Tracks in file order, names unique.
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub events: usize,
    pub note_count: usize,
    pub total_ticks: u64,
    pub total_ms: f64,
}

/// Decode a whole MIDI file.
///
/// `tempo_override` replaces any tempo found in the file. Without one, the
/// last tempo meta event in the file (or 120 BPM) is applied to every tick.
pub fn decode_midi(bytes: &[u8], tempo_override: Option<Tempo>) -> MidiResult<DecodedMidi> {
    let mut cursor = ByteCursor::new(bytes);
    let header = parse_header(&mut cursor)?;
    log::info!(
        "Format {}, {} track(s), {} ticks per quarter note",
        header.format,
        header.track_count,
        header.division
    );

    let mut tempo_state = TempoState::default();
    let mut tracks: Vec<Track> = Vec::with_capacity(header.track_count as usize);
    for index in 0..header.track_count as usize {
        let Some(data) = read_track_chunk(&mut cursor, index)? else {
            continue;
        };
        let track = TrackParser::new(index, data).parse(&mut tempo_state);
        insert_track(&mut tracks, track);
    }

    if let (Some(_), Some(embedded)) = (tempo_override, tempo_state.last_seen()) {
        log::info!("Tempo override replaces embedded tempo of {embedded} us per quarter note");
    }
    let tempo = tempo_state.resolve(tempo_override);
    let ms_per_tick = tempo.ms_per_tick(header.division);
    log::info!(
        "Tempo {:.3} BPM ({} us per quarter note), {ms_per_tick} ms per tick",
        tempo.bpm(),
        tempo.micros_per_quarter_note()
    );
    annotate_times(&mut tracks, ms_per_tick);

    Ok(DecodedMidi {
        header,
        tempo,
        ms_per_tick,
        tracks,
    })
}

/// A later track with the same name replaces the earlier one in place.
fn insert_track(tracks: &mut Vec<Track>, track: Track) {
    match tracks.iter_mut().find(|t| t.name == track.name) {
        Some(existing) => {
            log::warn!("Duplicate track name \"{}\", keeping the later track", track.name);
            *existing = track;
        }
        None => tracks.push(track),
    }
}

impl DecodedMidi {
    pub fn summary(&self) -> Summary {
        let events = self.tracks.iter().flat_map(|t| t.events.iter());
        events.fold(
            Summary {
                events: 0,
                note_count: 0,
                total_ticks: 0,
                total_ms: 0.0,
            },
            |mut acc, event| {
                acc.events += 1;
                if event.kind.is_sounding_note() {
                    acc.note_count += 1;
                }
                acc.total_ticks = acc.total_ticks.max(event.time);
                acc.total_ms = acc.total_ms.max(event.time_ms);
                acc
            },
        )
    }
}

/// Serializes as `{ "<track name>": [events...], ... }` in file order.
impl Serialize for DecodedMidi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tracks.len()))?;
        for track in &self.tracks {
            map.serialize_entry(&track.name, &track.events)?;
        }
        map.end()
    }
}
