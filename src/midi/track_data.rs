use crate::midi::channel::{RunningStatus, decode_channel_event};
use crate::midi::cursor::ByteCursor;
use crate::midi::error::MidiResult;
use crate::midi::event::{EventKind, Track, TrackEvent};
use crate::midi::meta::{MetaEvent, decode_meta_event};
use crate::midi::tempo::TempoState;

/// Decoder state for a single `MTrk` chunk body.
pub struct TrackParser<'a> {
    index: usize,
    cursor: ByteCursor<'a>,
    /// Bytes left according to the chunk header.
    remaining: i64,
    tick: u64,
    running_status: RunningStatus,
    name: Option<String>,
    events: Vec<TrackEvent>,
}

impl<'a> TrackParser<'a> {
    /// Create a parser over the body of track chunk number `index`.
    pub fn new(index: usize, data: &'a [u8]) -> Self {
        TrackParser {
            index,
            cursor: ByteCursor::new(data),
            remaining: data.len() as i64,
            tick: 0,
            running_status: RunningStatus::default(),
            name: None,
            events: Vec::new(),
        }
    }

    /// Decode every event in the chunk.
    ///
    /// Tempo meta events are recorded in `tempo`, which is shared by all
    /// tracks of the file. An event running past the end of the chunk stops
    /// the track; whatever was decoded before it is kept.
    pub fn parse(mut self, tempo: &mut TempoState) -> Track {
        while self.remaining > 0 {
            match self.step(tempo) {
                Ok(consumed) => self.remaining -= consumed as i64,
                Err(err) if err.is_eof() => {
                    log::warn!(
                        "Track {} overruns its chunk, stopping after {} event(s): {err}",
                        self.index,
                        self.events.len()
                    );
                    break;
                }
                Err(err) => {
                    log::warn!("Track {} stopped: {err}", self.index);
                    break;
                }
            }
        }

        let name = self.name.unwrap_or_else(|| format!("Track {}", self.index));
        log::debug!(
            "Track {} \"{name}\": {} event(s)",
            self.index,
            self.events.len()
        );
        Track {
            name,
            events: self.events,
        }
    }

    /// One delta-time + event. Returns the bytes consumed.
    fn step(&mut self, tempo: &mut TempoState) -> MidiResult<usize> {
        let (delta, delta_bytes) = self.cursor.read_var_len()?;
        self.tick += u64::from(delta);

        let status = self.cursor.read_u8()?;
        let dispatched = match status {
            0xFF => self.meta_event(tempo)?,
            0xF0..=0xFE => {
                skip_system_event(&mut self.cursor, status, &mut self.running_status)?
            }
            _ => self.channel_event(status)?,
        };

        Ok(delta_bytes + 1 + dispatched)
    }

    fn channel_event(&mut self, first: u8) -> MidiResult<usize> {
        let (kind, consumed) =
            decode_channel_event(&mut self.cursor, first, &mut self.running_status)?;
        if let Some(kind) = kind {
            self.events.push(TrackEvent::new(self.tick, kind));
        }
        Ok(consumed)
    }

    fn meta_event(&mut self, tempo: &mut TempoState) -> MidiResult<usize> {
        let (event, consumed) = decode_meta_event(&mut self.cursor, &mut self.running_status)?;
        match event {
            MetaEvent::TrackName(name) => self.name = Some(name),
            MetaEvent::Tempo(micros) => tempo.observe(micros),
            MetaEvent::EndOfTrack => {
                self.events
                    .push(TrackEvent::new(self.tick, EventKind::TrackEnd));
            }
            MetaEvent::Ignored { .. } => {}
        }
        Ok(consumed)
    }
}

/// Skip a sysex or system message after its status byte.
///
/// Sysex and system-common bytes (below `0xF8`) cancel running status;
/// real-time bytes leave it alone. The payload is length-prefixed and
/// discarded. Returns the length field plus payload size.
pub fn skip_system_event(
    cursor: &mut ByteCursor<'_>,
    status: u8,
    running_status: &mut RunningStatus,
) -> MidiResult<usize> {
    if status < 0xF8 {
        running_status.clear();
    }
    let (length, length_bytes) = cursor.read_var_len()?;
    cursor.read(length as usize)?;
    Ok(length_bytes + length as usize)
}
