use serde::Serialize;

/// The payload of a decoded track event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum EventKind {
    #[serde(rename = "noteOff")]
    NoteOff { channel: u8, note: u8, velocity: u8 },
    #[serde(rename = "noteOn")]
    NoteOn { channel: u8, note: u8, velocity: u8 },
    #[serde(rename = "polyAftertouch")]
    PolyAftertouch { channel: u8, note: u8, pressure: u8 },
    #[serde(rename = "CC")]
    ControlChange {
        channel: u8,
        #[serde(rename = "CC")]
        controller: u8,
        value: u8,
    },
    #[serde(rename = "programChange")]
    ProgramChange { channel: u8, program: u8 },
    #[serde(rename = "aftertouch")]
    Aftertouch { channel: u8, pressure: u8 },
    /// 14-bit value, 8192 is center.
    #[serde(rename = "pitchwheel")]
    PitchWheel { channel: u8, value: u16 },
    #[serde(rename = "trackEnd")]
    TrackEnd,
}

impl EventKind {
    /// Note-on with a non-zero velocity.
    pub fn is_sounding_note(&self) -> bool {
        matches!(self, EventKind::NoteOn { velocity, .. } if *velocity > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackEvent {
    /// Absolute tick from the start of the track.
    pub time: u64,
    /// Filled in by the time annotator; zero until then.
    #[serde(rename = "timeMS")]
    pub time_ms: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TrackEvent {
    pub fn new(time: u64, kind: EventKind) -> Self {
        TrackEvent {
            time,
            time_ms: 0.0,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub events: Vec<TrackEvent>,
}
