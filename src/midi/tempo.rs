use crate::midi::event::Track;

/// Tempo in microseconds per quarter note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo(f64);

impl Tempo {
    /// 120 BPM.
    pub const DEFAULT: Tempo = Tempo(500_000.0);

    pub fn from_micros_per_quarter_note(micros: u32) -> Self {
        Tempo(f64::from(micros))
    }

    /// `bpm` must be finite and positive.
    pub fn from_bpm(bpm: f64) -> Self {
        Tempo(60_000_000.0 / bpm)
    }

    pub fn micros_per_quarter_note(&self) -> f64 {
        self.0
    }

    pub fn bpm(&self) -> f64 {
        60_000_000.0 / self.0
    }

    /// Milliseconds per tick for a file with `division` ticks per quarter note.
    pub fn ms_per_tick(&self, division: u16) -> f64 {
        (self.0 / f64::from(division)) / 1000.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo::DEFAULT
    }
}

/// File-wide tempo state: the last tempo meta event seen, in parse order.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TempoState {
    last_seen: Option<u32>,
}

impl TempoState {
    pub fn observe(&mut self, micros_per_quarter_note: u32) {
        self.last_seen = Some(micros_per_quarter_note);
    }

    pub fn last_seen(&self) -> Option<u32> {
        self.last_seen
    }

    /// The tempo applied to the whole file.
    ///
    /// An override always wins. Otherwise the last embedded tempo is used for
    /// every tick in the file, including ticks before it appeared.
    pub fn resolve(&self, tempo_override: Option<Tempo>) -> Tempo {
        tempo_override
            .or_else(|| self.last_seen.map(Tempo::from_micros_per_quarter_note))
            .unwrap_or_default()
    }
}

/// Stamp every event with `tick * ms_per_tick`.
pub fn annotate_times(tracks: &mut [Track], ms_per_tick: f64) {
    for event in tracks.iter_mut().flat_map(|track| track.events.iter_mut()) {
        event.time_ms = event.time as f64 * ms_per_tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::event::{EventKind, TrackEvent};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_120_bpm() {
        assert_eq!(TempoState::default().resolve(None), Tempo::DEFAULT);
        assert_eq!(Tempo::DEFAULT.bpm(), 120.0);
    }

    #[test]
    fn ms_per_tick_at_480_ppq() {
        let ms = Tempo::from_micros_per_quarter_note(500_000).ms_per_tick(480);
        assert!((ms - 1.041_666).abs() < 1e-5);
    }

    #[test]
    fn last_tempo_wins() {
        let mut state = TempoState::default();
        state.observe(400_000);
        state.observe(600_000);
        assert_eq!(state.resolve(None).micros_per_quarter_note(), 600_000.0);
    }

    #[test]
    fn override_takes_precedence() {
        let mut state = TempoState::default();
        state.observe(250_000);
        let tempo = state.resolve(Some(Tempo::from_bpm(120.0)));
        assert_eq!(tempo.micros_per_quarter_note(), 500_000.0);
    }

    #[test]
    fn annotates_every_track() {
        let mut tracks = vec![
            Track {
                name: "a".to_string(),
                events: vec![TrackEvent::new(96, EventKind::TrackEnd)],
            },
            Track {
                name: "b".to_string(),
                events: vec![
                    TrackEvent::new(0, EventKind::TrackEnd),
                    TrackEvent::new(48, EventKind::TrackEnd),
                ],
            },
        ];
        annotate_times(&mut tracks, 2.5);
        assert_eq!(tracks[0].events[0].time_ms, 240.0);
        assert_eq!(tracks[1].events[0].time_ms, 0.0);
        assert_eq!(tracks[1].events[1].time_ms, 120.0);
    }
}
