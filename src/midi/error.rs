use thiserror::Error;

/// Fatal errors raised while decoding a MIDI file.
///
/// Anything that can be recovered from locally (a foreign chunk, a data byte
/// without running status, a track overrunning its chunk) is logged instead
/// and never shows up here.
#[derive(Debug, Error)]
pub enum MidiError {
    /// The cursor was asked for more bytes than remain in its buffer.
    #[error("Unexpected end of input at {position}: need {requested} byte(s), {available} left")]
    Eof {
        position: usize,
        requested: usize,
        available: usize,
    },
    /// The file does not start with `MThd`.
    #[error("Not a MIDI file (found header magic {found:02X?})")]
    HeaderMagic { found: [u8; 4] },
    /// The header chunk is too short to hold format, track count and division.
    #[error("Header chunk too short ({length} bytes, need at least 6)")]
    TruncatedHeader { length: u32 },
    /// Bit 15 of the division is set.
    #[error("SMPTE timing is not supported (division {division:#06X})")]
    Smpte { division: u16 },
    /// Zero ticks per quarter note.
    #[error("Division of 0 ticks per quarter note")]
    ZeroDivision,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MidiError {
    /// True if the error was caused by running out of input.
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof { .. })
    }
}

pub type MidiResult<T> = Result<T, MidiError>;
