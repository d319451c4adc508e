use std::fs;
use std::path::Path;

use crate::midi::cursor::ByteCursor;
use crate::midi::error::{MidiError, MidiResult};

const HEADER_MAGIC: &[u8; 4] = b"MThd";
const TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// Contents of the `MThd` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format: u16,
    pub track_count: u16,
    /// Ticks per quarter note.
    pub division: u16,
}

/// Load a MIDI file into memory.
pub fn load_midi_file<P: AsRef<Path>>(filename: P) -> MidiResult<Vec<u8>> {
    Ok(fs::read(filename)?)
}

/// Read and verify the header chunk.
pub fn parse_header(cursor: &mut ByteCursor<'_>) -> MidiResult<Header> {
    let magic: [u8; 4] = cursor.read_array()?;
    if &magic != HEADER_MAGIC {
        return Err(MidiError::HeaderMagic { found: magic });
    }

    let length = cursor.read_u32_be()?;
    if length < 6 {
        return Err(MidiError::TruncatedHeader { length });
    }
    let format = cursor.read_u16_be()?;
    let track_count = cursor.read_u16_be()?;
    let division = cursor.read_u16_be()?;
    // Anything past the first three fields is skipped.
    cursor.read((length - 6) as usize)?;

    if division & 0x8000 != 0 {
        return Err(MidiError::Smpte { division });
    }
    if division == 0 {
        return Err(MidiError::ZeroDivision);
    }

    Ok(Header {
        format,
        track_count,
        division,
    })
}

/// Read one chunk where a track is expected.
///
/// Returns the chunk body, or `None` if the chunk is not an `MTrk` (its body
/// is skipped). Running out of file is fatal.
pub fn read_track_chunk<'a>(
    cursor: &mut ByteCursor<'a>,
    index: usize,
) -> MidiResult<Option<&'a [u8]>> {
    let magic: [u8; 4] = cursor.read_array()?;
    let length = cursor.read_u32_be()? as usize;
    let body = cursor.read(length)?;

    if &magic != TRACK_MAGIC {
        log::warn!(
            "Chunk {index} has magic {:?} instead of MTrk, skipping {length} byte(s)",
            String::from_utf8_lossy(&magic)
        );
        return Ok(None);
    }
    Ok(Some(body))
}
