use crate::midi::cursor::ByteCursor;
use crate::midi::error::MidiResult;
use crate::midi::event::EventKind;

/// The last channel-voice status byte seen in the current track.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunningStatus(Option<u8>);

impl RunningStatus {
    pub fn get(&self) -> Option<u8> {
        self.0
    }

    pub fn set(&mut self, status: u8) {
        self.0 = Some(status);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Decode a channel-voice event whose first byte has already been read.
///
/// `first` is either a status byte (high bit set) or, under running status,
/// the event's first data byte. Returns the event (if one could be decoded)
/// and the number of bytes read from the cursor, not counting `first`.
pub fn decode_channel_event(
    cursor: &mut ByteCursor<'_>,
    first: u8,
    running_status: &mut RunningStatus,
) -> MidiResult<(Option<EventKind>, usize)> {
    let mut consumed = 0;
    let (status, data1) = if first & 0x80 == 0 {
        match running_status.get() {
            Some(status) => (status, first),
            None => {
                log::warn!(
                    "Data byte {first:#04X} at offset {} without running status, dropped",
                    cursor.position().saturating_sub(1)
                );
                return Ok((None, 0));
            }
        }
    } else {
        consumed += 1;
        (first, cursor.read_u8()?)
    };

    let channel = status & 0x0F;
    let kind = match status >> 4 {
        0x8 => {
            consumed += 1;
            EventKind::NoteOff {
                channel,
                note: data1,
                velocity: cursor.read_u8()?,
            }
        }
        0x9 => {
            consumed += 1;
            EventKind::NoteOn {
                channel,
                note: data1,
                velocity: cursor.read_u8()?,
            }
        }
        0xA => {
            consumed += 1;
            EventKind::PolyAftertouch {
                channel,
                note: data1,
                pressure: cursor.read_u8()?,
            }
        }
        0xB => {
            consumed += 1;
            EventKind::ControlChange {
                channel,
                controller: data1,
                value: cursor.read_u8()?,
            }
        }
        0xC => EventKind::ProgramChange {
            channel,
            program: data1,
        },
        0xD => EventKind::Aftertouch {
            channel,
            pressure: data1,
        },
        0xE => {
            consumed += 1;
            let data2 = cursor.read_u8()?;
            EventKind::PitchWheel {
                channel,
                value: (u16::from(data2) << 7) | u16::from(data1),
            }
        }
        // The track parser only hands over 0x00..=0xEF, and running status
        // only ever holds a byte that already decoded.
        _ => {
            log::warn!("Unexpected channel status {status:#04X}, event dropped");
            return Ok((None, consumed));
        }
    };

    running_status.set(status);
    Ok((Some(kind), consumed))
}
