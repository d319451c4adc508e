use crate::midi::channel::RunningStatus;
use crate::midi::cursor::ByteCursor;
use crate::midi::error::MidiResult;

pub const META_TRACK_NAME: u8 = 0x03;
pub const META_END_OF_TRACK: u8 = 0x2F;
pub const META_TEMPO: u8 = 0x51;

/// The meta events the decoder cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEvent {
    TrackName(String),
    /// Microseconds per quarter note.
    Tempo(u32),
    EndOfTrack,
    /// Consumed and discarded.
    Ignored { meta_type: u8 },
}

/// Decode a meta event after its `0xFF` prefix.
///
/// Clears running status. Returns the event and the bytes consumed
/// (type byte, length field and payload).
pub fn decode_meta_event(
    cursor: &mut ByteCursor<'_>,
    running_status: &mut RunningStatus,
) -> MidiResult<(MetaEvent, usize)> {
    running_status.clear();

    let meta_type = cursor.read_u8()?;
    let (length, length_bytes) = cursor.read_var_len()?;
    let consumed = 1 + length_bytes + length as usize;

    if length == 0 {
        let event = if meta_type == META_END_OF_TRACK {
            MetaEvent::EndOfTrack
        } else {
            MetaEvent::Ignored { meta_type }
        };
        return Ok((event, consumed));
    }

    let payload = cursor.read(length as usize)?;
    let event = match meta_type {
        META_TRACK_NAME => MetaEvent::TrackName(String::from_utf8_lossy(payload).into_owned()),
        META_TEMPO if payload.len() > 4 => {
            log::warn!(
                "Tempo meta event with a {}-byte payload ignored",
                payload.len()
            );
            MetaEvent::Ignored { meta_type }
        }
        META_TEMPO => match payload.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)) {
            0 => {
                log::warn!("Tempo meta event of 0 us per quarter note ignored");
                MetaEvent::Ignored { meta_type }
            }
            micros => MetaEvent::Tempo(micros),
        },
        _ => MetaEvent::Ignored { meta_type },
    };
    Ok((event, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(bytes: &[u8]) -> (MetaEvent, usize, RunningStatus) {
        let mut rs = RunningStatus::default();
        rs.set(0x90);
        let mut cursor = ByteCursor::new(bytes);
        let (event, consumed) = decode_meta_event(&mut cursor, &mut rs).unwrap();
        assert_eq!(cursor.position(), consumed);
        (event, consumed, rs)
    }

    #[test]
    fn tempo_payload_is_big_endian() {
        let (event, consumed, rs) = decode(&[0x51, 0x03, 0x07, 0xA1, 0x20]);
        assert_eq!(event, MetaEvent::Tempo(500_000));
        assert_eq!(consumed, 5);
        assert_eq!(rs.get(), None);
    }

    #[test]
    fn end_of_track() {
        let (event, consumed, _) = decode(&[0x2F, 0x00]);
        assert_eq!(event, MetaEvent::EndOfTrack);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn track_name() {
        let (event, consumed, _) = decode(&[0x03, 0x05, b'P', b'i', b'a', b'n', b'o']);
        assert_eq!(event, MetaEvent::TrackName("Piano".to_string()));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn time_signature_and_unknown_types_are_skipped() {
        let (event, consumed, _) = decode(&[0x58, 0x04, 0x04, 0x02, 0x18, 0x08]);
        assert_eq!(event, MetaEvent::Ignored { meta_type: 0x58 });
        assert_eq!(consumed, 6);

        let (event, _, _) = decode(&[0x7F, 0x02, 0x00, 0x41]);
        assert_eq!(event, MetaEvent::Ignored { meta_type: 0x7F });
    }

    #[test]
    fn zero_length_non_end_of_track_is_ignored() {
        let (event, consumed, _) = decode(&[0x03, 0x00]);
        assert_eq!(event, MetaEvent::Ignored { meta_type: 0x03 });
        assert_eq!(consumed, 2);
    }

    #[test]
    fn oversized_tempo_is_ignored() {
        let (event, _, _) = decode(&[0x51, 0x05, 0, 0, 0, 0, 1]);
        assert_eq!(event, MetaEvent::Ignored { meta_type: 0x51 });
    }

    #[test]
    fn zero_tempo_is_ignored() {
        let (event, consumed, _) = decode(&[0x51, 0x03, 0x00, 0x00, 0x00]);
        assert_eq!(event, MetaEvent::Ignored { meta_type: 0x51 });
        assert_eq!(consumed, 5);
    }

    #[test]
    fn truncated_payload_is_eof() {
        let mut rs = RunningStatus::default();
        let mut cursor = ByteCursor::new(&[0x51, 0x03, 0x07]);
        assert!(decode_meta_event(&mut cursor, &mut rs).unwrap_err().is_eof());
    }
}
