//! Drag payload of the player tree.
//!
//! Dragged rows travel under the [`MIME_TYPE`] format as a plain sequence of
//! records with no length prefix:
//!
//! ```text
//! +---------+---------------------------------------+
//! | 1 byte  | is channel (0 or 1)                   |
//! +---------+---------------------------------------+
//! | 4 bytes | channel id, big endian   (channel)    |
//! | 2 bytes | session id, big endian   (player)     |
//! +---------+---------------------------------------+
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::DragError;
use crate::model::MimeData;
use crate::roster::{ChannelId, Session};

/// MIME format of the drag payload.
pub const MIME_TYPE: &str = "app/dragentry";

/// One dragged row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEntry {
    Channel(ChannelId),
    Player(Session),
}

impl DragEntry {
    /// Encoded size of this record in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            DragEntry::Channel(_) => 1 + 4,
            DragEntry::Player(_) => 1 + 2,
        }
    }

    /// Appends this record to `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        match *self {
            DragEntry::Channel(id) => {
                dst.put_u8(1);
                dst.put_u32(id.0);
            }
            DragEntry::Player(session) => {
                dst.put_u8(0);
                dst.put_u16(session.0);
            }
        }
    }

    /// Reads one record from the front of `src`.
    ///
    /// Any non-zero tag byte reads as "channel".
    pub fn decode(src: &mut impl Buf) -> Result<Self, DragError> {
        need(src, 1)?;
        let is_channel = src.get_u8() != 0;
        if is_channel {
            need(src, 4)?;
            Ok(DragEntry::Channel(ChannelId(src.get_u32())))
        } else {
            need(src, 2)?;
            Ok(DragEntry::Player(Session(src.get_u16())))
        }
    }
}

fn need(src: &impl Buf, needed: usize) -> Result<(), DragError> {
    if src.remaining() < needed {
        return Err(DragError::Truncated {
            needed,
            remaining: src.remaining(),
        });
    }
    Ok(())
}

/// Encodes records in order.
pub fn encode_entries(entries: &[DragEntry]) -> Bytes {
    let mut buf = BytesMut::with_capacity(entries.iter().map(DragEntry::encoded_len).sum());
    for entry in entries {
        entry.encode(&mut buf);
    }
    buf.freeze()
}

/// Reads the first dragged row out of drop data.
///
/// Only the leading record is acted on; a multi-row drag moves one object.
pub fn first_entry(data: &MimeData) -> Result<DragEntry, DragError> {
    let payload = data
        .data(MIME_TYPE)
        .ok_or_else(|| DragError::MissingFormat(MIME_TYPE.to_string()))?;
    DragEntry::decode(&mut &payload[..])
}

/// Decodes every record of a payload.
pub fn decode_entries(mut payload: &[u8]) -> Result<Vec<DragEntry>, DragError> {
    let mut entries = Vec::new();
    while payload.has_remaining() {
        entries.push(DragEntry::decode(&mut payload)?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_layout() {
        let bytes = encode_entries(&[DragEntry::Channel(ChannelId(7)), DragEntry::Player(Session(3))]);
        assert_eq!(&bytes[..], &[1, 0, 0, 0, 7, 0, 0, 3]);
    }

    #[test]
    fn test_decode_keeps_order() {
        let entries = vec![
            DragEntry::Channel(ChannelId(7)),
            DragEntry::Player(Session(3)),
        ];
        assert_eq!(decode_entries(&encode_entries(&entries)).unwrap(), entries);
        assert!(decode_entries(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_records() {
        assert_eq!(
            DragEntry::decode(&mut &[1u8, 0, 0][..]),
            Err(DragError::Truncated {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(
            DragEntry::decode(&mut &[0u8; 0][..]),
            Err(DragError::Truncated {
                needed: 1,
                remaining: 0
            })
        );
        assert!(decode_entries(&[0, 0, 3, 0]).is_err());
    }

    #[test]
    fn test_first_entry_from_mime() {
        let mut data = MimeData::new();
        assert_eq!(
            first_entry(&data),
            Err(DragError::MissingFormat(MIME_TYPE.to_string()))
        );

        data.set_data(
            MIME_TYPE,
            encode_entries(&[DragEntry::Player(Session(9)), DragEntry::Channel(ChannelId(2))]),
        );
        assert_eq!(first_entry(&data), Ok(DragEntry::Player(Session(9))));
    }

    #[test]
    fn test_nonzero_tag_is_channel() {
        assert_eq!(
            DragEntry::decode(&mut &[0xff, 0, 0, 1, 0][..]),
            Ok(DragEntry::Channel(ChannelId(256)))
        );
    }
}
