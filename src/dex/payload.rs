//! Inline data blocks embedded in a method's instruction stream.
//!
//! A payload starts with a `nop` opcode byte whose high byte is a marker:
//!
//! * packed-switch: ident(0x0100), size(u16), first_key(i32), size * target(i32)
//! * sparse-switch: ident(0x0200), size(u16), size * key(i32), size * target(i32)
//! * fill-array-data: ident(0x0300), width(u16), count(u32), data padded to a code unit

use std::fmt;
use nom::number::complete::{le_u16, le_u32};
use nom::sequence::tuple;
use serde::{Deserialize, Serialize};
use crate::dex::error::{DecodeError, ErrorKind};
use crate::dex::opcodes::NOP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    PackedSwitch,
    SparseSwitch,
    ArrayData,
}

impl PayloadKind {
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0x01 => Some(PayloadKind::PackedSwitch),
            0x02 => Some(PayloadKind::SparseSwitch),
            0x03 => Some(PayloadKind::ArrayData),
            _ => None,
        }
    }

    pub fn marker(&self) -> u8 {
        match self {
            PayloadKind::PackedSwitch => 0x01,
            PayloadKind::SparseSwitch => 0x02,
            PayloadKind::ArrayData => 0x03,
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayloadKind::PackedSwitch => "packed-switch-payload",
            PayloadKind::SparseSwitch => "sparse-switch-payload",
            PayloadKind::ArrayData => "array-payload",
        };
        write!(f, "{}", s)
    }
}

/// Checks whether a payload starts at `offset` and returns its kind and its
/// total length in bytes, header included.
///
/// Returns `Ok(None)` for ordinary instructions, including a plain `nop`.
pub fn payload_at(code: &[u8], offset: usize) -> Result<Option<(PayloadKind, usize)>, DecodeError> {
    let rest = code.get(offset..).unwrap_or(&[]);
    let (op, marker) = match rest {
        [op, marker, ..] => (*op, *marker),
        _ => return Ok(None),
    };
    if op != NOP {
        return Ok(None);
    }
    let Some(kind) = PayloadKind::from_marker(marker) else {
        return Ok(None);
    };

    let header = &rest[2..];
    let len: u64 = match kind {
        PayloadKind::PackedSwitch => {
            let (_, size) = le_u16(header)?;
            (size as u64 * 2 + 4) * 2
        }
        PayloadKind::SparseSwitch => {
            let (_, size) = le_u16(header)?;
            (size as u64 * 4 + 2) * 2
        }
        PayloadKind::ArrayData => {
            let (_, (width, count)) = tuple((le_u16, le_u32))(header)?;
            let data = width as u64 * count as u64;
            8 + data.div_ceil(2) * 2
        }
    };

    if len > rest.len() as u64 {
        fail!(TruncatedBuffer, "{} needs {} bytes, {} left", kind, len, rest.len());
    }
    Ok(Some((kind, len as usize)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_payload_length() {
        // width 2, count 3: 8 header bytes + 6 data bytes
        let code = [0x00, 0x03, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00, 1, 0, 2, 0, 3, 0];
        assert_eq!(payload_at(&code, 0).unwrap(), Some((PayloadKind::ArrayData, 14)));
    }

    #[test]
    fn array_payload_pads_odd_data() {
        // width 1, count 3: 3 data bytes padded to 4
        let code = [0x00, 0x03, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 1, 2, 3, 0];
        assert_eq!(payload_at(&code, 0).unwrap(), Some((PayloadKind::ArrayData, 12)));
    }

    #[test]
    fn switch_payload_lengths() {
        let mut packed = vec![0x00, 0x01, 0x02, 0x00];
        packed.extend_from_slice(&[0u8; 4 + 2 * 4]);
        assert_eq!(payload_at(&packed, 0).unwrap(), Some((PayloadKind::PackedSwitch, 16)));

        let mut sparse = vec![0x00, 0x02, 0x02, 0x00];
        sparse.extend_from_slice(&[0u8; 2 * 4 * 2]);
        assert_eq!(payload_at(&sparse, 0).unwrap(), Some((PayloadKind::SparseSwitch, 20)));
    }

    #[test]
    fn plain_nop_is_not_a_payload() {
        assert_eq!(payload_at(&[0x00, 0x00], 0).unwrap(), None);
        assert_eq!(payload_at(&[0x00, 0x04], 0).unwrap(), None);
        assert_eq!(payload_at(&[0x0e, 0x01], 0).unwrap(), None);
        assert_eq!(payload_at(&[0x0e, 0x00], 2).unwrap(), None);
    }

    #[test]
    fn truncated_payloads_fail() {
        // header cut short
        let e = payload_at(&[0x00, 0x03, 0x02, 0x00], 0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TruncatedBuffer);
        // body cut short: 5 targets announced, none present
        let e = payload_at(&[0x00, 0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00], 0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TruncatedBuffer);
    }

    #[test]
    fn markers_round_trip() {
        for k in [PayloadKind::PackedSwitch, PayloadKind::SparseSwitch, PayloadKind::ArrayData] {
            assert_eq!(PayloadKind::from_marker(k.marker()), Some(k));
        }
    }
}
