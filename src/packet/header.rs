use super::{builder::Builder, Error, Result};
use std::convert::TryFrom;

pub const HEADER_LEN: usize = 20;

const MAGIC: [u8; 3] = [0x16, 0x16, 0x01];
const FILLER: [u8; 3] = [0x00, 0x01, 0x00];
const PACKET_TYPE: [u8; 2] = [0x01, 0x01];
const SIGN_ID: [u8; 4] = [0x00, 0xc8, 0x01, 0x00];
const SUFFIX: [u8; 2] = [0x04, 0x00];

pub const BODY_LENGTH_OFFSET: usize = 3;
pub const SEQUENCE_OFFSET: usize = 5;
pub const SESSION_OFFSET: usize = 17;

/// Builds the fixed-size packet header for a body of the given unescaped length.
pub fn build_header(
    body_length: usize,
    sequence_number: u16,
    session_number: u8,
) -> Result<[u8; HEADER_LEN]> {
    let body_length =
        u16::try_from(body_length).map_err(|_| Error::ValueTooLarge { value: body_length })?;

    let fields = Builder::with_capacity(HEADER_LEN)
        .buf(&MAGIC)
        .u16(body_length)
        .u16(sequence_number)
        .buf(&FILLER)
        .buf(&PACKET_TYPE)
        .buf(&SIGN_ID)
        .u8(0x00)
        .u8(session_number)
        .buf(&SUFFIX)
        .finish();

    let mut header = [0_u8; HEADER_LEN];
    header.copy_from_slice(&fields);
    Ok(header)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_header() {
        let header = build_header(0x0131, 0x0201, 0x07).unwrap();
        assert_eq!(
            header,
            [
                0x16, 0x16, 0x01, 0x31, 0x01, 0x01, 0x02, 0x00, 0x01, 0x00, 0x01, 0x01, 0x00, 0xc8,
                0x01, 0x00, 0x00, 0x07, 0x04, 0x00,
            ]
        );
    }

    #[test]
    fn field_offsets() {
        let header = build_header(0xBEEF, 0xCAFE, 0xAB).unwrap();
        assert_eq!(
            u16::from_le_bytes([header[BODY_LENGTH_OFFSET], header[BODY_LENGTH_OFFSET + 1]]),
            0xBEEF
        );
        assert_eq!(
            u16::from_le_bytes([header[SEQUENCE_OFFSET], header[SEQUENCE_OFFSET + 1]]),
            0xCAFE
        );
        assert_eq!(header[SESSION_OFFSET], 0xAB);
    }

    #[test]
    fn empty_body_header() {
        let header: [u8; HEADER_LEN] = build_header(0, 0, 0).unwrap();
        assert_eq!(&header[..3], &MAGIC);
        assert_eq!(&header[3..7], &[0, 0, 0, 0]);
        assert_eq!(&header[HEADER_LEN - 2..], &SUFFIX);
    }

    #[test]
    fn largest_body_length() {
        let header = build_header(usize::from(u16::MAX), 0, 0).unwrap();
        assert_eq!(&header[3..5], &[0xFF, 0xFF]);
    }

    #[test]
    fn body_length_too_large() {
        assert_eq!(
            build_header(0x1_0000, 0, 0).unwrap_err(),
            Error::ValueTooLarge { value: 0x1_0000 }
        );
    }
}
